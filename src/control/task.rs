/*!
 * Simulation Task - Automatic Stepping
 *
 * Background task that drives the controller on a timed cadence. Cadence is
 * a caller-side concern: the tick sequence is identical to manual stepping,
 * and stepping stops on its own once the simulation finishes.
 */

use log::{info, warn};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use super::SimulationController;

/// Control messages for the simulation task
#[derive(Debug, Clone)]
pub enum SimCommand {
    /// Change the stepping cadence
    UpdateInterval(Duration),
    /// Pause automatic stepping
    Pause,
    /// Resume automatic stepping
    Resume,
    /// Take a single manual step
    Trigger,
    /// Shut the task down
    Shutdown,
}

/// Handle to the background stepping task
pub struct SimulationTask {
    command_tx: mpsc::UnboundedSender<SimCommand>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl SimulationTask {
    /// Spawn a task that steps `controller` once per `interval`.
    pub fn spawn(controller: Arc<RwLock<SimulationController>>, interval: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            run_step_loop(controller, interval, command_rx).await;
        });

        info!("simulation task spawned with {:?} cadence", interval);

        Self {
            command_tx,
            handle: Some(handle),
        }
    }

    /// Update the stepping cadence (takes effect immediately).
    pub fn update_interval(&self, interval: Duration) {
        let _ = self.command_tx.send(SimCommand::UpdateInterval(interval));
    }

    /// Pause automatic stepping (manual triggers still work).
    pub fn pause(&self) {
        let _ = self.command_tx.send(SimCommand::Pause);
    }

    /// Resume automatic stepping.
    pub fn resume(&self) {
        let _ = self.command_tx.send(SimCommand::Resume);
    }

    /// Take a single step now.
    pub fn trigger(&self) {
        let _ = self.command_tx.send(SimCommand::Trigger);
    }

    /// Shut the task down gracefully.
    pub async fn shutdown(mut self) {
        let _ = self.command_tx.send(SimCommand::Shutdown);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("simulation task shutdown error: {}", e);
            } else {
                info!("simulation task shutdown complete");
            }
        }
    }
}

/// Core stepping loop
async fn run_step_loop(
    controller: Arc<RwLock<SimulationController>>,
    cadence: Duration,
    mut command_rx: mpsc::UnboundedReceiver<SimCommand>,
) {
    let mut active = true;
    let mut interval = tokio::time::interval(cadence);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if !active {
                    continue;
                }
                let mut ctl = controller.write();
                if ctl.is_finished() {
                    info!(
                        "simulation finished at tick {}; automatic stepping stopped",
                        ctl.clock()
                    );
                    active = false;
                } else if let Err(e) = ctl.step() {
                    // Nothing loaded yet; wait for a set.
                    log::debug!("automatic step skipped: {}", e);
                }
            }

            Some(cmd) = command_rx.recv() => {
                match cmd {
                    SimCommand::UpdateInterval(new_cadence) => {
                        info!("stepping cadence updated: {:?}", new_cadence);
                        interval = tokio::time::interval(new_cadence);
                        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                    }

                    SimCommand::Pause => {
                        info!("automatic stepping paused");
                        active = false;
                    }

                    SimCommand::Resume => {
                        info!("automatic stepping resumed");
                        active = true;
                    }

                    SimCommand::Trigger => {
                        let mut ctl = controller.write();
                        if !ctl.is_finished() {
                            if let Err(e) = ctl.step() {
                                log::debug!("manual step skipped: {}", e);
                            }
                        }
                    }

                    SimCommand::Shutdown => {
                        info!("simulation task shutting down");
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for SimulationTask {
    fn drop(&mut self) {
        // Attempt graceful shutdown if the handle still exists.
        if self.handle.is_some() {
            let _ = self.command_tx.send(SimCommand::Shutdown);
        }
    }
}
