/*!
 * Controller Tests
 * Lifecycle, validation and determinism of the simulation controller
 */

use mlfq_sim::{
    ConfigError, ProcessSet, ProcessSpec, SchedulerConfig, SimError, SimulationController,
    StateError,
};
use pretty_assertions::assert_eq;

#[test]
fn load_rejects_invalid_sets() {
    let mut ctl = SimulationController::new();

    assert_eq!(
        ctl.load(ProcessSet::new()),
        Err(ConfigError::EmptyProcessSet)
    );

    assert_eq!(
        ctl.load(ProcessSet::from_specs(vec![
            ProcessSpec::new("P1", 0, 5, 1),
            ProcessSpec::new("P1", 2, 3, 2),
        ])),
        Err(ConfigError::DuplicateName("P1".into()))
    );

    assert_eq!(
        ctl.load(ProcessSet::from_specs(vec![ProcessSpec::new("P1", 0, 0, 1)])),
        Err(ConfigError::ZeroBurst("P1".into()))
    );

    assert_eq!(
        ctl.load(ProcessSet::from_specs(vec![ProcessSpec::new("P1", 0, 5, 5)])),
        Err(ConfigError::PriorityOutOfRange {
            name: "P1".into(),
            priority: 5,
            bands: 4,
        })
    );

    // A failed load leaves nothing behind.
    assert_eq!(ctl.step().unwrap_err(), StateError::NoProcessSet);
}

#[test]
fn configure_is_rejected_mid_run() {
    let mut ctl = SimulationController::new();
    ctl.load(ProcessSet::demo()).unwrap();
    ctl.step().unwrap();
    ctl.step().unwrap();

    let err = ctl.configure(SchedulerConfig::default()).unwrap_err();
    assert!(matches!(err, SimError::State(StateError::MidRun)));

    // Reset clears the way.
    ctl.reset();
    ctl.configure(SchedulerConfig::uniform(3, 4, 5, 6)).unwrap();
    assert_eq!(ctl.config().bands(), 3);
    assert_eq!(ctl.snapshot().levels.len(), 3);
    assert_eq!(ctl.clock(), 0);
}

#[test]
fn configure_checks_loaded_priorities_against_new_bands() {
    let mut ctl = SimulationController::new();
    // The demo set uses priorities up to 3.
    ctl.load(ProcessSet::demo()).unwrap();

    let err = ctl.configure(SchedulerConfig::uniform(2, 3, 5, 6)).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::PriorityOutOfRange { .. })
    ));

    // The rejected swap leaves the old configuration in place.
    assert_eq!(ctl.config().bands(), 4);
}

#[test]
fn invalid_parameters_never_reach_the_engine() {
    let mut ctl = SimulationController::new();
    ctl.load(ProcessSet::demo()).unwrap();

    let err = ctl.configure(SchedulerConfig::uniform(3, 0, 5, 6)).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::ZeroQuantum { band: 1 })
    ));
}

#[test]
fn reset_restores_the_initial_state() {
    let mut ctl = SimulationController::new();
    ctl.load(ProcessSet::demo()).unwrap();
    for _ in 0..10 {
        ctl.step().unwrap();
    }

    ctl.reset();
    let snap = ctl.snapshot();
    assert_eq!(snap.clock, 0);
    assert!(!snap.finished);
    assert!(snap.running.is_none());
    assert!(snap.levels.iter().all(|level| level.queue.is_empty()));
    assert!(ctl.trace().is_empty());
}

#[test]
fn identical_runs_are_tick_for_tick_identical() {
    let mut ctl = SimulationController::new();
    ctl.load(ProcessSet::demo()).unwrap();

    let mut first = Vec::new();
    while !ctl.is_finished() {
        first.push(ctl.step().unwrap());
    }
    let first_trace = ctl.trace().to_vec();
    let first_metrics = ctl.stats().unwrap();

    ctl.reset();
    let mut second = Vec::new();
    while !ctl.is_finished() {
        second.push(ctl.step().unwrap());
    }

    assert_eq!(first, second);
    assert_eq!(first_trace, ctl.trace().to_vec());
    assert_eq!(first_metrics, ctl.stats().unwrap());
}

#[test]
fn stats_are_undefined_until_completion() {
    let mut ctl = SimulationController::new();
    assert_eq!(ctl.stats().unwrap_err(), StateError::Incomplete);

    ctl.load(ProcessSet::demo()).unwrap();
    ctl.step().unwrap();
    assert_eq!(ctl.stats().unwrap_err(), StateError::Incomplete);

    ctl.run_to_completion().unwrap();
    assert!(ctl.stats().is_ok());
}

#[test]
fn randomized_sets_load_cleanly() {
    let mut ctl = SimulationController::new();
    ctl.load(ProcessSet::randomize(10, 4, 7)).unwrap();

    let metrics = ctl.run_to_completion().unwrap();
    assert_eq!(metrics.per_process.len(), 10);
    assert!(ctl.is_finished());
}

#[test]
fn snapshots_serialize_for_external_consumers() {
    let mut ctl = SimulationController::new();
    ctl.load(ProcessSet::demo()).unwrap();
    ctl.step().unwrap();

    // Between ticks the snapshot describes the upcoming tick.
    let value = serde_json::to_value(ctl.snapshot()).unwrap();
    assert_eq!(value["clock"], 1);
    assert_eq!(value["finished"], false);
    assert!(value["levels"].as_array().unwrap().len() == 4);

    ctl.run_to_completion().unwrap();
    let stats = serde_json::to_value(ctl.stats().unwrap()).unwrap();
    assert!(stats["avg_waiting"].is_number());
    assert_eq!(stats["per_process"].as_array().unwrap().len(), 7);
}
