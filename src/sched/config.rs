/*!
 * Scheduler Configuration
 * Band quanta and the aging/demotion thresholds, validated up front
 */

use serde::{Deserialize, Serialize};

use crate::core::errors::ConfigError;
use crate::core::types::{Band, Tick};

/// Band count of the default configuration.
pub const DEFAULT_BANDS: usize = 4;
/// Per-band quantum of the default configuration, in ticks.
pub const DEFAULT_QUANTUM: Tick = 3;
/// Consecutive waiting ticks before a process is promoted one band.
pub const DEFAULT_AGING_THRESHOLD: Tick = 5;
/// Accumulated processing ticks before a process is demoted one band.
pub const DEFAULT_DEMOTION_THRESHOLD: Tick = 6;

/// Scheduler parameters.
///
/// One quantum per band, highest band first; all values must be positive.
/// Invalid configurations are rejected here, never discovered mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub quanta: Vec<Tick>,
    pub aging_threshold: Tick,
    pub demotion_threshold: Tick,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            quanta: vec![DEFAULT_QUANTUM; DEFAULT_BANDS],
            aging_threshold: DEFAULT_AGING_THRESHOLD,
            demotion_threshold: DEFAULT_DEMOTION_THRESHOLD,
        }
    }
}

impl SchedulerConfig {
    /// Uniform quantum across `bands` priority bands.
    pub fn uniform(
        bands: usize,
        quantum: Tick,
        aging_threshold: Tick,
        demotion_threshold: Tick,
    ) -> Self {
        Self {
            quanta: vec![quantum; bands],
            aging_threshold,
            demotion_threshold,
        }
    }

    /// Number of priority bands.
    pub fn bands(&self) -> usize {
        self.quanta.len()
    }

    /// Quantum of one band (1 = highest priority).
    pub(crate) fn quantum(&self, band: Band) -> Tick {
        self.quanta[band - 1]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quanta.is_empty() {
            return Err(ConfigError::NoBands);
        }
        for (i, &quantum) in self.quanta.iter().enumerate() {
            if quantum == 0 {
                return Err(ConfigError::ZeroQuantum { band: i + 1 });
            }
        }
        if self.aging_threshold == 0 {
            return Err(ConfigError::ZeroAgingThreshold);
        }
        if self.demotion_threshold == 0 {
            return Err(ConfigError::ZeroDemotionThreshold);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = SchedulerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bands(), DEFAULT_BANDS);
        assert_eq!(config.quantum(1), DEFAULT_QUANTUM);
    }

    #[test]
    fn validation_rejects_degenerate_parameters() {
        assert_eq!(
            SchedulerConfig::uniform(0, 3, 5, 6).validate(),
            Err(ConfigError::NoBands)
        );
        assert_eq!(
            SchedulerConfig::uniform(2, 0, 5, 6).validate(),
            Err(ConfigError::ZeroQuantum { band: 1 })
        );
        assert_eq!(
            SchedulerConfig::uniform(2, 3, 0, 6).validate(),
            Err(ConfigError::ZeroAgingThreshold)
        );
        assert_eq!(
            SchedulerConfig::uniform(2, 3, 5, 0).validate(),
            Err(ConfigError::ZeroDemotionThreshold)
        );
    }

    #[test]
    fn zero_quantum_reports_offending_band() {
        let config = SchedulerConfig {
            quanta: vec![3, 3, 0],
            aging_threshold: 5,
            demotion_threshold: 6,
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroQuantum { band: 3 }));
    }
}
