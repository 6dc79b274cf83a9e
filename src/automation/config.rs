//! Automation run configuration, validated with accumulated violations.

use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single reason a start request was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("tick total must be greater than zero")]
    ZeroTotal,

    #[error("tick interval must be greater than zero")]
    ZeroInterval,

    #[error("automation is already running")]
    AlreadyRunning,
}

/// Start rejection carrying every violation at once, so a host can report
/// all of them in a single round trip.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid automation config: {}", summarize(.violations))]
pub struct InvalidAutomationConfig {
    pub violations: Vec<ConfigViolation>,
}

fn summarize(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parameters for one automation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutomationConfig {
    /// Target number of randomizations, > 0.
    pub total: u32,
    /// Timer period between scheduled ticks, > 0.
    pub interval: Duration,
}

impl AutomationConfig {
    pub fn new(total: u32, interval_ms: u64) -> Self {
        Self {
            total,
            interval: Duration::from_millis(interval_ms),
        }
    }

    /// Check the config itself, accumulating ALL violations rather than
    /// stopping at the first.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let checks = vec![
            if self.total == 0 {
                Validation::fail(ConfigViolation::ZeroTotal)
            } else {
                Validation::success(())
            },
            if self.interval.is_zero() {
                Validation::fail(ConfigViolation::ZeroInterval)
            } else {
                Validation::success(())
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}
