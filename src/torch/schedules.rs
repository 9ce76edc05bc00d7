//! Parameter schedules --- functions of the global step count during training.
use serde::{Deserialize, Serialize};

/// Selects the learning rate as a function of the elapsed step count.
///
/// The harness queries the schedule once per optimizer step and rebuilds the
/// optimizer parameter groups when the rate changes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum LearningRateSchedule {
    Constant(f64),
    LinearAnnealed {
        start: f64,
        end: f64,
        /// Number of steps to reach the `end` value.
        period: u64,
    },
}

impl Default for LearningRateSchedule {
    fn default() -> Self {
        Self::Constant(1e-4)
    }
}

impl LearningRateSchedule {
    #[must_use]
    pub fn learning_rate(&self, global_step: u64) -> f64 {
        use LearningRateSchedule::{Constant, LinearAnnealed};
        match self {
            Constant(rate) => *rate,
            LinearAnnealed { start, end, period } => {
                (global_step as f64 / *period as f64).min(1.0) * (end - start) + start
            }
        }
    }
}

#[cfg(test)]
mod learning_rate_schedule {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1e-2)]
    #[case(50, 5.05e-3)]
    #[case(100, 1e-4)]
    #[case(200, 1e-4)]
    fn linear_annealed(#[case] step: u64, #[case] expected: f64) {
        let schedule = LearningRateSchedule::LinearAnnealed {
            start: 1e-2,
            end: 1e-4,
            period: 100,
        };
        assert!((schedule.learning_rate(step) - expected).abs() < 1e-12);
    }

    #[test]
    fn constant() {
        let schedule = LearningRateSchedule::Constant(0.5);
        assert_eq!(schedule.learning_rate(0), 0.5);
        assert_eq!(schedule.learning_rate(1_000_000), 0.5);
    }
}
