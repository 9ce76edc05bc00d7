//! Torch glue: optimizer wrappers and parameter schedules
pub mod optimizers;
pub mod schedules;

pub use optimizers::{
    AdamConfig, BaseOptimizer, BuildOptimizer, OnceOptimizer, OptimizerStepError, SgdConfig,
};
pub use schedules::LearningRateSchedule;
