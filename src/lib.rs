//! A training library for learned driving policies in simulation.
//!
//! The central seam is the [`TrainingAgent`] trait: the exact capability set
//! an external training harness needs from a policy under training. The
//! harness asks the agent for feature/target/MDP builders, runs them over
//! simulation [`Scene`]s, calls [`TrainingAgent::forward`] and
//! [`TrainingAgent::compute_loss`], steps the optimizers returned by
//! [`TrainingAgent::optimizers`], and periodically invokes the agent's
//! training callbacks.
//!
//! [`WorldModelAgent`] is the concrete trajectory-prediction agent shipped
//! with the crate.
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::missing_const_for_fn)] // has some false positives
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)]
pub mod agents;
pub mod builders;
pub mod callbacks;
pub mod checkpoint;
mod error;
pub mod logging;
pub mod scene;
pub mod torch;

pub use agents::{AgentError, OptimizerSet, TrainingAgent, WorldModelAgent, WorldModelConfig};
pub use builders::{FeatureBuilder, FeatureMap, MdpBuilder, TargetBuilder};
pub use callbacks::{TrainingBatch, TrainingCallback};
pub use error::DriveError;
pub use scene::{Scene, SensorConfig, TrajectorySampling};
