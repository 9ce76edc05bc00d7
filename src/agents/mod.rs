//! Trainable agents and the harness-facing contract they satisfy.
pub mod world_model;

pub use world_model::{WorldModelAgent, WorldModelConfig};

use crate::builders::{FeatureBuilder, FeatureMap, MdpBuilder, TargetBuilder};
use crate::callbacks::TrainingCallback;
use crate::checkpoint::CheckpointError;
use crate::scene::SensorConfig;
use crate::torch::LearningRateSchedule;
use std::fmt;
use tch::{COptimizer, TchError, Tensor};
use thiserror::Error;

/// Error from an agent lifecycle operation.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("error importing checkpoint")]
    Checkpoint(#[from] CheckpointError),
    #[error(transparent)]
    Torch(#[from] TchError),
}

/// Optimizers returned by an agent, with an optional learning-rate schedule.
///
/// The schedule slot exists for agents that anneal their rate; agents that
/// do not simply return [`OptimizerSet::Single`].
pub enum OptimizerSet {
    Single(COptimizer),
    Scheduled {
        optimizer: COptimizer,
        schedule: LearningRateSchedule,
    },
}

impl fmt::Debug for OptimizerSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // COptimizer has no Debug impl.
        match self {
            Self::Single(_) => f.debug_tuple("Single").finish(),
            Self::Scheduled { schedule, .. } => f
                .debug_struct("Scheduled")
                .field("schedule", schedule)
                .finish(),
        }
    }
}

/// The exact capability set a training harness requires from an agent.
///
/// One trait, no inheritance chain: a type implementing `TrainingAgent` can
/// be driven through the full train/evaluate lifecycle. Apart from
/// [`initialize`](Self::initialize), every method is a synchronous
/// pass-through or simple construction with no side effects.
pub trait TrainingAgent {
    /// Stable identifier for this agent type.
    ///
    /// Idempotent: the same string across repeated calls and across
    /// instances of the same concrete type.
    fn name(&self) -> &'static str;

    /// Load the configured checkpoint into the agent's parameters.
    ///
    /// Fails if no checkpoint path is configured, the file is unreadable,
    /// or the checkpoint keys do not align with the current parameters.
    fn initialize(&mut self) -> Result<(), AgentError>;

    /// Which sensor streams the harness should load for this agent.
    fn sensor_config(&self) -> SensorConfig;

    /// Builders producing supervision targets from scenes.
    ///
    /// Freshly constructed on every call.
    fn target_builders(&self) -> Vec<Box<dyn TargetBuilder>>;

    /// Builders producing model input features from scenes.
    ///
    /// Freshly constructed on every call.
    fn feature_builders(&self) -> Vec<Box<dyn FeatureBuilder>>;

    /// Builders producing MDP step tensors from scenes.
    ///
    /// Freshly constructed on every call.
    fn mdp_builders(&self) -> Vec<Box<dyn MdpBuilder>>;

    /// Run the model on a batch of input features.
    fn forward(&self, features: &FeatureMap) -> FeatureMap;

    /// Compute the scalar training loss for a batch.
    ///
    /// `features` is part of the harness signature but the loss depends
    /// only on targets, predictions, and the agent's configuration.
    fn compute_loss(
        &self,
        features: &FeatureMap,
        targets: &FeatureMap,
        predictions: &FeatureMap,
    ) -> Tensor;

    /// Construct the optimizers for this agent's trainable parameters.
    fn optimizers(&self) -> Result<OptimizerSet, AgentError>;

    /// Hooks the harness invokes during the training loop.
    fn training_callbacks(&self) -> Vec<Box<dyn TrainingCallback>>;
}
