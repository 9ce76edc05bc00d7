//! Trajectory world-model agent.
//!
//! Predicts the ego vehicle's future trajectory from its kinematic status
//! and a perception scene embedding. In latent mode the model additionally
//! reconstructs the scene embedding and the loss gains a reconstruction
//! term.
mod agent;
mod builders;
mod callback;
mod config;
mod loss;
mod model;

pub use agent::WorldModelAgent;
pub use builders::{WorldModelFeatureBuilder, WorldModelMdpBuilder, WorldModelTargetBuilder};
pub use callback::WorldModelCallback;
pub use config::WorldModelConfig;
pub use loss::world_model_loss;
pub use model::WorldModelNet;

/// Tensor names shared by the builders, the model, and the loss.
pub mod keys {
    /// Input: ego kinematic status vector.
    pub const EGO_STATUS: &str = "ego_status";
    /// Input and (in latent mode) target: perception scene embedding.
    pub const SCENE_EMBEDDING: &str = "scene_embedding";
    /// Output and target: future ego poses, `[.., num_poses, 3]`.
    pub const TRAJECTORY: &str = "trajectory";
    /// Output in latent mode: reconstructed scene embedding.
    pub const SCENE_RECONSTRUCTION: &str = "scene_reconstruction";
    /// MDP tensor: per-step rewards.
    pub const REWARD: &str = "reward";
    /// MDP tensor: per-step termination flags.
    pub const DONE: &str = "done";
}
