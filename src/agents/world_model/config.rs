//! World-model agent configuration
use serde::{Deserialize, Serialize};

/// Settings shared by the world-model network, loss, and builders.
///
/// Immutable for the lifetime of the agent that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldModelConfig {
    /// Train in latent space: reconstruct the scene embedding and add the
    /// reconstruction term to the loss.
    pub latent: bool,
    /// Width of the perception scene embedding.
    pub embedding_dim: i64,
    /// Hidden width of the encoder and head MLPs.
    pub hidden_dim: i64,
    /// Weight of the L1 trajectory term in the loss.
    pub trajectory_weight: f64,
    /// Weight of the scene-reconstruction term in the loss (latent mode only).
    pub latent_weight: f64,
}

impl Default for WorldModelConfig {
    fn default() -> Self {
        Self {
            latent: false,
            embedding_dim: 256,
            hidden_dim: 512,
            trajectory_weight: 10.0,
            latent_weight: 1.0,
        }
    }
}
