//! Builder traits converting raw [`Scene`] data into model tensors.
use crate::scene::Scene;
use std::collections::HashMap;
use tch::Tensor;

/// Named tensors exchanged between builders, model, and loss.
///
/// Per-batch lifetime; maps are rebuilt for every sample and never persisted.
pub type FeatureMap = HashMap<String, Tensor>;

/// Build model input features from a simulation scene.
pub trait FeatureBuilder {
    /// Stable name identifying this builder in caches and logs.
    fn unique_name(&self) -> &'static str;

    /// Compute the input feature tensors for one scene.
    fn build_features(&self, scene: &Scene) -> FeatureMap;
}

/// Build supervision targets from a simulation scene.
pub trait TargetBuilder {
    /// Stable name identifying this builder in caches and logs.
    fn unique_name(&self) -> &'static str;

    /// Compute the target tensors for one scene.
    fn build_targets(&self, scene: &Scene) -> FeatureMap;
}

/// Build MDP step tensors (rewards, termination flags) from a simulation scene.
///
/// Used by reinforcement-style fine-tuning stages; supervised pre-training
/// ignores the MDP tensors.
pub trait MdpBuilder {
    /// Stable name identifying this builder in caches and logs.
    fn unique_name(&self) -> &'static str;

    /// Compute the MDP step tensors for one scene.
    fn build_mdp(&self, scene: &Scene) -> FeatureMap;
}
