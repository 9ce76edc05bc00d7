//! World-model agent lifecycle adapter
use super::{
    world_model_loss, WorldModelCallback, WorldModelConfig, WorldModelFeatureBuilder,
    WorldModelMdpBuilder, WorldModelNet, WorldModelTargetBuilder,
};
use crate::agents::{AgentError, OptimizerSet, TrainingAgent};
use crate::builders::{FeatureBuilder, FeatureMap, MdpBuilder, TargetBuilder};
use crate::callbacks::TrainingCallback;
use crate::checkpoint::{self, CheckpointError, CHECKPOINT_KEY_PREFIX};
use crate::scene::{SensorConfig, TrajectorySampling};
use crate::torch::{AdamConfig, BuildOptimizer};
use std::path::PathBuf;
use tch::{Device, Tensor};

/// Trainable world-model driving agent.
///
/// Thin adapter between the [`TrainingAgent`] contract and the world-model
/// network, loss, and builders. Holds the configuration, learning rate, and
/// optional checkpoint path for its lifetime.
#[derive(Debug)]
pub struct WorldModelAgent {
    config: WorldModelConfig,
    learning_rate: f64,
    checkpoint_path: Option<PathBuf>,
    trajectory_sampling: TrajectorySampling,
    device: Device,
    model: WorldModelNet,
}

impl WorldModelAgent {
    /// Create an agent with the default trajectory sampling (4 s at 0.5 s).
    #[must_use]
    pub fn new(
        config: WorldModelConfig,
        learning_rate: f64,
        checkpoint_path: Option<PathBuf>,
    ) -> Self {
        Self::with_trajectory_sampling(
            config,
            learning_rate,
            checkpoint_path,
            TrajectorySampling::default(),
        )
    }

    /// Create an agent with an explicit trajectory sampling.
    #[must_use]
    pub fn with_trajectory_sampling(
        config: WorldModelConfig,
        learning_rate: f64,
        checkpoint_path: Option<PathBuf>,
        trajectory_sampling: TrajectorySampling,
    ) -> Self {
        // The device is resolved exactly once; model construction and
        // checkpoint import both use it.
        let device = Device::cuda_if_available();
        let model = WorldModelNet::new(trajectory_sampling, &config, device);
        Self {
            config,
            learning_rate,
            checkpoint_path,
            trajectory_sampling,
            device,
            model,
        }
    }
}

impl TrainingAgent for WorldModelAgent {
    fn name(&self) -> &'static str {
        "WorldModelAgent"
    }

    fn initialize(&mut self) -> Result<(), AgentError> {
        let path = self
            .checkpoint_path
            .clone()
            .ok_or(CheckpointError::NoPathConfigured)?;
        checkpoint::load_var_store(
            self.model.var_store_mut(),
            &path,
            self.device,
            CHECKPOINT_KEY_PREFIX,
        )?;
        Ok(())
    }

    fn sensor_config(&self) -> SensorConfig {
        // `latent` was meant to gate the lidar stream off but the gating
        // was never wired up; every sensor is requested regardless.
        let _use_lidar = !self.config.latent;
        SensorConfig::all_sensors()
    }

    fn target_builders(&self) -> Vec<Box<dyn TargetBuilder>> {
        vec![Box::new(WorldModelTargetBuilder::new(
            self.trajectory_sampling,
            self.config.clone(),
        ))]
    }

    fn feature_builders(&self) -> Vec<Box<dyn FeatureBuilder>> {
        vec![Box::new(WorldModelFeatureBuilder::new(self.config.clone()))]
    }

    fn mdp_builders(&self) -> Vec<Box<dyn MdpBuilder>> {
        vec![Box::new(WorldModelMdpBuilder::new(self.config.clone()))]
    }

    fn forward(&self, features: &FeatureMap) -> FeatureMap {
        self.model.forward(features)
    }

    fn compute_loss(
        &self,
        _features: &FeatureMap,
        targets: &FeatureMap,
        predictions: &FeatureMap,
    ) -> Tensor {
        world_model_loss(targets, predictions, &self.config)
    }

    fn optimizers(&self) -> Result<OptimizerSet, AgentError> {
        let optimizer_config = AdamConfig {
            learning_rate: self.learning_rate,
            ..AdamConfig::default()
        };
        let optimizer = optimizer_config.build_optimizer(self.model.var_store())?;
        Ok(OptimizerSet::Single(optimizer))
    }

    fn training_callbacks(&self) -> Vec<Box<dyn TrainingCallback>> {
        vec![Box::new(WorldModelCallback::new(self.config.clone()))]
    }
}
