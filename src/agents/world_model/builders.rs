//! Feature, target, and MDP builders for the world-model agent
use super::{keys, WorldModelConfig};
use crate::builders::{FeatureBuilder, FeatureMap, MdpBuilder, TargetBuilder};
use crate::scene::{Scene, TrajectorySampling};
use tch::Tensor;

/// Builds `ego_status` and `scene_embedding` input features from a scene.
#[derive(Debug, Clone)]
pub struct WorldModelFeatureBuilder {
    config: WorldModelConfig,
}

impl WorldModelFeatureBuilder {
    #[must_use]
    pub const fn new(config: WorldModelConfig) -> Self {
        Self { config }
    }
}

impl FeatureBuilder for WorldModelFeatureBuilder {
    fn unique_name(&self) -> &'static str {
        "world_model_features"
    }

    fn build_features(&self, scene: &Scene) -> FeatureMap {
        let status = &scene.ego_status;
        let mut ego = Vec::with_capacity(8);
        ego.extend_from_slice(&status.velocity);
        ego.extend_from_slice(&status.acceleration);
        ego.extend_from_slice(&status.command.one_hot());

        assert_eq!(
            scene.scene_embedding.len() as i64,
            self.config.embedding_dim,
            "scene embedding width does not match the configured model width"
        );

        let mut features = FeatureMap::new();
        features.insert(keys::EGO_STATUS.to_owned(), Tensor::of_slice(&ego));
        features.insert(
            keys::SCENE_EMBEDDING.to_owned(),
            Tensor::of_slice(&scene.scene_embedding),
        );
        features
    }
}

/// Builds the `trajectory` supervision target by resampling a scene's
/// future poses at the agent's trajectory sampling.
#[derive(Debug, Clone)]
pub struct WorldModelTargetBuilder {
    trajectory_sampling: TrajectorySampling,
    config: WorldModelConfig,
}

impl WorldModelTargetBuilder {
    #[must_use]
    pub const fn new(trajectory_sampling: TrajectorySampling, config: WorldModelConfig) -> Self {
        Self {
            trajectory_sampling,
            config,
        }
    }
}

impl TargetBuilder for WorldModelTargetBuilder {
    fn unique_name(&self) -> &'static str {
        "world_model_targets"
    }

    #[allow(clippy::cast_possible_truncation)]
    fn build_targets(&self, scene: &Scene) -> FeatureMap {
        let stride = self.trajectory_sampling.scene_stride();
        let num_poses = self.trajectory_sampling.num_poses() as usize;
        assert!(
            scene.future_poses.len() >= stride * num_poses,
            "scene records {} future poses but the sampling horizon needs {}",
            scene.future_poses.len(),
            stride * num_poses
        );

        let mut coords = Vec::with_capacity(num_poses * 3);
        for i in 0..num_poses {
            let pose = &scene.future_poses[stride * (i + 1) - 1];
            coords.push(pose.x as f32);
            coords.push(pose.y as f32);
            coords.push(pose.heading as f32);
        }

        let mut targets = FeatureMap::new();
        targets.insert(
            keys::TRAJECTORY.to_owned(),
            Tensor::of_slice(&coords).reshape(&[num_poses as i64, 3]),
        );
        if self.config.latent {
            // Reconstruction target for the latent loss term.
            targets.insert(
                keys::SCENE_EMBEDDING.to_owned(),
                Tensor::of_slice(&scene.scene_embedding),
            );
        }
        targets
    }
}

/// Builds per-step `reward` and `done` tensors from a scene's closed-loop
/// reward annotations.
#[derive(Debug, Clone)]
pub struct WorldModelMdpBuilder {
    #[allow(dead_code)] // reserved for reward shaping options
    config: WorldModelConfig,
}

impl WorldModelMdpBuilder {
    #[must_use]
    pub const fn new(config: WorldModelConfig) -> Self {
        Self { config }
    }
}

impl MdpBuilder for WorldModelMdpBuilder {
    fn unique_name(&self) -> &'static str {
        "world_model_mdp"
    }

    fn build_mdp(&self, scene: &Scene) -> FeatureMap {
        let mut done = vec![0.0_f32; scene.step_rewards.len()];
        if let Some(last) = done.last_mut() {
            *last = 1.0;
        }

        let mut mdp = FeatureMap::new();
        mdp.insert(keys::REWARD.to_owned(), Tensor::of_slice(&scene.step_rewards));
        mdp.insert(keys::DONE.to_owned(), Tensor::of_slice(&done));
        mdp
    }
}

#[cfg(test)]
#[allow(clippy::module_inception)]
mod builders {
    use super::*;
    use crate::scene::{DrivingCommand, EgoPose, EgoStatus, SCENE_DT};

    fn small_config(latent: bool) -> WorldModelConfig {
        WorldModelConfig {
            latent,
            embedding_dim: 4,
            ..WorldModelConfig::default()
        }
    }

    fn test_scene() -> Scene {
        // Future poses at SCENE_DT intervals with x equal to the elapsed
        // time, so resampled x values are easy to predict.
        let future_poses = (1..=40)
            .map(|i| EgoPose {
                x: f64::from(i) * SCENE_DT,
                y: 0.0,
                heading: 0.1,
            })
            .collect();
        Scene {
            ego_status: EgoStatus {
                velocity: [2.0, 0.0],
                acceleration: [0.5, 0.0],
                command: DrivingCommand::Straight,
            },
            scene_embedding: vec![0.25; 4],
            future_poses,
            step_rewards: vec![1.0, 0.5, 0.0],
        }
    }

    #[test]
    fn feature_shapes_and_encoding() {
        let builder = WorldModelFeatureBuilder::new(small_config(false));
        let features = builder.build_features(&test_scene());

        assert_eq!(features[keys::EGO_STATUS].size(), vec![8]);
        assert_eq!(features[keys::SCENE_EMBEDDING].size(), vec![4]);
        // velocity, acceleration, then the one-hot straight command
        assert_eq!(
            Vec::<f32>::from(&features[keys::EGO_STATUS]),
            vec![2.0, 0.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn targets_resample_future_poses() {
        let builder =
            WorldModelTargetBuilder::new(TrajectorySampling::default(), small_config(false));
        let targets = builder.build_targets(&test_scene());

        let trajectory = &targets[keys::TRAJECTORY];
        assert_eq!(trajectory.size(), vec![8, 3]);
        // x of pose i is its sample time: 0.5, 1.0, ..., 4.0
        let xs = Vec::<f32>::from(&trajectory.select(1, 0));
        for (i, x) in xs.iter().enumerate() {
            let expected = 0.5 * (i + 1) as f32;
            assert!((x - expected).abs() < 1e-6, "pose {}: {} != {}", i, x, expected);
        }
        assert!(!targets.contains_key(keys::SCENE_EMBEDDING));
    }

    #[test]
    fn latent_targets_include_embedding() {
        let builder =
            WorldModelTargetBuilder::new(TrajectorySampling::default(), small_config(true));
        let targets = builder.build_targets(&test_scene());
        assert_eq!(
            Vec::<f32>::from(&targets[keys::SCENE_EMBEDDING]),
            vec![0.25; 4]
        );
    }

    #[test]
    #[should_panic(expected = "sampling horizon")]
    fn short_scene_is_rejected() {
        let builder =
            WorldModelTargetBuilder::new(TrajectorySampling::default(), small_config(false));
        let mut scene = test_scene();
        scene.future_poses.truncate(10);
        let _ = builder.build_targets(&scene);
    }

    #[test]
    fn mdp_rewards_and_termination() {
        let builder = WorldModelMdpBuilder::new(small_config(false));
        let mdp = builder.build_mdp(&test_scene());

        assert_eq!(Vec::<f32>::from(&mdp[keys::REWARD]), vec![1.0, 0.5, 0.0]);
        assert_eq!(Vec::<f32>::from(&mdp[keys::DONE]), vec![0.0, 0.0, 1.0]);
    }
}
