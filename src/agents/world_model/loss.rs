//! World-model training loss
use super::{keys, WorldModelConfig};
use crate::builders::FeatureMap;
use tch::{Reduction, Tensor};

/// Scalar training loss for the world-model agent.
///
/// Weighted L1 between predicted and target trajectories, plus a weighted
/// MSE scene-reconstruction term in latent mode. Depends only on targets,
/// predictions, and the configuration.
pub fn world_model_loss(
    targets: &FeatureMap,
    predictions: &FeatureMap,
    config: &WorldModelConfig,
) -> Tensor {
    let trajectory_loss =
        predictions[keys::TRAJECTORY].l1_loss(&targets[keys::TRAJECTORY], Reduction::Mean);
    let mut loss = trajectory_loss * config.trajectory_weight;
    if config.latent {
        let reconstruction_loss = predictions[keys::SCENE_RECONSTRUCTION]
            .mse_loss(&targets[keys::SCENE_EMBEDDING], Reduction::Mean);
        loss = loss + reconstruction_loss * config.latent_weight;
    }
    loss
}

#[cfg(test)]
mod world_model_loss {
    use super::*;

    fn trajectory_map(values: &[f32]) -> FeatureMap {
        let mut map = FeatureMap::new();
        map.insert(
            keys::TRAJECTORY.to_owned(),
            Tensor::of_slice(values).reshape(&[1, 2, 3]),
        );
        map
    }

    #[test]
    fn zero_for_perfect_trajectory() {
        let config = WorldModelConfig::default();
        let targets = trajectory_map(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let predictions = trajectory_map(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            f64::from(world_model_loss(&targets, &predictions, &config)),
            0.0
        );
    }

    #[test]
    fn trajectory_term_is_weighted_l1() {
        let config = WorldModelConfig {
            trajectory_weight: 2.0,
            ..WorldModelConfig::default()
        };
        let targets = trajectory_map(&[0.0; 6]);
        let predictions = trajectory_map(&[3.0; 6]);
        // mean |3 - 0| = 3, weighted by 2
        let loss = f64::from(world_model_loss(&targets, &predictions, &config));
        assert!((loss - 6.0).abs() < 1e-6);
    }

    #[test]
    fn latent_mode_adds_reconstruction_term() {
        let config = WorldModelConfig {
            latent: true,
            trajectory_weight: 1.0,
            latent_weight: 0.5,
            ..WorldModelConfig::default()
        };
        let mut targets = trajectory_map(&[0.0; 6]);
        targets.insert(
            keys::SCENE_EMBEDDING.to_owned(),
            Tensor::of_slice(&[1.0_f32, 1.0]),
        );
        let mut predictions = trajectory_map(&[0.0; 6]);
        predictions.insert(
            keys::SCENE_RECONSTRUCTION.to_owned(),
            Tensor::of_slice(&[3.0_f32, 3.0]),
        );
        // trajectory term 0; reconstruction mse = 4, weighted by 0.5
        let loss = f64::from(world_model_loss(&targets, &predictions, &config));
        assert!((loss - 2.0).abs() < 1e-6);
    }
}
