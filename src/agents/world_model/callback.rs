//! Training callback for the world-model agent
use super::{keys, WorldModelConfig};
use crate::callbacks::{TrainingBatch, TrainingCallback};
use crate::logging::{Event, Logger};
use tch::{Kind, Tensor};

/// Logs world-model training metrics through the harness logger.
///
/// Per batch: the loss, the average displacement error between predicted
/// and target trajectories, and (in latent mode) the scene-reconstruction
/// error.
#[derive(Debug, Clone)]
pub struct WorldModelCallback {
    config: WorldModelConfig,
}

impl WorldModelCallback {
    #[must_use]
    pub const fn new(config: WorldModelConfig) -> Self {
        Self { config }
    }
}

/// Mean Euclidean distance between predicted and target xy positions.
fn average_displacement_error(predictions: &Tensor, targets: &Tensor) -> f64 {
    let error = tch::no_grad(|| {
        (predictions - targets)
            .narrow(-1, 0, 2)
            .square()
            .sum_dim_intlist(&[-1i64][..], false, Kind::Float)
            .sqrt()
            .mean(Kind::Float)
    });
    f64::from(error)
}

impl TrainingCallback for WorldModelCallback {
    fn on_batch_end(&mut self, _epoch: u64, batch: &TrainingBatch, logger: &mut dyn Logger) {
        logger.log(Event::Batch, "loss", batch.loss.into());

        if let (Some(predicted), Some(target)) = (
            batch.predictions.get(keys::TRAJECTORY),
            batch.targets.get(keys::TRAJECTORY),
        ) {
            logger.log(
                Event::Batch,
                "trajectory_ade",
                average_displacement_error(predicted, target).into(),
            );
        }

        if self.config.latent {
            if let (Some(reconstruction), Some(embedding)) = (
                batch.predictions.get(keys::SCENE_RECONSTRUCTION),
                batch.targets.get(keys::SCENE_EMBEDDING),
            ) {
                let error = tch::no_grad(|| {
                    reconstruction.mse_loss(embedding, tch::Reduction::Mean)
                });
                logger.log(Event::Batch, "reconstruction_error", f64::from(error).into());
            }
        }

        logger.done(Event::Batch);
    }

    fn on_epoch_end(&mut self, _epoch: u64, logger: &mut dyn Logger) {
        logger.done(Event::Epoch);
    }
}

#[cfg(test)]
mod world_model_callback {
    use super::*;
    use crate::builders::FeatureMap;
    use crate::logging::Loggable;

    /// Records logged scalars for assertions.
    #[derive(Debug, Default)]
    struct RecordingLogger(Vec<(Event, String, f64)>);

    impl Logger for RecordingLogger {
        fn log(&mut self, event: Event, name: &str, value: Loggable) {
            if let Loggable::Scalar(value) = value {
                self.0.push((event, name.to_owned(), value));
            }
        }

        fn done(&mut self, _: Event) {}
    }

    fn trajectory_map(values: &[f32]) -> FeatureMap {
        let mut map = FeatureMap::new();
        map.insert(
            keys::TRAJECTORY.to_owned(),
            Tensor::of_slice(values).reshape(&[1, 2, 3]),
        );
        map
    }

    #[test]
    fn logs_loss_and_displacement_error() {
        let mut callback = WorldModelCallback::new(WorldModelConfig::default());
        let features = FeatureMap::new();
        // Both poses are displaced by (3, 4): ADE = 5.
        let targets = trajectory_map(&[0.0; 6]);
        let predictions = trajectory_map(&[3.0, 4.0, 0.0, 3.0, 4.0, 0.0]);
        let batch = TrainingBatch {
            features: &features,
            targets: &targets,
            predictions: &predictions,
            loss: 1.25,
        };

        let mut logger = RecordingLogger::default();
        callback.on_batch_end(0, &batch, &mut logger);

        assert_eq!(logger.0.len(), 2);
        assert_eq!(logger.0[0], (Event::Batch, "loss".to_owned(), 1.25));
        assert_eq!(logger.0[1].1, "trajectory_ade");
        assert!((logger.0[1].2 - 5.0).abs() < 1e-6);
    }
}
