//! Training-time hooks invoked by the external harness.
use crate::builders::FeatureMap;
use crate::logging::Logger;

/// Borrowed view of one training batch, handed to callbacks after the
/// forward and loss passes.
#[derive(Debug)]
pub struct TrainingBatch<'a> {
    pub features: &'a FeatureMap,
    pub targets: &'a FeatureMap,
    pub predictions: &'a FeatureMap,
    /// Scalar loss value for this batch.
    pub loss: f64,
}

/// Hook invoked by the training harness at defined points in the loop.
///
/// All methods default to no-ops so a callback only implements the hooks it
/// cares about.
pub trait TrainingCallback {
    /// Called once before the first batch of an epoch.
    fn on_epoch_start(&mut self, _epoch: u64, _logger: &mut dyn Logger) {}

    /// Called after the loss has been computed for a batch.
    fn on_batch_end(&mut self, _epoch: u64, _batch: &TrainingBatch, _logger: &mut dyn Logger) {}

    /// Called once after the last batch of an epoch.
    fn on_epoch_end(&mut self, _epoch: u64, _logger: &mut dyn Logger) {}
}
