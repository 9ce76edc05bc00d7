//! Torch optimizer wrappers and configuration
use std::convert::{TryFrom, TryInto};
use std::error::Error;
use tch::{nn::VarStore, COptimizer, TchError, Tensor};
use thiserror::Error;

/// Base optimizer interface
pub trait BaseOptimizer {
    /// Zero out the gradients of all optimized tensors
    fn zero_grad(&mut self);
}

/// Optimizer that minimizes a loss tensor using a single gradient evaluation
/// per step.
pub trait OnceOptimizer: BaseOptimizer {
    /// Perform a parameter update using the gradients already stored with
    /// the parameter tensors.
    fn step_once(&self) -> Result<(), OptimizerStepError>;

    /// Back-propagate a scalar loss tensor then perform a parameter update.
    ///
    /// Existing gradients are zeroed first; the caller does not need to
    /// manage them.
    fn backward_step_once(&mut self, loss: &Tensor) -> Result<(), OptimizerStepError>;
}

/// Error performing an optimization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptimizerStepError {
    #[error("loss is NaN")]
    NaNLoss,
}

impl BaseOptimizer for COptimizer {
    fn zero_grad(&mut self) {
        COptimizer::zero_grad(self).unwrap();
    }
}

impl OnceOptimizer for COptimizer {
    fn step_once(&self) -> Result<(), OptimizerStepError> {
        // Torch only raises type-level errors here; those are bugs, not
        // step failures.
        COptimizer::step(self).unwrap();
        Ok(())
    }

    fn backward_step_once(&mut self, loss: &Tensor) -> Result<(), OptimizerStepError> {
        // Stepping on a NaN loss would silently set the parameters to NaN.
        if f64::from(loss).is_nan() {
            return Err(OptimizerStepError::NaNLoss);
        }
        BaseOptimizer::zero_grad(self);
        loss.backward();
        self.step_once()
    }
}

/// Build an optimizer for the trainable variables in a variable store.
pub trait BuildOptimizer {
    type Optimizer;
    type Error: Error;

    fn build_optimizer(&self, vs: &VarStore) -> Result<Self::Optimizer, Self::Error>;
}

impl<T> BuildOptimizer for T
where
    for<'a> &'a T: TryInto<COptimizer, Error = TchError>,
{
    type Optimizer = COptimizer;
    type Error = TchError;

    fn build_optimizer(&self, vs: &VarStore) -> Result<COptimizer, TchError> {
        let mut optimizer: COptimizer = self.try_into()?;
        let variables = vs.variables_.lock().unwrap();
        for var in &variables.trainable_variables {
            optimizer.add_parameters(&var.tensor, var.group)?;
        }
        Ok(optimizer)
    }
}

/// Configuration for the Adam optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct AdamConfig {
    /// Learning rate
    pub learning_rate: f64,
    /// Coefficient for the running average of the gradient
    pub beta1: f64,
    /// Coefficient for the running average of the square of the gradient
    pub beta2: f64,
    /// Weight decay (L2 penalty)
    pub weight_decay: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-3,
            beta1: 0.9,
            beta2: 0.999,
            weight_decay: 0.0,
        }
    }
}

impl TryFrom<&AdamConfig> for COptimizer {
    type Error = TchError;
    fn try_from(config: &AdamConfig) -> Result<Self, Self::Error> {
        COptimizer::adam(
            config.learning_rate,
            config.beta1,
            config.beta2,
            config.weight_decay,
        )
    }
}

/// Configuration for the SGD optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct SgdConfig {
    /// Learning rate
    pub learning_rate: f64,
    /// Momentum
    pub momentum: f64,
    /// Weight decay (L2 penalty)
    pub weight_decay: f64,
    /// Dampening for momentum
    pub dampening: f64,
    /// Enables Nesterov momentum
    pub nesterov: bool,
}

impl Default for SgdConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-2,
            momentum: 0.0,
            weight_decay: 0.0,
            dampening: 0.0,
            nesterov: false,
        }
    }
}

impl TryFrom<&SgdConfig> for COptimizer {
    type Error = TchError;
    fn try_from(config: &SgdConfig) -> Result<Self, Self::Error> {
        COptimizer::sgd(
            config.learning_rate,
            config.momentum,
            config.dampening,
            config.weight_decay,
            config.nesterov,
        )
    }
}
