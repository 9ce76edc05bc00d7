//! Logging statistics from training runs
mod tensorboard;

pub use tensorboard::TensorBoardLogger;

use enum_map::Enum;

/// Training-loop events that group logged values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Event {
    Batch,
    Epoch,
}

impl Event {
    /// Lower-case name used as a tag segment by logging backends.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Batch => "batch",
            Self::Epoch => "epoch",
        }
    }
}

/// A value that can be logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loggable {
    /// Nothing. May still produce a placeholder entry for the name.
    Nothing,
    /// A scalar value.
    Scalar(f64),
}

impl From<f64> for Loggable {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<f32> for Loggable {
    fn from(value: f32) -> Self {
        Self::Scalar(value.into())
    }
}

/// Log statistics from a training run.
pub trait Logger {
    /// Log a value under a name, associated with an event.
    fn log(&mut self, event: Event, name: &str, value: Loggable);

    /// Mark the end of an event instance (one batch, one epoch).
    fn done(&mut self, event: Event);
}

/// Logger that does nothing
impl Logger for () {
    fn log(&mut self, _: Event, _: &str, _: Loggable) {}

    fn done(&mut self, _: Event) {}
}

#[cfg(test)]
mod loggable {
    use super::*;

    #[test]
    fn scalar_from_float() {
        assert_eq!(Loggable::from(2.5_f64), Loggable::Scalar(2.5));
        assert_eq!(Loggable::from(0.5_f32), Loggable::Scalar(0.5));
    }
}
