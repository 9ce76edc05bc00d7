//! Error type
use crate::agents::AgentError;
use crate::checkpoint::CheckpointError;
use thiserror::Error;

/// Error from the driving-policy training crate.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("agent error")]
    Agent(#[from] AgentError),
    #[error("error importing checkpoint")]
    Checkpoint(#[from] CheckpointError),
}
