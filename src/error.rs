//! Error taxonomy for the branch switching workflow
//!
//! Every effect converts its failures into one of these kinds before the
//! state machine sees them. Only [`WorkflowError::Auth`] is recoverable.

use thiserror::Error;

/// A classified workflow failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The forge rejected the credential (HTTP 401)
    #[error("GitHub rejected the access token (HTTP 401)")]
    Auth,

    /// A local git operation failed
    #[error("Git operation failed: {0}")]
    Vcs(String),

    /// Any other remote-call failure: network, unexpected status, bad payload
    #[error("GitHub request failed: {0}")]
    Transport(String),

    /// The credential file could not be written
    #[error("Could not save the access token: {0}")]
    Storage(String),
}

impl WorkflowError {
    /// Whether the workflow can recover by asking for a new credential
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WorkflowError::Auth)
    }
}
