//! Errors surfaced by store mutations.

use crate::gateway::GatewayError;
use crate::record::ValidationError;

/// Why a store operation did not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Rejected locally before any backend call.
    Validation(ValidationError),
    /// The backend call failed; the store is unchanged.
    Transport(GatewayError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Validation(e) => write!(f, "{}", e),
            StoreError::Transport(e) => write!(f, "Request failed, please try again ({})", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Validation(e) => Some(e),
            StoreError::Transport(e) => Some(e),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(e: ValidationError) -> Self {
        StoreError::Validation(e)
    }
}

impl From<GatewayError> for StoreError {
    fn from(e: GatewayError) -> Self {
        StoreError::Transport(e)
    }
}
