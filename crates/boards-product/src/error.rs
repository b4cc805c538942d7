//! Error types for the boards product adapter.

use crate::app::AppError;
use crate::lifecycle::LifecycleState;
use host_api::{ServiceError, ServiceKey};
use thiserror::Error;

/// Result alias for adapter operations.
pub type ProductResult<T> = Result<T, ProductError>;

/// Boards product adapter errors
#[derive(Debug, Error)]
pub enum ProductError {
    /// A handle filed under `key` implements a different capability
    #[error("Invalid service key '{key}': type assertion failed (found {found} service)")]
    CapabilityMismatch { key: ServiceKey, found: &'static str },

    /// A capability the adapter needs was not supplied
    #[error("Missing required service '{key}'")]
    MissingCapability { key: ServiceKey },

    /// The boards app constructor failed
    #[error("Failed to create Boards service: {0}")]
    SubsystemConstruction(#[source] AppError),

    /// The host refused to route hooks to the adapter
    #[error("Failed to register hooks: {0}")]
    HookRegistration(#[source] ServiceError),

    /// The boards app failed to start
    #[error("Failed to start Boards service: {0}")]
    SubsystemStart(#[source] AppError),

    /// The boards app failed to stop
    #[error("Error while stopping Boards service: {0}")]
    SubsystemStop(#[source] AppError),

    /// Lifecycle call not valid in the current state
    #[error("Cannot {operation} boards product in state {state:?}")]
    InvalidTransition {
        state: LifecycleState,
        operation: &'static str,
    },
}

impl ProductError {
    /// The capability key this error concerns, if any.
    pub fn key(&self) -> Option<&ServiceKey> {
        match self {
            Self::CapabilityMismatch { key, .. } | Self::MissingCapability { key } => Some(key),
            _ => None,
        }
    }
}
