use crate::domain::{RentalError, RentalOperation, RentalStatus, ValidationError};
use thiserror::Error;

/// Rental application layer error
#[derive(Debug, Error)]
pub enum RentalApplicationError {
    /// No rental with the requested ID
    #[error("Rental not found")]
    RentalNotFound,

    /// The referenced vehicle does not exist
    #[error("Vehicle not found")]
    VehicleNotFound,

    /// The referenced branch does not exist
    #[error("Branch not found")]
    BranchNotFound,

    /// Another non-cancelled rental of the vehicle overlaps the requested window
    #[error("Vehicle is not available in the requested period")]
    SchedulingConflict,

    /// Lifecycle operation not allowed from the current status
    #[error("Cannot {operation} a rental in status {status}")]
    InvalidTransition {
        operation: RentalOperation,
        status: RentalStatus,
    },

    /// The rental changed between load and save; the caller may retry
    #[error("Rental was modified concurrently")]
    ConcurrentModification,

    /// Invalid input
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Repository failure
    #[error("Rental repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// VehicleService failure
    #[error("Vehicle service error")]
    VehicleServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BranchService failure
    #[error("Branch service error")]
    BranchServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<RentalError> for RentalApplicationError {
    fn from(err: RentalError) -> Self {
        match err {
            RentalError::InvalidTransition { operation, status } => {
                RentalApplicationError::InvalidTransition { operation, status }
            }
            RentalError::InvalidArgument(e) => RentalApplicationError::InvalidArgument(e),
        }
    }
}

/// Application layer Result type
pub type Result<T> = std::result::Result<T, RentalApplicationError>;
