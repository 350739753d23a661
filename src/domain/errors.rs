use thiserror::Error;

use super::RentalStatus;

/// Invalid input field (InvalidArgument family)
///
/// Raised when a rental is built or revised, never deferred to a later transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("customer name must not be empty")]
    EmptyCustomerName,
    #[error("customer name must have at most 100 characters")]
    CustomerNameTooLong,
    #[error("CPF must have exactly 11 digits")]
    InvalidCpf,
    #[error("customer phone must not be empty")]
    EmptyPhone,
    #[error("customer phone must have at most 15 characters")]
    PhoneTooLong,
    #[error("hourly rate must be greater than zero")]
    NonPositiveHourlyRate,
    #[error("end must be after start")]
    EndNotAfterStart,
    #[error("start is too close to the end of the supported time range")]
    StartOutOfRange,
    #[error("total value exceeds the supported range")]
    TotalValueOverflow,
    #[error("page must be at least 1")]
    InvalidPage,
    #[error("page_size must be between 1 and {max}")]
    InvalidPageSize { max: u32 },
    #[error("from must not be after to")]
    PeriodReversed,
}

/// Lifecycle operation, used to report which transition was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalOperation {
    Start,
    Finish,
    Cancel,
    Revise,
}

impl RentalOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalOperation::Start => "start",
            RentalOperation::Finish => "finish",
            RentalOperation::Cancel => "cancel",
            RentalOperation::Revise => "revise",
        }
    }
}

impl std::fmt::Display for RentalOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rental domain error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentalError {
    /// The operation is not allowed from the rental's current status
    #[error("cannot {operation} a rental in status {status}")]
    InvalidTransition {
        operation: RentalOperation,
        status: RentalStatus,
    },

    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),
}
