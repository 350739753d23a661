use crate::application::rental::RentalApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API layer error
///
/// Wraps the application error and maps it onto an HTTP response.
#[derive(Debug)]
pub struct ApiError(RentalApplicationError);

impl From<RentalApplicationError> for ApiError {
    fn from(err: RentalApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let (status, error_type, message) = match self.0 {
            // 404 Not Found
            RentalApplicationError::RentalNotFound => {
                (StatusCode::NOT_FOUND, "RENTAL_NOT_FOUND", message)
            }

            // 422 Unprocessable Entity - business rule violations
            RentalApplicationError::VehicleNotFound => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VEHICLE_NOT_FOUND", message)
            }
            RentalApplicationError::BranchNotFound => {
                (StatusCode::UNPROCESSABLE_ENTITY, "BRANCH_NOT_FOUND", message)
            }
            RentalApplicationError::InvalidTransition { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_TRANSITION",
                message,
            ),

            // 409 Conflict
            RentalApplicationError::SchedulingConflict => {
                (StatusCode::CONFLICT, "SCHEDULING_CONFLICT", message)
            }
            RentalApplicationError::ConcurrentModification => {
                (StatusCode::CONFLICT, "CONCURRENT_MODIFICATION", message)
            }

            // 400 Bad Request
            RentalApplicationError::InvalidArgument(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", message)
            }

            // 500 Internal Server Error
            // Details go to the log, the client gets a generic message
            RentalApplicationError::RepositoryError(ref e) => {
                tracing::error!("Rental repository error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REPOSITORY_ERROR",
                    "Failed to access rental storage".to_string(),
                )
            }
            RentalApplicationError::VehicleServiceError(ref e) => {
                tracing::error!("Vehicle service error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "VEHICLE_SERVICE_ERROR",
                    "Vehicle service error".to_string(),
                )
            }
            RentalApplicationError::BranchServiceError(ref e) => {
                tracing::error!("Branch service error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "BRANCH_SERVICE_ERROR",
                    "Branch service error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RentalOperation, RentalStatus, ValidationError};

    fn status_of(err: RentalApplicationError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            status_of(RentalApplicationError::RentalNotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RentalApplicationError::VehicleNotFound),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(RentalApplicationError::BranchNotFound),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(RentalApplicationError::InvalidTransition {
                operation: RentalOperation::Finish,
                status: RentalStatus::Requested,
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(RentalApplicationError::SchedulingConflict),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(RentalApplicationError::InvalidArgument(
                ValidationError::EndNotAfterStart
            )),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RentalApplicationError::ConcurrentModification),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(RentalApplicationError::RepositoryError("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
