use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, active_rentals, calculate_total, cancel_rental, check_availability, create_rental,
    delete_rental, finish_rental, finished_rentals, get_rental, list_rentals, rentals_by_branch,
    rentals_by_customer, rentals_by_period, rentals_by_vehicle, start_rental, update_rental,
};

/// Creates the API router with all rental endpoints
///
/// Commands:
/// - POST /api/rentals
/// - PUT /api/rentals/:id
/// - DELETE /api/rentals/:id
/// - PATCH /api/rentals/:id/{start,finish,cancel}
///
/// Queries:
/// - GET /api/rentals, /api/rentals/:id, /api/rentals/:id/total
/// - GET /api/rentals/{by-vehicle/:id,by-branch/:id,by-customer,by-period,active,finished}
/// - GET /api/rentals/availability
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Collection
        .route("/api/rentals", get(list_rentals).post(create_rental))
        // Static query paths (matched before `:id`)
        .route("/api/rentals/active", get(active_rentals))
        .route("/api/rentals/finished", get(finished_rentals))
        .route("/api/rentals/availability", get(check_availability))
        .route("/api/rentals/by-customer", get(rentals_by_customer))
        .route("/api/rentals/by-period", get(rentals_by_period))
        .route("/api/rentals/by-vehicle/:vehicle_id", get(rentals_by_vehicle))
        .route("/api/rentals/by-branch/:branch_id", get(rentals_by_branch))
        // Single rental
        .route(
            "/api/rentals/:id",
            get(get_rental).put(update_rental).delete(delete_rental),
        )
        .route("/api/rentals/:id/start", patch(start_rental))
        .route("/api/rentals/:id/finish", patch(finish_rental))
        .route("/api/rentals/:id/cancel", patch(cancel_rental))
        .route("/api/rentals/:id/total", get(calculate_total))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
