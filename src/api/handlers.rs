use crate::application::rental::{self, ServiceDependencies};
use crate::domain::{BranchId, RentalId, VehicleId, commands::AvailabilityQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        AvailabilityParams, AvailabilityResponse, CpfQuery, CreateRentalRequest, ListRentalsQuery,
        PagedResponse, PeriodQuery, RentalResponse, TotalValueResponse, UpdateRentalRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

type RentalList = Json<Vec<RentalResponse>>;

fn to_responses(rentals: Vec<crate::domain::Rental>) -> RentalList {
    Json(rentals.into_iter().map(RentalResponse::from).collect())
}

// ============================================================================
// Command handlers
// ============================================================================

/// POST /api/rentals - book a vehicle
///
/// Business rules enforced:
/// - branch and vehicle exist
/// - customer fields and hourly rate are valid
/// - the vehicle is free for the requested window
pub async fn create_rental(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRentalRequest>,
) -> Result<(StatusCode, Json<RentalResponse>), ApiError> {
    let rental = rental::request_rental(&state.service_deps, req.to_command()).await?;
    Ok((StatusCode::CREATED, Json(RentalResponse::from(rental))))
}

/// PUT /api/rentals/:id - change customer contact or the booked window
pub async fn update_rental(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRentalRequest>,
) -> Result<Json<RentalResponse>, ApiError> {
    let cmd = req.into_command(RentalId::new(id));
    let rental = rental::revise_rental(&state.service_deps, cmd).await?;
    Ok(Json(RentalResponse::from(rental)))
}

/// DELETE /api/rentals/:id
pub async fn delete_rental(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    rental::delete_rental(&state.service_deps, RentalId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/rentals/:id/start
pub async fn start_rental(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<RentalResponse>, ApiError> {
    let rental = rental::start_rental(&state.service_deps, RentalId::new(id)).await?;
    Ok(Json(RentalResponse::from(rental)))
}

/// PATCH /api/rentals/:id/finish - stamps the end and the total value
pub async fn finish_rental(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<RentalResponse>, ApiError> {
    let rental = rental::finish_rental(&state.service_deps, RentalId::new(id)).await?;
    Ok(Json(RentalResponse::from(rental)))
}

/// PATCH /api/rentals/:id/cancel
pub async fn cancel_rental(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<RentalResponse>, ApiError> {
    let rental = rental::cancel_rental(&state.service_deps, RentalId::new(id)).await?;
    Ok(Json(RentalResponse::from(rental)))
}

/// GET /api/rentals/:id/total
///
/// `total_value` is null while the rental has no end.
pub async fn calculate_total(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TotalValueResponse>, ApiError> {
    let total_value = rental::calculate_total(&state.service_deps, RentalId::new(id)).await?;
    Ok(Json(TotalValueResponse {
        rental_id: id,
        total_value,
    }))
}

// ============================================================================
// Query handlers
// ============================================================================

/// GET /api/rentals/:id
pub async fn get_rental(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<RentalResponse>, ApiError> {
    let rental = rental::get_rental(&state.service_deps, RentalId::new(id)).await?;
    Ok(Json(RentalResponse::from(rental)))
}

/// GET /api/rentals?page=&page_size=
pub async fn list_rentals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListRentalsQuery>,
) -> Result<Json<PagedResponse<RentalResponse>>, ApiError> {
    let page = rental::list_rentals(&state.service_deps, query.page, query.page_size).await?;
    Ok(Json(PagedResponse::from(page)))
}

/// GET /api/rentals/by-vehicle/:vehicle_id
pub async fn rentals_by_vehicle(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<i64>,
) -> Result<RentalList, ApiError> {
    let rentals =
        rental::rentals_by_vehicle(&state.service_deps, VehicleId::new(vehicle_id)).await?;
    Ok(to_responses(rentals))
}

/// GET /api/rentals/by-branch/:branch_id
pub async fn rentals_by_branch(
    State(state): State<Arc<AppState>>,
    Path(branch_id): Path<i64>,
) -> Result<RentalList, ApiError> {
    let rentals = rental::rentals_by_branch(&state.service_deps, BranchId::new(branch_id)).await?;
    Ok(to_responses(rentals))
}

/// GET /api/rentals/by-customer?cpf=
pub async fn rentals_by_customer(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CpfQuery>,
) -> Result<RentalList, ApiError> {
    let rentals = rental::rentals_by_customer(&state.service_deps, &query.cpf).await?;
    Ok(to_responses(rentals))
}

/// GET /api/rentals/by-period?from=&to=
pub async fn rentals_by_period(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PeriodQuery>,
) -> Result<RentalList, ApiError> {
    let rentals =
        rental::rentals_started_between(&state.service_deps, query.from, query.to).await?;
    Ok(to_responses(rentals))
}

/// GET /api/rentals/active
pub async fn active_rentals(
    State(state): State<Arc<AppState>>,
) -> Result<RentalList, ApiError> {
    let rentals = rental::active_rentals(&state.service_deps).await?;
    Ok(to_responses(rentals))
}

/// GET /api/rentals/finished
pub async fn finished_rentals(
    State(state): State<Arc<AppState>>,
) -> Result<RentalList, ApiError> {
    let rentals = rental::finished_rentals(&state.service_deps).await?;
    Ok(to_responses(rentals))
}

/// GET /api/rentals/availability?vehicle_id=&start=&end=&exclude_id=
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let query = AvailabilityQuery {
        vehicle_id: VehicleId::new(params.vehicle_id),
        start: params.start,
        end: params.end,
        exclude: params.exclude_id.map(RentalId::new),
    };

    let available = rental::check_availability(&state.service_deps, query).await?;

    Ok(Json(AvailabilityResponse {
        vehicle_id: params.vehicle_id,
        available,
    }))
}
