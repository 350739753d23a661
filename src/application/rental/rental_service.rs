use crate::domain::{
    self, Rental, RentalError, RentalId,
    availability::{self, candidate_window},
    commands::{AvailabilityQuery, RequestRental, ReviseRental},
};
use crate::ports::*;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

use super::errors::{RentalApplicationError, Result};
use super::vehicle_locks::VehicleLocks;

/// Service dependencies
///
/// Plain data: every collaborator is passed explicitly to the functions below.
/// There is no ambient or static state.
#[derive(Clone)]
pub struct ServiceDependencies {
    pub rental_repository: Arc<dyn RentalRepository>,
    pub vehicle_service: Arc<dyn VehicleService>,
    pub branch_service: Arc<dyn BranchService>,
    pub clock: Arc<dyn Clock>,
    pub vehicle_locks: VehicleLocks,
}

/// Load a rental or fail with `RentalNotFound`.
pub(super) async fn load_rental(
    repository: &Arc<dyn RentalRepository>,
    id: RentalId,
) -> Result<Rental> {
    repository
        .get_by_id(id)
        .await
        .map_err(RentalApplicationError::RepositoryError)?
        .ok_or(RentalApplicationError::RentalNotFound)
}

/// Write `rental` over the version that was loaded.
///
/// A miss means the row was changed or deleted since `loaded` was read.
async fn save_rental(
    repository: &Arc<dyn RentalRepository>,
    rental: &Rental,
    loaded: &Rental,
) -> Result<()> {
    let saved = repository
        .save(rental, loaded.updated_at)
        .await
        .map_err(RentalApplicationError::RepositoryError)?;

    if !saved {
        tracing::warn!(rental_id = rental.id.value(), "Rental changed before save");
        return Err(RentalApplicationError::ConcurrentModification);
    }
    Ok(())
}

/// Load a rental while holding its vehicle's lock.
///
/// The rental is read once to find the vehicle and again under the lock, so
/// the returned state cannot be overwritten by another writer in this process
/// until the guard drops.
async fn load_rental_locked(
    deps: &ServiceDependencies,
    id: RentalId,
) -> Result<(OwnedMutexGuard<()>, Rental)> {
    let vehicle_id = load_rental(&deps.rental_repository, id).await?.vehicle_id;
    let guard = deps.vehicle_locks.acquire(vehicle_id).await;
    let rental = load_rental(&deps.rental_repository, id).await?;
    Ok((guard, rental))
}

/// Can the vehicle be booked for the window?
///
/// Queries candidate rentals from the repository, then applies the pure
/// half-open overlap predicate. Read-only. The answer is advisory unless the
/// caller holds the vehicle lock until its write is done.
pub async fn check_availability(
    deps: &ServiceDependencies,
    query: AvailabilityQuery,
) -> Result<bool> {
    let window = candidate_window(query.start, query.end)?;
    let candidates = deps
        .rental_repository
        .find_by_vehicle_and_window(query.vehicle_id, window)
        .await
        .map_err(RentalApplicationError::RepositoryError)?;

    Ok(availability::is_available(
        &candidates,
        query.vehicle_id,
        query.start,
        query.end,
        query.exclude,
    )?)
}

async fn ensure_available(deps: &ServiceDependencies, query: AvailabilityQuery) -> Result<()> {
    if !check_availability(deps, query).await? {
        tracing::warn!(
            vehicle_id = query.vehicle_id.value(),
            start = %query.start,
            "Scheduling conflict"
        );
        return Err(RentalApplicationError::SchedulingConflict);
    }
    Ok(())
}

/// Book a vehicle
///
/// Business rules:
/// - customer fields and hourly rate are valid
/// - the branch exists
/// - the vehicle exists
/// - no other non-cancelled rental of the vehicle overlaps `[start, end or start+1h)`
///
/// The availability check and the insert run under the vehicle lock.
pub async fn request_rental(deps: &ServiceDependencies, cmd: RequestRental) -> Result<Rental> {
    // 1. Validate input in the domain
    let draft = domain::rental::request_rental(cmd, deps.clock.now())?;

    // 2. Branch must exist
    let branch_exists = deps
        .branch_service
        .exists(draft.branch_id)
        .await
        .map_err(RentalApplicationError::BranchServiceError)?;

    if !branch_exists {
        return Err(RentalApplicationError::BranchNotFound);
    }

    // 3. Vehicle must exist
    let vehicle_exists = deps
        .vehicle_service
        .exists(draft.vehicle_id)
        .await
        .map_err(RentalApplicationError::VehicleServiceError)?;

    if !vehicle_exists {
        return Err(RentalApplicationError::VehicleNotFound);
    }

    // 4. Check and insert while holding the vehicle
    let _guard = deps.vehicle_locks.acquire(draft.vehicle_id).await;

    ensure_available(
        deps,
        AvailabilityQuery {
            vehicle_id: draft.vehicle_id,
            start: draft.start,
            end: draft.end,
            exclude: None,
        },
    )
    .await?;

    let rental = deps
        .rental_repository
        .create(draft)
        .await
        .map_err(RentalApplicationError::RepositoryError)?;

    tracing::info!(
        rental_id = rental.id.value(),
        vehicle_id = rental.vehicle_id.value(),
        "Rental requested"
    );

    Ok(rental)
}

/// Change customer contact and booked window
///
/// Business rules:
/// - the rental exists and is `Requested` or `Started`
/// - the new window does not overlap another rental of the same vehicle
///   (the rental itself is excluded from the check)
pub async fn revise_rental(deps: &ServiceDependencies, cmd: ReviseRental) -> Result<Rental> {
    let (_guard, existing) = load_rental_locked(deps, cmd.rental_id).await?;
    let revised = domain::rental::revise_rental(&existing, &cmd, deps.clock.now())?;

    ensure_available(
        deps,
        AvailabilityQuery {
            vehicle_id: revised.vehicle_id,
            start: revised.start,
            end: revised.end,
            exclude: Some(revised.id),
        },
    )
    .await?;

    save_rental(&deps.rental_repository, &revised, &existing).await?;

    tracing::info!(rental_id = revised.id.value(), "Rental revised");
    Ok(revised)
}

/// Load under the vehicle lock, apply a pure transition, save.
async fn apply_transition(
    deps: &ServiceDependencies,
    id: RentalId,
    transition: fn(&Rental, DateTime<Utc>) -> std::result::Result<Rental, RentalError>,
) -> Result<Rental> {
    let (_guard, rental) = load_rental_locked(deps, id).await?;

    let updated = transition(&rental, deps.clock.now()).inspect_err(|e| {
        tracing::warn!(rental_id = id.value(), error = %e, "Rental transition rejected");
    })?;

    save_rental(&deps.rental_repository, &updated, &rental).await?;
    Ok(updated)
}

/// Hand the vehicle over (`Requested` -> `Started`)
pub async fn start_rental(deps: &ServiceDependencies, id: RentalId) -> Result<Rental> {
    let rental = apply_transition(deps, id, domain::rental::start_rental).await?;
    tracing::info!(rental_id = id.value(), "Rental started");
    Ok(rental)
}

/// Take the vehicle back (`Started` -> `Finished`), stamping `end` and the total
pub async fn finish_rental(deps: &ServiceDependencies, id: RentalId) -> Result<Rental> {
    let rental = apply_transition(deps, id, domain::rental::finish_rental).await?;
    tracing::info!(
        rental_id = id.value(),
        total_value = ?rental.total_value,
        "Rental finished"
    );
    Ok(rental)
}

/// Call the rental off (`Requested | Started` -> `Cancelled`)
pub async fn cancel_rental(deps: &ServiceDependencies, id: RentalId) -> Result<Rental> {
    let rental = apply_transition(deps, id, domain::rental::cancel_rental).await?;
    tracing::info!(rental_id = id.value(), "Rental cancelled");
    Ok(rental)
}

/// Recompute and store the total value
///
/// Returns `None` while the rental has no end.
pub async fn calculate_total(deps: &ServiceDependencies, id: RentalId) -> Result<Option<Decimal>> {
    let (_guard, rental) = load_rental_locked(deps, id).await?;
    let calculated = domain::rental::calculate_total(&rental)?;

    if calculated != rental {
        save_rental(&deps.rental_repository, &calculated, &rental).await?;
    }

    Ok(calculated.total_value)
}

/// Remove a rental record
pub async fn delete_rental(deps: &ServiceDependencies, id: RentalId) -> Result<()> {
    let deleted = deps
        .rental_repository
        .delete(id)
        .await
        .map_err(RentalApplicationError::RepositoryError)?;

    if !deleted {
        return Err(RentalApplicationError::RentalNotFound);
    }

    tracing::info!(rental_id = id.value(), "Rental deleted");
    Ok(())
}
