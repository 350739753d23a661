use crate::domain::{BranchId, Cpf, Rental, RentalId, RentalStatus, ValidationError, VehicleId};
use crate::ports::PageRequest;
use chrono::{DateTime, Utc};

use super::errors::{RentalApplicationError, Result};
use super::rental_service::{ServiceDependencies, load_rental};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A page of results plus the numbers needed to navigate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        let total_pages = total_count.div_ceil(u64::from(request.page_size));
        Self {
            items,
            total_count,
            page: request.page,
            page_size: request.page_size,
            total_pages,
            has_next: u64::from(request.page) < total_pages,
            has_previous: request.page > 1,
        }
    }
}

fn page_request(page: u32, page_size: u32) -> Result<PageRequest> {
    if page < 1 {
        return Err(ValidationError::InvalidPage.into());
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ValidationError::InvalidPageSize { max: MAX_PAGE_SIZE }.into());
    }
    Ok(PageRequest { page, page_size })
}

pub async fn get_rental(deps: &ServiceDependencies, id: RentalId) -> Result<Rental> {
    load_rental(&deps.rental_repository, id).await
}

/// Paged listing of all rentals, ordered by ID
pub async fn list_rentals(
    deps: &ServiceDependencies,
    page: u32,
    page_size: u32,
) -> Result<Page<Rental>> {
    let request = page_request(page, page_size)?;

    let items = deps
        .rental_repository
        .list(request)
        .await
        .map_err(RentalApplicationError::RepositoryError)?;
    let total_count = deps
        .rental_repository
        .count()
        .await
        .map_err(RentalApplicationError::RepositoryError)?;

    Ok(Page::new(items, total_count, request))
}

pub async fn rentals_by_vehicle(
    deps: &ServiceDependencies,
    vehicle_id: VehicleId,
) -> Result<Vec<Rental>> {
    deps.rental_repository
        .find_by_vehicle_id(vehicle_id)
        .await
        .map_err(RentalApplicationError::RepositoryError)
}

pub async fn rentals_by_branch(
    deps: &ServiceDependencies,
    branch_id: BranchId,
) -> Result<Vec<Rental>> {
    deps.rental_repository
        .find_by_branch_id(branch_id)
        .await
        .map_err(RentalApplicationError::RepositoryError)
}

pub async fn rentals_by_customer(deps: &ServiceDependencies, cpf: &str) -> Result<Vec<Rental>> {
    let cpf = Cpf::parse(cpf)?;
    deps.rental_repository
        .find_by_customer_cpf(&cpf)
        .await
        .map_err(RentalApplicationError::RepositoryError)
}

/// Rentals whose start lies in `[from, to]`
pub async fn rentals_started_between(
    deps: &ServiceDependencies,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Rental>> {
    if from > to {
        return Err(ValidationError::PeriodReversed.into());
    }
    deps.rental_repository
        .find_started_between(from, to)
        .await
        .map_err(RentalApplicationError::RepositoryError)
}

/// Rentals with the vehicle currently out (`Started`)
pub async fn active_rentals(deps: &ServiceDependencies) -> Result<Vec<Rental>> {
    deps.rental_repository
        .find_by_status(RentalStatus::Started)
        .await
        .map_err(RentalApplicationError::RepositoryError)
}

pub async fn finished_rentals(deps: &ServiceDependencies) -> Result<Vec<Rental>> {
    deps.rental_repository
        .find_by_status(RentalStatus::Finished)
        .await
        .map_err(RentalApplicationError::RepositoryError)
}
