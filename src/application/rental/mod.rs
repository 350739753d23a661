mod errors;
mod queries;
mod rental_service;
mod vehicle_locks;

pub use errors::{RentalApplicationError, Result};
pub use queries::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, active_rentals, finished_rentals,
    get_rental, list_rentals, rentals_by_branch, rentals_by_customer, rentals_by_vehicle,
    rentals_started_between,
};
pub use rental_service::{
    ServiceDependencies, calculate_total, cancel_rental, check_availability, delete_rental,
    finish_rental, request_rental, revise_rental, start_rental,
};
pub use vehicle_locks::VehicleLocks;
