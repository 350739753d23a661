pub mod branch_service;
pub mod clock;
pub mod rental_repository;
pub mod vehicle_service;

pub use branch_service::BranchService;
pub use clock::{Clock, SystemClock};
pub use rental_repository::{PageRequest, RentalRepository};
pub use vehicle_service::VehicleService;
