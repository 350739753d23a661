pub mod fleet;
pub mod rental_repository;

pub use fleet::{BranchService as PostgresBranchService, VehicleService as PostgresVehicleService};
pub use rental_repository::RentalRepository as PostgresRentalRepository;
