pub mod branch_service;
pub mod clock;
pub mod vehicle_service;

pub use branch_service::BranchService;
pub use clock::FixedClock;
pub use vehicle_service::VehicleService;
