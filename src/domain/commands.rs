use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BranchId, RentalId, VehicleId};

/// Command: book a vehicle for a customer
///
/// Fields arrive unvalidated; `rental::request_rental` turns them into value objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRental {
    pub vehicle_id: VehicleId,
    pub branch_id: BranchId,
    pub customer_name: String,
    pub customer_cpf: String,
    pub customer_phone: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub hourly_rate: Decimal,
}

/// Command: change the customer contact or the booked window of a rental
///
/// The vehicle, branch, CPF and hourly rate are fixed once the rental exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviseRental {
    pub rental_id: RentalId,
    pub customer_name: String,
    pub customer_phone: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

/// Query: can `vehicle_id` be booked for `[start, end)`?
///
/// `exclude` names a rental to leave out of the conflict set (the rental being revised).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub vehicle_id: VehicleId,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub exclude: Option<RentalId>,
}
