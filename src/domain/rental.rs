use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    BranchId, Cpf, CustomerName, HourlyRate, Phone, RentalError, RentalId, RentalOperation,
    RentalStatus, ValidationError, VehicleId,
    commands::{RequestRental, ReviseRental},
};

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Customer data attached to a rental
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: CustomerName,
    pub cpf: Cpf,
    pub phone: Phone,
}

/// Rental aggregate - one booking of one vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    // Identity (assigned by persistence)
    pub id: RentalId,

    // References to other aggregates (IDs only)
    pub vehicle_id: VehicleId,
    pub branch_id: BranchId,

    pub customer: Customer,

    // Booked window; `end == None` means open-ended
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,

    // Pricing
    pub hourly_rate: HourlyRate,
    pub total_value: Option<Decimal>,

    pub status: RentalStatus,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    /// The vehicle is currently with the customer
    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Started
    }

    pub fn is_finished(&self) -> bool {
        self.status == RentalStatus::Finished
    }
}

/// A validated rental that has not been persisted yet, so it has no ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalDraft {
    pub vehicle_id: VehicleId,
    pub branch_id: BranchId,
    pub customer: Customer,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub hourly_rate: HourlyRate,
    pub created_at: DateTime<Utc>,
}

impl RentalDraft {
    /// Attach the ID handed out by the repository.
    pub fn into_rental(self, id: RentalId) -> Rental {
        Rental {
            id,
            vehicle_id: self.vehicle_id,
            branch_id: self.branch_id,
            customer: self.customer,
            start: self.start,
            end: self.end,
            hourly_rate: self.hourly_rate,
            total_value: None,
            status: RentalStatus::Requested,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// A supplied end must come strictly after start.
pub fn validate_window(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match end {
        Some(end) if end <= start => Err(ValidationError::EndNotAfterStart),
        _ => Ok(()),
    }
}

/// Pure function: build a new rental from a booking request
///
/// Business rules:
/// - every customer field and the hourly rate are validated up front
/// - a supplied end must be after start
/// - the rental starts in `Requested`
///
/// Availability is not checked here; that needs the other rentals of the vehicle.
pub fn request_rental(cmd: RequestRental, at: DateTime<Utc>) -> Result<RentalDraft, RentalError> {
    let customer = Customer {
        name: CustomerName::parse(cmd.customer_name)?,
        cpf: Cpf::parse(cmd.customer_cpf)?,
        phone: Phone::parse(cmd.customer_phone)?,
    };
    let hourly_rate = HourlyRate::new(cmd.hourly_rate)?;
    validate_window(cmd.start, cmd.end)?;

    Ok(RentalDraft {
        vehicle_id: cmd.vehicle_id,
        branch_id: cmd.branch_id,
        customer,
        start: cmd.start,
        end: cmd.end,
        hourly_rate,
        created_at: at,
    })
}

/// Pure function: change customer contact and booked window
///
/// Only `Requested` and `Started` rentals can be revised.
pub fn revise_rental(
    rental: &Rental,
    cmd: &ReviseRental,
    at: DateTime<Utc>,
) -> Result<Rental, RentalError> {
    if rental.status.is_terminal() {
        return Err(RentalError::InvalidTransition {
            operation: RentalOperation::Revise,
            status: rental.status,
        });
    }

    let name = CustomerName::parse(cmd.customer_name.clone())?;
    let phone = Phone::parse(cmd.customer_phone.clone())?;
    validate_window(cmd.start, cmd.end)?;

    Ok(Rental {
        customer: Customer {
            name,
            phone,
            ..rental.customer.clone()
        },
        start: cmd.start,
        end: cmd.end,
        updated_at: at,
        ..rental.clone()
    })
}

/// Pure function: hand the vehicle over (`Requested` -> `Started`)
pub fn start_rental(rental: &Rental, at: DateTime<Utc>) -> Result<Rental, RentalError> {
    if rental.status != RentalStatus::Requested {
        return Err(RentalError::InvalidTransition {
            operation: RentalOperation::Start,
            status: rental.status,
        });
    }

    Ok(Rental {
        status: RentalStatus::Started,
        updated_at: at,
        ..rental.clone()
    })
}

/// Pure function: take the vehicle back (`Started` -> `Finished`)
///
/// `end` is stamped with `at`, overwriting any planned end, and the total is computed.
pub fn finish_rental(rental: &Rental, at: DateTime<Utc>) -> Result<Rental, RentalError> {
    if rental.status != RentalStatus::Started {
        return Err(RentalError::InvalidTransition {
            operation: RentalOperation::Finish,
            status: rental.status,
        });
    }

    let finished = Rental {
        status: RentalStatus::Finished,
        end: Some(at),
        updated_at: at,
        ..rental.clone()
    };

    calculate_total(&finished)
}

/// Pure function: call the rental off (`Requested | Started` -> `Cancelled`)
pub fn cancel_rental(rental: &Rental, at: DateTime<Utc>) -> Result<Rental, RentalError> {
    if rental.status.is_terminal() {
        return Err(RentalError::InvalidTransition {
            operation: RentalOperation::Cancel,
            status: rental.status,
        });
    }

    Ok(Rental {
        status: RentalStatus::Cancelled,
        updated_at: at,
        ..rental.clone()
    })
}

/// Pure function: recompute `total_value = elapsed_hours(start, end) * hourly_rate`
///
/// No-op while `end` is absent. The status and audit timestamps are not touched.
/// A product outside the `Decimal` range is `TotalValueOverflow`.
pub fn calculate_total(rental: &Rental) -> Result<Rental, RentalError> {
    let Some(end) = rental.end else {
        return Ok(rental.clone());
    };

    let total = elapsed_hours(rental.start, end)
        .checked_mul(rental.hourly_rate.value())
        .ok_or(ValidationError::TotalValueOverflow)?;

    Ok(Rental {
        total_value: Some(total),
        ..rental.clone()
    })
}

/// Wall-clock hours between two instants, fractional, not rounded.
///
/// Millisecond resolution.
pub fn elapsed_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    let millis = (end - start).num_milliseconds();
    Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR)
}
