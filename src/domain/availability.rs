use chrono::{DateTime, Duration, Utc};

use super::{Rental, RentalId, RentalStatus, ValidationError, VehicleId, rental::validate_window};

/// Length assumed for a candidate window that has no end.
pub const DEFAULT_CANDIDATE_HOURS: i64 = 1;

/// Half-open interval `[start, end)` during which a vehicle is booked.
///
/// `end == None` extends to positive infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalWindow {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl RentalWindow {
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Window of an existing rental, open-ended while `end` is absent.
    pub fn of(rental: &Rental) -> Self {
        Self::new(rental.start, rental.end)
    }
}

/// Window a booking request is checked against.
///
/// A missing end defaults to `start + 1h`. Only the check sees this default;
/// the rental keeps its absent end. A supplied end must be after start.
pub fn candidate_window(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<RentalWindow, ValidationError> {
    validate_window(start, end)?;
    let end = match end {
        Some(end) => end,
        None => start
            .checked_add_signed(Duration::hours(DEFAULT_CANDIDATE_HOURS))
            .ok_or(ValidationError::StartOutOfRange)?,
    };
    Ok(RentalWindow::new(start, Some(end)))
}

/// Half-open interval intersection. Touching endpoints do not overlap.
pub fn windows_overlap(a: RentalWindow, b: RentalWindow) -> bool {
    let a_starts_before_b_ends = b.end.is_none_or(|b_end| a.start < b_end);
    let b_starts_before_a_ends = a.end.is_none_or(|a_end| b.start < a_end);
    a_starts_before_b_ends && b_starts_before_a_ends
}

/// Does `existing` block `candidate` for `vehicle_id`?
///
/// Cancelled rentals, other vehicles and the excluded rental never conflict.
pub fn conflicts_with(
    existing: &Rental,
    vehicle_id: VehicleId,
    candidate: RentalWindow,
    exclude: Option<RentalId>,
) -> bool {
    existing.vehicle_id == vehicle_id
        && existing.status != RentalStatus::Cancelled
        && exclude != Some(existing.id)
        && windows_overlap(RentalWindow::of(existing), candidate)
}

/// Pure availability decision over a set of existing rentals.
///
/// `Ok(true)` means no conflicting rental exists. The set may be broader than
/// the vehicle's rentals; non-matching entries are ignored. An inverted or
/// unrepresentable candidate window is an error, never "available".
pub fn is_available<'a>(
    existing: impl IntoIterator<Item = &'a Rental>,
    vehicle_id: VehicleId,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    exclude: Option<RentalId>,
) -> Result<bool, ValidationError> {
    let candidate = candidate_window(start, end)?;
    Ok(!existing
        .into_iter()
        .any(|rental| conflicts_with(rental, vehicle_id, candidate, exclude)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BranchId, Cpf, CustomerName, HourlyRate, Phone, rental::Customer,
    };
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    const VEHICLE: i64 = 7;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    fn rental(
        id: i64,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        status: RentalStatus,
    ) -> Rental {
        Rental {
            id: RentalId::new(id),
            vehicle_id: VehicleId::new(VEHICLE),
            branch_id: BranchId::new(1),
            customer: Customer {
                name: CustomerName::parse("Maria Silva").unwrap(),
                cpf: Cpf::parse("12345678901").unwrap(),
                phone: Phone::parse("11999999999").unwrap(),
            },
            start,
            end,
            hourly_rate: HourlyRate::new(Decimal::new(1550, 2)).unwrap(),
            total_value: None,
            status,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn available(
        existing: &[Rental],
        vehicle_id: VehicleId,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        exclude: Option<RentalId>,
    ) -> bool {
        is_available(existing, vehicle_id, start, end, exclude).unwrap()
    }

    fn vehicle() -> VehicleId {
        VehicleId::new(VEHICLE)
    }

    #[test]
    fn test_adjacent_windows_are_available() {
        let existing = [rental(1, at(10), Some(at(12)), RentalStatus::Requested)];

        assert!(available(&existing, vehicle(), at(12), Some(at(14)), None));
        assert!(available(&existing, vehicle(), at(8), Some(at(10)), None));
    }

    #[test]
    fn test_overlapping_window_conflicts() {
        let existing = [rental(1, at(11), Some(at(13)), RentalStatus::Started)];

        assert!(!available(&existing, vehicle(), at(10), Some(at(12)), None));
    }

    #[test]
    fn test_contained_and_containing_windows_conflict() {
        let existing = [rental(1, at(10), Some(at(16)), RentalStatus::Requested)];

        assert!(!available(&existing, vehicle(), at(11), Some(at(12)), None));
        assert!(!available(&existing, vehicle(), at(9), Some(at(17)), None));
        assert!(!available(&existing, vehicle(), at(10), Some(at(16)), None));
    }

    #[test]
    fn test_open_ended_rental_blocks_later_windows() {
        let existing = [rental(1, at(9), None, RentalStatus::Started)];

        assert!(!available(&existing, vehicle(), at(9), Some(at(10)), None));
        assert!(!available(&existing, vehicle(), at(20), Some(at(22)), None));
        assert!(!available(&existing, vehicle(), at(8), Some(at(10)), None));
        assert!(available(&existing, vehicle(), at(6), Some(at(8)), None));
        // Ending exactly at the open-ended start is adjacency
        assert!(available(&existing, vehicle(), at(7), Some(at(9)), None));
    }

    #[test]
    fn test_missing_candidate_end_defaults_to_one_hour() {
        let existing = [rental(1, at(11), Some(at(12)), RentalStatus::Requested)];

        // [10, 11) touches [11, 12)
        assert!(available(&existing, vehicle(), at(10), None, None));
        // [11, 12) overlaps
        assert!(!available(&existing, vehicle(), at(11), None, None));
    }

    #[test]
    fn test_candidate_window_default() {
        let window = candidate_window(at(10), None).unwrap();
        assert_eq!(window.end, Some(at(11)));

        let window = candidate_window(at(10), Some(at(15))).unwrap();
        assert_eq!(window.end, Some(at(15)));
    }

    #[test]
    fn test_inverted_candidate_window_is_rejected() {
        let existing = [rental(1, at(9), Some(at(11)), RentalStatus::Requested)];

        assert_eq!(
            is_available(&existing, vehicle(), at(12), Some(at(10)), None),
            Err(ValidationError::EndNotAfterStart)
        );
        assert_eq!(
            is_available(&existing, vehicle(), at(12), Some(at(12)), None),
            Err(ValidationError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_default_end_past_time_range_is_rejected() {
        let latest = DateTime::<Utc>::MAX_UTC - Duration::minutes(30);

        assert_eq!(
            candidate_window(latest, None),
            Err(ValidationError::StartOutOfRange)
        );
        assert!(candidate_window(latest, Some(DateTime::<Utc>::MAX_UTC)).is_ok());
    }

    #[test]
    fn test_both_open_ended_windows_overlap() {
        let a = RentalWindow::new(at(9), None);
        let b = RentalWindow::new(at(20), None);

        assert!(windows_overlap(a, b));
        assert!(windows_overlap(b, a));
    }

    #[test]
    fn test_cancelled_rentals_are_ignored() {
        let existing = [
            rental(1, at(10), Some(at(14)), RentalStatus::Cancelled),
            rental(2, at(9), None, RentalStatus::Cancelled),
        ];

        assert!(available(&existing, vehicle(), at(11), Some(at(12)), None));
    }

    #[test]
    fn test_finished_rentals_still_block_their_window() {
        let existing = [rental(1, at(10), Some(at(14)), RentalStatus::Finished)];

        assert!(!available(&existing, vehicle(), at(13), Some(at(15)), None));
    }

    #[test]
    fn test_excluded_rental_does_not_conflict_with_itself() {
        let existing = [
            rental(1, at(10), Some(at(12)), RentalStatus::Requested),
            rental(2, at(14), Some(at(16)), RentalStatus::Requested),
        ];

        assert!(available(
            &existing,
            vehicle(),
            at(10),
            Some(at(13)),
            Some(RentalId::new(1))
        ));
        assert!(!available(
            &existing,
            vehicle(),
            at(10),
            Some(at(15)),
            Some(RentalId::new(1))
        ));
    }

    #[test]
    fn test_other_vehicles_are_ignored() {
        let existing = [rental(1, at(10), Some(at(12)), RentalStatus::Started)];

        assert!(available(
            &existing,
            VehicleId::new(VEHICLE + 1),
            at(10),
            Some(at(12)),
            None
        ));
    }

    #[test]
    fn test_empty_set_available() {
        let existing: [Rental; 0] = [];
        assert!(available(&existing, vehicle(), at(10), None, None));
    }
}
