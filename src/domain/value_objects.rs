use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length of a customer name.
pub const CUSTOMER_NAME_MAX_LEN: usize = 100;

/// Exact length of a CPF (Brazilian national ID), digits only.
pub const CPF_LEN: usize = 11;

/// Maximum length of a customer phone number.
pub const PHONE_MAX_LEN: usize = 15;

/// Rental ID - assigned by the persistence layer on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RentalId(i64);

impl RentalId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Vehicle (motorcycle) ID - reference to the fleet context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(i64);

impl VehicleId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Branch ID - reference to the branch context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchId(i64);

impl BranchId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Customer name
///
/// Invariant: non-blank, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName(String);

impl CustomerName {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyCustomerName);
        }
        if value.chars().count() > CUSTOMER_NAME_MAX_LEN {
            return Err(ValidationError::CustomerNameTooLong);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Customer CPF
///
/// Invariant: exactly 11 ASCII digits. No check-digit verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cpf(String);

impl Cpf {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.len() != CPF_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidCpf);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Customer phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyPhone);
        }
        if value.chars().count() > PHONE_MAX_LEN {
            return Err(ValidationError::PhoneTooLong);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Price charged per hour of rental
///
/// Invariant: strictly positive. Immutable once the rental exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRate(Decimal);

impl HourlyRate {
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveHourlyRate);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Rental lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    /// Booked, vehicle not yet handed over (initial)
    Requested,
    /// Vehicle is with the customer
    Started,
    /// Vehicle returned, total computed (terminal)
    Finished,
    /// Called off before finishing (terminal)
    Cancelled,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Requested => "requested",
            RentalStatus::Started => "started",
            RentalStatus::Finished => "finished",
            RentalStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RentalStatus::Finished | RentalStatus::Cancelled)
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RentalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(RentalStatus::Requested),
            "started" => Ok(RentalStatus::Started),
            "finished" => Ok(RentalStatus::Finished),
            "cancelled" => Ok(RentalStatus::Cancelled),
            _ => Err(format!("Invalid rental status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_name_accepts_max_length() {
        let name = "a".repeat(CUSTOMER_NAME_MAX_LEN);
        assert!(CustomerName::parse(name).is_ok());
    }

    #[test]
    fn test_customer_name_rejects_blank_and_too_long() {
        assert_eq!(
            CustomerName::parse("   ").unwrap_err(),
            ValidationError::EmptyCustomerName
        );
        assert_eq!(
            CustomerName::parse("a".repeat(CUSTOMER_NAME_MAX_LEN + 1)).unwrap_err(),
            ValidationError::CustomerNameTooLong
        );
    }

    #[test]
    fn test_cpf_requires_eleven_digits() {
        assert!(Cpf::parse("12345678901").is_ok());
        assert_eq!(Cpf::parse("1234567890").unwrap_err(), ValidationError::InvalidCpf);
        assert_eq!(Cpf::parse("123456789012").unwrap_err(), ValidationError::InvalidCpf);
        assert_eq!(Cpf::parse("123.456.789").unwrap_err(), ValidationError::InvalidCpf);
    }

    #[test]
    fn test_phone_length_limits() {
        assert!(Phone::parse("11999999999").is_ok());
        assert_eq!(Phone::parse("").unwrap_err(), ValidationError::EmptyPhone);
        assert_eq!(
            Phone::parse("1".repeat(PHONE_MAX_LEN + 1)).unwrap_err(),
            ValidationError::PhoneTooLong
        );
    }

    #[test]
    fn test_hourly_rate_must_be_positive() {
        assert!(HourlyRate::new(Decimal::new(1, 2)).is_ok());
        assert_eq!(
            HourlyRate::new(Decimal::ZERO).unwrap_err(),
            ValidationError::NonPositiveHourlyRate
        );
        assert_eq!(
            HourlyRate::new(Decimal::new(-1550, 2)).unwrap_err(),
            ValidationError::NonPositiveHourlyRate
        );
    }

    #[test]
    fn test_rental_status_string_round_trip() {
        for status in [
            RentalStatus::Requested,
            RentalStatus::Started,
            RentalStatus::Finished,
            RentalStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<RentalStatus>(), Ok(status));
        }
        assert!("active".parse::<RentalStatus>().is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!RentalStatus::Requested.is_terminal());
        assert!(!RentalStatus::Started.is_terminal());
        assert!(RentalStatus::Finished.is_terminal());
        assert!(RentalStatus::Cancelled.is_terminal());
    }
}
