use crate::domain::{
    BranchId, Cpf, Rental, RentalDraft, RentalId, RentalStatus, VehicleId,
    availability::RentalWindow,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One page of a listing, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// Rental repository port
///
/// Owns identity assignment and persistence of rental records.
/// The lifecycle rules stay in the domain; this port only stores the results.
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Persist a new rental and hand out its ID.
    async fn create(&self, draft: RentalDraft) -> Result<Rental>;

    /// Overwrite the stored state of an existing rental.
    ///
    /// Only writes when the stored `updated_at` still equals
    /// `expected_updated_at`. Returns `false` when no rental with that ID and
    /// version exists.
    async fn save(&self, rental: &Rental, expected_updated_at: DateTime<Utc>) -> Result<bool>;

    async fn get_by_id(&self, id: RentalId) -> Result<Option<Rental>>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: RentalId) -> Result<bool>;

    /// Rentals ordered by ID.
    async fn list(&self, page: PageRequest) -> Result<Vec<Rental>>;

    async fn count(&self) -> Result<u64>;

    async fn find_by_vehicle_id(&self, vehicle_id: VehicleId) -> Result<Vec<Rental>>;

    async fn find_by_branch_id(&self, branch_id: BranchId) -> Result<Vec<Rental>>;

    async fn find_by_customer_cpf(&self, cpf: &Cpf) -> Result<Vec<Rental>>;

    /// Rentals whose start lies in `[from, to]` (both ends inclusive).
    async fn find_started_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Rental>>;

    async fn find_by_status(&self, status: RentalStatus) -> Result<Vec<Rental>>;

    /// Candidate rentals that may conflict with `window` on `vehicle_id`.
    ///
    /// May return a superset: callers re-apply `availability::is_available`.
    async fn find_by_vehicle_and_window(
        &self,
        vehicle_id: VehicleId,
        window: RentalWindow,
    ) -> Result<Vec<Rental>>;
}
