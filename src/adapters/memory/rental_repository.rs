use crate::domain::{
    BranchId, Cpf, Rental, RentalDraft, RentalId, RentalStatus, VehicleId,
    availability::{RentalWindow, windows_overlap},
};
use crate::ports::rental_repository::{
    PageRequest, RentalRepository as RentalRepositoryTrait, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    next_id: i64,
    rentals: BTreeMap<RentalId, Rental>,
}

/// In-memory RentalRepository
///
/// IDs are handed out from a counter starting at 1. Backs tests and local runs
/// without a database.
#[derive(Default)]
pub struct RentalRepository {
    state: Mutex<State>,
}

impl RentalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn filtered(&self, predicate: impl Fn(&Rental) -> bool) -> Vec<Rental> {
        self.state()
            .rentals
            .values()
            .filter(|rental| predicate(rental))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RentalRepositoryTrait for RentalRepository {
    async fn create(&self, draft: RentalDraft) -> Result<Rental> {
        let mut state = self.state();
        state.next_id += 1;
        let rental = draft.into_rental(RentalId::new(state.next_id));
        state.rentals.insert(rental.id, rental.clone());
        Ok(rental)
    }

    async fn save(&self, rental: &Rental, expected_updated_at: DateTime<Utc>) -> Result<bool> {
        let mut state = self.state();
        match state.rentals.get_mut(&rental.id) {
            Some(stored) if stored.updated_at == expected_updated_at => {
                *stored = rental.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get_by_id(&self, id: RentalId) -> Result<Option<Rental>> {
        Ok(self.state().rentals.get(&id).cloned())
    }

    async fn delete(&self, id: RentalId) -> Result<bool> {
        Ok(self.state().rentals.remove(&id).is_some())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Rental>> {
        let offset = usize::try_from(page.offset())?;
        let limit = usize::try_from(page.limit())?;
        Ok(self
            .state()
            .rentals
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.state().rentals.len() as u64)
    }

    async fn find_by_vehicle_id(&self, vehicle_id: VehicleId) -> Result<Vec<Rental>> {
        Ok(self.filtered(|r| r.vehicle_id == vehicle_id))
    }

    async fn find_by_branch_id(&self, branch_id: BranchId) -> Result<Vec<Rental>> {
        Ok(self.filtered(|r| r.branch_id == branch_id))
    }

    async fn find_by_customer_cpf(&self, cpf: &Cpf) -> Result<Vec<Rental>> {
        Ok(self.filtered(|r| &r.customer.cpf == cpf))
    }

    async fn find_started_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Rental>> {
        Ok(self.filtered(|r| r.start >= from && r.start <= to))
    }

    async fn find_by_status(&self, status: RentalStatus) -> Result<Vec<Rental>> {
        Ok(self.filtered(|r| r.status == status))
    }

    async fn find_by_vehicle_and_window(
        &self,
        vehicle_id: VehicleId,
        window: RentalWindow,
    ) -> Result<Vec<Rental>> {
        Ok(self.filtered(|r| {
            r.vehicle_id == vehicle_id
                && r.status != RentalStatus::Cancelled
                && windows_overlap(RentalWindow::of(r), window)
        }))
    }
}
