use crate::domain::VehicleId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

/// Per-vehicle async locks
///
/// Serializes the "check availability, then write" sequence for one vehicle
/// inside this process. Separate processes sharing a database are not covered.
#[derive(Clone, Default)]
pub struct VehicleLocks {
    locks: Arc<Mutex<HashMap<VehicleId, Arc<tokio::sync::Mutex<()>>>>>,
}

impl VehicleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `vehicle_id`. Released when the guard drops.
    pub async fn acquire(&self, vehicle_id: VehicleId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            locks.entry(vehicle_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}
