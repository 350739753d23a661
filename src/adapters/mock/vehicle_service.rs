use crate::domain::value_objects::VehicleId;
use crate::ports::vehicle_service::{Result, VehicleService as VehicleServiceTrait};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock implementation of VehicleService
///
/// Stateful: only registered vehicle IDs exist.
pub struct VehicleService {
    vehicles: Mutex<HashSet<VehicleId>>,
}

impl VehicleService {
    pub fn new() -> Self {
        Self {
            vehicles: Mutex::new(HashSet::new()),
        }
    }

    /// Register a vehicle for testing purposes
    pub fn add_vehicle(&self, vehicle_id: VehicleId) {
        self.vehicles.lock().unwrap().insert(vehicle_id);
    }
}

impl Default for VehicleService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleServiceTrait for VehicleService {
    async fn exists(&self, vehicle_id: VehicleId) -> Result<bool> {
        Ok(self.vehicles.lock().unwrap().contains(&vehicle_id))
    }
}
