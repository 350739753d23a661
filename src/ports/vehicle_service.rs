use crate::domain::value_objects::VehicleId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Vehicle service port
///
/// Keeps the boundary between the rental and fleet contexts.
/// Rentals only know the VehicleId, never the motorcycle details.
#[async_trait]
pub trait VehicleService: Send + Sync {
    /// Used to validate the vehicle before a rental is created.
    async fn exists(&self, vehicle_id: VehicleId) -> Result<bool>;
}
