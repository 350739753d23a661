use crate::domain::value_objects::{BranchId, VehicleId};
use crate::ports::{
    branch_service::{self, BranchService as BranchServiceTrait},
    vehicle_service::{self, VehicleService as VehicleServiceTrait},
};
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL lookup of the `vehicles` table
pub struct VehicleService {
    pool: PgPool,
}

impl VehicleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleServiceTrait for VehicleService {
    async fn exists(&self, vehicle_id: VehicleId) -> vehicle_service::Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM vehicles WHERE id = $1)")
                .bind(vehicle_id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

/// PostgreSQL lookup of the `branches` table
///
/// Inactive branches count as missing.
pub struct BranchService {
    pool: PgPool,
}

impl BranchService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BranchServiceTrait for BranchService {
    async fn exists(&self, branch_id: BranchId) -> branch_service::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM branches WHERE id = $1 AND active)",
        )
        .bind(branch_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
