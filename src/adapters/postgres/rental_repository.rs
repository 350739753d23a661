use crate::domain::{
    BranchId, Cpf, Customer, CustomerName, HourlyRate, Phone, Rental, RentalDraft, RentalId,
    RentalStatus, VehicleId, availability::RentalWindow,
};
use crate::ports::rental_repository::{
    PageRequest, RentalRepository as RentalRepositoryTrait, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// `SELECT` over every rental column followed by the given clause
macro_rules! select_rentals {
    ($clause:literal) => {
        concat!(
            r#"
            SELECT
                id,
                vehicle_id,
                branch_id,
                customer_name,
                customer_cpf,
                customer_phone,
                start_at,
                end_at,
                hourly_rate,
                total_value,
                status,
                created_at,
                updated_at
            FROM rentals
            "#,
            $clause
        )
    };
}

fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

/// Convert a PostgreSQL row into a Rental
///
/// Stored values are run back through the value objects, so a row that
/// violates a domain invariant surfaces as an InvalidData error.
fn map_row_to_rental(row: &PgRow) -> Result<Rental> {
    let status_str: &str = row.try_get("status")?;
    let status = RentalStatus::from_str(status_str).map_err(invalid_data)?;

    let customer = Customer {
        name: CustomerName::parse(row.try_get::<String, _>("customer_name")?)
            .map_err(|e| invalid_data(format!("customer_name: {}", e)))?,
        cpf: Cpf::parse(row.try_get::<String, _>("customer_cpf")?)
            .map_err(|e| invalid_data(format!("customer_cpf: {}", e)))?,
        phone: Phone::parse(row.try_get::<String, _>("customer_phone")?)
            .map_err(|e| invalid_data(format!("customer_phone: {}", e)))?,
    };

    let hourly_rate = HourlyRate::new(row.try_get("hourly_rate")?)
        .map_err(|e| invalid_data(format!("hourly_rate: {}", e)))?;

    Ok(Rental {
        id: RentalId::new(row.try_get("id")?),
        vehicle_id: VehicleId::new(row.try_get("vehicle_id")?),
        branch_id: BranchId::new(row.try_get("branch_id")?),
        customer,
        start: row.try_get("start_at")?,
        end: row.try_get("end_at")?,
        hourly_rate,
        total_value: row.try_get("total_value")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// PostgreSQL implementation of RentalRepository
///
/// IDs come from the `rentals.id` BIGSERIAL.
pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalRepositoryTrait for RentalRepository {
    async fn create(&self, draft: RentalDraft) -> Result<Rental> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO rentals (
                vehicle_id,
                branch_id,
                customer_name,
                customer_cpf,
                customer_phone,
                start_at,
                end_at,
                hourly_rate,
                total_value,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL, $9, $10, $10)
            RETURNING id
            "#,
        )
        .bind(draft.vehicle_id.value())
        .bind(draft.branch_id.value())
        .bind(draft.customer.name.as_str())
        .bind(draft.customer.cpf.as_str())
        .bind(draft.customer.phone.as_str())
        .bind(draft.start)
        .bind(draft.end)
        .bind(draft.hourly_rate.value())
        .bind(RentalStatus::Requested.as_str())
        .bind(draft.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(draft.into_rental(RentalId::new(id)))
    }

    async fn save(&self, rental: &Rental, expected_updated_at: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE rentals SET
                vehicle_id = $2,
                branch_id = $3,
                customer_name = $4,
                customer_cpf = $5,
                customer_phone = $6,
                start_at = $7,
                end_at = $8,
                hourly_rate = $9,
                total_value = $10,
                status = $11,
                updated_at = $12
            WHERE id = $1 AND updated_at = $13
            "#,
        )
        .bind(rental.id.value())
        .bind(rental.vehicle_id.value())
        .bind(rental.branch_id.value())
        .bind(rental.customer.name.as_str())
        .bind(rental.customer.cpf.as_str())
        .bind(rental.customer.phone.as_str())
        .bind(rental.start)
        .bind(rental.end)
        .bind(rental.hourly_rate.value())
        .bind(rental.total_value)
        .bind(rental.status.as_str())
        .bind(rental.updated_at)
        .bind(expected_updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_id(&self, id: RentalId) -> Result<Option<Rental>> {
        let row = sqlx::query(select_rentals!("WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_rental).transpose()
    }

    async fn delete(&self, id: RentalId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Rental>> {
        let rows = sqlx::query(select_rentals!("ORDER BY id ASC LIMIT $1 OFFSET $2"))
            .bind(i64::try_from(page.limit())?)
            .bind(i64::try_from(page.offset())?)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_rental).collect()
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rentals")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count)?)
    }

    async fn find_by_vehicle_id(&self, vehicle_id: VehicleId) -> Result<Vec<Rental>> {
        let rows = sqlx::query(select_rentals!(
            "WHERE vehicle_id = $1 ORDER BY start_at ASC"
        ))
        .bind(vehicle_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }

    async fn find_by_branch_id(&self, branch_id: BranchId) -> Result<Vec<Rental>> {
        let rows = sqlx::query(select_rentals!(
            "WHERE branch_id = $1 ORDER BY start_at ASC"
        ))
        .bind(branch_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }

    async fn find_by_customer_cpf(&self, cpf: &Cpf) -> Result<Vec<Rental>> {
        let rows = sqlx::query(select_rentals!(
            "WHERE customer_cpf = $1 ORDER BY start_at DESC"
        ))
        .bind(cpf.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }

    async fn find_started_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Rental>> {
        let rows = sqlx::query(select_rentals!(
            "WHERE start_at >= $1 AND start_at <= $2 ORDER BY start_at ASC"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }

    async fn find_by_status(&self, status: RentalStatus) -> Result<Vec<Rental>> {
        let rows = sqlx::query(select_rentals!(
            "WHERE status = $1 ORDER BY start_at ASC"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }

    /// Uses the partial (vehicle_id, start_at) index.
    /// An open-ended candidate (`window.end == None`) matches every later start.
    async fn find_by_vehicle_and_window(
        &self,
        vehicle_id: VehicleId,
        window: RentalWindow,
    ) -> Result<Vec<Rental>> {
        let rows = sqlx::query(select_rentals!(
            r#"
            WHERE vehicle_id = $1
              AND status <> 'cancelled'
              AND ($3::timestamptz IS NULL OR start_at < $3)
              AND (end_at IS NULL OR end_at > $2)
            ORDER BY start_at ASC
            "#
        ))
        .bind(vehicle_id.value())
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }
}
