//! PostgreSQL adapter tests
//!
//! Need a running database (DATABASE_URL). Run with `cargo test -- --ignored`.

use chrono::{DateTime, TimeZone, Utc};
use moto_rental::adapters::postgres::{
    PostgresBranchService, PostgresRentalRepository, PostgresVehicleService,
};
use moto_rental::domain::availability::RentalWindow;
use moto_rental::domain::rental::{self, Customer};
use moto_rental::domain::{
    BranchId, Cpf, CustomerName, HourlyRate, Phone, RentalDraft, RentalStatus, VehicleId,
};
use moto_rental::ports::{BranchService, PageRequest, RentalRepository, VehicleService};
use rust_decimal::Decimal;
use serial_test::serial;

mod common;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
}

fn draft(
    vehicle_id: i64,
    branch_id: i64,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> RentalDraft {
    RentalDraft {
        vehicle_id: VehicleId::new(vehicle_id),
        branch_id: BranchId::new(branch_id),
        customer: Customer {
            name: CustomerName::parse("Maria Silva").unwrap(),
            cpf: Cpf::parse("12345678901").unwrap(),
            phone: Phone::parse("11999999999").unwrap(),
        },
        start,
        end,
        hourly_rate: HourlyRate::new(Decimal::new(1550, 2)).unwrap(),
        created_at: at(9),
    }
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_create_get_and_save() {
    // Arrange
    let pool = common::create_test_pool().await;
    let (branch_id, vehicle_id) = common::reset_database(&pool).await;
    let repository = PostgresRentalRepository::new(pool);

    // Act
    let created = repository
        .create(draft(vehicle_id, branch_id, at(10), Some(at(16))))
        .await
        .unwrap();
    let started = rental::start_rental(&created, at(10)).unwrap();
    let finished = rental::finish_rental(&started, at(16)).unwrap();
    let saved = repository.save(&finished, created.updated_at).await.unwrap();

    // Assert
    assert_eq!(created.status, RentalStatus::Requested);
    assert!(saved);

    let loaded = repository.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded, finished);
    assert_eq!(loaded.total_value, Some(Decimal::new(9300, 2)));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_save_with_stale_version_is_refused() {
    // Arrange
    let pool = common::create_test_pool().await;
    let (branch_id, vehicle_id) = common::reset_database(&pool).await;
    let repository = PostgresRentalRepository::new(pool);

    let created = repository
        .create(draft(vehicle_id, branch_id, at(10), Some(at(16))))
        .await
        .unwrap();
    let cancelled = rental::cancel_rental(&created, at(11)).unwrap();
    assert!(repository.save(&cancelled, created.updated_at).await.unwrap());

    // Act: a writer that still holds the pre-cancel version
    let started = rental::start_rental(&created, at(12)).unwrap();
    let saved = repository.save(&started, created.updated_at).await.unwrap();

    // Assert
    assert!(!saved);
    let loaded = repository.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.status, RentalStatus::Cancelled);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_delete_and_missing_rows() {
    let pool = common::create_test_pool().await;
    let (branch_id, vehicle_id) = common::reset_database(&pool).await;
    let repository = PostgresRentalRepository::new(pool);

    let created = repository
        .create(draft(vehicle_id, branch_id, at(10), None))
        .await
        .unwrap();

    assert!(repository.delete(created.id).await.unwrap());
    assert!(!repository.delete(created.id).await.unwrap());
    assert!(repository.get_by_id(created.id).await.unwrap().is_none());
    assert!(!repository.save(&created, created.updated_at).await.unwrap());
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_list_and_count() {
    let pool = common::create_test_pool().await;
    let (branch_id, vehicle_id) = common::reset_database(&pool).await;
    let repository = PostgresRentalRepository::new(pool);

    for hour in 10..15 {
        repository
            .create(draft(vehicle_id, branch_id, at(hour), Some(at(hour + 1))))
            .await
            .unwrap();
    }

    let page = repository
        .list(PageRequest {
            page: 2,
            page_size: 2,
        })
        .await
        .unwrap();

    assert_eq!(repository.count().await.unwrap(), 5);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].start, at(12));
    assert_eq!(page[1].start, at(13));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_find_by_vehicle_and_window() {
    let pool = common::create_test_pool().await;
    let (branch_id, vehicle_id) = common::reset_database(&pool).await;
    let repository = PostgresRentalRepository::new(pool);

    let booked = repository
        .create(draft(vehicle_id, branch_id, at(10), Some(at(12))))
        .await
        .unwrap();
    let open = repository
        .create(draft(vehicle_id, branch_id, at(18), None))
        .await
        .unwrap();
    let cancelled = repository
        .create(draft(vehicle_id, branch_id, at(14), Some(at(16))))
        .await
        .unwrap();
    repository
        .save(&rental::cancel_rental(&cancelled, at(9)).unwrap(), cancelled.updated_at)
        .await
        .unwrap();

    let vehicle = VehicleId::new(vehicle_id);

    let overlapping = repository
        .find_by_vehicle_and_window(vehicle, RentalWindow::new(at(11), Some(at(13))))
        .await
        .unwrap();
    assert_eq!(overlapping.len(), 1);
    assert_eq!(overlapping[0].id, booked.id);

    // Touching the end of an existing rental is not an overlap
    let adjacent = repository
        .find_by_vehicle_and_window(vehicle, RentalWindow::new(at(12), Some(at(13))))
        .await
        .unwrap();
    assert!(adjacent.is_empty());

    // Cancelled rentals are skipped, the open-ended one blocks everything after 18:00
    let late = repository
        .find_by_vehicle_and_window(vehicle, RentalWindow::new(at(15), Some(at(23))))
        .await
        .unwrap();
    assert_eq!(late.len(), 1);
    assert_eq!(late[0].id, open.id);

    let unbounded = repository
        .find_by_vehicle_and_window(vehicle, RentalWindow::new(at(11), None))
        .await
        .unwrap();
    assert_eq!(unbounded.len(), 2);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_finders() {
    let pool = common::create_test_pool().await;
    let (branch_id, vehicle_id) = common::reset_database(&pool).await;
    let repository = PostgresRentalRepository::new(pool);

    let first = repository
        .create(draft(vehicle_id, branch_id, at(10), Some(at(11))))
        .await
        .unwrap();
    let second = repository
        .create(draft(vehicle_id, branch_id, at(12), Some(at(13))))
        .await
        .unwrap();
    repository
        .save(&rental::start_rental(&second, at(12)).unwrap(), second.updated_at)
        .await
        .unwrap();

    let by_vehicle = repository
        .find_by_vehicle_id(VehicleId::new(vehicle_id))
        .await
        .unwrap();
    assert_eq!(by_vehicle.len(), 2);

    let by_branch = repository
        .find_by_branch_id(BranchId::new(branch_id))
        .await
        .unwrap();
    assert_eq!(by_branch.len(), 2);

    let by_cpf = repository
        .find_by_customer_cpf(&Cpf::parse("12345678901").unwrap())
        .await
        .unwrap();
    assert_eq!(by_cpf.len(), 2);

    let started = repository
        .find_by_status(RentalStatus::Started)
        .await
        .unwrap();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].id, second.id);

    let in_period = repository
        .find_started_between(at(10), at(11))
        .await
        .unwrap();
    assert_eq!(in_period.len(), 1);
    assert_eq!(in_period[0].id, first.id);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_fleet_lookups() {
    let pool = common::create_test_pool().await;
    let (branch_id, vehicle_id) = common::reset_database(&pool).await;

    let vehicles = PostgresVehicleService::new(pool.clone());
    let branches = PostgresBranchService::new(pool.clone());

    assert!(vehicles.exists(VehicleId::new(vehicle_id)).await.unwrap());
    assert!(!vehicles.exists(VehicleId::new(vehicle_id + 100)).await.unwrap());
    assert!(branches.exists(BranchId::new(branch_id)).await.unwrap());

    sqlx::query("UPDATE branches SET active = FALSE WHERE id = $1")
        .bind(branch_id)
        .execute(&pool)
        .await
        .unwrap();
    assert!(!branches.exists(BranchId::new(branch_id)).await.unwrap());
}
