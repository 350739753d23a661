use moto_rental::{
    adapters::postgres::{PostgresBranchService, PostgresRentalRepository, PostgresVehicleService},
    api::{handlers::AppState, router::create_router},
    application::rental::{ServiceDependencies, VehicleLocks},
    config::Config,
    ports::SystemClock,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moto_rental=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    // Initialize adapters
    let service_deps = ServiceDependencies {
        rental_repository: Arc::new(PostgresRentalRepository::new(pool.clone())),
        vehicle_service: Arc::new(PostgresVehicleService::new(pool.clone())),
        branch_service: Arc::new(PostgresBranchService::new(pool)),
        clock: Arc::new(SystemClock),
        vehicle_locks: VehicleLocks::new(),
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
