use ko_lake_villa::{
    adapters::{mock::BookingStore as InMemoryBookingStore, postgres::PostgresBookingStore},
    api::{handlers::AppState, router::create_router},
    application::booking::ServiceDependencies,
    config::{Config, StoreBackend},
    domain::{BookingPolicy, RoomInventory},
    ports::BookingStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ko_lake_villa=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Environment misconfigured");

    // 部屋在庫カタログは起動時に一度だけ読み込み、不正なら起動しない
    let inventory = match &config.room_inventory_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).expect("Failed to read room inventory file");
            RoomInventory::from_json(&json).expect("Invalid room inventory")
        }
        None => RoomInventory::ko_lake_villa(),
    };
    tracing::info!(
        room_types = inventory.room_types().len(),
        "Room inventory loaded"
    );

    // Initialize adapters
    let booking_store: Arc<dyn BookingStore> = match config.store_backend {
        StoreBackend::Postgres => {
            tracing::info!("Database URL: {}", config.database_url);

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run migrations");

            Arc::new(PostgresBookingStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory booking store; bookings are lost on restart");
            Arc::new(InMemoryBookingStore::new())
        }
    };

    // Create service dependencies
    let service_deps = ServiceDependencies {
        booking_store,
        inventory: Arc::new(inventory),
        policy: BookingPolicy::new(config.min_lead_days),
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
