use hockey_league_api::{app, config::Settings, db, AppState};
use sqlx::sqlite::SqlitePool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting hockey league api...");

    dotenvy::dotenv().ok();

    let settings = Settings::from_env().expect("Invalid server configuration");

    let pool = match &settings.database_url {
        Some(db_url) => {
            let pool = SqlitePool::connect(db_url)
                .await
                .expect("Failed to connect to database");
            db::init_schema(&pool)
                .await
                .expect("Failed to create league schema");
            tracing::info!("Database connection established.");
            Some(pool)
        }
        None => {
            tracing::warn!(
                "DATABASE_URL is not set; league requests will fail until it is configured."
            );
            None
        }
    };

    let addr = settings.addr();
    let router = app(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server.");
}
