use secureai_site::config::{environment::Config, init_db};
use secureai_site::services::{jwt::JwtService, mailer::Mailer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "secureai_site=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load environment configuration");

    let db = init_db(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to SQLite");

    let mailer = Mailer::from_config(&config).expect("Failed to initialize mail transport");

    let jwt_service = JwtService::new(config.jwt_secret.clone());

    let app = secureai_site::create_app(db, jwt_service, mailer, config.debug).await;

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
    tracing::info!("Server running on http://localhost:8000");
    axum::serve(listener, app).await.unwrap();
}
