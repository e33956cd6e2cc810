use std::sync::Arc;

use auth::KeyProvider;
use auth::PasswordHasher;
use auth::TokenService;
use focust_api::config::Config;
use focust_api::domain::auth::service::AuthService;
use focust_api::domain::user::service::UserService;
use focust_api::inbound::http::router::create_router;
use focust_api::inbound::http::router::AppState;
use focust_api::outbound::repositories::PostgresUserDirectory;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "focust_api=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "focust-api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        public_key = %config.jwt.rsa.public_key.display(),
        private_key = %config.jwt.rsa.private_key.display(),
        clock_skew_seconds = config.jwt.clock_skew_seconds,
        bcrypt_cost = config.auth.bcrypt_cost,
        "Configuration loaded"
    );

    // Without keys no request can be served; fail before binding
    let keys = Arc::new(KeyProvider::from_paths(
        &config.jwt.rsa.public_key,
        &config.jwt.rsa.private_key,
    ));
    if let Err(e) = keys.material() {
        tracing::error!(error = %e, "Failed to load RSA key pair");
        return Err(e.into());
    }

    let tokens =
        Arc::new(TokenService::new(Arc::clone(&keys)).with_clock_skew(config.jwt.clock_skew_seconds));

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_directory = Arc::new(PostgresUserDirectory::new(pg_pool));

    let user_service = Arc::new(UserService::new(Arc::clone(&user_directory)));
    let auth_service = Arc::new(
        AuthService::new(
            user_directory,
            Arc::clone(&tokens),
            PasswordHasher::new(config.auth.bcrypt_cost)?,
        )?
        .with_uniform_sign_in_failures(config.auth.uniform_sign_in_failures),
    );

    let state = AppState {
        user_service,
        auth_service,
        tokens,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.server.allowed_origins);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
