use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use catalog_service::config::Config;
use catalog_service::domain::account::service::AccountService;
use catalog_service::domain::book::service::BookService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::outbound::repositories::PostgresAccountRepository;
use catalog_service::outbound::repositories::PostgresBookRepository;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_algorithm = %config.token.algorithm,
        token_ttl_seconds = config.token.ttl_seconds,
        "Configuration loaded"
    );

    // Fail before touching the database if the token settings are unusable
    let token_service = TokenService::new(
        config.token.secret.as_bytes(),
        &config.token.algorithm,
        chrono::Duration::seconds(config.token.ttl_seconds),
    )?;
    let password_hasher = PasswordHasher::with_params(
        config.password.memory_cost_kib,
        config.password.time_cost,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::new(password_hasher, token_service));

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let query_timeout = config.database.query_timeout();
    let account_repository = Arc::new(PostgresAccountRepository::new(
        pg_pool.clone(),
        query_timeout,
    ));
    let book_repository = Arc::new(PostgresBookRepository::new(pg_pool.clone(), query_timeout));

    let account_service = Arc::new(AccountService::new(
        account_repository,
        Arc::clone(&authenticator),
    ));
    let book_service = Arc::new(BookService::new(book_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, book_service, authenticator);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Http server stopped, closing database pool");
    pg_pool.close().await;
    tracing::info!("Service stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
