//! toolfinder-api - HTTP API server for toolfinder

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toolfinder_api::middleware::build_rate_limiter;
use toolfinder_api::{router, AppState, SearchService, ServerConfig};
use toolfinder_db::{log_pool_metrics, Database, PgCatalogueRepository, PoolConfig};
use toolfinder_inference::{GenerationBackend, LlmKeywordClassifier, OpenAIBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let _file_guard = init_tracing();

    let config = ServerConfig::from_env()?;

    // Database
    let db = Database::connect_with_config(
        &config.database_url,
        PoolConfig::new().max_connections(config.db_max_connections),
    )
    .await?;
    log_pool_metrics(&db.pool);

    if config.run_migrations {
        info!("Running database migrations...");
        db.migrate().await?;
        info!("Migrations complete");
    }

    let catalogue = PgCatalogueRepository::new(db.pool.clone())
        .with_table(config.catalogue_table.clone())?
        .with_max_results(config.max_results);

    // Classifier
    let backend = OpenAIBackend::from_env()?;
    info!(
        model = %backend.model_name(),
        base_url = %backend.config().base_url,
        "Classifier backend initialized"
    );
    let classifier = LlmKeywordClassifier::new(backend);

    let search = SearchService::new(Arc::new(classifier), Arc::new(catalogue))
        .with_field_join(config.field_join)
        .with_classifier_timeout(config.classifier_timeout);

    info!(
        table = %config.catalogue_table,
        field_join = %config.field_join,
        max_results = ?config.max_results,
        classifier_timeout_secs = config.classifier_timeout.as_secs(),
        rate_limit = ?config.rate_limit,
        "Search service configured"
    );

    let state =
        AppState::new(search).with_rate_limiter(build_rate_limiter(config.rate_limit));
    let app = router(state, config.allowed_origins.clone());

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "toolfinder_api=debug,tower_http=debug")
///
/// The returned guard must stay alive for file output to be flushed.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "toolfinder_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("toolfinder-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            // no ANSI in files unless asked for
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    guard
}
