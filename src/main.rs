use anyhow::Context;
use recipe_box::api::{self, AppState};
use recipe_box::config::AppConfig;
use recipe_box::fetcher::PageFetcher;
use recipe_box::storage::RecipeStore;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("🚀 Starting Recipe Box");

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    info!("📋 Configuration loaded");
    info!("   - Server: {}", config.bind_addr());
    info!("   - Pool size: {}", config.database.max_connections);
    info!("   - Fetch timeout: {}s", config.fetch.timeout_secs);
    info!("   - Assets: {:?}", config.assets.dir);

    // Initialize database pool
    info!("💾 Connecting to database...");
    let store = RecipeStore::connect(config.database_url(), config.database.max_connections)
        .await
        .context("Failed to connect to database")?;
    let recipe_count = store.count().await?;
    info!("✅ Database ready ({} recipes, {})", recipe_count, store.backend());

    let fetcher = PageFetcher::new(&config.fetch).context("Failed to build HTTP client")?;

    let state = AppState {
        store: store.clone(),
        fetcher,
    };
    let app = api::router(state, &config.assets.dir);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🌐 Starting application on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /          - List saved recipes");
    info!("   POST /          - Save a recipe (form field recipeUrl)");
    info!("   GET  /health    - Health check");
    info!("   GET  /assets/*  - Static files");
    info!("");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("💾 Closing database pool...");
    store.close().await;

    info!("👋 Server shut down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    info!("🛑 Shutdown signal received");
}
