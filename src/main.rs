use std::sync::Arc;

use product_catalog::{
    app::{build_router, product::repository::MySqlProductRepository, AppState, PRODUCT_PREFIXES},
    config::{load_dotenv, AppConfig},
    infrastructure::{database::DatabaseManager, logger::Logger},
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_file = load_dotenv();
    let config = AppConfig::from_env()?;

    // 初始化日志
    Logger::init(&config.logging.level);
    if let Some(path) = env_file {
        info!("Loaded environment from {}", path.display());
    }

    info!(
        "Connecting to database: {}",
        config.database.display_target()
    );
    let database = DatabaseManager::new(&config.database).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        e
    })?;

    let repository = Arc::new(MySqlProductRepository::new(database.get_pool().clone()));
    let app = build_router(AppState::new(repository));

    let listener = TcpListener::bind(config.http.socket_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 Product catalog running on http://{}", addr);
    info!("📖 Endpoints:");
    for prefix in PRODUCT_PREFIXES {
        info!("   GET|POST          {}", prefix);
        info!("   GET|PUT|DELETE    {}/:id", prefix);
    }
    info!("   GET               /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.get_pool().close().await;
    info!("Server stopped");
    Ok(())
}

/// 等待 Ctrl-C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
