use cookbook_server::config::Config;
use cookbook_server::images::ImageStore;
use cookbook_server::store::memory::MemoryStore;
use cookbook_server::store::postgres::PgStore;
use cookbook_server::store::Store;
use cookbook_server::{api, db, telemetry, AppContext};
use std::env;
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    dotenvy::dotenv().ok();
    telemetry::init_telemetry();

    let config = Config::from_env();

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => Arc::new(PgStore::new(db::create_pool(url)?)),
        None => {
            tracing::warn!("DATABASE_URL not set, keeping all data in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let images = ImageStore::new(&config.image_dir);
    images.ensure_root().await?;
    tracing::info!("Storing cover images in {}", images.root().display());

    let app = cookbook_server::router(AppContext::new(store, images), config.cors_layer());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    let addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui/", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
