use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use pnlboard_backend::app;
use pnlboard_backend::config::AppConfig;
use pnlboard_backend::external::file_source::FileSource;
use pnlboard_backend::external::realtime_db::RealtimeDbSource;
use pnlboard_backend::external::record_source::RecordSource;
use pnlboard_backend::logging::{init_logging, LoggingConfig};
use pnlboard_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env().context("invalid configuration")?;

    // A local snapshot takes precedence over the hosted database
    let source: Arc<dyn RecordSource> = match (&config.records_file, &config.realtime_db_url) {
        (Some(records_file), _) => {
            tracing::info!("📂 Using record source: file {}", records_file.display());
            Arc::new(FileSource::new(records_file.clone(), config.statements_file.clone()))
        }
        (None, Some(url)) => {
            tracing::info!("🌐 Using record source: realtime database at {}", url);
            Arc::new(RealtimeDbSource::new(
                url.clone(),
                config.graph_path.clone(),
                config.statements_path.clone(),
            ))
        }
        (None, None) => anyhow::bail!("no record source configured"),
    };

    let state = AppState::new(source, &config);
    let app = app::create_app(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("🚀 pnlboard backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
