use kabs_server::{
    AppState,
    chat::OpenAiChat,
    config::AppConfig,
    db, frontend,
    storage::LocalFileStorage,
};
use std::{process::ExitCode, sync::Arc};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;

    let storage = LocalFileStorage::new(config.projects_dir.clone())?;
    tracing::info!(root = %storage.root().display(), "project storage ready");

    let db = db::init_pool(&config.database_url).await?;

    let frontend_dir = frontend::resolve_build_dir(config.frontend_dir.clone());
    tracing::info!(dir = %frontend_dir.display(), "serving frontend");

    if config.chat.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; chat replies will carry an error marker");
    }

    let app = kabs_server::app(AppState {
        storage: Arc::new(storage),
        db,
        chat: Arc::new(OpenAiChat::new(config.chat)),
        frontend_dir,
        cors_origin: config.cors_origin,
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
