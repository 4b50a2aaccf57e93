//! BuildBrief server entry point.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use buildbrief_llm::OpenRouterProvider;
use buildbrief_server::api;
use buildbrief_server::config::Config;
use buildbrief_server::services::{InMemorySessionStore, InterviewService};
use buildbrief_server::state::AppState;
use buildbrief_server::utils::error::set_expose_internal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("buildbrief_server=debug,buildbrief_llm=debug,info")),
        )
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    set_expose_internal(config.is_development());

    if config.llm.api_key.is_none() {
        warn!("OPENROUTER_API_KEY is not set; interview endpoints will fail");
    }

    let store = Arc::new(InMemorySessionStore::new());
    let provider = Arc::new(OpenRouterProvider::new(config.llm.clone()));
    let interview = Arc::new(InterviewService::new(store.clone(), provider));

    let config = Arc::new(config);
    let state = AppState::new(interview, store, config.clone());
    let app = api::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(
        port = config.port,
        environment = config.environment.as_str(),
        model = %config.llm.model,
        "BuildBrief server listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received terminate signal, shutting down"),
    }
}
