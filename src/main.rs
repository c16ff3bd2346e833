use dotenv::dotenv;
use octorelay::dispatcher::{Dispatcher, EventKind};
use octorelay::AppConfig;

pub mod http_server;
pub mod observability;
pub mod webhooks;

use crate::{
    http_server::{run_http_server, AppState},
    observability::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error:\n{}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Output mode: {:?}, avatars: {}",
        config.output_mode,
        config.show_avatars
    );
    for kind in [EventKind::PullRequest, EventKind::IssueComment] {
        tracing::info!("Handling {} actions: {:?}", kind, Dispatcher::actions(kind));
    }

    let state = AppState::from_config(&config)?;
    run_http_server(state, config.port).await?;

    Ok(())
}
