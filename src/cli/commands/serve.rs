use clap::Args;

use crate::config::AppConfig;
use crate::server;

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides APP_PORT)")]
    pub port: Option<u16>,
}

pub async fn handle(args: ServeArgs, config: &AppConfig) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(port) = args.port {
        config.api.port = port;
    }
    tracing::info!("Starting newsdesk API in {:?} mode", config.environment);
    server::serve(&config).await
}
