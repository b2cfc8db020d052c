use newsdesk_api::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, R2_*, etc.
    let _ = dotenvy::dotenv();

    newsdesk_api::init_tracing();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting newsdesk API in {:?} mode", config.environment);

    server::serve(config).await
}
