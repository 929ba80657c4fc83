use toolbridge::config::ServerSettings;
use toolbridge::llm::LlmSettings;
use toolbridge::Server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = ServerSettings::from_env();
    let llm = LlmSettings::from_env();

    let mut server = Server::start(&settings, &llm).await?;
    tracing::info!(addr = %server.addr(), provider = %llm.provider, "toolbridge listening");

    tokio::signal::ctrl_c()
        .await
        .map_err(|error| error.to_string())?;
    tracing::info!("shutting down");
    server.shutdown()
}
