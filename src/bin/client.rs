use anyhow::Result;
use cotacao::config::ClientConfig;
use reqwest::Client;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logger();

    let config = ClientConfig::from_env();
    cotacao::client::run(&Client::new(), &config).await?;

    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
