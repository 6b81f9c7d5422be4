//! One-shot poller: asks the quote server for the bid and appends it to a file.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use log::info;
use reqwest::{Client, Request};
use tokio::time::{Instant, timeout_at};

use crate::config::ClientConfig;
use crate::error::{QuoteError, Result, log_error};
use crate::exchange_rate::BidResponse;

pub const CLIENT_TIMEOUT: Duration = Duration::from_millis(300);

pub async fn fetch_bid(client: &Client, url: &str, deadline: Instant) -> Result<BidResponse> {
    let request = client.get(url).build().map_err(QuoteError::Request)?;
    let text = timeout_at(deadline, load_body(client, request))
        .await
        .map_err(|_| QuoteError::DeadlineExceeded)??;

    Ok(serde_json::from_str(&text)?)
}

async fn load_body(client: &Client, request: Request) -> Result<String> {
    let resp = client
        .execute(request)
        .await
        .map_err(QuoteError::Transport)?;

    resp.text().await.map_err(QuoteError::Transport)
}

/// Appends `Dólar: <bid>` as a new line, creating the file when needed.
pub fn append_bid(path: &Path, bid: &str) -> Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(format!("Dólar: {}\n", bid).as_bytes())?;

    Ok(())
}

/// Polls once.
///
/// Failing to reach the server is logged and leaves the file alone. A body
/// that does not decode, or a file that cannot be written, is returned as an
/// error for the caller to treat as fatal.
pub async fn run(client: &Client, config: &ClientConfig) -> Result<()> {
    let deadline = Instant::now() + CLIENT_TIMEOUT;

    let bid = match fetch_bid(client, &config.server_url, deadline).await {
        Ok(bid) => bid,
        Err(err @ QuoteError::Decode(_)) => return Err(err),
        Err(err) => {
            log_error("fetch_bid", &err);
            return Ok(());
        }
    };

    append_bid(&config.output_path, &bid.bid)?;
    info!("Dólar: {} written to {}", bid.bid, config.output_path.display());

    Ok(())
}
