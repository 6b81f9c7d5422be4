use std::time::Duration;

use reqwest::{Client, Request};
use tokio::time::{Instant, timeout_at};

use crate::error::{QuoteError, Result};
use crate::exchange_rate::ExchangeRate;
use crate::usd_brl::UsdBrl;

/// Budget for the provider call, counted from request arrival.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_millis(200);

/// Fetches the current USD-BRL quote, giving up at `deadline`.
///
/// Nothing is retried. When the deadline elapses the in-flight request is
/// dropped, which aborts its connection.
pub async fn fetch_exchange_rate(
    client: &Client,
    url: &str,
    deadline: Instant,
) -> Result<ExchangeRate> {
    let request = client.get(url).build().map_err(QuoteError::Request)?;
    let text = timeout_at(deadline, load_json(client, request))
        .await
        .map_err(|_| QuoteError::DeadlineExceeded)??;
    let usd_brl: UsdBrl = serde_json::from_str(&text)?;

    Ok(usd_brl.usd_brl)
}

async fn load_json(client: &Client, request: Request) -> Result<String> {
    let resp = client
        .execute(request)
        .await
        .map_err(QuoteError::Transport)?;
    if !resp.status().is_success() {
        return Err(QuoteError::UpstreamStatus(resp.status()));
    }

    let text = resp.text().await.map_err(QuoteError::Transport)?;

    Ok(text)
}
