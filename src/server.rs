//! The `/cotacao` endpoint: fetch, answer, then persist.
use actix_web::http::header::ContentType;
use actix_web::{App, HttpResponse, HttpServer, web};
use log::{debug, info};
use reqwest::Client;
use sqlx::SqlitePool;
use tokio::time::Instant;

use crate::config::ServerConfig;
use crate::error::{QuoteError, log_error};
use crate::exchange_rate::BidResponse;
use crate::provider::{self, PROVIDER_TIMEOUT};
use crate::store::{self, STORE_TIMEOUT};

/// Handles shared by every request. The pool is safe to use concurrently.
pub struct AppState {
    pub pool: SqlitePool,
    pub http: Client,
    pub provider_url: String,
}

impl AppState {
    pub fn new(pool: SqlitePool, provider_url: impl Into<String>) -> Self {
        Self {
            pool,
            http: Client::new(),
            provider_url: provider_url.into(),
        }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/cotacao", web::get().to(usd_brl_exchange_rate));
}

/// Both deadlines start at arrival and are independent of each other, so a
/// slow fetch eats into the time left for the insert.
///
/// A failed fetch leaves the body empty with the default status. The bid is
/// encoded before anything is committed, so an encoding failure still turns
/// into a clean `500`. Persistence runs after the response is built and its
/// outcome never changes it.
pub async fn usd_brl_exchange_rate(state: web::Data<AppState>) -> HttpResponse {
    let arrived = Instant::now();
    let fetch_deadline = arrived + PROVIDER_TIMEOUT;
    let store_deadline = arrived + STORE_TIMEOUT;

    let rate =
        match provider::fetch_exchange_rate(&state.http, &state.provider_url, fetch_deadline).await
        {
            Ok(rate) => rate,
            Err(err) => {
                log_error("fetch_exchange_rate", &err);
                return HttpResponse::Ok().finish();
            }
        };

    // Cannot fail for a single String field.
    let body = match serde_json::to_vec(&BidResponse::from(&rate)) {
        Ok(body) => body,
        Err(err) => {
            log_error("encode_bid", &QuoteError::from(err));
            return HttpResponse::InternalServerError().finish();
        }
    };
    let response = HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body);

    match store::insert_exchange_rate(&state.pool, &rate, store_deadline).await {
        Ok(id) => debug!("stored exchange rate {} (bid {})", id, rate.bid),
        Err(err) => log_error("insert_exchange_rate", &err),
    }

    response
}

/// Opens the store, makes sure the table exists and serves until shutdown.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let pool = store::connect(&config.database_url).await?;
    store::create_exchange_rates(&pool).await?;
    info!("Using database {}", config.database_url);

    let state = web::Data::new(AppState::new(pool, config.provider_url));

    info!("Quote server listening on {}", config.bind_addr);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(config.bind_addr)?
        .run()
        .await?;

    Ok(())
}
