//! USD-BRL quote relay.
//!
//! The server binary fetches the current quote from the provider, answers
//! `GET /cotacao` with `{"bid": ...}` and stores the full record in SQLite.
//! The client binary polls that endpoint once and appends the bid to a file.
pub mod client;
pub mod config;
pub mod error;
pub mod exchange_rate;
pub mod provider;
pub mod server;
pub mod store;
pub mod usd_brl;

pub use error::{QuoteError, Result};
pub use exchange_rate::{BidResponse, ExchangeRate};
