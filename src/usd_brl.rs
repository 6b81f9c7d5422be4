use serde::Deserialize;
use serde::Serialize;

use crate::exchange_rate::ExchangeRate;

/// Envelope returned by `/json/last/USD-BRL`.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct UsdBrl {
    #[serde(rename = "USDBRL")]
    pub usd_brl: ExchangeRate,
}
