use serde::Deserialize;
use serde::Serialize;

/// One USD-BRL quote as the provider reports it.
///
/// Every field is kept as the provider's string; nothing here is parsed as a
/// number, so the values reach the store exactly as they were received.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ExchangeRate {
    pub code: String,
    #[serde(rename = "codein")]
    pub code_in: String,
    pub name: String,
    pub high: String,
    pub low: String,
    #[serde(rename = "varBid")]
    pub var_bid: String,
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    pub bid: String,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}

/// Body served on `/cotacao` and read back by the polling client.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BidResponse {
    pub bid: String,
}

impl From<&ExchangeRate> for BidResponse {
    fn from(rate: &ExchangeRate) -> Self {
        Self {
            bid: rate.bid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate() -> ExchangeRate {
        ExchangeRate {
            code: "USD".into(),
            code_in: "BRL".into(),
            name: "Dólar Americano/Real Brasileiro".into(),
            high: "5.4400".into(),
            low: "5.3900".into(),
            var_bid: "0.0250".into(),
            pct_change: "0.46".into(),
            bid: "5.4321".into(),
            ask: "5.4331".into(),
            timestamp: "1715374798".into(),
            create_date: "2024-05-10 17:59:58".into(),
        }
    }

    #[test]
    fn bid_response_serializes_only_the_bid() {
        let body = serde_json::to_string(&BidResponse::from(&rate())).unwrap();
        assert_eq!(body, r#"{"bid":"5.4321"}"#);
    }

    #[test]
    fn exchange_rate_uses_provider_field_names() {
        let value = serde_json::to_value(rate()).unwrap();
        assert_eq!(value["codein"], "BRL");
        assert_eq!(value["varBid"], "0.0250");
        assert_eq!(value["pctChange"], "0.46");
        assert_eq!(value["create_date"], "2024-05-10 17:59:58");
    }
}
