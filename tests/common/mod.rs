#![allow(dead_code)]

use cotacao::ExchangeRate;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PROVIDER_PATH: &str = "/json/last/USD-BRL";

pub fn sample_rate() -> ExchangeRate {
    ExchangeRate {
        code: "USD".into(),
        code_in: "BRL".into(),
        name: "Dólar Americano/Real Brasileiro".into(),
        high: "5.4400".into(),
        low: "5.3900".into(),
        var_bid: "-0.0123".into(),
        pct_change: "-0.23".into(),
        bid: "5.4321".into(),
        ask: "5.4331".into(),
        timestamp: "1715374798".into(),
        create_date: "2024-05-10 17:59:58".into(),
    }
}

pub fn provider_body(rate: &ExchangeRate) -> Value {
    json!({ "USDBRL": rate })
}

pub async fn mount_provider(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(PROVIDER_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn provider_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), PROVIDER_PATH)
}
