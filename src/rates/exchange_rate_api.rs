// exchange_rate_api.rs
use crate::rates::{RateError, RateProvider};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

const TARGET_CURRENCY: &str = "IDR";

/// USD-based rate table as served by exchangerate-api style endpoints.
/// The keyed v6 API calls the table `conversion_rates`, the open API `rates`.
#[derive(Debug, Deserialize)]
struct LatestRates {
    #[serde(alias = "conversion_rates")]
    rates: HashMap<String, f64>,
}

/// Fetches USD→IDR from an HTTP rate API. One request per call, no caching.
pub struct ExchangeRateApi {
    client: Client,
    url: Url,
}

impl ExchangeRateApi {
    /// Fails only if the HTTP client cannot be built (e.g. no TLS backend),
    /// which is a startup problem rather than a failed lookup.
    pub fn new(url: Url, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, url })
    }
}

impl RateProvider for ExchangeRateApi {
    fn usd_to_idr(&self) -> Result<f64, RateError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .map_err(|e| RateError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RateError::Status(response.status().as_u16()));
        }

        let body: LatestRates = response
            .json()
            .map_err(|e| RateError::Malformed(e.to_string()))?;

        parse_rate(&body)
    }
}

fn parse_rate(body: &LatestRates) -> Result<f64, RateError> {
    let rate = *body
        .rates
        .get(TARGET_CURRENCY)
        .ok_or(RateError::MissingCurrency(TARGET_CURRENCY))?;

    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(RateError::InvalidRate(rate))
    }
}
