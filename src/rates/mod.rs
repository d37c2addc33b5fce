mod exchange_rate_api;
mod rate_error;

pub use exchange_rate_api::ExchangeRateApi;
pub use rate_error::RateError;

use serde::Serialize;

/// Source of a live USD→IDR rate.
pub trait RateProvider: Send + Sync {
    fn usd_to_idr(&self) -> Result<f64, RateError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate {
    pub rate: f64,
    pub source: RateSource,
}

/// Ask the provider for a live rate, substituting `fallback` on any failure.
pub fn resolve_rate(provider: &dyn RateProvider, fallback: f64) -> ExchangeRate {
    match provider.usd_to_idr() {
        Ok(rate) => ExchangeRate {
            rate,
            source: RateSource::Live,
        },
        Err(e) => {
            tracing::warn!(error = %e, fallback, "exchange rate unavailable, using fallback");
            ExchangeRate {
                rate: fallback,
                source: RateSource::Fallback,
            }
        }
    }
}
