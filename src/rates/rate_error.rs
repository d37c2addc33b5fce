use thiserror::Error;

/// Why a live exchange rate could not be obtained.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Currency {0} missing from response")]
    MissingCurrency(&'static str),

    #[error("Unusable rate: {0}")]
    InvalidRate(f64),
}
