use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::domain::similarity::ScoringParams;

/// Which trained model this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Bandung listings model: log-price target, rupiah output, similar listings.
    Regional,
    /// Polynomial ridge model trained on imperial units, USD output converted to IDR.
    Generic,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Regional => "regional",
            Variant::Generic => "generic",
        }
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regional" | "bandung" => Ok(Variant::Regional),
            "generic" | "usd" => Ok(Variant::Generic),
            other => bail!("unknown model variant '{other}' (expected 'regional' or 'generic')"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegionalConfig {
    pub model_path: PathBuf,
    pub schema_path: PathBuf,
    pub listings_path: PathBuf,
    pub similar_count: usize,
    pub scoring: ScoringParams,
}

#[derive(Debug, Clone)]
pub struct GenericConfig {
    pub model_path: PathBuf,
    pub transform_path: PathBuf,
    pub exchange_rate_url: Url,
    pub exchange_rate_timeout: Duration,
    pub fallback_usd_idr: f64,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub max_workers: usize,
    pub variant: Variant,
    pub regional: RegionalConfig,
    pub generic: GenericConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = parse_var("PORT", 8000)?;
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .context("HOST/PORT must form a valid socket address")?;

        let defaults = ScoringParams::default();
        let scoring = ScoringParams {
            price_weight: parse_var("SCORE_PRICE_WEIGHT", defaults.price_weight)?,
            geo_weight: parse_var("SCORE_GEO_WEIGHT", defaults.geo_weight)?,
            count_scale: parse_var("SCORE_COUNT_SCALE", defaults.count_scale)?,
            geo_scale_km: parse_var("SCORE_GEO_SCALE_KM", defaults.geo_scale_km)?,
            earth_radius_km: defaults.earth_radius_km,
        };
        scoring.validate()?;

        let exchange_rate_url = env::var("EXCHANGE_RATE_URL")
            .unwrap_or_else(|_| "https://open.er-api.com/v6/latest/USD".to_string());
        let exchange_rate_url =
            Url::parse(&exchange_rate_url).context("EXCHANGE_RATE_URL must be a valid URL")?;

        let fallback_usd_idr: f64 = parse_var("FALLBACK_USD_IDR", 15500.0)?;
        if !(fallback_usd_idr.is_finite() && fallback_usd_idr > 0.0) {
            bail!("FALLBACK_USD_IDR must be a positive number");
        }

        Ok(Self {
            addr,
            max_workers: parse_var("MAX_WORKERS", 8)?,
            variant: parse_var("PRICE_MODEL_VARIANT", Variant::Regional)?,
            regional: RegionalConfig {
                model_path: path_var("REGIONAL_MODEL_PATH", "artifacts/regional/model.json"),
                schema_path: path_var("REGIONAL_SCHEMA_PATH", "artifacts/regional/schema.json"),
                listings_path: path_var(
                    "REGIONAL_LISTINGS_PATH",
                    "artifacts/regional/listings.csv",
                ),
                similar_count: parse_var("SIMILAR_COUNT", 5)?,
                scoring,
            },
            generic: GenericConfig {
                model_path: path_var("GENERIC_MODEL_PATH", "artifacts/generic/model.json"),
                transform_path: path_var(
                    "GENERIC_TRANSFORM_PATH",
                    "artifacts/generic/transform.json",
                ),
                exchange_rate_url,
                exchange_rate_timeout: Duration::from_secs(parse_var(
                    "EXCHANGE_RATE_TIMEOUT_SECS",
                    5,
                )?),
                fallback_usd_idr,
            },
        })
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}
