pub mod generic;
pub mod regional;

use anyhow::{Context, Result};

use crate::config::{Config, Variant};
use crate::rates::ExchangeRateApi;
use generic::GenericService;
use regional::RegionalService;

/// The loaded model this process serves. Built once before the server starts.
pub enum App {
    Regional(RegionalService),
    Generic(GenericService),
}

impl App {
    pub fn load(config: &Config) -> Result<Self> {
        match config.variant {
            Variant::Regional => {
                let service = RegionalService::load(&config.regional)
                    .context("Failed to load regional model artifacts")?;
                Ok(App::Regional(service))
            }
            Variant::Generic => {
                let rates = ExchangeRateApi::new(
                    config.generic.exchange_rate_url.clone(),
                    config.generic.exchange_rate_timeout,
                )
                .context("Failed to build exchange-rate client")?;

                let service = GenericService::load(&config.generic, Box::new(rates))
                    .context("Failed to load generic model artifacts")?;
                Ok(App::Generic(service))
            }
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            App::Regional(_) => Variant::Regional,
            App::Generic(_) => Variant::Generic,
        }
    }
}
