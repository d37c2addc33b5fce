use serde::Serialize;

use crate::config::GenericConfig;
use crate::domain::format::round_to;
use crate::domain::house::GenericHouseInput;
use crate::domain::units::m2_to_sqft;
use crate::errors::ServerError;
use crate::inference::linear::LinearRegressor;
use crate::inference::poly::{PolyTransform, PolynomialSpec};
use crate::inference::{load_json, ArtifactError, Regressor};
use crate::rates::{resolve_rate, RateProvider, RateSource};

/// Column order the generic model was trained with.
pub const FEATURE_ORDER: [&str; 12] = [
    "bedrooms",
    "bathrooms",
    "sqft_living",
    "sqft_lot",
    "floors",
    "waterfront",
    "condition",
    "grade",
    "sqft_above",
    "sqft_basement",
    "yr_built",
    "yr_renovated",
];

/// Assembles the model input in [`FEATURE_ORDER`], converting the m² areas to
/// the square feet the model was trained on.
pub fn assemble_features(input: &GenericHouseInput) -> [f64; 12] {
    [
        input.bedrooms,
        input.bathrooms,
        m2_to_sqft(input.sqft_living),
        m2_to_sqft(input.sqft_lot),
        input.floors,
        input.waterfront as f64,
        input.condition as f64,
        input.grade as f64,
        m2_to_sqft(input.sqft_above),
        m2_to_sqft(input.sqft_basement),
        input.yr_built as f64,
        input.yr_renovated as f64,
    ]
}

/// Polynomial expansion feeding a ridge regressor. Predicts USD.
pub struct GenericModel {
    transform: PolyTransform,
    regressor: LinearRegressor,
}

impl GenericModel {
    pub fn new(spec: PolynomialSpec, regressor: LinearRegressor) -> Result<Self, ArtifactError> {
        let transform = PolyTransform::new(spec)?;

        if transform.n_features_in() != FEATURE_ORDER.len() {
            return Err(ArtifactError::Contract(format!(
                "transform expects {} inputs, the generic model supplies {}",
                transform.n_features_in(),
                FEATURE_ORDER.len()
            )));
        }
        if transform.n_output_features() != regressor.n_features() {
            return Err(ArtifactError::Contract(format!(
                "transform produces {} features, regressor expects {}",
                transform.n_output_features(),
                regressor.n_features()
            )));
        }

        Ok(Self {
            transform,
            regressor,
        })
    }

    pub fn predict_usd(&self, input: &GenericHouseInput) -> f64 {
        let x = self.transform.transform(&assemble_features(input));
        self.regressor.predict_row(&x)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericPrediction {
    pub price_usd: f64,
    pub price_idr: f64,
    pub exchange_rate: f64,
    pub rate_source: RateSource,
}

pub struct GenericService {
    model: GenericModel,
    rates: Box<dyn RateProvider>,
    fallback_rate: f64,
}

impl GenericService {
    pub fn load(config: &GenericConfig, rates: Box<dyn RateProvider>) -> Result<Self, ArtifactError> {
        let spec: PolynomialSpec = load_json(&config.transform_path)?;
        let regressor: LinearRegressor = load_json(&config.model_path)?;
        let model = GenericModel::new(spec, regressor)?;

        Ok(Self::new(model, rates, config.fallback_usd_idr))
    }

    pub fn new(model: GenericModel, rates: Box<dyn RateProvider>, fallback_rate: f64) -> Self {
        Self {
            model,
            rates,
            fallback_rate,
        }
    }

    pub fn predict(&self, input: &GenericHouseInput) -> Result<GenericPrediction, ServerError> {
        let price_usd = self.model.predict_usd(input);
        if !price_usd.is_finite() {
            return Err(ServerError::Inference(format!(
                "model produced a non-finite price ({price_usd})"
            )));
        }

        // Fetched on every call; rates are never cached between requests.
        let rate = resolve_rate(self.rates.as_ref(), self.fallback_rate);

        tracing::debug!(price_usd, rate = rate.rate, source = ?rate.source, "generic prediction");

        Ok(GenericPrediction {
            price_usd: round_to(price_usd, 2),
            price_idr: round_to(price_usd * rate.rate, 0),
            exchange_rate: rate.rate,
            rate_source: rate.source,
        })
    }
}
