use crate::config::RegionalConfig;
use crate::domain::similarity::ScoringParams;
use crate::inference::linear::LinearRegressor;
use crate::inference::poly::PolynomialSpec;
use crate::predict::generic::{GenericModel, GenericService};
use crate::predict::regional::RegionalService;
use crate::predict::App;
use crate::rates::{RateError, RateProvider};
use astra::{Body, Response};
use serde_json::{json, Value};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Baseline price the regional fixture model predicts for an all-missing input.
pub const BASE_PRICE: f64 = 1_000_000_000.0;

pub fn schema_json() -> Value {
    json!({
        "features": [
            "Land", "Building", "Bedroom", "Bathroom", "Carport",
            "Latitude", "Longitude", "Month", "City_Regency", "Location"
        ],
        "numeric_features": [
            "Land", "Building", "Bedroom", "Bathroom", "Carport",
            "Latitude", "Longitude", "Month"
        ],
        "categorical_features": ["City_Regency", "Location"]
    })
}

/// Log-price linear model: only land area and the city move the price.
pub fn regional_model_json() -> Value {
    json!({
        "feature_names_in": [
            "Land", "Building", "Bedroom", "Bathroom", "Carport",
            "Latitude", "Longitude", "Month", "City_Regency", "Location"
        ],
        "target": "log1p",
        "preprocessor": {
            "numeric": [
                {"name": "Land", "impute": 100.0, "mean": 100.0, "scale": 100.0},
                {"name": "Building", "impute": 80.0},
                {"name": "Bedroom", "impute": 3.0}
            ],
            "categorical": [
                {"name": "City_Regency", "categories": ["Cimahi", "Kota Bandung"]}
            ]
        },
        "estimator": {
            "kind": "linear",
            "intercept": (BASE_PRICE + 1.0).ln(),
            "coefficients": [0.1, 0.0, 0.0, -0.2, 0.3]
        }
    })
}

pub const LISTINGS_CSV: &str = "\
Price,Location,City/Regency,Bedroom,Bathroom,Carport,Land,Building,Latitude,Longitude,Month
1100000000,Coblong,Kota Bandung,3,2,1,100,80,-6.885,107.613,5
1900000000,Sukajadi,Kota Bandung,4,3,2,200,160,-6.880,107.590,7
950000000,Cimahi Utara,Cimahi,3,2,1,100,80,-6.860,107.540,3
600000000,Cimahi Tengah,Cimahi,2,1,0,60,45,-6.872,107.542,9
3000000000,Coblong,Kota Bandung,5,4,2,300,250,-6.890,107.615,1
1020000000,Lembang,Bandung Barat,3,2,1,110,85,-6.811,107.617,6
";

static FIXTURE_SEQ: AtomicUsize = AtomicUsize::new(0);

/// A unique scratch directory holding the regional artifacts.
pub fn write_regional_artifacts() -> RegionalConfig {
    let dir = std::env::temp_dir().join(format!(
        "house_price_api_test_{}_{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        FIXTURE_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    fs::create_dir_all(&dir).expect("Failed to create fixture dir");

    let write = |name: &str, contents: String| -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).expect("Failed to write fixture");
        path
    };

    RegionalConfig {
        model_path: write("model.json", regional_model_json().to_string()),
        schema_path: write("schema.json", schema_json().to_string()),
        listings_path: write("listings.csv", LISTINGS_CSV.to_string()),
        similar_count: 5,
        scoring: ScoringParams::default(),
    }
}

pub fn regional_app() -> App {
    let config = write_regional_artifacts();
    let service = RegionalService::load(&config).expect("Failed to load regional fixtures");
    App::Regional(service)
}

pub struct FixedRate(pub f64);

impl RateProvider for FixedRate {
    fn usd_to_idr(&self) -> Result<f64, RateError> {
        Ok(self.0)
    }
}

pub struct TimedOutRate;

impl RateProvider for TimedOutRate {
    fn usd_to_idr(&self) -> Result<f64, RateError> {
        Err(RateError::Network("operation timed out".into()))
    }
}

/// Degree-1 model: `price_usd = 50_000 + 100 * sqft_living`.
pub fn generic_app(rates: Box<dyn RateProvider>) -> App {
    let spec = PolynomialSpec {
        n_features_in: 12,
        degree: 1,
        include_bias: true,
        interaction_only: false,
    };
    let mut coefficients = vec![0.0; 13];
    coefficients[3] = 100.0;

    let model = GenericModel::new(
        spec,
        LinearRegressor {
            intercept: 50_000.0,
            coefficients,
        },
    )
    .expect("Failed to build generic fixture model");

    App::Generic(GenericService::new(model, rates, 15_500.0))
}

pub fn body_json(resp: Response) -> Value {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("body is not JSON ({e}): {body}"))
}

pub fn json_body(value: Value) -> Body {
    Body::from(value.to_string().into_bytes())
}
