use serde::Serialize;

use crate::config::RegionalConfig;
use crate::data::listings::load_listings;
use crate::domain::format::format_rupiah;
use crate::domain::house::RegionalHouseInput;
use crate::domain::listing::Listing;
use crate::domain::similarity::{find_similar, ScoringParams};
use crate::errors::ServerError;
use crate::inference::pipeline::RegionalModel;
use crate::inference::schema::{prepare_input, FeatureSchema};
use crate::inference::{load_json, ArtifactError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalPrediction {
    pub predicted_price: f64,
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar: Option<Vec<Listing>>,
}

/// Regional price model plus its schema and reference listings, all read-only
/// after construction.
pub struct RegionalService {
    schema: FeatureSchema,
    model: RegionalModel,
    listings: Vec<Listing>,
    similar_count: usize,
    scoring: ScoringParams,
}

impl RegionalService {
    pub fn load(config: &RegionalConfig) -> Result<Self, ArtifactError> {
        let schema: FeatureSchema = load_json(&config.schema_path)?;
        let model: RegionalModel = load_json(&config.model_path)?;
        let listings = load_listings(&config.listings_path)?;

        Self::new(schema, model, listings, config.similar_count, config.scoring)
    }

    pub fn new(
        schema: FeatureSchema,
        model: RegionalModel,
        listings: Vec<Listing>,
        similar_count: usize,
        scoring: ScoringParams,
    ) -> Result<Self, ArtifactError> {
        schema.validate()?;
        model.validate(&schema)?;

        // The row handed to the model must come out in the fitted column order.
        let probe = prepare_input(&RegionalHouseInput::default(), &schema);
        if !probe.names().eq(model.feature_names_in.iter().map(String::as_str)) {
            return Err(ArtifactError::Contract(
                "assembled feature row does not match the model's column order".to_string(),
            ));
        }

        Ok(Self {
            schema,
            model,
            listings,
            similar_count,
            scoring,
        })
    }

    pub fn predict(&self, input: &RegionalHouseInput) -> Result<RegionalPrediction, ServerError> {
        let row = prepare_input(input, &self.schema);
        let price = self.model.predict(&row);

        if !price.is_finite() {
            return Err(ServerError::Inference(format!(
                "model produced a non-finite price ({price})"
            )));
        }

        let similar = (self.similar_count > 0).then(|| {
            find_similar(
                &self.listings,
                input,
                price,
                self.similar_count,
                &self.scoring,
            )
        });

        tracing::debug!(
            price,
            similar = similar.as_ref().map_or(0, Vec::len),
            "regional prediction"
        );

        Ok(RegionalPrediction {
            predicted_price: price.round(),
            formatted: format_rupiah(price),
            similar,
        })
    }
}
