use serde::Deserialize;
use std::collections::HashSet;

use crate::domain::house::{RawField, RegionalHouseInput};
use crate::inference::ArtifactError;

/// Placeholder for categorical columns the caller left out.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Column layout the regional model was trained on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureSchema {
    pub features: Vec<String>,
    pub numeric_features: Vec<String>,
    pub categorical_features: Vec<String>,
}

impl FeatureSchema {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let mut seen = HashSet::new();
        for name in &self.features {
            if !seen.insert(name.as_str()) {
                return Err(ArtifactError::Contract(format!(
                    "schema lists feature '{name}' twice"
                )));
            }
        }

        for name in self.numeric_features.iter().chain(&self.categorical_features) {
            if !seen.contains(name.as_str()) {
                return Err(ArtifactError::Contract(format!(
                    "schema subset column '{name}' is not in the feature list"
                )));
            }
        }

        if let Some(both) = self
            .numeric_features
            .iter()
            .find(|n| self.categorical_features.contains(n))
        {
            return Err(ArtifactError::Contract(format!(
                "schema column '{both}' is both numeric and categorical"
            )));
        }

        Ok(())
    }

    fn is_numeric(&self, name: &str) -> bool {
        self.numeric_features.iter().any(|n| n == name)
    }

    fn is_categorical(&self, name: &str) -> bool {
        self.categorical_features.iter().any(|n| n == name)
    }
}

/// A single cell of the normalized feature row.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// `None` is the missing-value marker.
    Numeric(Option<f64>),
    Categorical(String),
    /// Column in neither schema subset; carried through untyped.
    Missing,
}

/// One input record laid out in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }
}

/// Reindexes a sparse input onto the schema. Never fails: absent or
/// unparseable numerics become missing, absent categoricals become
/// [`UNKNOWN_CATEGORY`].
pub fn prepare_input(input: &RegionalHouseInput, schema: &FeatureSchema) -> FeatureRow {
    let columns = schema
        .features
        .iter()
        .map(|name| {
            let raw = input.field(name);

            let value = if schema.is_numeric(name) {
                FeatureValue::Numeric(match raw {
                    Some(RawField::Number(n)) => Some(n),
                    Some(RawField::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
                    None => None,
                })
            } else if schema.is_categorical(name) {
                FeatureValue::Categorical(match raw {
                    Some(RawField::Text(s)) => s.to_string(),
                    Some(RawField::Number(n)) => n.to_string(),
                    None => UNKNOWN_CATEGORY.to_string(),
                })
            } else {
                FeatureValue::Missing
            };

            (name.clone(), value)
        })
        .collect();

    FeatureRow { columns }
}
