use serde::Deserialize;

use crate::inference::linear::LinearRegressor;
use crate::inference::schema::{FeatureRow, FeatureSchema, FeatureValue};
use crate::inference::trees::TreeEnsemble;
use crate::inference::{ArtifactError, Regressor};

/// The regional model: column preprocessing followed by a regressor,
/// trained against a transformed target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionalModel {
    /// Column order the pipeline was fitted with.
    pub feature_names_in: Vec<String>,
    /// Required: a missing value would silently serve the transformed target.
    pub target: TargetTransform,
    pub preprocessor: Preprocessor,
    pub estimator: Estimator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetTransform {
    /// Trained on `ln(1 + price)`.
    Log1p,
    Identity,
}

impl TargetTransform {
    pub fn inverse(&self, y: f64) -> f64 {
        match self {
            TargetTransform::Log1p => y.exp_m1(),
            TargetTransform::Identity => y,
        }
    }
}

/// Numeric columns first, then one-hot blocks, each in declaration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Preprocessor {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NumericColumn {
    pub name: String,
    /// Fill value for missing entries (usually the training median).
    pub impute: f64,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    /// Categories seen in training; anything else encodes as all zeros.
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Linear(LinearRegressor),
    GradientBoosting(TreeEnsemble),
}

impl Estimator {
    fn regressor(&self) -> &dyn Regressor {
        match self {
            Estimator::Linear(m) => m,
            Estimator::GradientBoosting(m) => m,
        }
    }
}

impl NumericColumn {
    fn encode(&self, value: Option<&FeatureValue>) -> f64 {
        let x = match value {
            Some(FeatureValue::Numeric(Some(v))) => *v,
            _ => self.impute,
        };

        match (self.mean, self.scale) {
            (Some(mean), Some(scale)) if scale != 0.0 => (x - mean) / scale,
            (Some(mean), _) => x - mean,
            _ => x,
        }
    }
}

impl CategoricalColumn {
    fn encode(&self, value: Option<&FeatureValue>, out: &mut Vec<f64>) {
        let category = match value {
            Some(FeatureValue::Categorical(c)) => Some(c.as_str()),
            _ => None,
        };
        out.extend(
            self.categories
                .iter()
                .map(|c| if Some(c.as_str()) == category { 1.0 } else { 0.0 }),
        );
    }
}

impl Preprocessor {
    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    pub fn encode(&self, row: &FeatureRow) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width());
        for column in &self.numeric {
            out.push(column.encode(row.get(&column.name)));
        }
        for column in &self.categorical {
            column.encode(row.get(&column.name), &mut out);
        }
        out
    }
}

impl RegionalModel {
    /// Checks the model against the schema it will be fed with.
    pub fn validate(&self, schema: &FeatureSchema) -> Result<(), ArtifactError> {
        if self.feature_names_in != schema.features {
            return Err(ArtifactError::Contract(format!(
                "model expects columns {:?}, schema provides {:?}",
                self.feature_names_in, schema.features
            )));
        }

        for column in &self.preprocessor.numeric {
            if !schema.numeric_features.contains(&column.name) {
                return Err(ArtifactError::Contract(format!(
                    "model treats '{}' as numeric but the schema does not",
                    column.name
                )));
            }
        }
        for column in &self.preprocessor.categorical {
            if !schema.categorical_features.contains(&column.name) {
                return Err(ArtifactError::Contract(format!(
                    "model treats '{}' as categorical but the schema does not",
                    column.name
                )));
            }
        }

        if let Estimator::GradientBoosting(trees) = &self.estimator {
            trees.validate()?;
        }

        let encoded = self.preprocessor.width();
        let expected = self.estimator.regressor().n_features();
        if encoded != expected {
            return Err(ArtifactError::Contract(format!(
                "preprocessor produces {encoded} features, estimator expects {expected}"
            )));
        }

        Ok(())
    }

    /// Raw model output, in the transformed target space.
    pub fn predict_raw(&self, row: &FeatureRow) -> f64 {
        let x = self.preprocessor.encode(row);
        self.estimator.regressor().predict_row(&x)
    }

    /// Prediction in price space.
    pub fn predict(&self, row: &FeatureRow) -> f64 {
        self.target.inverse(self.predict_raw(row))
    }
}
