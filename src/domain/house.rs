// src/domain/house.rs

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use serde_json::{Map, Value};

/// A property as submitted to the regional model. Every field is optional and
/// lenient: a value of the wrong JSON type degrades to `None` (or is cast to a
/// string for the text fields) instead of rejecting the whole request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RegionalHouseInput {
    pub land: Option<f64>,
    pub building: Option<f64>,
    pub bedroom: Option<f64>,
    pub bathroom: Option<f64>,
    pub carport: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub month: Option<f64>,
    pub city_regency: Option<String>,
    pub location: Option<String>,
}

impl From<Map<String, Value>> for RegionalHouseInput {
    fn from(fields: Map<String, Value>) -> Self {
        let number = |name: &str| fields.get(name).and_then(coerce_number);
        let text = |name: &str| fields.get(name).and_then(coerce_string);

        Self {
            land: number("Land"),
            building: number("Building"),
            bedroom: number("Bedroom"),
            bathroom: number("Bathroom"),
            carport: number("Carport"),
            latitude: number("Latitude"),
            longitude: number("Longitude"),
            month: number("Month"),
            city_regency: text("City_Regency").or_else(|| text("City/Regency")),
            location: text("Location"),
        }
    }
}

/// A raw input value looked up by feature name, before schema coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawField<'a> {
    Number(f64),
    Text(&'a str),
}

impl RegionalHouseInput {
    /// Looks up a field by the column name a trained model uses for it.
    pub fn field(&self, name: &str) -> Option<RawField<'_>> {
        let number = match name {
            "Land" => self.land,
            "Building" => self.building,
            "Bedroom" => self.bedroom,
            "Bathroom" => self.bathroom,
            "Carport" => self.carport,
            "Latitude" => self.latitude,
            "Longitude" => self.longitude,
            "Month" => self.month,
            "City_Regency" | "City/Regency" => {
                return self.city_regency.as_deref().map(RawField::Text)
            }
            "Location" => return self.location.as_deref().map(RawField::Text),
            _ => None,
        };
        number.map(RawField::Number)
    }

    /// Both coordinates, only when both were supplied.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Decodes a request body. Only a body that is not a JSON object fails;
    /// repeated keys keep the last value and a value that does not decode
    /// (such as a number outside the `f64` range) counts as missing.
    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        let raw: HashMap<String, Box<RawValue>> = serde_json::from_slice(bytes)?;

        let fields: Map<String, Value> = raw
            .into_iter()
            .filter_map(|(name, value)| {
                serde_json::from_str::<Value>(value.get())
                    .ok()
                    .map(|value| (name, value))
            })
            .collect();

        Ok(Self::from(fields))
    }
}

/// A property as submitted to the generic (imperial-trained) model.
/// Areas arrive in square metres.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenericHouseInput {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub sqft_living: f64,
    pub sqft_lot: f64,
    pub floors: f64,
    #[serde(deserialize_with = "whole_number")]
    pub waterfront: i64,
    #[serde(deserialize_with = "whole_number")]
    pub condition: i64,
    #[serde(deserialize_with = "whole_number")]
    pub grade: i64,
    pub sqft_above: f64,
    #[serde(default)]
    pub sqft_basement: f64,
    #[serde(deserialize_with = "whole_number")]
    pub yr_built: i64,
    #[serde(default, deserialize_with = "whole_number")]
    pub yr_renovated: i64,
}

/// Integers, or floats with no fractional part such as `7.0`.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let n = serde_json::Number::deserialize(deserializer)?;
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("expected a whole number, got {n}"))),
    }
}

/// Numbers pass through, numeric strings are parsed, everything else is missing.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        _ => None,
    }
}
