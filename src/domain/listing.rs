use serde::{Deserialize, Serialize};

/// One historical sale from the reference dataset. The same shape is returned
/// to clients as a comparable listing.
///
/// Unparseable numeric cells load as `None` rather than failing the whole file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Listing {
    #[serde(rename = "Price", default, deserialize_with = "csv::invalid_option")]
    pub price: Option<f64>,
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    #[serde(rename = "City/Regency", default)]
    pub city_regency: Option<String>,
    #[serde(rename = "Bedroom", default, deserialize_with = "csv::invalid_option")]
    pub bedroom: Option<f64>,
    #[serde(rename = "Bathroom", default, deserialize_with = "csv::invalid_option")]
    pub bathroom: Option<f64>,
    #[serde(rename = "Carport", default, deserialize_with = "csv::invalid_option")]
    pub carport: Option<f64>,
    #[serde(rename = "Land", default, deserialize_with = "csv::invalid_option")]
    pub land: Option<f64>,
    #[serde(rename = "Building", default, deserialize_with = "csv::invalid_option")]
    pub building: Option<f64>,
    #[serde(rename = "Latitude", default, deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default, deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,
    #[serde(rename = "Month", default, deserialize_with = "csv::invalid_option")]
    pub month: Option<f64>,
}
