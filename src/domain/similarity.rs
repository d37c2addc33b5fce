// src/domain/similarity.rs

use std::cmp::Ordering;

use anyhow::{bail, Result};

use crate::domain::house::RegionalHouseInput;
use crate::domain::listing::Listing;

/// Weights and normalisers for ranking comparable listings.
///
/// The weights are not derived from anything; they are the values the
/// regional service has always used and can be tuned through configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    pub price_weight: f64,
    /// Only applied when the query carries both coordinates. When it doesn't,
    /// this weight moves to the specification gap.
    pub geo_weight: f64,
    /// Denominator for bedroom/bathroom/carport differences.
    pub count_scale: f64,
    /// Distance in km that counts as one unit of geographic gap.
    pub geo_scale_km: f64,
    pub earth_radius_km: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            price_weight: 0.5,
            geo_weight: 0.3,
            count_scale: 5.0,
            geo_scale_km: 50.0,
            earth_radius_km: 6371.0,
        }
    }
}

impl ScoringParams {
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.price_weight,
            self.geo_weight,
            self.count_scale,
            self.geo_scale_km,
            self.earth_radius_km,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            bail!("scoring parameters must be finite numbers");
        }
        if self.price_weight < 0.0 || self.geo_weight < 0.0 {
            bail!("scoring weights must not be negative");
        }
        if self.price_weight + self.geo_weight > 1.0 {
            bail!(
                "price weight ({}) plus geo weight ({}) must not exceed 1",
                self.price_weight,
                self.geo_weight
            );
        }
        if self.count_scale <= 0.0 || self.geo_scale_km <= 0.0 || self.earth_radius_km <= 0.0 {
            bail!("scoring scales must be positive");
        }
        Ok(())
    }
}

/// Great-circle distance in km between two (lat, lon) points given in degrees.
pub fn haversine_km(from: (f64, f64), to: (f64, f64), earth_radius_km: f64) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * earth_radius_km * a.sqrt().asin()
}

/// Ranks the reference listings by similarity to the query and returns the
/// closest `top_n`, most similar first.
///
/// City and location act as soft filters: each one only applies if at least
/// one candidate matches it, and location is only consulted once the city
/// filter has applied. A listing missing a value the score needs ranks after
/// every listing that could be scored.
pub fn find_similar(
    listings: &[Listing],
    query: &RegionalHouseInput,
    predicted_price: f64,
    top_n: usize,
    params: &ScoringParams,
) -> Vec<Listing> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<&Listing> = listings.iter().collect();

    if let Some(city) = non_blank(query.city_regency.as_deref()) {
        if let Some(narrowed) = soft_filter(&candidates, city, |l| l.city_regency.as_deref()) {
            candidates = narrowed;

            if let Some(location) = non_blank(query.location.as_deref()) {
                if let Some(narrowed) = soft_filter(&candidates, location, |l| l.location.as_deref())
                {
                    candidates = narrowed;
                }
            }
        }
    }

    let origin = query.coordinates();
    let geo_weight = if origin.is_some() { params.geo_weight } else { 0.0 };
    let spec_weight = 1.0 - params.price_weight - geo_weight;
    let price_base = predicted_price.max(1.0);

    let mut scored: Vec<(f64, &Listing)> = candidates
        .into_iter()
        .map(|listing| {
            let price_gap = listing
                .price
                .map_or(f64::NAN, |p| (p - predicted_price).abs() / price_base);

            let geo_gap = match origin {
                Some(origin) => match listing.latitude.zip(listing.longitude) {
                    Some(point) => {
                        haversine_km(origin, point, params.earth_radius_km) / params.geo_scale_km
                    }
                    None => f64::NAN,
                },
                None => 0.0,
            };

            let spec_gap = spec_gap(listing, query, params);

            let score =
                params.price_weight * price_gap + geo_weight * geo_gap + spec_weight * spec_gap;
            (score, listing)
        })
        .collect();

    // Stable, so equal scores keep dataset order.
    scored.sort_by(|a, b| nan_last(a.0, b.0));

    scored
        .into_iter()
        .take(top_n)
        .map(|(_, listing)| listing.clone())
        .collect()
}

fn spec_gap(listing: &Listing, query: &RegionalHouseInput, params: &ScoringParams) -> f64 {
    let terms = [
        (query.bedroom, listing.bedroom, params.count_scale),
        (query.bathroom, listing.bathroom, params.count_scale),
        (query.carport, listing.carport, params.count_scale),
        (query.land, listing.land, query.land.unwrap_or(1.0)),
        (query.building, listing.building, query.building.unwrap_or(1.0)),
    ];

    terms
        .iter()
        .filter_map(|&(wanted, actual, denominator)| {
            let wanted = wanted?;
            Some(actual.map_or(f64::NAN, |actual| {
                (actual - wanted).abs() / denominator.max(1.0)
            }))
        })
        .sum()
}

/// Candidates matching `wanted` case-insensitively, or `None` when nothing matches.
fn soft_filter<'a, F>(candidates: &[&'a Listing], wanted: &str, field: F) -> Option<Vec<&'a Listing>>
where
    F: Fn(&Listing) -> Option<&str>,
{
    let wanted = wanted.to_lowercase();
    let matched: Vec<&Listing> = candidates
        .iter()
        .copied()
        .filter(|l| field(l).is_some_and(|v| v.trim().to_lowercase() == wanted))
        .collect();

    (!matched.is_empty()).then_some(matched)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
