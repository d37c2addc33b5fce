// src/data/listings.rs
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::listing::Listing;
use crate::inference::ArtifactError;

/// Load the reference listings CSV. The table is read once at startup and
/// never written back.
pub fn load_listings(path: &Path) -> Result<Vec<Listing>, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let listings = read_listings(file).map_err(|source| ArtifactError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let priced = listings.iter().filter(|l| l.price.is_some()).count();
    tracing::info!(
        path = %path.display(),
        rows = listings.len(),
        priced,
        "loaded reference listings"
    );

    Ok(listings)
}

pub fn read_listings<R: Read>(reader: R) -> Result<Vec<Listing>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader.deserialize().collect()
}
