pub mod format;
pub mod house;
pub mod listing;
pub mod similarity;
pub mod units;
