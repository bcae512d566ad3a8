//! Tariff code decoding.
//!
//! A tariff code such as `E-1R-AGILE-FLEX-22-11-25-C` packs fuel, rate
//! structure, product, launch date and GSP region into one identifier.

pub mod decoder;
pub mod region;

pub use decoder::{DecodedTariff, FuelType, RateType, Segment, decode};
pub use region::{GSP_REGIONS, UNKNOWN_REGION, region_name};
