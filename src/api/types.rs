//! API response types.

use serde::Serialize;

use crate::machine::story::ChapterMeta;
use crate::tariff::{DecodedTariff, Segment};

/// Decoded tariff with display labels and ordered segments.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedTariffResponse {
    /// The code as requested.
    pub tariff_code: String,
    #[serde(flatten)]
    pub decoded: DecodedTariff,
    pub fuel_label: String,
    pub rate_label: String,
    pub segments: Vec<Segment>,
}

impl DecodedTariffResponse {
    pub fn new(tariff_code: &str, decoded: DecodedTariff) -> Self {
        Self {
            tariff_code: tariff_code.to_string(),
            fuel_label: decoded.fuel_type.label().to_string(),
            rate_label: decoded.rate_type.label().to_string(),
            segments: decoded.segments().into(),
            decoded,
        }
    }
}

/// Chapter listing entry.
#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    /// Wire identifier, e.g. `"firstBill"`.
    pub id: &'static str,
    pub number: usize,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub topics: &'static [&'static str],
}

impl From<ChapterMeta> for ChapterResponse {
    fn from(m: ChapterMeta) -> Self {
        Self {
            id: m.id.as_str(),
            number: m.number,
            title: m.title,
            subtitle: m.subtitle,
            topics: m.topics,
        }
    }
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
