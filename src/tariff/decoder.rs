//! Positional tariff code decoder.

use std::fmt;

use serde::{Serialize, Serializer};

use super::region::region_name;

/// Minimum token count: fuel, rate, and a date/region tail.
const MIN_TOKENS: usize = 5;
/// Tokens at the end of a code that form the launch date.
const DATE_TOKENS: usize = 3;

/// Fuel segment of a tariff code.
///
/// Unrecognised codes are kept verbatim in [`FuelType::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuelType {
    Electricity,
    Gas,
    Other(String),
}

impl FuelType {
    fn from_code(code: &str) -> Self {
        match code {
            "E" => Self::Electricity,
            "G" => Self::Gas,
            other => Self::Other(other.to_string()),
        }
    }

    /// Code as it appears in the tariff string.
    pub fn code(&self) -> &str {
        match self {
            Self::Electricity => "E",
            Self::Gas => "G",
            Self::Other(code) => code,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Self::Electricity => "Electricity",
            Self::Gas => "Gas",
            Self::Other(code) => code,
        }
    }
}

/// Rate structure segment of a tariff code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateType {
    SingleRate,
    /// Economy 7: separate day and night rates.
    TwoRate,
    Other(String),
}

impl RateType {
    fn from_code(code: &str) -> Self {
        match code {
            "1R" => Self::SingleRate,
            "2R" => Self::TwoRate,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::SingleRate => "1R",
            Self::TwoRate => "2R",
            Self::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::SingleRate => "Single Rate",
            Self::TwoRate => "Economy 7 (Two Rate)",
            Self::Other(code) => code,
        }
    }
}

impl Serialize for FuelType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl Serialize for RateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A tariff code split into its labelled parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedTariff {
    pub fuel_type: FuelType,
    pub rate_type: RateType,
    /// May contain hyphens, may be empty for minimal codes.
    pub product_code: String,
    pub launch_date: String,
    pub region_code: String,
    pub region_name: &'static str,
}

/// One labelled piece of a decoded tariff, in code order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub label: &'static str,
    pub value: String,
}

impl DecodedTariff {
    /// The five segments as they appear left to right in the code.
    pub fn segments(&self) -> [Segment; 5] {
        [
            Segment {
                label: "Fuel",
                value: self.fuel_type.code().to_string(),
            },
            Segment {
                label: "Rate type",
                value: self.rate_type.code().to_string(),
            },
            Segment {
                label: "Product",
                value: self.product_code.clone(),
            },
            Segment {
                label: "Launch date",
                value: self.launch_date.clone(),
            },
            Segment {
                label: "Region",
                value: self.region_code.clone(),
            },
        ]
    }
}

impl fmt::Display for DecodedTariff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fuel Type:   {}", self.fuel_type.label())?;
        writeln!(f, "Rate Type:   {}", self.rate_type.label())?;
        writeln!(f, "Product:     {}", self.product_code)?;
        writeln!(f, "Launch Date: {}", self.launch_date)?;
        write!(
            f,
            "Region:      {} ({})",
            self.region_name, self.region_code
        )
    }
}

/// Decodes a hyphen-delimited tariff code.
///
/// The split is positional: the first two tokens are fuel and rate, the last
/// token is the region, the three before it are the launch date and whatever
/// sits in between is the product. Codes with fewer than five tokens yield
/// `None`.
///
/// # Examples
///
/// ```
/// use energy_explorer::tariff::{decode, FuelType, RateType};
///
/// let t = decode("E-1R-AGILE-FLEX-22-11-25-C").unwrap();
/// assert_eq!(t.fuel_type, FuelType::Electricity);
/// assert_eq!(t.rate_type, RateType::SingleRate);
/// assert_eq!(t.product_code, "AGILE-FLEX");
/// assert_eq!(t.launch_date, "22-11-25");
/// assert_eq!(t.region_name, "South Eastern");
///
/// assert!(decode("E-1R-X").is_none());
/// ```
pub fn decode(tariff_code: &str) -> Option<DecodedTariff> {
    let tokens: Vec<&str> = tariff_code.split('-').collect();
    if tokens.len() < MIN_TOKENS {
        return None;
    }

    let (head, rest) = tokens.split_at(2);
    let (region_code, body) = rest.split_last()?;
    // Short codes lend the date whatever tokens exist and leave the product empty.
    let date_start = body.len().saturating_sub(DATE_TOKENS);
    let (product, date) = body.split_at(date_start);

    Some(DecodedTariff {
        fuel_type: FuelType::from_code(head[0]),
        rate_type: RateType::from_code(head[1]),
        product_code: product.join("-"),
        launch_date: date.join("-"),
        region_code: (*region_code).to_string(),
        region_name: region_name(region_code),
    })
}
