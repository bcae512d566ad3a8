//! Static catalog of API concepts shown in the explanation panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a documented API concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConceptId {
    AccountNumber,
    Mpan,
    Mprn,
    TariffCode,
    GspRegion,
    Balance,
    Meter,
    Consumption,
    StandingCharge,
    UnitRate,
    Property,
}

impl ConceptId {
    /// Every concept, in catalog order.
    pub const ALL: [ConceptId; 11] = [
        ConceptId::AccountNumber,
        ConceptId::Mpan,
        ConceptId::Mprn,
        ConceptId::TariffCode,
        ConceptId::GspRegion,
        ConceptId::Balance,
        ConceptId::Meter,
        ConceptId::Consumption,
        ConceptId::StandingCharge,
        ConceptId::UnitRate,
        ConceptId::Property,
    ];

    /// Wire identifier (camelCase).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccountNumber => "accountNumber",
            Self::Mpan => "mpan",
            Self::Mprn => "mprn",
            Self::TariffCode => "tariffCode",
            Self::GspRegion => "gspRegion",
            Self::Balance => "balance",
            Self::Meter => "meter",
            Self::Consumption => "consumption",
            Self::StandingCharge => "standingCharge",
            Self::UnitRate => "unitRate",
            Self::Property => "property",
        }
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConcept(pub String);

impl fmt::Display for UnknownConcept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown concept \"{}\"", self.0)
    }
}

impl FromStr for ConceptId {
    type Err = UnknownConcept;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownConcept(s.to_string()))
    }
}

/// One labelled piece of a concept's example value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatSegment {
    pub value: &'static str,
    pub label: &'static str,
}

/// Explanation of one API concept.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: ConceptId,
    pub title: &'static str,
    pub short_description: &'static str,
    pub full_description: &'static str,
    /// Dotted path of the field in the account graph.
    pub api_path: &'static str,
    pub example: &'static str,
    pub segments: &'static [FormatSegment],
    pub related: &'static [ConceptId],
}

const fn seg(value: &'static str, label: &'static str) -> FormatSegment {
    FormatSegment { value, label }
}

static CATALOG: [Concept; 11] = [
    Concept {
        id: ConceptId::AccountNumber,
        title: "Account Number",
        short_description: "Your unique customer identifier",
        full_description: "The account number is the top-level key of the customer graph. \
            Properties, meter points and agreements all hang off a single account, \
            and the letter prefix lets the platform route queries by account type.",
        api_path: "account.number",
        example: "A-12B4C6D8",
        segments: &[
            seg("A", "Account type"),
            seg("-", "Separator"),
            seg("12B4C6D8", "Unique ID"),
        ],
        related: &[ConceptId::Property, ConceptId::Balance],
    },
    Concept {
        id: ConceptId::Mpan,
        title: "MPAN",
        short_description: "Meter Point Administration Number",
        full_description: "A 13-digit reference for an electricity supply point. It belongs to \
            the connection, not the meter, so it survives meter exchanges and supplier \
            switches and is what quotes and switches are keyed on.",
        api_path: "account.properties[].electricityMeterPoints[].mpan",
        example: "1900027645362",
        segments: &[
            seg("19", "Profile class"),
            seg("000", "Line loss factor"),
            seg("276", "Distributor ID"),
            seg("45362", "Unique ID"),
        ],
        related: &[
            ConceptId::Meter,
            ConceptId::GspRegion,
            ConceptId::TariffCode,
        ],
    },
    Concept {
        id: ConceptId::Mprn,
        title: "MPRN",
        short_description: "Meter Point Reference Number",
        full_description: "The gas counterpart of the MPAN, usually 6 to 10 digits. It is \
            assigned by the gas transporter and stays fixed across suppliers, meters \
            and occupants.",
        api_path: "account.properties[].gasMeterPoints[].mprn",
        example: "4675382910",
        segments: &[seg("4675382910", "Unique supply point ID")],
        related: &[ConceptId::Meter, ConceptId::TariffCode],
    },
    Concept {
        id: ConceptId::TariffCode,
        title: "Tariff Code",
        short_description: "Encoded product and pricing information",
        full_description: "A hyphen-delimited identifier packing fuel type (E/G), rate \
            structure (1R single, 2R Economy 7), product name, launch date and GSP \
            region into one string. Open the decoder from the dashboard to take one apart.",
        api_path: "account.properties[].electricityMeterPoints[].agreements[].tariffCode",
        example: "E-1R-AGILE-FLEX-22-11-25-C",
        segments: &[
            seg("E", "Fuel"),
            seg("1R", "Rate type"),
            seg("AGILE-FLEX", "Product"),
            seg("22-11-25", "Launch date"),
            seg("C", "Region"),
        ],
        related: &[
            ConceptId::UnitRate,
            ConceptId::StandingCharge,
            ConceptId::GspRegion,
        ],
    },
    Concept {
        id: ConceptId::GspRegion,
        title: "GSP Region",
        short_description: "Grid Supply Point region",
        full_description: "The electricity grid is split into 14 Grid Supply Point regions, \
            lettered A to P without I and O. Network costs and therefore unit rates \
            differ by region, which is why neighbours across a boundary pay different prices.",
        api_path: "account.properties[].electricityMeterPoints[].gspGroupId",
        example: "_C",
        segments: &[seg("_", "Prefix"), seg("C", "Region code")],
        related: &[ConceptId::Mpan, ConceptId::TariffCode, ConceptId::UnitRate],
    },
    Concept {
        id: ConceptId::Balance,
        title: "Account Balance",
        short_description: "Your current credit or debit amount",
        full_description: "The balance is reported in pence. A negative number means the \
            account is in credit; a positive number means money is owed.",
        api_path: "account.balance",
        example: "-2847",
        segments: &[seg("-", "Credit indicator"), seg("2847", "Amount in pence")],
        related: &[ConceptId::AccountNumber, ConceptId::Consumption],
    },
    Concept {
        id: ConceptId::Meter,
        title: "Meter",
        short_description: "Physical device measuring usage",
        full_description: "A meter is the device on the wall. Meters are replaced over time, \
            so they are listed under a meter point and identified by serial number.",
        api_path: "account.properties[].electricityMeterPoints[].meters[]",
        example: "21E1234567",
        segments: &[
            seg("21E", "Manufacturer code"),
            seg("1234567", "Serial number"),
        ],
        related: &[ConceptId::Mpan, ConceptId::Mprn, ConceptId::Consumption],
    },
    Concept {
        id: ConceptId::Consumption,
        title: "Consumption",
        short_description: "Energy usage over time",
        full_description: "Consumption is a list of interval readings per meter, each with a \
            start, an end and a quantity in kWh. Smart meters report half-hourly; the \
            dashboard aggregates to days.",
        api_path: "account.properties[].electricityMeterPoints[].meters[].consumption",
        example: "{ quantity: 12.5, unit: \"kWh\" }",
        segments: &[],
        related: &[ConceptId::Meter, ConceptId::UnitRate, ConceptId::Balance],
    },
    Concept {
        id: ConceptId::StandingCharge,
        title: "Standing Charge",
        short_description: "Daily fixed fee",
        full_description: "A fixed amount charged every day regardless of usage, covering \
            network and metering costs. It is quoted per tariff and region.",
        api_path: "productTariffQuote.standingCharge",
        example: "45.34p/day",
        segments: &[seg("45.34", "Pence"), seg("p/day", "Per day")],
        related: &[
            ConceptId::UnitRate,
            ConceptId::TariffCode,
            ConceptId::Balance,
        ],
    },
    Concept {
        id: ConceptId::UnitRate,
        title: "Unit Rate",
        short_description: "Price per kWh",
        full_description: "The price of each kilowatt-hour. Single-rate tariffs have one unit \
            rate, Economy 7 has a day and a night rate, and agile tariffs change every \
            half hour.",
        api_path: "productTariffQuote.dayUnitRate",
        example: "24.50p/kWh",
        segments: &[seg("24.50", "Pence"), seg("p/kWh", "Per kilowatt-hour")],
        related: &[
            ConceptId::StandingCharge,
            ConceptId::Consumption,
            ConceptId::TariffCode,
        ],
    },
    Concept {
        id: ConceptId::Property,
        title: "Property",
        short_description: "Physical address with energy supply",
        full_description: "A property is an address on the account. It groups the \
            electricity and gas meter points supplied at that address; one account can \
            hold several properties.",
        api_path: "account.properties[]",
        example: "42 Oak Lane, Greenfield, GF1 2AB",
        segments: &[],
        related: &[ConceptId::AccountNumber, ConceptId::Mpan, ConceptId::Mprn],
    },
];

/// Looks up the catalog entry for `id`.
pub fn concept(id: ConceptId) -> &'static Concept {
    // CATALOG is ordered like ConceptId::ALL.
    &CATALOG[id as usize]
}

/// All catalog entries in display order.
pub fn catalog() -> &'static [Concept] {
    &CATALOG
}
