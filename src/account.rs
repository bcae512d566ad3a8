//! Mock customer account used by the dashboard.
//!
//! The structure mirrors the account graph of the energy API: an account
//! owns properties, properties own meter points, meter points own meters
//! and agreements.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::AccountConfig;
use crate::tariff::region::region_code_from_group_id;

/// Day labels for one week of readings, oldest first.
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Pending,
    Closed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub number: String,
    pub status: AccountStatus,
    /// Balance in pence; negative means in credit.
    pub balance: i64,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub address: String,
    pub postcode: String,
    pub electricity_meter_points: Vec<ElectricityMeterPoint>,
    pub gas_meter_points: Vec<GasMeterPoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricityMeterPoint {
    pub mpan: String,
    /// Grid supply point group, e.g. `"_C"`.
    pub gsp_group_id: String,
    pub meters: Vec<Meter>,
    pub agreements: Vec<Agreement>,
}

impl ElectricityMeterPoint {
    /// Single-letter GSP region code of this supply point.
    pub fn region_code(&self) -> &str {
        region_code_from_group_id(&self.gsp_group_id)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasMeterPoint {
    pub mprn: String,
    pub meters: Vec<Meter>,
    pub agreements: Vec<Agreement>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meter {
    pub serial_number: String,
    pub make_and_type: Option<String>,
    pub reading_source: Option<String>,
    pub consumption: Vec<Consumption>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    pub id: String,
    pub valid_from: String,
    /// `None` for an open-ended agreement.
    pub valid_to: Option<String>,
    pub tariff_code: String,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub code: String,
    pub display_name: String,
    pub description: String,
    pub is_variable: bool,
    pub is_green: bool,
    pub is_tracker: bool,
}

/// One day of metered usage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    /// Zero-based day within the week.
    pub day: usize,
    pub weekday: &'static str,
    pub quantity: f32,
    pub unit: &'static str,
}

impl Account {
    /// Builds the demo account, drawing consumption readings from `cfg.seed`.
    pub fn mock(cfg: &AccountConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let electricity = weekly_consumption(
            &mut rng,
            cfg.electricity_kwh_min,
            cfg.electricity_kwh_max,
            cfg.weekend_factor,
        );
        let gas = weekly_consumption(&mut rng, cfg.gas_kwh_min, cfg.gas_kwh_max, 1.0);

        Self {
            number: "A-12B4C6D8".to_string(),
            status: AccountStatus::Active,
            balance: -2847,
            properties: vec![Property {
                id: "prop-001".to_string(),
                address: "42 Oak Lane, Greenfield".to_string(),
                postcode: "GF1 2AB".to_string(),
                electricity_meter_points: vec![ElectricityMeterPoint {
                    mpan: "1900027645362".to_string(),
                    gsp_group_id: "_C".to_string(),
                    meters: vec![Meter {
                        serial_number: "21E1234567".to_string(),
                        make_and_type: Some("Secure Liberty 100".to_string()),
                        reading_source: Some("Smart".to_string()),
                        consumption: electricity,
                    }],
                    agreements: vec![Agreement {
                        id: "agr-elec-001".to_string(),
                        valid_from: "2024-01-01T00:00:00Z".to_string(),
                        valid_to: None,
                        tariff_code: "E-1R-AGILE-FLEX-22-11-25-C".to_string(),
                        product: Some(Product {
                            code: "AGILE-FLEX-22-11-25".to_string(),
                            display_name: "Agile Octopus".to_string(),
                            description: "Smart tariff with half-hourly prices that follow the wholesale market".to_string(),
                            is_variable: true,
                            is_green: true,
                            is_tracker: false,
                        }),
                    }],
                }],
                gas_meter_points: vec![GasMeterPoint {
                    mprn: "4675382910".to_string(),
                    meters: vec![Meter {
                        serial_number: "G4S12345678".to_string(),
                        make_and_type: Some("Landis+Gyr G470".to_string()),
                        reading_source: Some("Smart".to_string()),
                        consumption: gas,
                    }],
                    agreements: vec![Agreement {
                        id: "agr-gas-001".to_string(),
                        valid_from: "2024-01-01T00:00:00Z".to_string(),
                        valid_to: None,
                        tariff_code: "G-1R-SUPER-GREEN-24-01-01-C".to_string(),
                        product: Some(Product {
                            code: "SUPER-GREEN-24-01-01".to_string(),
                            display_name: "Super Green Octopus".to_string(),
                            description: "100% renewable gas backed by biomethane".to_string(),
                            is_variable: false,
                            is_green: true,
                            is_tracker: false,
                        }),
                    }],
                }],
            }],
        }
    }

    /// First electricity meter point of the first property.
    pub fn primary_electricity(&self) -> Option<&ElectricityMeterPoint> {
        self.properties.first()?.electricity_meter_points.first()
    }

    /// First gas meter point of the first property.
    pub fn primary_gas(&self) -> Option<&GasMeterPoint> {
        self.properties.first()?.gas_meter_points.first()
    }

    /// Tariff code of the primary electricity agreement.
    pub fn primary_tariff_code(&self) -> Option<&str> {
        self.primary_electricity()?
            .agreements
            .first()
            .map(|a| a.tariff_code.as_str())
    }

    /// Balance formatted for display, e.g. `"£28.47 in credit"`.
    pub fn balance_display(&self) -> String {
        let pence = self.balance.unsigned_abs();
        let amount = format!("£{}.{:02}", pence / 100, pence % 100);
        match self.balance {
            b if b < 0 => format!("{amount} in credit"),
            0 => amount,
            _ => format!("{amount} owed"),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account {} ({:?})", self.number, self.status)?;
        write!(f, "Balance: {}", self.balance_display())?;
        for property in &self.properties {
            write!(f, "\n\n{}, {}", property.address, property.postcode)?;
            for point in &property.electricity_meter_points {
                write!(
                    f,
                    "\n  Electricity  MPAN {}  region {}",
                    point.mpan,
                    point.region_code()
                )?;
                write_supply(f, &point.meters, &point.agreements)?;
            }
            for point in &property.gas_meter_points {
                write!(f, "\n  Gas          MPRN {}", point.mprn)?;
                write_supply(f, &point.meters, &point.agreements)?;
            }
        }
        Ok(())
    }
}

fn write_supply(
    f: &mut fmt::Formatter<'_>,
    meters: &[Meter],
    agreements: &[Agreement],
) -> fmt::Result {
    for agreement in agreements {
        write!(f, "\n    tariff {}", agreement.tariff_code)?;
    }
    for meter in meters {
        let total: f32 = meter.consumption.iter().map(|c| c.quantity).sum();
        write!(
            f,
            "\n    meter {}  {:.2} kWh over {} days",
            meter.serial_number,
            total,
            meter.consumption.len()
        )?;
    }
    Ok(())
}

/// Draws seven daily readings uniformly in `[min_kwh, max_kwh]`.
///
/// Saturday and Sunday are scaled by `weekend_factor`. Values are rounded to
/// two decimals.
fn weekly_consumption(
    rng: &mut StdRng,
    min_kwh: f32,
    max_kwh: f32,
    weekend_factor: f32,
) -> Vec<Consumption> {
    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(day, &weekday)| {
            let base = min_kwh + rng.random::<f32>() * (max_kwh - min_kwh);
            let quantity = if day >= 5 {
                base * weekend_factor
            } else {
                base
            };
            Consumption {
                day,
                weekday,
                quantity: (quantity * 100.0).round() / 100.0,
                unit: "kWh",
            }
        })
        .collect()
}
