use crate::ordering::RecordId;
use serde::{Deserialize, Serialize};

/// Emission factor of grid electricity, kg CO2 per kWh.
pub const GRID_EMISSION_FACTOR: f64 = 0.054;

/// One entry of the fuel reference table: kg CO2 per liter burned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fuel {
    pub id: i64,
    pub name: String,
    pub emission_factor: f64,
}

/// Built-in fuel reference data.
pub fn default_fuels() -> Vec<Fuel> {
    vec![
        Fuel {
            id: 1,
            name: "Diesel".to_string(),
            emission_factor: 2.669,
        },
        Fuel {
            id: 2,
            name: "Ethanol".to_string(),
            emission_factor: 1.533,
        },
        Fuel {
            id: 3,
            name: "Gasoline".to_string(),
            emission_factor: 2.318,
        },
    ]
}

/// CO2 mass for electricity consumption. Zero or negative consumption means
/// no emission; partial form input degrades to zero instead of erroring.
pub fn energy_co2(kwh_consumed: f64, emission_factor: f64) -> f64 {
    if kwh_consumed > 0.0 {
        kwh_consumed * emission_factor
    } else {
        0.0
    }
}

/// CO2 mass for fuel consumption: liters burned (km over km-per-liter) times
/// the fuel's emission factor. Guards the division: a zero or negative
/// efficiency yields zero, never a divide-by-zero.
pub fn fuel_co2(km_traveled: f64, efficiency: f64, emission_factor: f64) -> f64 {
    if km_traveled > 0.0 && efficiency > 0.0 {
        (km_traveled / efficiency) * emission_factor
    } else {
        0.0
    }
}

/// Looks a fuel up in an injected reference slice. Id-type agnostic: `2` and
/// `"2"` resolve to the same fuel. An unmatched or absent id means no fuel is
/// selected.
pub fn resolve_fuel<'a>(fuels: &'a [Fuel], fuel_id: Option<&RecordId>) -> Option<&'a Fuel> {
    let wanted = fuel_id?.key();
    fuels.iter().find(|fuel| fuel.id.to_string() == wanted)
}

/// The two activity shapes the calculator handles, matched exhaustively.
#[derive(Debug, Clone)]
pub enum ActivityInput {
    Energy {
        kwh_consumed: f64,
        emission_factor: f64,
    },
    Fuel {
        km_traveled: f64,
        efficiency: f64,
        fuel_id: Option<RecordId>,
    },
}

/// What gets attached to an outgoing record: the computed mass plus the
/// resolved factor and fuel name, when a fuel was resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    pub co2_emitted: f64,
    pub emission_factor: Option<f64>,
    pub fuel_name: Option<String>,
}

impl Computation {
    fn zero() -> Self {
        Self {
            co2_emitted: 0.0,
            emission_factor: None,
            fuel_name: None,
        }
    }
}

/// Computes the CO2 mass for an activity against an injected fuel table.
/// Pure and total: every degenerate input maps to a zero result.
pub fn compute(input: &ActivityInput, fuels: &[Fuel]) -> Computation {
    match input {
        ActivityInput::Energy {
            kwh_consumed,
            emission_factor,
        } => Computation {
            co2_emitted: energy_co2(*kwh_consumed, *emission_factor),
            emission_factor: Some(*emission_factor),
            fuel_name: None,
        },
        ActivityInput::Fuel {
            km_traveled,
            efficiency,
            fuel_id,
        } => match resolve_fuel(fuels, fuel_id.as_ref()) {
            Some(fuel) => Computation {
                co2_emitted: fuel_co2(*km_traveled, *efficiency, fuel.emission_factor),
                emission_factor: Some(fuel.emission_factor),
                fuel_name: Some(fuel.name.clone()),
            },
            None => Computation::zero(),
        },
    }
}
