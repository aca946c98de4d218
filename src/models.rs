use crate::ordering::{ListEntry, RecordId};
use serde::{Deserialize, Serialize};

/// Electricity consumption record. `co2_emitted` is derived; the server
/// recomputes it on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyEmission {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub date: String,
    pub kwh_consumed: f64,
    pub emission_factor: f64,
    pub co2_emitted: f64,
}

/// Travel fuel consumption record. `efficiency` is km per liter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelEmission {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub date: String,
    pub km_traveled: f64,
    pub efficiency: f64,
    #[serde(default)]
    pub fuel_id: Option<RecordId>,
    pub fuel_name: String,
    pub emission_factor: f64,
    pub co2_emitted: f64,
}

impl ListEntry for EnergyEmission {
    fn entry_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn entry_date(&self) -> Option<&str> {
        Some(self.date.as_str())
    }
}

impl ListEntry for FuelEmission {
    fn entry_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn entry_date(&self) -> Option<&str> {
        Some(self.date.as_str())
    }
}

/// Persisted application state. Both lists stay date-descending at all times.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub energy: Vec<EnergyEmission>,
    pub fuel: Vec<FuelEmission>,
    pub next_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct EnergyUpsertRequest {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub date: String,
    pub kwh_consumed: f64,
}

#[derive(Debug, Deserialize)]
pub struct FuelUpsertRequest {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub date: String,
    pub km_traveled: f64,
    pub efficiency: f64,
    #[serde(default)]
    pub fuel_id: Option<RecordId>,
}

#[derive(Debug, Serialize)]
pub struct EmissionsResponse {
    pub energy: Vec<EnergyEmission>,
    pub fuel: Vec<FuelEmission>,
}

/// Chart-ready series: one label per data point.
#[derive(Debug, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub year: i32,
    pub monthly_totals: ChartSeries,
    pub by_category: ChartSeries,
    pub total_co2: f64,
    pub record_count: usize,
    pub most_used_fuel: Option<String>,
    pub quarter_avg: f64,
    pub reduction_percent: Option<f64>,
}
