use crate::calc::{self, ActivityInput, Fuel, GRID_EMISSION_FACTOR};
use crate::errors::AppError;
use crate::models::{
    AppData, EmissionsResponse, EnergyEmission, EnergyUpsertRequest, FuelEmission,
    FuelUpsertRequest, SummaryResponse,
};
use crate::ordering::{self, RecordId};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::summary::build_summary;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::{Datelike, Local};
use serde::Deserialize;

pub async fn index(State(_state): State<AppState>) -> Html<String> {
    Html(render_index(Local::now().date_naive().year()))
}

pub async fn get_fuels(State(state): State<AppState>) -> Json<Vec<Fuel>> {
    Json(state.fuels.as_ref().clone())
}

pub async fn get_emissions(State(state): State<AppState>) -> Result<Json<EmissionsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(EmissionsResponse {
        energy: data.energy.clone(),
        fuel: data.fuel.clone(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub year: Option<i32>,
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    let year = query.year.unwrap_or_else(|| Local::now().date_naive().year());
    let data = state.data.lock().await;
    Ok(Json(build_summary(year, &data)))
}

pub async fn upsert_energy(
    State(state): State<AppState>,
    Json(payload): Json<EnergyUpsertRequest>,
) -> Result<Json<EnergyEmission>, AppError> {
    if payload.date.trim().is_empty() {
        return Err(AppError::bad_request("date is required"));
    }

    let input = ActivityInput::Energy {
        kwh_consumed: payload.kwh_consumed,
        emission_factor: GRID_EMISSION_FACTOR,
    };
    let computed = calc::compute(&input, &state.fuels);

    let mut data = state.data.lock().await;
    let record = EnergyEmission {
        id: Some(assign_id(&mut data, payload.id)),
        date: payload.date,
        kwh_consumed: payload.kwh_consumed,
        emission_factor: GRID_EMISSION_FACTOR,
        co2_emitted: computed.co2_emitted,
    };

    let next = ordering::upsert_by_id(&data.energy, record.clone());
    data.energy = next;
    persist_data(&state.data_path, &data).await?;

    Ok(Json(record))
}

pub async fn upsert_fuel(
    State(state): State<AppState>,
    Json(payload): Json<FuelUpsertRequest>,
) -> Result<Json<FuelEmission>, AppError> {
    if payload.date.trim().is_empty() {
        return Err(AppError::bad_request("date is required"));
    }

    let input = ActivityInput::Fuel {
        km_traveled: payload.km_traveled,
        efficiency: payload.efficiency,
        fuel_id: payload.fuel_id.clone(),
    };
    let computed = calc::compute(&input, &state.fuels);

    let mut data = state.data.lock().await;
    let record = FuelEmission {
        id: Some(assign_id(&mut data, payload.id)),
        date: payload.date,
        km_traveled: payload.km_traveled,
        efficiency: payload.efficiency,
        fuel_id: payload.fuel_id,
        fuel_name: computed.fuel_name.unwrap_or_default(),
        emission_factor: computed.emission_factor.unwrap_or(0.0),
        co2_emitted: computed.co2_emitted,
    };

    let next = ordering::upsert_by_id(&data.fuel, record.clone());
    data.fuel = next;
    persist_data(&state.data_path, &data).await?;

    Ok(Json(record))
}

pub async fn delete_energy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmissionsResponse>, AppError> {
    let id = parse_id(&id);
    let mut data = state.data.lock().await;

    let next = ordering::remove_by_id(&data.energy, &id);
    if next.len() == data.energy.len() {
        return Err(AppError::not_found("no energy record with that id"));
    }
    data.energy = next;
    persist_data(&state.data_path, &data).await?;

    Ok(Json(EmissionsResponse {
        energy: data.energy.clone(),
        fuel: data.fuel.clone(),
    }))
}

pub async fn delete_fuel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmissionsResponse>, AppError> {
    let id = parse_id(&id);
    let mut data = state.data.lock().await;

    let next = ordering::remove_by_id(&data.fuel, &id);
    if next.len() == data.fuel.len() {
        return Err(AppError::not_found("no fuel record with that id"));
    }
    data.fuel = next;
    persist_data(&state.data_path, &data).await?;

    Ok(Json(EmissionsResponse {
        energy: data.energy.clone(),
        fuel: data.fuel.clone(),
    }))
}

/// Keeps a client-supplied id (edit flow) or allocates the next one. A kept
/// numeric id advances the counter past itself so a later allocation cannot
/// collide with it and displace the record.
fn assign_id(data: &mut AppData, id: Option<RecordId>) -> RecordId {
    match id {
        Some(id) => {
            if let Ok(n) = id.key().parse::<i64>() {
                data.next_id = data.next_id.max(n);
            }
            id
        }
        None => {
            data.next_id += 1;
            RecordId::Num(data.next_id)
        }
    }
}

fn parse_id(raw: &str) -> RecordId {
    match raw.parse::<i64>() {
        Ok(n) => RecordId::Num(n),
        Err(_) => RecordId::Text(raw.to_string()),
    }
}
