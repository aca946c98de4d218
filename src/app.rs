use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/fuels", get(handlers::get_fuels))
        .route("/api/emissions", get(handlers::get_emissions))
        .route("/api/emissions/energy", post(handlers::upsert_energy))
        .route("/api/emissions/fuel", post(handlers::upsert_fuel))
        .route("/api/emissions/energy/:id", delete(handlers::delete_energy))
        .route("/api/emissions/fuel/:id", delete(handlers::delete_fuel))
        .route("/api/summary", get(handlers::get_summary))
        .with_state(state)
}
