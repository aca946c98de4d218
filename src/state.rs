use crate::calc::Fuel;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    /// Fuel reference table, injected at startup so the calculator never
    /// reaches for a global.
    pub fuels: Arc<Vec<Fuel>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, fuels: Vec<Fuel>) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            fuels: Arc::new(fuels),
        }
    }
}
