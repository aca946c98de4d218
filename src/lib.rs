pub mod app;
pub mod calc;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod ordering;
pub mod state;
pub mod storage;
pub mod summary;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
