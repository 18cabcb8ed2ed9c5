pub mod app;
pub mod chart;
pub mod data;
pub mod elasticity;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod scenario;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use elasticity::{calculate_elasticity, media_elasticity};
pub use errors::DashboardError;
pub use scenario::{Scenario, select_series};
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
