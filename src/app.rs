use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/scenario/:key", post(handlers::select_scenario_form))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/elasticity", get(handlers::get_elasticity))
        .route("/api/scenarios", get(handlers::get_scenarios))
        .route("/api/scenario", post(handlers::select_scenario))
        .with_state(state)
}
