use crate::chart::{ChartBoard, ChartSpec};
use crate::elasticity::{DEFAULT_BASE_YEAR, DEFAULT_COMPARE_YEAR, DEFAULT_SCENARIO, media_elasticity};
use crate::errors::AppError;
use crate::models::{ElasticityQuery, ElasticityResponse, ScenarioRequest, ScenariosResponse};
use crate::scenario::{ACTUAL, Scenario};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let elasticity = media_elasticity(
        &state.data,
        DEFAULT_BASE_YEAR,
        DEFAULT_COMPARE_YEAR,
        DEFAULT_SCENARIO,
    )
    .map(|result| ElasticityResponse {
        base_year: DEFAULT_BASE_YEAR,
        compare_year: DEFAULT_COMPARE_YEAR,
        scenario: DEFAULT_SCENARIO.to_string(),
        report: result.report(),
    })
    .map_err(|err| warn!("elasticity unavailable: {err}"))
    .ok();

    let board = state.board.lock().await;
    Html(render_index(&board, elasticity.as_ref()))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<ChartBoard> {
    let board = state.board.lock().await;
    Json(board.clone())
}

pub async fn get_elasticity(
    State(state): State<AppState>,
    Query(query): Query<ElasticityQuery>,
) -> Result<Json<ElasticityResponse>, AppError> {
    let base_year = query.base.unwrap_or(DEFAULT_BASE_YEAR);
    let compare_year = query.compare.unwrap_or(DEFAULT_COMPARE_YEAR);
    let scenario = query
        .scenario
        .as_deref()
        .map(|key| key.trim().to_lowercase())
        .unwrap_or_else(|| DEFAULT_SCENARIO.to_string());

    let result = media_elasticity(&state.data, base_year, compare_year, &scenario)?;
    Ok(Json(ElasticityResponse {
        base_year,
        compare_year,
        scenario,
        report: result.report(),
    }))
}

pub async fn get_scenarios(State(state): State<AppState>) -> Json<ScenariosResponse> {
    let active = state.board.lock().await.active_scenario.clone();
    let scenarios = std::iter::once(ACTUAL)
        .chain(state.data.travel_queries.scenario_keys())
        .map(str::to_string)
        .collect();

    Json(ScenariosResponse { active, scenarios })
}

pub async fn select_scenario(
    State(state): State<AppState>,
    Json(payload): Json<ScenarioRequest>,
) -> Result<Json<ChartSpec>, AppError> {
    let chart = apply_scenario(&state, &payload.scenario).await?;
    Ok(Json(chart))
}

pub async fn select_scenario_form(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Redirect, AppError> {
    apply_scenario(&state, &key).await?;
    Ok(Redirect::to("/"))
}

async fn apply_scenario(state: &AppState, key: &str) -> Result<ChartSpec, AppError> {
    let scenario: Scenario = key.parse()?;
    let mut board = state.board.lock().await;
    let chart = board
        .on_scenario_selected(&state.data, &scenario)
        .inspect_err(|err| warn!("scenario selection failed: {err}"))?
        .clone();

    info!("queries chart switched to {scenario}");
    Ok(chart)
}
