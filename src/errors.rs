use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the dashboard computations. Raised at the boundary of the pure
/// functions; no partial results are ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),

    #[error("invalid scenario '{0}'")]
    InvalidScenario(String),

    #[error("result is not a finite number: {0}")]
    NonFinite(&'static str),

    #[error("malformed series: {0}")]
    MalformedSeries(String),

    #[error("no data for year {0}")]
    MissingYear(i32),

    #[error("incomplete dataset: {0}")]
    IncompleteDataset(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        let status = match err {
            DashboardError::DivisionByZero(_) | DashboardError::NonFinite(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            DashboardError::IncompleteDataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
