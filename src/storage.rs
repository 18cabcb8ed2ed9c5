use crate::chart::ChartBoard;
use crate::data;
use crate::models::MarketData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub fn resolve_data_path() -> Option<PathBuf> {
    env::var("APP_DATA_PATH")
        .ok()
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
}

/// Reads a dataset file, falling back to the builtin data when the file is
/// missing or unusable.
pub async fn load_data(path: &Path) -> MarketData {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            error!("data file {} not found, using builtin dataset", path.display());
            return data::builtin();
        }
        Err(err) => {
            error!("failed to read data file: {err}");
            return data::builtin();
        }
    };

    let parsed: MarketData = match serde_json::from_slice(&bytes) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!("failed to parse data file: {err}");
            return data::builtin();
        }
    };

    if let Err(err) = parsed.validate().and_then(|_| ChartBoard::new(&parsed).map(drop)) {
        error!("rejected data file: {err}");
        return data::builtin();
    }

    info!("loaded {} dataset from {}", parsed.market, path.display());
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("market_dashboard_{}_{name}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_builtin() {
        let data = load_data(&temp_path("missing")).await;
        assert_eq!(data, data::builtin());
    }

    #[tokio::test]
    async fn malformed_file_falls_back_to_builtin() {
        let path = temp_path("malformed");
        fs::write(&path, r#"{"market": "Nowhere"}"#).await.unwrap();
        let data = load_data(&path).await;
        let _ = fs::remove_file(&path).await;
        assert_eq!(data.market, "Kazakhstan");
    }

    #[tokio::test]
    async fn incomplete_dataset_falls_back_to_builtin() {
        let path = temp_path("incomplete");
        let mut custom = data::builtin();
        custom.market = "Uzbekistan".into();
        custom.travel_queries.years.remove(&2023);
        fs::write(&path, serde_json::to_vec(&custom).unwrap()).await.unwrap();

        let data = load_data(&path).await;
        let _ = fs::remove_file(&path).await;
        assert_eq!(data, data::builtin());
    }

    #[tokio::test]
    async fn valid_file_replaces_builtin() {
        let path = temp_path("valid");
        let mut custom = data::builtin();
        custom.market = "Uzbekistan".into();
        fs::write(&path, serde_json::to_vec(&custom).unwrap()).await.unwrap();

        let data = load_data(&path).await;
        let _ = fs::remove_file(&path).await;
        assert_eq!(data.market, "Uzbekistan");
        assert_eq!(data.travel_queries, custom.travel_queries);
    }
}
