use crate::chart::ChartBoard;
use crate::errors::DashboardError;
use crate::models::MarketData;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<MarketData>,
    pub board: Arc<Mutex<ChartBoard>>,
}

impl AppState {
    pub fn new(data: MarketData) -> Result<Self, DashboardError> {
        let board = ChartBoard::new(&data)?;
        Ok(Self {
            data: Arc::new(data),
            board: Arc::new(Mutex::new(board)),
        })
    }
}
