// In crates/web-server/src/types.rs

use core_types::{Mode, OrderRecord};
use serde::{Deserialize, Serialize};

/// Body of `POST /mode`. The value is validated by the handler, not by serde,
/// so unknown modes get the `{"success": false}` answer.
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModeResponse {
    pub mode: Mode,
}

#[derive(Debug, Serialize)]
pub struct ModeSwitched {
    pub success: bool,
    pub mode: Mode,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub orders: Vec<OrderRecord>,
}
