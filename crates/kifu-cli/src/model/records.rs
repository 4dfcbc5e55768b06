use kifu_core::EvaluationRecord;
use serde::{Deserialize, Serialize};

/// Evaluation records of one game, as written by the analysis pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameRecords {
    pub game_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_moves: Option<u32>,
    pub records: Vec<EvaluationRecord>,
}
