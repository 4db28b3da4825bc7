use serde::{Deserialize, Serialize};

use crate::core::flames::Flames;
use crate::core::scoring::Band;
use crate::core::stats::{CalculationStats, SubmissionStats};
use crate::models::domain::{CompatibilityRecord, MatchResult, Submission};

/// Response for the love calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub record: CompatibilityRecord,
    pub band: Band,
    pub message: String,
    pub flames: Flames,
    pub persisted: bool,
}

/// Calculation history with aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub calculations: Vec<CompatibilityRecord>,
    pub stats: CalculationStats,
    /// Mean percentage to one decimal place, as shown in the history panel
    pub average_display: String,
}

/// Admin listing of heart submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionsResponse {
    pub submissions: Vec<Submission>,
    pub stats: SubmissionStats,
}

/// Results page match reveal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchLookupResponse {
    #[serde(rename = "match")]
    pub result: MatchResult,
    pub fate: Flames,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Delete acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}
