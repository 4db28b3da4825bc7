use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CompatibilityRecord, MatchResult, NewSubmission, Submission};

/// Errors that can occur in any storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence for love-calculator results
#[async_trait]
pub trait CalculationStore: Send + Sync {
    /// Store a record and return it with its assigned id
    async fn save(&self, record: &CompatibilityRecord) -> Result<CompatibilityRecord, StoreError>;

    /// Most recent records first
    async fn list(&self, limit: usize) -> Result<Vec<CompatibilityRecord>, StoreError>;
}

/// Persistence for heart submissions
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, StoreError>;

    /// All submissions, newest first
    async fn list(&self) -> Result<Vec<Submission>, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    async fn delete_all(&self) -> Result<(), StoreError>;
}

/// Read-only access to the pre-seeded pairings
#[async_trait]
pub trait MatchResultStore: Send + Sync {
    /// Exact lookup on trimmed name and class
    async fn find(&self, name: &str, class: &str) -> Result<Option<MatchResult>, StoreError>;
}
