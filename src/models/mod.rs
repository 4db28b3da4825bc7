// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CompatibilityRecord, Gender, MatchResult, NewSubmission, RecordError, Submission, TargetGender,
};
pub use requests::{CalculateRequest, HistoryQuery, MatchLookupQuery, SubmitHeartRequest};
pub use responses::{
    CalculateResponse, DeleteResponse, ErrorResponse, HealthResponse, HistoryResponse,
    MatchLookupResponse, SubmissionsResponse,
};
