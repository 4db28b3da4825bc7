use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{Gender, NewSubmission, TargetGender};

/// Request to run the love calculator
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CalculateRequest {
    #[validate(custom(function = "not_blank"))]
    #[serde(alias = "first_name", alias = "name1", rename = "firstName")]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(alias = "second_name", alias = "name2", rename = "secondName")]
    pub second_name: String,
}

/// Query for calculation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Heart form submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitHeartRequest {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    pub gender: Gender,
    #[serde(alias = "target_gender", rename = "targetGender")]
    pub target_gender: TargetGender,
    #[validate(custom(function = "not_blank"), length(max = 1000))]
    #[serde(alias = "pickup_line", rename = "pickupLine")]
    pub pickup_line: String,
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub class: String,
}

impl SubmitHeartRequest {
    /// Trimmed submission ready for storage
    pub fn into_new_submission(self) -> NewSubmission {
        NewSubmission {
            name: self.name.trim().to_string(),
            gender: self.gender,
            target_gender: self.target_gender,
            pickup_line: self.pickup_line.trim().to_string(),
            class: self.class.trim().to_string(),
        }
    }
}

/// Results page lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchLookupQuery {
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub class: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
