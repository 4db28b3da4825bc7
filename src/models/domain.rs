use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::scoring::{compatibility_score, Band};

/// Reasons a stored record is refused on load
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("percentage {0} is outside 0-100")]
    OutOfRange(u8),

    #[error("percentage {stored} does not match score {expected} for the stored names")]
    ScoreMismatch { stored: u8, expected: u8 },
}

/// A computed love-calculator result
///
/// Built through [`CompatibilityRecord::compute`] or deserialized from
/// storage. Deserialization rescores the names and rejects any row whose
/// `percentage` disagrees, so `percentage` always matches the two names.
/// Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct CompatibilityRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    first_name: String,
    second_name: String,
    percentage: u8,
    computed_at: DateTime<Utc>,
}

/// Wire shape of a record as read back from a store, legacy names included
#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "name1", alias = "firstName")]
    first_name: String,
    #[serde(alias = "name2", alias = "secondName")]
    second_name: String,
    percentage: u8,
    #[serde(alias = "timestamp", alias = "created_at")]
    computed_at: DateTime<Utc>,
}

impl TryFrom<StoredRecord> for CompatibilityRecord {
    type Error = RecordError;

    fn try_from(raw: StoredRecord) -> Result<Self, Self::Error> {
        if raw.percentage > 100 {
            return Err(RecordError::OutOfRange(raw.percentage));
        }

        let expected = compatibility_score(&raw.first_name, &raw.second_name);
        if raw.percentage != expected {
            return Err(RecordError::ScoreMismatch {
                stored: raw.percentage,
                expected,
            });
        }

        Ok(Self {
            id: raw.id,
            first_name: raw.first_name,
            second_name: raw.second_name,
            percentage: raw.percentage,
            computed_at: raw.computed_at,
        })
    }
}

impl CompatibilityRecord {
    /// Score two (already trimmed) names and stamp the result with the current time
    pub fn compute(first_name: impl Into<String>, second_name: impl Into<String>) -> Self {
        Self::compute_at(first_name, second_name, Utc::now())
    }

    pub fn compute_at(
        first_name: impl Into<String>,
        second_name: impl Into<String>,
        computed_at: DateTime<Utc>,
    ) -> Self {
        let first_name = first_name.into();
        let second_name = second_name.into();
        let percentage = compatibility_score(&first_name, &second_name);

        Self {
            id: None,
            first_name,
            second_name,
            percentage,
            computed_at,
        }
    }

    /// Attach the identity assigned by a store
    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..self
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn second_name(&self) -> &str {
        &self.second_name
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    pub fn band(&self) -> Band {
        Band::from_percentage(self.percentage)
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Gender options on the heart form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "non-binary",
        }
    }
}

/// Who a visitor is hoping to be matched with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetGender {
    Male,
    Female,
    NonBinary,
    /// "Endhelum madhi": anyone will do
    #[serde(rename = "endhelum-madhi", alias = "any")]
    Any,
}

impl TargetGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetGender::Male => "male",
            TargetGender::Female => "female",
            TargetGender::NonBinary => "non-binary",
            TargetGender::Any => "endhelum-madhi",
        }
    }
}

/// A heart submission as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub target_gender: TargetGender,
    pub pickup_line: String,
    pub class: String,
    pub created_at: DateTime<Utc>,
}

/// A heart submission before the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub name: String,
    pub gender: Gender,
    pub target_gender: TargetGender,
    pub pickup_line: String,
    pub class: String,
}

/// Pre-seeded pairing revealed on the results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: String,
    pub name: String,
    pub class: String,
    pub match_name: String,
    pub match_class: String,
    #[serde(default)]
    pub message: Option<String>,
}
