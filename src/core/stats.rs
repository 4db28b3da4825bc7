use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{CompatibilityRecord, Submission};

/// Aggregates over love-calculator history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationStats {
    pub count: usize,
    pub average_percentage: f64,
}

impl CalculationStats {
    pub fn from_records(records: &[CompatibilityRecord]) -> Self {
        let count = records.len();
        if count == 0 {
            return Self {
                count: 0,
                average_percentage: 0.0,
            };
        }

        let total: u64 = records.iter().map(|r| r.percentage() as u64).sum();

        Self {
            count,
            average_percentage: total as f64 / count as f64,
        }
    }

    /// Mean rendered to one decimal place, e.g. `"67.5"`
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average_percentage)
    }
}

/// Aggregates over heart submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStats {
    pub total: usize,
    pub today: usize,
    pub by_gender: BTreeMap<String, usize>,
}

impl SubmissionStats {
    /// `today` counts submissions created on `reference` (UTC date)
    pub fn from_submissions(submissions: &[Submission], reference: NaiveDate) -> Self {
        let mut by_gender = BTreeMap::new();
        let mut today = 0;

        for submission in submissions {
            *by_gender
                .entry(submission.gender.as_str().to_string())
                .or_insert(0) += 1;

            if submission.created_at.date_naive() == reference {
                today += 1;
            }
        }

        Self {
            total: submissions.len(),
            today,
            by_gender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let stats = CalculationStats::from_records(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average_percentage, 0.0);
        assert_eq!(stats.average_display(), "0.0");
    }

    #[test]
    fn test_average() {
        // 60 and 75
        let records = vec![
            CompatibilityRecord::compute("Alice", "Bob"),
            CompatibilityRecord::compute("a", "b"),
        ];
        let stats = CalculationStats::from_records(&records);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average_percentage, 67.5);
        assert_eq!(stats.average_display(), "67.5");
    }
}
