use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{CompatibilityRecord, MatchResult, NewSubmission, Submission};
use crate::services::store::{CalculationStore, MatchResultStore, StoreError, SubmissionStore};

/// Process-local store for all three collections
///
/// Used when no remote database is configured, and by tests.
#[derive(Default)]
pub struct MemoryStore {
    submissions: RwLock<Vec<Submission>>,
    match_results: RwLock<Vec<MatchResult>>,
    calculations: RwLock<Vec<CompatibilityRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the pairings served by the results lookup
    pub fn with_match_results(match_results: Vec<MatchResult>) -> Self {
        Self {
            match_results: RwLock::new(match_results),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, StoreError> {
        let stored = Submission {
            id: uuid::Uuid::new_v4().to_string(),
            name: submission.name.clone(),
            gender: submission.gender,
            target_gender: submission.target_gender,
            pickup_line: submission.pickup_line.clone(),
            class: submission.class.clone(),
            created_at: Utc::now(),
        };

        self.submissions.write().await.insert(0, stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        Ok(self.submissions.read().await.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut submissions = self.submissions.write().await;
        let before = submissions.len();
        submissions.retain(|s| s.id != id);

        if submissions.len() == before {
            return Err(StoreError::NotFound(format!("Submission {} not found", id)));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.submissions.write().await.clear();
        Ok(())
    }
}

#[async_trait]
impl MatchResultStore for MemoryStore {
    async fn find(&self, name: &str, class: &str) -> Result<Option<MatchResult>, StoreError> {
        let (name, class) = (name.trim(), class.trim());
        Ok(self
            .match_results
            .read()
            .await
            .iter()
            .find(|m| m.name == name && m.class == class)
            .cloned())
    }
}

#[async_trait]
impl CalculationStore for MemoryStore {
    async fn save(&self, record: &CompatibilityRecord) -> Result<CompatibilityRecord, StoreError> {
        let stored = record.clone().with_id(uuid::Uuid::new_v4().to_string());
        self.calculations.write().await.insert(0, stored.clone());
        Ok(stored)
    }

    async fn list(&self, limit: usize) -> Result<Vec<CompatibilityRecord>, StoreError> {
        Ok(self
            .calculations
            .read()
            .await
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, TargetGender};

    fn new_submission(name: &str) -> NewSubmission {
        NewSubmission {
            name: name.to_string(),
            gender: Gender::Male,
            target_gender: TargetGender::Female,
            pickup_line: "Are you a compiler? Because you complete me.".to_string(),
            class: "CS 2024".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submissions_newest_first_and_delete() {
        let store = MemoryStore::new();
        let first = store.insert(&new_submission("Arjun")).await.unwrap();
        store.insert(&new_submission("Bala")).await.unwrap();

        let listed = SubmissionStore::list(&store).await.unwrap();
        assert_eq!(listed[0].name, "Bala");

        store.delete(&first.id).await.unwrap();
        assert_eq!(SubmissionStore::list(&store).await.unwrap().len(), 1);

        assert!(matches!(
            store.delete(&first.id).await,
            Err(StoreError::NotFound(_))
        ));

        store.delete_all().await.unwrap();
        assert!(SubmissionStore::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_match_lookup_trims_input() {
        let store = MemoryStore::with_match_results(vec![MatchResult {
            id: "m1".to_string(),
            name: "Anu".to_string(),
            class: "CS 2024".to_string(),
            match_name: "Arjun".to_string(),
            match_class: "ECE 2025".to_string(),
            message: None,
        }]);

        let found = store.find(" Anu ", "CS 2024 ").await.unwrap();
        assert_eq!(found.map(|m| m.match_name), Some("Arjun".to_string()));
        assert!(store.find("anu", "CS 2024").await.unwrap().is_none());
    }
}
