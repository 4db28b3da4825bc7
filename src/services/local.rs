use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::models::CompatibilityRecord;
use crate::services::store::{CalculationStore, StoreError};

/// Calculation history kept in a JSON file on local disk
///
/// Used as the fallback when the remote store is unreachable. The file holds
/// a JSON array, newest record first. It is read once on first use and
/// rewritten in full on every save.
pub struct LocalCalculationStore {
    path: PathBuf,
    records: RwLock<Option<Vec<CompatibilityRecord>>>,
}

impl LocalCalculationStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records: RwLock::new(None),
        }
    }

    async fn load(&self) -> Result<Vec<CompatibilityRecord>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, records: &[CompatibilityRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl CalculationStore for LocalCalculationStore {
    async fn save(&self, record: &CompatibilityRecord) -> Result<CompatibilityRecord, StoreError> {
        let mut guard = self.records.write().await;
        if guard.is_none() {
            *guard = Some(self.load().await?);
        }

        let stored = record.clone().with_id(uuid::Uuid::new_v4().to_string());

        let mut updated = guard.as_ref().cloned().unwrap_or_default();
        updated.insert(0, stored.clone());
        self.persist(&updated).await?;
        *guard = Some(updated);

        tracing::debug!("Saved calculation {:?} to {}", stored.id(), self.path.display());
        Ok(stored)
    }

    async fn list(&self, limit: usize) -> Result<Vec<CompatibilityRecord>, StoreError> {
        {
            let guard = self.records.read().await;
            if let Some(records) = guard.as_ref() {
                return Ok(records.iter().take(limit).cloned().collect());
            }
        }

        let mut guard = self.records.write().await;
        if guard.is_none() {
            *guard = Some(self.load().await?);
        }

        Ok(guard
            .as_ref()
            .map(|records| records.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
