use async_trait::async_trait;

use crate::models::CompatibilityRecord;
use crate::services::store::{CalculationStore, StoreError};

/// Remote-first calculation store that falls back to a local one
///
/// Saves go to `primary`; when it fails the record is saved to `fallback`
/// instead. Listings merge both stores newest first, so records cached
/// during an outage stay visible once `primary` is back. Errors surface
/// only when both fail.
pub struct FallbackCalculationStore<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackCalculationStore<P, F>
where
    P: CalculationStore,
    F: CalculationStore,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

#[async_trait]
impl<P, F> CalculationStore for FallbackCalculationStore<P, F>
where
    P: CalculationStore,
    F: CalculationStore,
{
    async fn save(&self, record: &CompatibilityRecord) -> Result<CompatibilityRecord, StoreError> {
        match self.primary.save(record).await {
            Ok(stored) => Ok(stored),
            Err(e) => {
                tracing::warn!("Remote save failed, caching calculation locally: {}", e);
                self.fallback.save(record).await
            }
        }
    }

    async fn list(&self, limit: usize) -> Result<Vec<CompatibilityRecord>, StoreError> {
        let mut records = match self.primary.list(limit).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Remote listing failed, reading local calculations: {}", e);
                return self.fallback.list(limit).await;
            }
        };

        match self.fallback.list(limit).await {
            Ok(cached) if !cached.is_empty() => {
                records.extend(cached);
                records.sort_by(|a, b| b.computed_at().cmp(&a.computed_at()));
                records.truncate(limit);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Skipping local calculations in listing: {}", e),
        }

        Ok(records)
    }
}
