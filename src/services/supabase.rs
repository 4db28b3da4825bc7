use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use crate::models::{CompatibilityRecord, MatchResult, NewSubmission, Submission};
use crate::services::store::{CalculationStore, MatchResultStore, StoreError, SubmissionStore};

/// Matches every real row; PostgREST refuses an unfiltered DELETE
const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

const CALCULATION_COLUMNS: &str = "id,first_name,second_name,percentage,computed_at";

/// Table names in the hosted database
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub submissions: String,
    pub match_results: String,
    pub calculations: String,
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            submissions: "tinker_hearts_submissions".to_string(),
            match_results: "match_results".to_string(),
            calculations: "love_calculations".to_string(),
        }
    }
}

/// Client for the hosted database's REST interface
///
/// Handles all communication with the remote store:
/// - Inserting, listing and deleting heart submissions
/// - Looking up pre-seeded match results
/// - Saving and listing love-calculator records
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    pub fn new(base_url: String, api_key: String, tables: SupabaseTables) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Turn a non-2xx response into `StoreError::Api`
    async fn check(response: Response, action: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Failed to {}: {} - {}", action, status, body);

        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn rows<T: DeserializeOwned>(response: Response, what: &str) -> Result<Vec<T>, StoreError> {
        let json: serde_json::Value = response.json().await?;
        serde_json::from_value(json)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
    }

    async fn single_row<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, StoreError> {
        Self::rows(response, what)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse(format!("Empty {} representation", what)))
    }
}

fn eq(value: &str) -> String {
    format!("eq.{}", urlencoding::encode(value))
}

#[async_trait]
impl SubmissionStore for SupabaseClient {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, StoreError> {
        let url = self.table_url(&self.tables.submissions);

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(submission)
            .send()
            .await?;
        let response = Self::check(response, "insert submission").await?;

        let stored: Submission = Self::single_row(response, "submission").await?;
        tracing::debug!("Inserted submission {}", stored.id);

        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        let url = format!(
            "{}?select=*&order=created_at.desc",
            self.table_url(&self.tables.submissions)
        );

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check(response, "list submissions").await?;

        let submissions: Vec<Submission> = Self::rows(response, "submissions").await?;
        tracing::debug!("Fetched {} submissions", submissions.len());

        Ok(submissions)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = format!("{}?id={}", self.table_url(&self.tables.submissions), eq(id));

        let response = self
            .authorized(self.client.delete(&url))
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let response = Self::check(response, "delete submission").await?;

        let deleted: Vec<serde_json::Value> = Self::rows(response, "deleted rows").await?;
        if deleted.is_empty() {
            return Err(StoreError::NotFound(format!("Submission {} not found", id)));
        }

        tracing::debug!("Deleted submission {}", id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let url = format!(
            "{}?id=neq.{}",
            self.table_url(&self.tables.submissions),
            NIL_UUID
        );

        let response = self.authorized(self.client.delete(&url)).send().await?;
        Self::check(response, "delete all submissions").await?;

        tracing::info!("Deleted all submissions");
        Ok(())
    }
}

#[async_trait]
impl MatchResultStore for SupabaseClient {
    async fn find(&self, name: &str, class: &str) -> Result<Option<MatchResult>, StoreError> {
        let url = format!(
            "{}?select=*&name={}&class={}&limit=1",
            self.table_url(&self.tables.match_results),
            eq(name.trim()),
            eq(class.trim())
        );

        tracing::debug!("Looking up match result for {} ({})", name, class);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check(response, "look up match result").await?;

        let results: Vec<MatchResult> = Self::rows(response, "match results").await?;
        Ok(results.into_iter().next())
    }
}

#[async_trait]
impl CalculationStore for SupabaseClient {
    async fn save(&self, record: &CompatibilityRecord) -> Result<CompatibilityRecord, StoreError> {
        let url = format!(
            "{}?select={}",
            self.table_url(&self.tables.calculations),
            CALCULATION_COLUMNS
        );

        // id is assigned by the database
        let payload = json!({
            "first_name": record.first_name(),
            "second_name": record.second_name(),
            "percentage": record.percentage(),
            "computed_at": record.computed_at(),
        });

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await?;
        let response = Self::check(response, "save calculation").await?;

        Self::single_row(response, "calculation").await
    }

    async fn list(&self, limit: usize) -> Result<Vec<CompatibilityRecord>, StoreError> {
        let url = format!(
            "{}?select={}&order=computed_at.desc&limit={}",
            self.table_url(&self.tables.calculations),
            CALCULATION_COLUMNS,
            limit
        );

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check(response, "list calculations").await?;

        Self::rows(response, "calculations").await
    }
}
