use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::core::errors::{NamewatchError, Result};
use crate::core::models::observation::Observation;
use crate::core::models::user_lookup::{TrackedField, UserLookupResponse};
use crate::core::traits::lookup::Lookup;

/// Default API host.
pub const DEFAULT_API_HOST: &str = "https://api.twitter.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Looks accounts up through the Twitter/X v2 users endpoint.
pub struct TwitterLookup {
    client: reqwest::Client,
    host: String,
    bearer_token: String,
    field: TrackedField,
}

impl TwitterLookup {
    pub fn new(host: &str, bearer_token: &str, field: TrackedField, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            host: host.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.to_string(),
            field,
        })
    }

    fn user_url(&self, entity_id: &str) -> String {
        format!("{}/2/users/{entity_id}", self.host)
    }
}

/// Build a reqwest client with the given timeout.
fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("namewatch/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| NamewatchError::InvalidConfig {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

impl Lookup for TwitterLookup {
    async fn fetch(&self, entity_id: &str) -> Result<Observation> {
        let fetch_failed = |reason: String| NamewatchError::FetchFailed {
            entity_id: entity_id.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(self.user_url(entity_id))
            .query(&[("user.fields", "username,name")])
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| fetch_failed(format!("request failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(NamewatchError::EntityNotFound {
                entity_id: entity_id.to_string(),
            });
        }
        if !status.is_success() {
            return Err(fetch_failed(format!("API returned status {status}")));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| fetch_failed(format!("failed to read response: {e}")))?;
        let body: UserLookupResponse = serde_json::from_str(&text)
            .map_err(|e| fetch_failed(format!("failed to parse response: {e}")))?;

        debug!(entity_id, "lookup succeeded");
        observation_from_response(entity_id, body, self.field, Utc::now())
    }
}

/// Normalize an API response into an `Observation`.
pub fn observation_from_response(
    entity_id: &str,
    body: UserLookupResponse,
    field: TrackedField,
    fetched_at: DateTime<Utc>,
) -> Result<Observation> {
    match body.data {
        Some(user) => {
            if user.id != entity_id {
                warn!(entity_id, returned_id = %user.id, "lookup answered for a different account ID");
            }
            Ok(Observation::new(entity_id, field.extract(&user), fetched_at))
        }
        None if body.errors.is_empty() => Err(NamewatchError::FetchFailed {
            entity_id: entity_id.to_string(),
            reason: "response contained neither data nor errors".into(),
        }),
        None => {
            let not_found = body
                .errors
                .iter()
                .any(|e| e.title.contains("Not Found"));
            if not_found {
                Err(NamewatchError::EntityNotFound {
                    entity_id: entity_id.to_string(),
                })
            } else {
                let reasons: Vec<String> = body
                    .errors
                    .iter()
                    .map(|e| format!("{}: {}", e.title, e.detail))
                    .collect();
                Err(NamewatchError::FetchFailed {
                    entity_id: entity_id.to_string(),
                    reason: reasons.join("; "),
                })
            }
        }
    }
}
