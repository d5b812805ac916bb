use crate::domain::model::{OrgNumber, Version};
use crate::domain::ports::AcceptanceStore;
use crate::utils::error::{Result, TermsError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const RETRY_DELAY: Duration = Duration::from_millis(200);

/// Acceptance-store client: fetches the recorded terms acceptances for one
/// organization. "No record" is a normal outcome (empty vec); transient
/// failures are retried within the configured budget before the error
/// propagates.
pub struct TermsStoreClient {
    client: Client,
    base_url: String,
    retry_attempts: u32,
}

#[derive(Debug, Deserialize)]
struct AcceptanceRecord {
    #[serde(rename = "acceptedVersion")]
    accepted_version: String,
}

impl TermsStoreClient {
    pub fn new(base_url: String, timeout: Duration, retry_attempts: u32) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            retry_attempts,
        })
    }

    async fn fetch(&self, org: &OrgNumber) -> Result<Vec<Version>> {
        let url = format!("{}/acceptances/{}", self.base_url, org);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => {
                let records: Vec<AcceptanceRecord> = response.json().await?;
                let versions = records
                    .iter()
                    .filter_map(|record| match record.accepted_version.parse::<Version>() {
                        Ok(version) => Some(version),
                        Err(reason) => {
                            // Bad data in one store row must not fail the call.
                            tracing::warn!(org = %org, %reason, "skipping unparseable acceptance record");
                            None
                        }
                    })
                    .collect();
                Ok(versions)
            }
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status => Err(TermsError::Upstream {
                service: "terms-store",
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl AcceptanceStore for TermsStoreClient {
    async fn accepted_versions(&self, org: &OrgNumber) -> Result<Vec<Version>> {
        let mut attempt = 0;
        loop {
            match self.fetch(org).await {
                Ok(versions) => return Ok(versions),
                Err(e) if e.is_transient() && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        org = %org,
                        attempt,
                        error = %e,
                        "acceptance lookup failed, retrying"
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
