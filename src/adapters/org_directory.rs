use crate::domain::model::OrgNumber;
use crate::domain::ports::NameDirectory;
use crate::utils::error::{Result, TermsError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Name-lookup client: resolves an organization display name to its
/// canonical number. Match semantics (exact, normalized, fuzzy) belong to
/// the directory service itself.
pub struct OrgDirectoryClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OrganizationEntry {
    #[serde(rename = "organizationNumber")]
    organization_number: String,
}

impl OrgDirectoryClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl NameDirectory for OrgDirectoryClient {
    async fn organization_number(&self, name: &str) -> Result<Option<OrgNumber>> {
        let url = format!("{}/organizations", self.base_url);
        tracing::debug!(name = %name, "querying organization directory");

        let response = self
            .client
            .get(&url)
            .query(&[("name", name)])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let entry: OrganizationEntry = response.json().await?;
                match OrgNumber::parse(&entry.organization_number) {
                    Some(org) => Ok(Some(org)),
                    None => {
                        tracing::warn!(
                            name = %name,
                            number = %entry.organization_number,
                            "directory returned a malformed organization number"
                        );
                        Ok(None)
                    }
                }
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(TermsError::Upstream {
                service: "org-directory",
                status: status.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> OrgDirectoryClient {
        OrgDirectoryClient::new(server.base_url(), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_resolves_name_to_number() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/organizations")
                .query_param("name", "Oslo Havn KF");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "name": "Oslo Havn KF",
                    "organizationNumber": "987592567"
                }));
        });

        let org = client(&server)
            .organization_number("Oslo Havn KF")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(org.unwrap().as_str(), "987592567");
    }

    #[tokio::test]
    async fn test_unknown_name_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/organizations");
            then.status(404);
        });

        let org = client(&server).organization_number("No Such Org").await.unwrap();

        assert!(org.is_none());
    }

    #[tokio::test]
    async fn test_malformed_number_is_treated_as_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/organizations");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"organizationNumber": "not-a-number"}));
        });

        let org = client(&server).organization_number("Drift").await.unwrap();

        assert!(org.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_hard_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/organizations");
            then.status(500);
        });

        let result = client(&server).organization_number("Drift").await;

        assert!(matches!(
            result,
            Err(TermsError::Upstream {
                service: "org-directory",
                status: 500,
            })
        ));
    }
}
