use crate::domain::model::OrgNumber;
use crate::domain::ports::RoleRegistry;
use crate::utils::error::{Result, TermsError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Role-registry client against the Altinn reportee API. Returns the
/// organizations a person is registered to represent.
pub struct AltinnClient {
    client: Client,
    base_url: String,
}

/// Reportee entries also cover persons and sub-units, whose identifiers are
/// not organization numbers; those are filtered out after parsing.
#[derive(Debug, Deserialize)]
struct Reportee {
    #[serde(rename = "organizationNumber")]
    organization_number: Option<String>,
}

impl AltinnClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl RoleRegistry for AltinnClient {
    async fn organizations_for_person(&self, person_id: &str) -> Result<Vec<OrgNumber>> {
        let url = format!("{}/api/serviceowner/reportees", self.base_url);
        tracing::debug!(url = %url, "querying role registry");

        let response = self
            .client
            .get(&url)
            .query(&[("subject", person_id)])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let reportees: Vec<Reportee> = response.json().await?;
                let orgs = reportees
                    .iter()
                    .filter_map(|r| r.organization_number.as_deref())
                    .filter_map(OrgNumber::parse)
                    .collect::<Vec<_>>();
                tracing::debug!(
                    reportees = reportees.len(),
                    organizations = orgs.len(),
                    "role registry response parsed"
                );
                Ok(orgs)
            }
            // Unknown person reads the same as a person with no roles.
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status => Err(TermsError::Upstream {
                service: "altinn",
                status: status.as_u16(),
            }),
        }
    }
}
