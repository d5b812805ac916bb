use crate::domain::model::{OrgNumber, Version};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Role registry: which organizations a person is registered to represent.
///
/// An empty set means the person has no associated organizations (or is
/// unknown to the registry); both are successful outcomes. `Err` is reserved
/// for transport failure.
#[async_trait]
pub trait RoleRegistry: Send + Sync {
    async fn organizations_for_person(&self, person_id: &str) -> Result<Vec<OrgNumber>>;
}

/// Display-name to organization-number directory. `Ok(None)` means the name
/// did not resolve; matching rules (exact vs. fuzzy) are the directory's
/// own concern.
#[async_trait]
pub trait NameDirectory: Send + Sync {
    async fn organization_number(&self, name: &str) -> Result<Option<OrgNumber>>;
}

/// Accepted-terms version store. An organization may carry several records
/// (one per terms category); no record at all is the empty vec, never an
/// error.
#[async_trait]
pub trait AcceptanceStore: Send + Sync {
    async fn accepted_versions(&self, org: &OrgNumber) -> Result<Vec<Version>>;
}
