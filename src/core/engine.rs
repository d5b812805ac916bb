use crate::core::{AcceptanceStore, NameDirectory, OrgNumber, ResolutionResult, RoleRegistry, Version};
use crate::utils::error::Result;
use futures::future::try_join_all;
use std::collections::HashSet;

/// Resolves terms acceptance for organizations identified three different
/// ways: by the person representing them, by explicit organization numbers,
/// or by display names. All three paths funnel into one aggregation step so
/// ordering, deduplication and the zero-version default behave identically.
pub struct ResolutionEngine<R, N, A> {
    roles: R,
    names: N,
    store: A,
}

impl<R: RoleRegistry, N: NameDirectory, A: AcceptanceStore> ResolutionEngine<R, N, A> {
    pub fn new(roles: R, names: N, store: A) -> Self {
        Self {
            roles,
            names,
            store,
        }
    }

    /// Resolve via the role registry. A person with zero associated
    /// organizations yields an empty result, which is success.
    pub async fn resolve_by_person(&self, person_id: &str) -> Result<ResolutionResult> {
        let orgs = self.roles.organizations_for_person(person_id).await?;
        tracing::debug!(count = orgs.len(), "role registry lookup complete");
        self.collect(dedup_preserving_order(orgs)).await
    }

    /// Resolve explicit organization numbers. Syntactically invalid entries
    /// are dropped; every surviving number gets exactly one output entry.
    pub async fn resolve_by_org_numbers(&self, numbers: &[String]) -> Result<ResolutionResult> {
        let orgs: Vec<OrgNumber> = numbers
            .iter()
            .filter_map(|raw| {
                let parsed = OrgNumber::parse(raw);
                if parsed.is_none() && !raw.trim().is_empty() {
                    tracing::warn!(input = %raw, "dropping invalid organization number");
                }
                parsed
            })
            .collect();
        self.collect(dedup_preserving_order(orgs)).await
    }

    /// Resolve display names via the name directory. Names that do not
    /// resolve contribute nothing; a directory transport failure fails the
    /// whole call.
    pub async fn resolve_by_org_names(&self, names: &[String]) -> Result<ResolutionResult> {
        let mut orgs = Vec::with_capacity(names.len());
        for name in names {
            if name.trim().is_empty() {
                continue;
            }
            match self.names.organization_number(name).await? {
                Some(org) => orgs.push(org),
                None => tracing::debug!(name = %name, "organization name not found"),
            }
        }
        self.collect(dedup_preserving_order(orgs)).await
    }

    /// Fan out one acceptance-store lookup per organization and join the
    /// results back by input index, so output order never depends on
    /// upstream latency. Any single lookup failure fails the whole call;
    /// the result is all-or-nothing.
    async fn collect(&self, orgs: Vec<OrgNumber>) -> Result<ResolutionResult> {
        let lookups = orgs.iter().map(|org| self.store.accepted_versions(org));
        let versions = try_join_all(lookups).await?;

        Ok(orgs
            .into_iter()
            .zip(versions)
            .map(|(org, recorded)| {
                // Highest accepted version wins across terms categories;
                // no record at all reads as 0.0.0.
                let version = recorded.into_iter().max().unwrap_or(Version::ZERO);
                (org, version)
            })
            .collect())
    }
}

fn dedup_preserving_order(orgs: Vec<OrgNumber>) -> Vec<OrgNumber> {
    let mut seen = HashSet::new();
    orgs.into_iter()
        .filter(|org| seen.insert(org.clone()))
        .collect()
}
