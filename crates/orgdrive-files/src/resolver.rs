use crate::error::{DriveError, DriveResult};
use async_trait::async_trait;
use orgdrive_core::OrgId;

/// Resolves the organization that owns the current call.
///
/// The drive layer never inspects sessions or tokens itself; whatever
/// identity mechanism the host application uses plugs in here.
#[async_trait]
pub trait OrgResolver: Send + Sync {
    /// The caller's organization, or `None` when none can be determined.
    async fn current_org(&self) -> Option<OrgId>;
}

/// Resolver that always answers with one fixed organization.
///
/// Suitable for single-tenant deployments and tests.
pub struct FixedOrgResolver {
    org: OrgId,
}

impl FixedOrgResolver {
    pub fn new(org: impl Into<String>) -> Self {
        FixedOrgResolver {
            org: OrgId::new(org),
        }
    }
}

#[async_trait]
impl OrgResolver for FixedOrgResolver {
    async fn current_org(&self) -> Option<OrgId> {
        Some(self.org.clone())
    }
}

/// Resolve the calling organization, failing when the resolver yields none.
pub async fn resolve_org(resolver: &dyn OrgResolver) -> DriveResult<OrgId> {
    resolver
        .current_org()
        .await
        .ok_or(DriveError::TenantResolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoOrgResolver;

    #[async_trait]
    impl OrgResolver for NoOrgResolver {
        async fn current_org(&self) -> Option<OrgId> {
            None
        }
    }

    #[tokio::test]
    async fn test_fixed_resolver_yields_its_org() {
        let resolver = FixedOrgResolver::new("ORG123");
        let org = resolve_org(&resolver).await.unwrap();
        assert_eq!(org.as_str(), "ORG123");
    }

    #[tokio::test]
    async fn test_missing_org_is_an_error() {
        let result = resolve_org(&NoOrgResolver).await;
        assert!(matches!(result, Err(DriveError::TenantResolution)));
    }
}
