//! Domain lookup: the capability the route repository depends on.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use cfroutes_core::{ApiError, ApiResult, Domain};

use super::filter::{Filter, list_path};
use super::resources::decode_domains;
use crate::net::{ApiRequest, Gateway};

pub const DOMAINS_PATH: &str = "/v2/domains";

/// Resolves a human-readable domain name to a [`Domain`] with its GUID.
///
/// Returns `ApiError::NotFound` when no domain has the name; any other error
/// is a failure of the lookup itself.
#[async_trait]
pub trait DomainRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> ApiResult<Domain>;
}

#[async_trait]
impl<D> DomainRepository for Arc<D>
where
    D: DomainRepository + ?Sized,
{
    async fn find_by_name(&self, name: &str) -> ApiResult<Domain> {
        (**self).find_by_name(name).await
    }
}

/// Resolve `name` through `repo`, passing its outcome through unchanged.
///
/// No retry and no fallback: callers branch on exactly what the domain
/// repository reported.
pub async fn resolve_domain<D>(repo: &D, name: &str) -> ApiResult<Domain>
where
    D: DomainRepository + ?Sized,
{
    match repo.find_by_name(name).await {
        Ok(domain) => {
            debug!(domain = name, guid = %domain.guid, "resolved domain");
            Ok(domain)
        }
        Err(err) => {
            if err.is_not_found() {
                debug!(domain = name, "domain not found");
            } else {
                warn!(domain = name, error = %err, "domain resolution failed");
            }
            Err(err)
        }
    }
}

/// Domain repository backed by the cloud controller's `/v2/domains` listing.
#[derive(Debug, Clone)]
pub struct CloudControllerDomainRepository<G> {
    gateway: G,
}

impl<G> CloudControllerDomainRepository<G>
where
    G: Gateway,
{
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G> DomainRepository for CloudControllerDomainRepository<G>
where
    G: Gateway,
{
    #[tracing::instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ApiResult<Domain> {
        let path = list_path(DOMAINS_PATH, Some(&Filter::by("name", name)));
        let body = self.gateway.execute(ApiRequest::get(path)).await?;

        decode_domains(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found("Domain", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::Method;
    use crate::testing::{FakeDomainRepository, FakeGateway};

    #[tokio::test]
    async fn find_by_name_queries_by_escaped_name() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.respond_ok(
            r#"{"resources": [{"metadata": {"guid": "domain1-guid"}, "entity": {"name": "domain1.cf-app.com"}}]}"#,
        );
        let repo = CloudControllerDomainRepository::new(gateway.clone());

        let domain = repo.find_by_name("domain1.cf-app.com").await.unwrap();

        assert_eq!(domain, Domain::new("domain1-guid", "domain1.cf-app.com"));
        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/v2/domains?q=name%3Adomain1.cf-app.com");
    }

    #[tokio::test]
    async fn find_by_name_reports_not_found_on_empty_list() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.respond_ok(r#"{"resources": []}"#);
        let repo = CloudControllerDomainRepository::new(gateway);

        let err = repo.find_by_name("missing.com").await.unwrap_err();
        assert_eq!(err, ApiError::not_found("Domain", "missing.com"));
    }

    #[tokio::test]
    async fn find_by_name_propagates_gateway_failure() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.respond_err(ApiError::http(500, None, "boom"));
        let repo = CloudControllerDomainRepository::new(gateway);

        let err = repo.find_by_name("cfapps.io").await.unwrap_err();
        assert!(err.is_failure());
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn resolve_domain_passes_outcomes_through() {
        let repo = FakeDomainRepository::returning(Ok(Domain::with_guid("my-domain-guid")));
        assert_eq!(
            resolve_domain(&repo, "my-domain.com").await.unwrap(),
            Domain::with_guid("my-domain-guid")
        );
        assert_eq!(repo.requested_names(), vec!["my-domain.com".to_string()]);

        let repo = FakeDomainRepository::returning(Err(ApiError::not_found("Domain", "x.com")));
        assert_eq!(
            resolve_domain(&repo, "x.com").await.unwrap_err(),
            ApiError::not_found("Domain", "x.com")
        );

        let repo = FakeDomainRepository::returning(Err(ApiError::transport("connection refused")));
        assert_eq!(
            resolve_domain(&repo, "x.com").await.unwrap_err(),
            ApiError::transport("connection refused")
        );
    }
}
