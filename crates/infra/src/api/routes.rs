//! Route repository: typed route operations over the cloud controller API.
//!
//! ## Operations
//!
//! ```text
//! find_all                  GET    /v2/routes?inline-relations-depth=1
//! find_by_host              GET    /v2/routes?q=host%3A<host>
//! find_by_host_and_domain   (resolve domain) then
//!                           GET    /v2/routes?q=host%3A<host>%3Bdomain_guid%3A<guid>
//! create                    POST   /v2/routes  {"host","domain_guid","space_guid"}
//! bind                      PUT    /v2/apps/<app-guid>/routes/<route-guid>
//! unbind                    DELETE /v2/apps/<app-guid>/routes/<route-guid>
//! ```
//!
//! ## Outcomes
//!
//! An empty list is a valid empty result for `find_all` but a
//! `ApiError::NotFound` for the point finders. Gateway and decode failures
//! are returned as-is. Requests are issued one at a time; at most two per
//! operation (`find_by_host_and_domain`).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use cfroutes_core::{ApiError, ApiResult, Application, Domain, Entity, Route};

use super::domains::{DomainRepository, resolve_domain};
use super::filter::{Filter, list_path};
use super::resources::{
    HostEntity, Resource, ScopedRouteEntity, decode_routes, parse_first, parse_single, route_from_resource,
    route_identity_from_resource, scoped_route_from_resource,
};
use crate::config::Configuration;
use crate::net::{ApiRequest, Gateway};

pub const ROUTES_PATH: &str = "/v2/routes";
const INLINE_RELATIONS: &str = "inline-relations-depth=1";

/// Route operations.
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Every route visible to the caller, with domain and bound app names.
    async fn find_all(&self) -> ApiResult<Vec<Route>>;

    /// First route with the given host.
    async fn find_by_host(&self, host: &str) -> ApiResult<Route>;

    /// First route with the given host under the named domain.
    ///
    /// The returned route carries the resolved domain, not one parsed from
    /// the route listing.
    async fn find_by_host_and_domain(&self, host: &str, domain_name: &str) -> ApiResult<Route>;

    /// Create `route` under `domain` in the configured space.
    ///
    /// Only the server-assigned GUID and the echoed host are populated.
    async fn create(&self, route: &Route, domain: &Domain) -> ApiResult<Route>;

    /// Associate `app` with `route`.
    async fn bind(&self, route: &Route, app: &Application) -> ApiResult<()>;

    /// Remove the association between `app` and `route`.
    async fn unbind(&self, route: &Route, app: &Application) -> ApiResult<()>;
}

#[async_trait]
impl<R> RouteRepository for Arc<R>
where
    R: RouteRepository + ?Sized,
{
    async fn find_all(&self) -> ApiResult<Vec<Route>> {
        (**self).find_all().await
    }

    async fn find_by_host(&self, host: &str) -> ApiResult<Route> {
        (**self).find_by_host(host).await
    }

    async fn find_by_host_and_domain(&self, host: &str, domain_name: &str) -> ApiResult<Route> {
        (**self).find_by_host_and_domain(host, domain_name).await
    }

    async fn create(&self, route: &Route, domain: &Domain) -> ApiResult<Route> {
        (**self).create(route, domain).await
    }

    async fn bind(&self, route: &Route, app: &Application) -> ApiResult<()> {
        (**self).bind(route, app).await
    }

    async fn unbind(&self, route: &Route, app: &Application) -> ApiResult<()> {
        (**self).unbind(route, app).await
    }
}

/// Body of a route creation request. Field order is the wire order.
#[derive(Debug, Serialize)]
struct CreateRouteRequest<'a> {
    host: &'a str,
    domain_guid: &'a str,
    space_guid: &'a str,
}

/// Route repository bound to one configuration, gateway and domain lookup.
///
/// ## Generic Parameters
///
/// - `G`: gateway performing the HTTP exchange
/// - `D`: domain repository used to resolve names for
///   [`find_by_host_and_domain`](RouteRepository::find_by_host_and_domain)
#[derive(Debug, Clone)]
pub struct CloudControllerRouteRepository<G, D> {
    config: Arc<Configuration>,
    gateway: G,
    domains: D,
}

impl<G, D> CloudControllerRouteRepository<G, D>
where
    G: Gateway,
    D: DomainRepository,
{
    pub fn new(config: Arc<Configuration>, gateway: G, domains: D) -> Self {
        Self {
            config,
            gateway,
            domains,
        }
    }

    /// First route matching `filter`, built from its envelope by `build`, or
    /// `NotFound` naming `key`. Later envelopes are never decoded.
    async fn find_first<E, F>(&self, filter: Filter, key: &str, build: F) -> ApiResult<Route>
    where
        E: DeserializeOwned + Send,
        F: FnOnce(&Resource<E>) -> ApiResult<Route> + Send,
    {
        let path = list_path(ROUTES_PATH, Some(&filter));
        let body = self.gateway.execute(ApiRequest::get(path)).await?;

        match parse_first::<E>(&body)? {
            Some(resource) => build(&resource),
            None => {
                debug!(filter = %filter, "no matching route");
                Err(ApiError::not_found("Route", key))
            }
        }
    }
}

/// `/v2/apps/<app-guid>/routes/<route-guid>`.
///
/// Both sides must already exist on the server.
pub fn association_path(route: &Route, app: &Application) -> ApiResult<String> {
    if !app.is_persisted() {
        return Err(ApiError::encode("application has no guid"));
    }
    if !route.is_persisted() {
        return Err(ApiError::encode("route has no guid"));
    }
    Ok(format!("/v2/apps/{}/routes/{}", app.guid(), route.guid()))
}

#[async_trait]
impl<G, D> RouteRepository for CloudControllerRouteRepository<G, D>
where
    G: Gateway,
    D: DomainRepository,
{
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> ApiResult<Vec<Route>> {
        let path = format!("{ROUTES_PATH}?{INLINE_RELATIONS}");
        let body = self.gateway.execute(ApiRequest::get(path)).await?;
        let routes = decode_routes(&body)?;
        debug!(count = routes.len(), "listed routes");
        Ok(routes)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_host(&self, host: &str) -> ApiResult<Route> {
        self.find_first(Filter::by("host", host), host, route_from_resource).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_host_and_domain(&self, host: &str, domain_name: &str) -> ApiResult<Route> {
        // A failed lookup ends the operation before any route request.
        let domain = resolve_domain(&self.domains, domain_name).await?;

        let filter = Filter::by("host", host).and("domain_guid", domain.guid.as_str());
        let key = format!("{host}.{domain_name}");
        self.find_first(filter, &key, |resource: &Resource<ScopedRouteEntity>| {
            scoped_route_from_resource(resource, domain)
        })
        .await
    }

    #[tracing::instrument(skip(self, route, domain), fields(host = %route.host(), domain_guid = %domain.guid))]
    async fn create(&self, route: &Route, domain: &Domain) -> ApiResult<Route> {
        let request = CreateRouteRequest {
            host: route.host(),
            domain_guid: domain.guid.as_str(),
            space_guid: self.config.space.guid.as_str(),
        };
        let body = serde_json::to_string(&request).map_err(|e| ApiError::encode(e.to_string()))?;

        let response = self.gateway.execute(ApiRequest::post(ROUTES_PATH, body)).await?;

        // Domain and apps are already known to the caller.
        let created = route_identity_from_resource(&parse_single::<HostEntity>(&response)?)?;

        info!(guid = %created.guid(), host = created.host(), "created route");
        Ok(created)
    }

    #[tracing::instrument(skip(self, route, app), fields(route_guid = %route.guid(), app_guid = %app.guid))]
    async fn bind(&self, route: &Route, app: &Application) -> ApiResult<()> {
        let path = association_path(route, app)?;
        self.gateway.execute(ApiRequest::put(path)).await?;
        info!("bound route to app");
        Ok(())
    }

    #[tracing::instrument(skip(self, route, app), fields(route_guid = %route.guid(), app_guid = %app.guid))]
    async fn unbind(&self, route: &Route, app: &Application) -> ApiResult<()> {
        let path = association_path(route, app)?;
        self.gateway.execute(ApiRequest::delete(path)).await?;
        info!("unbound route from app");
        Ok(())
    }
}
