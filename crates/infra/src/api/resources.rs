//! Resource envelope decoding.
//!
//! Every resource arrives as `{"metadata": {"guid": ...}, "entity": {...}}`;
//! lists wrap envelopes under `resources`. Relations inlined by the server
//! (a route's domain, its apps) are full envelopes themselves and are
//! unwrapped one level at a time by the extraction functions below.
//!
//! Decoding is structural: unknown fields are ignored and absent or `null`
//! entity fields fall back to their zero value. The only hard requirement is
//! a non-empty `metadata.guid` on every envelope that is actually used.
//! Operations that discard a relation decode through an entity type that
//! does not read it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use cfroutes_core::{ApiError, ApiResult, Domain, Guid, Route};

/// `null` reads as the field's zero value, same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub guid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource<E> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(default = "Option::default")]
    pub entity: Option<E>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de>"))]
pub struct PaginatedResources<E> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub resources: Vec<Resource<E>>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RouteEntity {
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    pub domain: Option<Resource<DomainEntity>>,
    pub apps: Option<Vec<Resource<ApplicationEntity>>>,
}

/// Route fields read when the domain is already known to the caller.
///
/// The inlined `domain` is skipped entirely, whatever its shape.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ScopedRouteEntity {
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    pub apps: Option<Vec<Resource<ApplicationEntity>>>,
}

/// Only the echoed host; relations are not read.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct HostEntity {
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DomainEntity {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ApplicationEntity {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// List body whose envelopes stay raw until one is picked.
#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default, deserialize_with = "null_as_default")]
    resources: Vec<serde_json::Value>,
}

impl<E> Resource<E> {
    /// The envelope's identity; an empty or missing GUID is a protocol error.
    pub fn guid(&self) -> ApiResult<Guid> {
        if self.metadata.guid.is_empty() {
            return Err(ApiError::decode("resource metadata has an empty guid"));
        }
        Ok(Guid::new(self.metadata.guid.clone()))
    }
}

impl<E: Default + Clone> Resource<E> {
    fn entity_or_default(&self) -> E {
        self.entity.clone().unwrap_or_default()
    }
}

/// Domain from a domain envelope.
pub fn domain_from_resource(resource: &Resource<DomainEntity>) -> ApiResult<Domain> {
    let entity = resource.entity_or_default();
    Ok(Domain::new(resource.guid()?, entity.name))
}

/// Names of the bound apps, in server order.
pub fn app_names_from_resources(resources: &[Resource<ApplicationEntity>]) -> ApiResult<Vec<String>> {
    resources
        .iter()
        .map(|app| -> ApiResult<String> {
            app.guid()?;
            Ok(app.entity_or_default().name)
        })
        .collect()
}

fn app_names_or_empty(apps: Option<&[Resource<ApplicationEntity>]>) -> ApiResult<Vec<String>> {
    match apps {
        Some(apps) => app_names_from_resources(apps),
        None => Ok(Vec::new()),
    }
}

/// Route from a route envelope, with its inlined domain and apps.
///
/// A missing `domain` yields the zero-value domain; a missing `apps` array
/// yields no app names.
pub fn route_from_resource(resource: &Resource<RouteEntity>) -> ApiResult<Route> {
    let guid = resource.guid()?;
    let entity = resource.entity_or_default();

    let domain = match &entity.domain {
        Some(domain) => domain_from_resource(domain)?,
        None => Domain::default(),
    };
    let app_names = app_names_or_empty(entity.apps.as_deref())?;

    Ok(Route::from_parts(guid, entity.host, domain, app_names))
}

/// Route listed under a domain the caller already holds; `domain` is
/// embedded as given.
pub fn scoped_route_from_resource(resource: &Resource<ScopedRouteEntity>, domain: Domain) -> ApiResult<Route> {
    let guid = resource.guid()?;
    let entity = resource.entity_or_default();
    let app_names = app_names_or_empty(entity.apps.as_deref())?;

    Ok(Route::from_parts(guid, entity.host, domain, app_names))
}

/// Route identity and host only, with zero-value domain and no apps.
pub fn route_identity_from_resource(resource: &Resource<HostEntity>) -> ApiResult<Route> {
    let guid = resource.guid()?;
    let host = resource.entity_or_default().host;
    Ok(Route::from_parts(guid, host, Domain::default(), Vec::new()))
}

/// Parse a list body into typed envelopes.
pub fn parse_list<E: DeserializeOwned>(body: &str) -> ApiResult<Vec<Resource<E>>> {
    let page: PaginatedResources<E> = serde_json::from_str(body)?;
    Ok(page.resources)
}

/// First envelope of a list body, typed; the others are only checked to be JSON.
pub fn parse_first<E: DeserializeOwned>(body: &str) -> ApiResult<Option<Resource<E>>> {
    let page: RawPage = serde_json::from_str(body)?;
    match page.resources.into_iter().next() {
        Some(raw) => Ok(Some(serde_json::from_value(raw)?)),
        None => Ok(None),
    }
}

/// Parse a single-resource body.
pub fn parse_single<E: DeserializeOwned>(body: &str) -> ApiResult<Resource<E>> {
    Ok(serde_json::from_str(body)?)
}

/// All routes in a list body, in server order. An empty list is not an error.
pub fn decode_routes(body: &str) -> ApiResult<Vec<Route>> {
    parse_list::<RouteEntity>(body)?
        .iter()
        .map(route_from_resource)
        .collect()
}

/// Route from a single-resource body (detail responses).
pub fn decode_route(body: &str) -> ApiResult<Route> {
    route_from_resource(&parse_single::<RouteEntity>(body)?)
}

/// All domains in a list body, in server order.
pub fn decode_domains(body: &str) -> ApiResult<Vec<Domain>> {
    parse_list::<DomainEntity>(body)?
        .iter()
        .map(domain_from_resource)
        .collect()
}
