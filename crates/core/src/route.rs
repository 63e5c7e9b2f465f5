//! The route entity.

use crate::entity::Entity;
use crate::id::Guid;
use crate::model::Domain;

/// A hostname under a domain that applications can be bound to.
///
/// ## Lifecycle
///
/// - **Unpersisted**: built client-side with [`Route::new`]; the GUID is empty.
/// - **Persisted**: decoded from a server response; the GUID is assigned.
///
/// Bound application names are derived from the server's view on every decode.
/// Membership is never tracked locally, so there is no setter for them, and
/// a `Route` cannot be deserialized directly:
///
/// ```compile_fail
/// let _: cfroutes_core::Route = serde_json::from_str(r#"{"app_names": ["x"]}"#).unwrap();
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Route {
    guid: Guid,
    host: String,
    domain: Domain,
    app_names: Vec<String>,
}

impl Route {
    /// A route that has not been created on the server yet.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Rebuild a route from decoded server state.
    pub fn from_parts(guid: Guid, host: impl Into<String>, domain: Domain, app_names: Vec<String>) -> Self {
        Self {
            guid,
            host: host.into(),
            domain,
            app_names,
        }
    }

    /// A persisted route known only by its identity.
    pub fn with_guid(guid: impl Into<Guid>) -> Self {
        Self {
            guid: guid.into(),
            ..Self::default()
        }
    }

    /// Replace the embedded domain copy.
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn app_names(&self) -> &[String] {
        &self.app_names
    }

    /// Fully qualified name, `host.domain`.
    ///
    /// Falls back to whichever half is present when the other is empty.
    pub fn url(&self) -> String {
        match (self.host.is_empty(), self.domain.name.is_empty()) {
            (false, false) => format!("{}.{}", self.host, self.domain.name),
            (true, _) => self.domain.name.clone(),
            (false, true) => self.host.clone(),
        }
    }
}

impl Entity for Route {
    fn guid(&self) -> &Guid {
        &self.guid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_route_is_unpersisted() {
        let route = Route::new("my-cool-app");
        assert_eq!(route.host(), "my-cool-app");
        assert!(!route.is_persisted());
        assert!(route.domain().is_zero());
        assert!(route.app_names().is_empty());
    }

    #[test]
    fn decoded_route_keeps_app_order() {
        let route = Route::from_parts(
            Guid::from("route-2-guid"),
            "route-2-host",
            Domain::new("domain-2-guid", "example.com"),
            vec!["app-2".to_string(), "app-3".to_string()],
        );
        assert!(route.is_persisted());
        assert_eq!(route.app_names(), ["app-2", "app-3"]);
    }

    #[test]
    fn with_domain_overwrites_the_copy() {
        let route = Route::from_parts(
            Guid::from("my-route-guid"),
            "my-cool-app",
            Domain::new("other-guid", "other.com"),
            vec![],
        )
        .with_domain(Domain::with_guid("my-domain-guid"));
        assert_eq!(route.domain(), &Domain::with_guid("my-domain-guid"));
        assert_eq!(route.guid().as_str(), "my-route-guid");
    }

    #[test]
    fn url_joins_host_and_domain() {
        let domain = Domain::new("domain-1-guid", "cfapps.io");
        assert_eq!(Route::new("my-app").with_domain(domain.clone()).url(), "my-app.cfapps.io");
        assert_eq!(Route::new("").with_domain(domain).url(), "cfapps.io");
        assert_eq!(Route::new("my-app").url(), "my-app");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: the URL is `host.domain` when both halves are set and
        /// otherwise exactly the half that is present, never with a stray dot.
        #[test]
        fn url_combines_whichever_halves_are_present(
            host in prop_oneof![Just(String::new()), "[a-z0-9-]{1,12}"],
            domain in prop_oneof![Just(String::new()), "[a-z0-9-]{1,10}\\.[a-z]{2,4}"],
        ) {
            let route = Route::new(host.clone()).with_domain(Domain::new("domain-guid", domain.clone()));
            let url = route.url();

            match (host.is_empty(), domain.is_empty()) {
                (false, false) => prop_assert_eq!(url, format!("{host}.{domain}")),
                (true, _) => prop_assert_eq!(url, domain),
                (false, true) => prop_assert_eq!(url, host),
            }
            prop_assert!(!route.url().starts_with('.'));
            prop_assert!(!route.url().ends_with('.'));
        }
    }
}
