//! Cloud controller resource repositories.

pub mod domains;
pub mod filter;
pub mod resources;
pub mod routes;

pub use domains::{CloudControllerDomainRepository, DomainRepository, resolve_domain};
pub use filter::Filter;
pub use routes::{CloudControllerRouteRepository, RouteRepository};
