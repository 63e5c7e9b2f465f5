//! Infrastructure layer: configuration, HTTP gateway and the resource
//! repositories built on top of it.

pub mod api;
pub mod config;
pub mod net;

#[cfg(test)]
mod testing;

pub use api::{
    CloudControllerDomainRepository, CloudControllerRouteRepository, DomainRepository, RouteRepository,
};
pub use config::Configuration;
pub use net::{CloudControllerGateway, Gateway};
