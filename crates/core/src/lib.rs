//! `cfroutes-core`: domain model for the route repository.
//!
//! This crate contains **pure domain** types (no IO). Values are built fresh on
//! every decode; nothing here caches or tracks server-side membership.

pub mod entity;
pub mod error;
pub mod id;
pub mod model;
pub mod route;

pub use entity::Entity;
pub use error::{ApiError, ApiResult};
pub use id::Guid;
pub use model::{Application, Domain, Space};
pub use route::Route;
