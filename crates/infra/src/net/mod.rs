//! Transport boundary: the gateway contract and its HTTP implementation.

pub mod cloud_controller;
pub mod gateway;

pub use cloud_controller::CloudControllerGateway;
pub use gateway::{ApiRequest, Gateway, Method};
