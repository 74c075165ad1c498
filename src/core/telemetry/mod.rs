// Core telemetry module - engagement events and the sink port.

pub mod telemetry_models;
pub mod telemetry_service;

pub use telemetry_models::*;
pub use telemetry_service::*;
