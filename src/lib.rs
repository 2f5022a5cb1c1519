//! Cupcake ordering: an order model that prices itself and checks its
//! delivery details, and a checkout that submits it to an order endpoint.

pub mod app_config;
pub mod domain;
pub mod metrics;
pub mod server;
pub mod submission;
pub mod telemetry;
