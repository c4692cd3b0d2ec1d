//! Infrastructure layer - Model artifacts, training, and external integrations

pub mod artifacts;
pub mod client;
pub mod forest;
pub mod logging;
pub mod observability;
pub mod training;
