//! Status reporting orchestration.

pub mod service;

pub use service::{ServiceError, StatusService};
