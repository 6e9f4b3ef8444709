//! HTTP probing: target construction, the GET itself, and outcome
//! classification.

pub mod classify;
pub mod prober;
pub mod target;

pub use classify::classify;
pub use prober::Prober;
pub use target::{build_targets, ProbeTarget};
