//! Elective course enrollment backend.
//!
//! Students pick one course from each elective pair of their curriculum;
//! direction staff open or close enrollment and adjust assignments by hand.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
