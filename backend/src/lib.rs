//! Email open tracking service.
//!
//! Sends emails carrying a per-message tracking pixel, records the first
//! fetch of each pixel and reports the result. The crate follows a hexagonal
//! layout: [`domain`] holds the model, services and ports; [`inbound`] and
//! [`outbound`] hold the adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
