//! Boundary to the monitoring engine.
//!
//! Everything the gateway needs from the engine goes through [`KumaApi`]. The
//! cells hold an `Arc<dyn KumaApi>` and never see the transport; failures come
//! back as [`KumaError`] and are turned into gateway errors by [`translate`].

pub mod api;
pub mod bulk;
pub mod client;
pub mod error;
pub mod translate;

pub use api::{KumaApi, UptimeWindows};
#[cfg(feature = "mock")]
pub use api::MockKumaApi;
pub use bulk::BulkReading;
pub use client::KumaClient;
pub use error::{KumaError, KumaResult};
pub use translate::{translate, translate_delete, Target};
