pub mod client;
pub mod http;

use std::sync::Arc;

pub use client::{Vessel, VesselError, VesselFinder, VesselSpec};
pub use http::HttpVesselClient;

/// Shared handle stored in `AppState`.
pub type SharedVesselClient = Arc<dyn VesselFinder>;
