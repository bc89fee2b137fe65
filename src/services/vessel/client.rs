//! Vessel service interface used by the consignment handlers.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the consignment needs from a vessel.
#[derive(Debug, Clone, Serialize)]
pub struct VesselSpec {
    /// Number of containers the vessel must take.
    pub capacity: i32,
    /// Total consignment weight.
    pub max_weight: i32,
}

/// A vessel chosen by the vessel service.
#[derive(Debug, Clone, Deserialize)]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub capacity: i32,
    pub max_weight: i32,
}

#[derive(Debug, Error)]
pub enum VesselError {
    #[error("no vessel available for the requested capacity and weight")]
    NoneAvailable,
    #[error("vessel service error (status {status}): {detail}")]
    Upstream { status: u16, detail: String },
    #[error("vessel service returned an invalid response: {0}")]
    InvalidResponse(String),
    #[error("vessel service unreachable: {0}")]
    Transport(String),
}

/// Downstream dependency client handle. Constructed once at composition
/// time and shared read-only by every call.
#[async_trait]
pub trait VesselFinder: Send + Sync + 'static {
    // Ask the vessel service for a vessel that can take the consignment.
    async fn find_available(&self, spec: &VesselSpec) -> Result<Vessel, VesselError>;
}
