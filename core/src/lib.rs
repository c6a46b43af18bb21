//! Fusion and zone-occupancy core for the Rust radar map platform.
//!
//! The pipeline turns noisy per-radar readings into map-relative fused
//! targets: normalize (1D/2D, units), project through the mounting layout,
//! filter by exclusion/monitor polygons, cluster across radars, and evaluate
//! per-zone occupancy with hold-open hysteresis. All geometry is pure and
//! synchronous; a tick never fails, it degrades to "no detection".

pub mod engine;
pub mod geometry;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod publish;
pub mod telemetry;

pub use engine::{FusionEngine, MapState, TickResult, ZoneStatus};
pub use publish::StatePublisher;

/// Error type for configuration ingestion. Tick execution never errors.
#[derive(thiserror::Error, Debug)]
pub enum FusionError {
    #[error("config rejected: missing `{0}` section")]
    MissingSection(&'static str),
    #[error("config rejected: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type FusionResult<T> = Result<T, FusionError>;
