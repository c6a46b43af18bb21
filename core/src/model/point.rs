use serde::{Deserialize, Serialize};

/// Length unit attached to a raw radar reading.
///
/// Unknown tags are a distinguishable state rather than a silent fallback;
/// conversion treats them as already-millimeter values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Unit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(other)]
    Unknown,
}

impl Unit {
    /// Converts a scalar in this unit into millimeters.
    pub fn to_millimeters(self, value: f64) -> f64 {
        match self {
            Unit::Meters => value * 1000.0,
            Unit::Centimeters => value * 10.0,
            Unit::Millimeters | Unit::Unknown => value,
        }
    }
}

/// A single scalar reading paired with its reported unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub unit: Unit,
}

impl Reading {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn millimeters(&self) -> f64 {
        self.unit.to_millimeters(self.value)
    }
}

/// Normalized detection in the radar's local frame, millimeters.
#[derive(Debug, Clone)]
pub struct RawPoint {
    pub x_mm: f64,
    pub y_mm: f64,
    pub z_mm: f64,
    /// Detection slot index, 1..=3.
    pub slot: u8,
    /// True when only a scalar range was available (forward-only assumption).
    pub is_1d: bool,
}

/// Detection projected into map space, with provenance for clustering.
#[derive(Debug, Clone)]
pub struct ProjectedPoint {
    pub left: f64,
    pub top: f64,
    pub radar: String,
    pub slot: u8,
    pub is_1d: bool,
    /// Map-space origin of the owning radar; set only for 1D detections,
    /// which resolve range but not bearing.
    pub radar_origin: Option<(f64, f64)>,
}

/// External collaborator supplying live per-radar readings.
pub trait ReadingSource {
    /// Paired x/y readings for a detection slot, when both are available.
    fn slot_pair(&self, radar: &str, slot: u8) -> Option<(Reading, Reading)>;

    /// Single range reading used as the slot-1 fallback.
    fn range(&self, radar: &str) -> Option<Reading>;
}
