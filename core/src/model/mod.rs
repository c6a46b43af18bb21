pub mod config;
pub mod point;

pub use config::{
    ConfigData, FusedTarget, GlobalConfig, GlobalPatch, LayoutPatch, MapGroupConfig, RadarConfig,
    RadarLayout, Zone, ZoneKind, ZonePoint, ZoneSet, DEFAULT_MAP_GROUP,
};
pub use point::{ProjectedPoint, RawPoint, Reading, ReadingSource, Unit};
