pub use crate::engine::{FusionEngine, MapState, TickResult, ZoneStatus};
pub use crate::model::{
    ConfigData, FusedTarget, GlobalConfig, GlobalPatch, LayoutPatch, MapGroupConfig,
    ProjectedPoint, RadarConfig, RadarLayout, RawPoint, Reading, ReadingSource, Unit, Zone,
    ZoneKind, ZonePoint,
};
pub use crate::publish::StatePublisher;
pub use crate::{FusionError, FusionResult};
