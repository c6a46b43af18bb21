use crate::{FusionError, FusionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DATA_VERSION: u32 = 1;
pub const DEFAULT_MAP_GROUP: &str = "default";
pub const MIN_UPDATE_INTERVAL: f64 = 0.1;

/// Canonical 2D polygon vertex. External blobs may supply vertices either as
/// `[x, y]` pairs or as labeled `{"x": .., "y": ..}` records; both are parsed
/// into this single shape at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ZonePointRepr")]
pub struct ZonePoint {
    pub x: f64,
    pub y: f64,
}

impl ZonePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ZonePointRepr {
    Pair([f64; 2]),
    Labeled { x: f64, y: f64 },
}

impl From<ZonePointRepr> for ZonePoint {
    fn from(repr: ZonePointRepr) -> Self {
        match repr {
            ZonePointRepr::Pair([x, y]) => ZonePoint { x, y },
            ZonePointRepr::Labeled { x, y } => ZonePoint { x, y },
        }
    }
}

/// Named polygon with an occupancy hold delay in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default = "default_zone_name")]
    pub name: String,
    #[serde(default)]
    pub points: Vec<ZonePoint>,
    #[serde(default)]
    pub delay: f64,
}

fn default_zone_name() -> String {
    "zone".to_string()
}

impl Zone {
    /// Polygons need at least three vertices to bound any area.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }
}

/// Where a zone collection lives in the configuration tree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Include,
    Exclude,
    Monitor,
}

/// Mounting transform embedding a radar's local frame into map space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarLayout {
    pub origin_x: f64,
    pub origin_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub mirror_x: bool,
    pub enable_3d: bool,
    pub ceiling_mount: bool,
    pub mount_height: f64,
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            origin_y: 50.0,
            scale_x: 5.0,
            scale_y: 5.0,
            rotation: 0.0,
            mirror_x: false,
            enable_3d: false,
            ceiling_mount: false,
            mount_height: 2.5,
        }
    }
}

/// Partial layout update; unset fields leave the current value intact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPatch {
    pub origin_x: Option<f64>,
    pub origin_y: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub rotation: Option<f64>,
    pub mirror_x: Option<bool>,
    pub enable_3d: Option<bool>,
    pub ceiling_mount: Option<bool>,
    pub mount_height: Option<f64>,
}

impl RadarLayout {
    pub fn apply(&mut self, patch: &LayoutPatch) {
        if let Some(v) = patch.origin_x {
            self.origin_x = v;
        }
        if let Some(v) = patch.origin_y {
            self.origin_y = v;
        }
        if let Some(v) = patch.scale_x {
            self.scale_x = v;
        }
        if let Some(v) = patch.scale_y {
            self.scale_y = v;
        }
        if let Some(v) = patch.rotation {
            self.rotation = v;
        }
        if let Some(v) = patch.mirror_x {
            self.mirror_x = v;
        }
        if let Some(v) = patch.enable_3d {
            self.enable_3d = v;
        }
        if let Some(v) = patch.ceiling_mount {
            self.ceiling_mount = v;
        }
        if let Some(v) = patch.mount_height {
            self.mount_height = v;
        }
    }
}

/// Process-wide fusion knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub update_interval: f64,
    pub merge_distance: f64,
    pub target_height: f64,
    pub fused_color: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            update_interval: 0.1,
            merge_distance: 0.8,
            target_height: 1.5,
            fused_color: "#FFD700".to_string(),
        }
    }
}

impl GlobalConfig {
    /// Scheduling interval with the 100ms floor applied.
    pub fn effective_interval(&self) -> f64 {
        self.update_interval.max(MIN_UPDATE_INTERVAL)
    }
}

/// Partial global-config update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalPatch {
    pub update_interval: Option<f64>,
    pub merge_distance: Option<f64>,
    pub target_height: Option<f64>,
    pub fused_color: Option<String>,
}

impl GlobalConfig {
    pub fn apply(&mut self, patch: &GlobalPatch) {
        if let Some(v) = patch.update_interval {
            self.update_interval = v;
        }
        if let Some(v) = patch.merge_distance {
            self.merge_distance = v;
        }
        if let Some(v) = patch.target_height {
            self.target_height = v;
        }
        if let Some(v) = &patch.fused_color {
            self.fused_color = v.clone();
        }
    }
}

/// Clustered detection fused from one or more radars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FusedTarget {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub count: usize,
    /// Contributing "radar:slot" tags in absorption order.
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSet {
    pub include_zones: Vec<Zone>,
    pub exclude_zones: Vec<Zone>,
}

/// A named logical floor/area: its zones plus the last fused-target list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapGroupConfig {
    pub zones: ZoneSet,
    pub targets: Vec<FusedTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub map_group: String,
    pub layout: RadarLayout,
    pub monitor_zones: Vec<Zone>,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            map_group: DEFAULT_MAP_GROUP.to_string(),
            layout: RadarLayout::default(),
            monitor_zones: Vec::new(),
        }
    }
}

/// Persisted configuration root consumed by every tick.
///
/// Collections are BTreeMaps so radar iteration order, and therefore
/// clustering input order, is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigData {
    pub version: u32,
    pub global_config: GlobalConfig,
    pub maps: BTreeMap<String, MapGroupConfig>,
    pub radars: BTreeMap<String, RadarConfig>,
}

impl Default for ConfigData {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigData {
    /// Fresh configuration with the seeded `default` map group.
    pub fn empty() -> Self {
        let mut maps = BTreeMap::new();
        maps.insert(DEFAULT_MAP_GROUP.to_string(), MapGroupConfig::default());
        Self {
            version: DATA_VERSION,
            global_config: GlobalConfig::default(),
            maps,
            radars: BTreeMap::new(),
        }
    }

    /// Backfills sections that older persisted blobs may lack.
    pub fn normalize(&mut self) {
        if !self.maps.contains_key(DEFAULT_MAP_GROUP) {
            self.maps
                .insert(DEFAULT_MAP_GROUP.to_string(), MapGroupConfig::default());
        }
        if self.version == 0 {
            self.version = DATA_VERSION;
        }
    }

    /// Parses a full configuration blob. Blobs missing the required
    /// top-level `radars` or `maps` sections are rejected outright, with no
    /// partial application.
    pub fn from_json(raw: &str) -> FusionResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        for section in ["radars", "maps"] {
            if value.get(section).is_none() {
                return Err(FusionError::MissingSection(section));
            }
        }
        let mut data: ConfigData = serde_json::from_value(value)?;
        data.normalize();
        Ok(data)
    }

    /// Two-phase map-group lookup: exact key, then case-insensitive.
    pub fn map_group(&self, name: &str) -> Option<&MapGroupConfig> {
        if let Some(group) = self.maps.get(name) {
            return Some(group);
        }
        self.maps
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, group)| group)
    }

    /// Two-phase radar lookup: exact key, then case-insensitive.
    pub fn radar(&self, name: &str) -> Option<&RadarConfig> {
        if let Some(radar) = self.radars.get(name) {
            return Some(radar);
        }
        self.radars
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, radar)| radar)
    }
}
