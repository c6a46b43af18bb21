use anyhow::Context;
use fusioncore::prelude::{
    ConfigData, GlobalPatch, LayoutPatch, MapGroupConfig, RadarConfig, Zone, ZoneKind,
};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON-file-backed configuration store.
///
/// Every mutation persists before returning, so a tick that runs afterward
/// always observes a complete update, never a partial one.
pub struct ConfigStore {
    path: PathBuf,
    pub data: ConfigData,
}

impl ConfigStore {
    /// Opens the store, falling back to fresh seeded data when the file is
    /// missing or unreadable.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<ConfigData>(&raw) {
                Ok(mut data) => {
                    data.normalize();
                    info!("config store loaded (v{})", data.version);
                    data
                }
                Err(err) => {
                    warn!("config store {} unreadable ({}), resetting", path.display(), err);
                    ConfigData::empty()
                }
            },
            Err(_) => {
                info!("initializing fresh config store at {}", path.display());
                ConfigData::empty()
            }
        };

        let store = Self { path, data };
        store.save()?;
        Ok(store)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing config store {}", self.path.display()))
    }

    /// Registers a radar with the default layout; no-op when it exists.
    /// Creates the owning map group on demand.
    pub fn add_radar(&mut self, name: &str, map_group: &str) -> anyhow::Result<()> {
        if self.data.radars.contains_key(name) {
            return Ok(());
        }
        self.data.radars.insert(
            name.to_string(),
            RadarConfig {
                map_group: map_group.to_string(),
                ..Default::default()
            },
        );
        self.ensure_map_group(map_group);
        self.save()
    }

    pub fn remove_radar(&mut self, name: &str) -> anyhow::Result<()> {
        if self.data.radars.remove(name).is_some() {
            self.save()?;
        }
        Ok(())
    }

    /// Replaces a zone collection. Monitor zones are radar-scoped;
    /// include/exclude zones belong to a map group.
    pub fn update_zones(
        &mut self,
        radar: Option<&str>,
        kind: ZoneKind,
        zones: Vec<Zone>,
        map_group: Option<&str>,
    ) -> anyhow::Result<()> {
        match kind {
            ZoneKind::Monitor => {
                let name = radar.context("monitor zones need a radar name")?;
                let config = self
                    .data
                    .radars
                    .get_mut(name)
                    .with_context(|| format!("unknown radar {}", name))?;
                config.monitor_zones = zones;
            }
            ZoneKind::Include | ZoneKind::Exclude => {
                let group = map_group.unwrap_or(fusioncore::model::DEFAULT_MAP_GROUP);
                let map = self.data.maps.entry(group.to_string()).or_default();
                if kind == ZoneKind::Include {
                    map.zones.include_zones = zones;
                } else {
                    map.zones.exclude_zones = zones;
                }
            }
        }
        self.save()
    }

    /// Field-merges a layout patch and optionally reassigns the map group.
    pub fn update_layout(
        &mut self,
        radar: &str,
        patch: &LayoutPatch,
        map_group: Option<&str>,
    ) -> anyhow::Result<()> {
        let config = self
            .data
            .radars
            .get_mut(radar)
            .with_context(|| format!("unknown radar {}", radar))?;
        config.layout.apply(patch);
        if let Some(group) = map_group {
            config.map_group = group.to_string();
            self.ensure_map_group(group);
        }
        self.save()
    }

    pub fn update_global(&mut self, patch: &GlobalPatch) -> anyhow::Result<()> {
        self.data.global_config.apply(patch);
        self.save()
    }

    /// Replaces the whole store with an imported blob. Rejected blobs leave
    /// the current data untouched.
    pub fn import(&mut self, raw: &str) -> anyhow::Result<()> {
        let data = ConfigData::from_json(raw).context("importing config blob")?;
        self.data = data;
        self.save()
    }

    fn ensure_map_group(&mut self, name: &str) {
        if !self.data.maps.contains_key(name) {
            self.data
                .maps
                .insert(name.to_string(), MapGroupConfig::default());
        }
    }
}
