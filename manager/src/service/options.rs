use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Host runtime options, separate from the persisted radar configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeOptions {
    pub store_path: PathBuf,
    pub bind: SocketAddr,
    pub seed: u64,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("radar_map.json"),
            bind: SocketAddr::from(([127, 0, 0, 1], 8020)),
            seed: 0,
        }
    }
}

impl RuntimeOptions {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading runtime options {}", path_ref.display()))?;
        let options: RuntimeOptions = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing runtime options {}", path_ref.display()))?;
        Ok(options)
    }

    pub fn from_args(store_path: PathBuf, bind: SocketAddr, seed: u64) -> Self {
        Self {
            store_path,
            bind,
            seed,
        }
    }
}
