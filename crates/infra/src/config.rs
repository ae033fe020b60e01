//! Configuration loading and representation.
//!
//! Resolution order, later sources winning:
//!
//! 1. built-in defaults (`Topology::default()`, warehouse name `main`)
//! 2. a JSON file named by `DEPOT_CONFIG` (every field optional)
//! 3. per-field environment overrides (`DEPOT_NAME`, `DEPOT_ZONES`, ...)
//!
//! The resulting topology is validated before it is handed out.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use depot_core::DomainError;
use depot_inventory::{Topology, Warehouse, WarehouseId};

pub const CONFIG_FILE_VAR: &str = "DEPOT_CONFIG";
pub const NAME_VAR: &str = "DEPOT_NAME";
pub const ZONES_VAR: &str = "DEPOT_ZONES";
pub const RACKS_VAR: &str = "DEPOT_RACKS_PER_ZONE";
pub const SECTIONS_VAR: &str = "DEPOT_SECTIONS_PER_RACK";
pub const SHELVES_VAR: &str = "DEPOT_SHELVES_PER_SECTION";
pub const CAPACITY_VAR: &str = "DEPOT_CELL_CAPACITY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },

    #[error("invalid topology: {0}")]
    Topology(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepotConfig {
    pub name: String,
    pub topology: Topology,
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
            topology: Topology::default(),
        }
    }
}

impl DepotConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(CONFIG_FILE_VAR) {
            Some(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };

        if let Some(name) = lookup(NAME_VAR) {
            config.name = name;
        }
        if let Some(raw) = lookup(ZONES_VAR) {
            config.topology.zones = parse_zones(&raw)?;
        }
        if let Some(raw) = lookup(RACKS_VAR) {
            config.topology.racks_per_zone = parse_var(RACKS_VAR, &raw)?;
        }
        if let Some(raw) = lookup(SECTIONS_VAR) {
            config.topology.sections_per_rack = parse_var(SECTIONS_VAR, &raw)?;
        }
        if let Some(raw) = lookup(SHELVES_VAR) {
            config.topology.shelves_per_section = parse_var(SHELVES_VAR, &raw)?;
        }
        if let Some(raw) = lookup(CAPACITY_VAR) {
            config.topology.cell_capacity = parse_var(CAPACITY_VAR, &raw)?;
        }

        config.topology.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. The topology is not validated here.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Materialize the (empty) warehouse this configuration describes.
    pub fn build_warehouse(&self) -> Result<Warehouse, ConfigError> {
        Ok(Warehouse::with_topology(
            WarehouseId::new(self.name.clone()),
            self.topology.clone(),
        )?)
    }
}

/// `ABCD`, `A,B,C,D` and `A B C D` all name the same four zones.
fn parse_zones(raw: &str) -> Result<Vec<char>, ConfigError> {
    let zones: Vec<char> = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if zones.is_empty() {
        return Err(ConfigError::InvalidVar {
            var: ZONES_VAR,
            value: raw.to_string(),
        });
    }
    Ok(zones)
}

fn parse_var<T: FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
        var,
        value: raw.to_string(),
    })
}
