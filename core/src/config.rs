//! Run configuration, loaded from one JSON file.
//!
//! ```json
//! {
//!   "sqlite":     { "db_path": "feed.db" },
//!   "remote":     { "kind": "jsonl", "dir": "sheets" },
//!   "worksheets": { "product": "Product_Master", "sales": "Sales_Data" },
//!   "csv_paths":  { "product": "data/products.csv" },
//!   "buffer_size": 5
//! }
//! ```
//!
//! Everything except `sqlite` and `worksheets` has a default.
//! In tests, use `SimConfig::default_test()`.

use crate::{
    domain::{EducationParams, ManufacturingParams, RetailParams},
    error::{SimError, SimResult},
    pool::DEFAULT_NOVELTY_PROBABILITY,
    writer::DEFAULT_FLUSH_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteConfig {
    pub db_path: String,
}

/// Which remote sink backs the worksheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemoteConfig {
    /// One `<worksheet>.jsonl` file per stream under `dir`.
    Jsonl { dir: String },
    /// Keep everything in process; nothing survives the run.
    Memory,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::Jsonl {
            dir: "sheets".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub sqlite: SqliteConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    /// Stream key (`product`, `sales`, ...) → worksheet name.
    pub worksheets: HashMap<String, String>,
    /// Stream key → seed CSV path.
    #[serde(default)]
    pub csv_paths: HashMap<String, String>,
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(default = "default_novelty")]
    pub novelty_probability: f64,
    #[serde(default = "default_tick_delay_ms")]
    pub tick_delay_ms: u64,
    /// Master seed; a random one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub retail: RetailParams,
    #[serde(default)]
    pub manufacturing: ManufacturingParams,
    #[serde(default)]
    pub education: EducationParams,
}

fn default_buffer_size() -> usize {
    DEFAULT_FLUSH_THRESHOLD
}

fn default_novelty() -> f64 {
    DEFAULT_NOVELTY_PROBABILITY
}

fn default_tick_delay_ms() -> u64 {
    500
}

impl SimConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        if !(0.0..=1.0).contains(&config.novelty_probability) {
            anyhow::bail!(
                "novelty_probability must be within [0, 1], got {}",
                config.novelty_probability
            );
        }
        Ok(config)
    }

    /// Worksheet name for a stream key.
    pub fn worksheet(&self, stream: &'static str) -> SimResult<&str> {
        self.worksheets
            .get(stream)
            .map(String::as_str)
            .ok_or(SimError::MissingWorksheet { stream })
    }

    pub fn csv_path(&self, stream: &str) -> Option<&str> {
        self.csv_paths.get(stream).map(String::as_str)
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }

    /// The configured seed, or a fresh random one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// In-memory store, memory sink, every stream mapped to a worksheet of
    /// the same name, no seed files, no delay, fixed seed.
    pub fn default_test() -> Self {
        let worksheets = [
            "product", "store", "sales", "inventory",
            "equipment", "technician", "downtime", "maintenance",
            "student", "module", "progress", "resource",
        ]
        .into_iter()
        .map(|s| (s.to_string(), s.to_string()))
        .collect();

        Self {
            sqlite: SqliteConfig {
                db_path: ":memory:".into(),
            },
            remote: RemoteConfig::Memory,
            worksheets,
            csv_paths: HashMap::new(),
            buffer_size: DEFAULT_FLUSH_THRESHOLD,
            novelty_probability: DEFAULT_NOVELTY_PROBABILITY,
            tick_delay_ms: 0,
            seed: Some(42),
            retail: RetailParams::default(),
            manufacturing: ManufacturingParams::default(),
            education: EducationParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_file_gets_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "sqlite": {{ "db_path": "feed.db" }},
                "worksheets": {{ "product": "Product_Master" }}
            }}"#
        )
        .unwrap();

        let config = SimConfig::load(file.path()).unwrap();
        assert_eq!(config.buffer_size, 5);
        assert_eq!(config.novelty_probability, 0.30);
        assert_eq!(config.tick_delay_ms, 500);
        assert_eq!(config.remote, RemoteConfig::default());
        assert_eq!(config.worksheet("product").unwrap(), "Product_Master");
        assert!(matches!(
            config.worksheet("store"),
            Err(SimError::MissingWorksheet { stream: "store" })
        ));
        assert_eq!(config.retail, RetailParams::default());
    }

    #[test]
    fn vocabulary_overrides_merge_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "sqlite": {{ "db_path": "feed.db" }},
                "remote": {{ "kind": "memory" }},
                "worksheets": {{}},
                "retail": {{ "brands": ["OnlyBrand"], "units": {{ "min": 2, "max": 2 }} }}
            }}"#
        )
        .unwrap();

        let config = SimConfig::load(file.path()).unwrap();
        assert_eq!(config.remote, RemoteConfig::Memory);
        assert_eq!(config.retail.brands, vec!["OnlyBrand".to_string()]);
        assert_eq!(config.retail.units.min, 2);
        assert_eq!(config.retail.locations, RetailParams::default().locations);
    }

    #[test]
    fn out_of_range_novelty_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "sqlite": {{ "db_path": "x" }}, "worksheets": {{}}, "novelty_probability": 1.5 }}"#
        )
        .unwrap();
        assert!(SimConfig::load(file.path()).is_err());
    }
}
