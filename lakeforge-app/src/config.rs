use anyhow::{Context, Result};
use lakeforge_core::{analysis, pond::ProductionSettings, shape::DEFAULT_DEPTH_INTERVAL};
use lakeforge_schemas::file_formats::PondDefinition;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// How the batch should be computed and reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunRequest {
    pub depth_interval: f64,
    pub use_littoral_area: bool,
    /// Absent means each thermal layer decides from its own beta.
    pub use_photoinhibition: Option<bool>,
    /// Overrides the time step of every pond when set.
    pub time_interval_hours: Option<f64>,
    pub plots: bool,
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            depth_interval: DEFAULT_DEPTH_INTERVAL,
            use_littoral_area: true,
            use_photoinhibition: None,
            time_interval_hours: None,
            plots: true,
        }
    }
}

impl RunRequest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn production_settings(&self) -> ProductionSettings {
        ProductionSettings {
            depth_interval: self.depth_interval,
            use_littoral_area: self.use_littoral_area,
            use_photoinhibition: self.use_photoinhibition,
        }
    }
}

/// Every pond definition found in a data directory.
pub struct PondLibrary {
    pub ponds: Vec<PondDefinition>,
}

impl PondLibrary {
    /// Reads every `.yaml`/`.yml` file in `dir`, in file name order.
    pub fn load(dir: &Path) -> Result<Self> {
        println!("Loading pond data from '{}'...", dir.display());

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut ponds = Vec::new();
        for path in &paths {
            let file = analysis::read_pond_file(path)
                .with_context(|| format!("Failed to load pond file {}", path.display()))?;
            debug!("{}: schema version {}, {} ponds", path.display(), file.schema_version, file.ponds.len());
            ponds.extend(file.ponds);
        }

        println!("Loaded {} ponds from {} files.", ponds.len(), paths.len());
        Ok(Self { ponds })
    }
}
