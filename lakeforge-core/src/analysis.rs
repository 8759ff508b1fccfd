use crate::{
    error::LakeforgeError,
    pond::{Pond, PondBuilder, ProductionSettings},
    shape::PondShape,
};
use lakeforge_schemas::{
    file_formats::{PondDefinition, PondFile},
    production::{HourlyProduction, ProductionResult},
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Row of the hourly production CSV log, read back for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyLogEntry {
    pub lake_id: String,
    pub year: i32,
    pub day_of_year: i32,
    pub hour: f64,
    pub benthic: f64,
    pub phyto: f64,
}

/// Row of the daily production CSV log. `error` is empty for successful ponds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub year: i32,
    pub lake_id: String,
    pub day_of_year: i32,
    pub bppr: Option<f64>,
    pub pppr: Option<f64>,
    pub error: String,
}

/// Basin statistics shown next to the production figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeSummary {
    pub max_depth_m: f64,
    pub mean_depth_m: f64,
    pub surface_area_m2: f64,
    pub total_volume_m3: f64,
    pub photic_depth_m: f64,
    pub littoral_area_m2: f64,
}

impl ShapeSummary {
    pub fn for_pond(pond: &Pond, depth_interval: f64) -> Result<Self, LakeforgeError> {
        let shape = pond.shape();
        Ok(Self {
            max_depth_m: shape.max_depth()?,
            mean_depth_m: shape.mean_depth(depth_interval)?,
            surface_area_m2: shape.surface_area_at_depth(0.0)?,
            total_volume_m3: shape.total_volume()?,
            photic_depth_m: pond.photic_zone_lower_bound()?,
            littoral_area_m2: pond.total_littoral_area()?,
        })
    }
}

/// Everything computed for one successful pond.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PondProduction {
    pub daily: ProductionResult,
    pub hourly: Vec<HourlyProduction>,
    pub shape: ShapeSummary,
}

#[derive(Debug)]
pub struct PondReport {
    pub lake_id: String,
    pub year: i32,
    pub day_of_year: i32,
    pub outcome: Result<PondProduction, LakeforgeError>,
}

impl PondReport {
    pub fn daily_log_entry(&self) -> DailyLogEntry {
        let (bppr, pppr, error) = match &self.outcome {
            Ok(production) => (
                Some(production.daily.benthic_mgc_m2_day),
                Some(production.daily.phyto_mgc_m2_day),
                String::new(),
            ),
            Err(e) => (None, None, e.to_string()),
        };
        DailyLogEntry {
            year: self.year,
            lake_id: self.lake_id.clone(),
            day_of_year: self.day_of_year,
            bppr,
            pppr,
            error,
        }
    }

    pub fn hourly_log_entries(&self) -> Vec<HourlyLogEntry> {
        let Ok(production) = &self.outcome else {
            return Vec::new();
        };
        production
            .hourly
            .iter()
            .map(|h| HourlyLogEntry {
                lake_id: self.lake_id.clone(),
                year: self.year,
                day_of_year: self.day_of_year,
                hour: h.hour,
                benthic: h.benthic_mgc_m2,
                phyto: h.phyto_mgc_m2,
            })
            .collect()
    }
}

pub fn analyze_pond(
    pond: &Pond,
    settings: &ProductionSettings,
) -> Result<PondProduction, LakeforgeError> {
    Ok(PondProduction {
        daily: pond.production(settings)?,
        hourly: pond.hourly_production(settings)?,
        shape: ShapeSummary::for_pond(pond, settings.depth_interval)?,
    })
}

/// Computes every pond independently. A failing pond is reported, not fatal.
pub fn analyze_batch(ponds: &[Pond], settings: &ProductionSettings) -> Vec<PondReport> {
    info!("Analyzing {} ponds", ponds.len());
    ponds
        .iter()
        .map(|pond| {
            let outcome = analyze_pond(pond, settings);
            if let Err(e) = &outcome {
                warn!(
                    "{} ({}, day {}): {e}",
                    pond.lake_id(),
                    pond.year(),
                    pond.day_of_year()
                );
            }
            PondReport {
                lake_id: pond.lake_id().to_string(),
                year: pond.year(),
                day_of_year: pond.day_of_year(),
                outcome,
            }
        })
        .collect()
}

pub fn read_pond_file(path: &Path) -> Result<PondFile, LakeforgeError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| LakeforgeError::FileIO(display.clone(), e))?;
    serde_yaml::from_str(&content).map_err(|e| LakeforgeError::YamlParsing(display, e))
}

pub fn build_pond(definition: &PondDefinition) -> Result<Pond, LakeforgeError> {
    PondBuilder::new(definition.record.clone())
        .with_bathymetry(definition.bathymetry.clone())
        .with_benthic_measurements(definition.benthic_measurements.clone())
        .with_phyto_measurements(definition.phyto_measurements.clone())
        .build()
}

pub fn read_hourly_log(path: &Path) -> Result<Vec<HourlyLogEntry>, LakeforgeError> {
    let display = path.display().to_string();
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| LakeforgeError::CsvError(display.clone(), e))?;
    reader
        .deserialize()
        .map(|row| row.map_err(|e| LakeforgeError::CsvError(display.clone(), e)))
        .collect()
}
