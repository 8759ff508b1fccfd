use crate::{
    bathymetry::DepthAreaSample,
    measurement::{BenthicMeasurement, PhytoMeasurement},
    pond::PondRecord,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PondFile {
    pub schema_version: String,
    pub ponds: Vec<PondDefinition>,
}

/// Everything needed to build one `Pond`: the record plus its raw measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PondDefinition {
    #[serde(flatten)]
    pub record: PondRecord,
    pub bathymetry: Vec<DepthAreaSample>,
    #[serde(default)]
    pub benthic_measurements: Vec<BenthicMeasurement>,
    #[serde(default)]
    pub phyto_measurements: Vec<PhytoMeasurement>,
}
