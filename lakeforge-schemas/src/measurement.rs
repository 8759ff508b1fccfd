use serde::{Deserialize, Serialize};
use std::fmt;

/// P-I parameters measured on the lake bottom at one depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenthicMeasurement {
    pub depth_m: f64,
    /// Irradiance at the onset of saturation.
    pub ik: f64,
    pub pmax: f64,
}

impl BenthicMeasurement {
    pub fn new(depth_m: f64, ik: f64, pmax: f64) -> Self {
        Self { depth_m, ik, pmax }
    }
}

/// P-I parameters of the phytoplankton in one thermal layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhytoMeasurement {
    pub thermal_layer: u8,
    pub depth_m: f64,
    pub pmax: f64,
    pub alpha: f64,
    #[serde(default)]
    pub beta: f64,
}

impl PhytoMeasurement {
    pub fn new(thermal_layer: u8, depth_m: f64, pmax: f64, alpha: f64, beta: f64) -> Self {
        Self {
            thermal_layer,
            depth_m,
            pmax,
            alpha,
            beta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalLayer {
    Epilimnion,
    Metalimnion,
    Hypolimnion,
}

impl ThermalLayer {
    pub const COUNT: usize = 3;
}

impl TryFrom<u8> for ThermalLayer {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ThermalLayer::Epilimnion),
            1 => Ok(ThermalLayer::Metalimnion),
            2 => Ok(ThermalLayer::Hypolimnion),
            other => Err(other),
        }
    }
}

impl fmt::Display for ThermalLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThermalLayer::Epilimnion => "epilimnion",
            ThermalLayer::Metalimnion => "metalimnion",
            ThermalLayer::Hypolimnion => "hypolimnion",
        };
        f.write_str(name)
    }
}
