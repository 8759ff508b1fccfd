use serde::{Deserialize, Serialize};

/// One bathymetric survey point: the water surface area at a given depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthAreaSample {
    pub depth_m: f64,
    pub area_m2: f64,
}

impl DepthAreaSample {
    pub fn new(depth_m: f64, area_m2: f64) -> Self {
        Self { depth_m, area_m2 }
    }
}

impl From<(f64, f64)> for DepthAreaSample {
    fn from((depth_m, area_m2): (f64, f64)) -> Self {
        Self { depth_m, area_m2 }
    }
}
