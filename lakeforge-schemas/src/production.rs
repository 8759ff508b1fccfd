use serde::{Deserialize, Serialize};

/// Daily whole-lake primary production for one pond, mg C m⁻² day⁻¹.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionResult {
    pub benthic_mgc_m2_day: f64,
    pub phyto_mgc_m2_day: f64,
}

impl ProductionResult {
    pub fn total(&self) -> f64 {
        self.benthic_mgc_m2_day + self.phyto_mgc_m2_day
    }
}

/// Whole-lake production rates at a single time step of the day, mg C m⁻² h⁻¹.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyProduction {
    pub hour: f64,
    pub benthic_mgc_m2: f64,
    pub phyto_mgc_m2: f64,
}
