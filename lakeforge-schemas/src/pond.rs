use serde::{Deserialize, Serialize};

/// Identity and environmental scalars of one pond on one day.
///
/// Values are taken as-is from upstream data; range checks happen when the
/// record is turned into a `Pond`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PondRecord {
    pub lake_id: String,
    pub year: i32,
    pub day_of_year: i32,
    pub length_of_day_hours: f64,
    /// Surface irradiance at solar noon, µmol photons m⁻² s⁻¹.
    pub noon_surface_light: f64,
    /// Background light attenuation coefficient kd, m⁻¹.
    pub light_attenuation_coefficient: f64,
    #[serde(default)]
    pub time_interval_hours: Option<f64>,
}
