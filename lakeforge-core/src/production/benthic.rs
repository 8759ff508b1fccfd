use super::{per_day, time_steps};
use crate::{error::LakeforgeError, light::LightModel, numeric, shape::PondShape};
use lakeforge_schemas::measurement::BenthicMeasurement;
use log::debug;

/// One depth band of the littoral zone with the P-I parameters at its outer edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenthicBand {
    pub depth: f64,
    pub area_fraction: f64,
    pub pmax: f64,
    pub ik: f64,
}

/// Production of algae growing on the lake bottom inside the photic zone.
pub struct BenthicProductionModel<'a, S: PondShape> {
    shape: &'a S,
    light: LightModel,
    time_interval_hours: f64,
    depths: Vec<f64>,
    pmax: Vec<f64>,
    ik: Vec<f64>,
}

impl<'a, S: PondShape> BenthicProductionModel<'a, S> {
    pub fn new(
        shape: &'a S,
        light: LightModel,
        measurements: &[BenthicMeasurement],
        time_interval_hours: f64,
    ) -> Self {
        let mut sorted = measurements.to_vec();
        sorted.sort_by(|a, b| a.depth_m.total_cmp(&b.depth_m));

        Self {
            shape,
            light,
            time_interval_hours,
            depths: sorted.iter().map(|m| m.depth_m).collect(),
            pmax: sorted.iter().map(|m| m.pmax).collect(),
            ik: sorted.iter().map(|m| m.ik).collect(),
        }
    }

    /// Pmax interpolated at `depth`; zero below the photic zone.
    pub fn pmax_at_depth(&self, depth: f64) -> Result<f64, LakeforgeError> {
        let depth = self.shape.clamp_depth(depth)?;
        if !self.light.is_depth_in_photic_zone(depth) {
            return Ok(0.0);
        }
        numeric::interpolate_clamped(depth, &self.depths, &self.pmax, "benthic pmax")
    }

    pub fn ik_at_depth(&self, depth: f64) -> Result<f64, LakeforgeError> {
        let depth = self.shape.clamp_depth(depth)?;
        numeric::interpolate_clamped(depth, &self.depths, &self.ik, "benthic ik")
    }

    /// Saturating P-I response without photoinhibition.
    pub fn productivity(light: f64, pmax: f64, ik: f64) -> f64 {
        pmax * (light / ik).tanh()
    }

    /// Sediment area between the surface and the 1% light depth.
    pub fn total_littoral_area(&self) -> Result<f64, LakeforgeError> {
        let photic_depth = self.light.photic_zone_lower_bound();
        self.shape.sediment_area_above_depth(photic_depth, photic_depth)
    }

    /// Splits the photic zone into bands of `depth_interval` meters.
    /// Without measurements there are no bands.
    ///
    /// Each band's sediment area is expressed as a fraction of the littoral
    /// area, or of the lake surface area when `use_littoral_area` is false.
    pub fn littoral_bands(
        &self,
        depth_interval: f64,
        use_littoral_area: bool,
    ) -> Result<Vec<BenthicBand>, LakeforgeError> {
        if self.depths.is_empty() {
            debug!("no benthic measurements, benthic production is zero");
            return Ok(Vec::new());
        }
        let depth_interval = self.shape.clamp_interval(depth_interval)?;
        let photic_depth = self.light.photic_zone_lower_bound();
        let total_area = if use_littoral_area {
            self.total_littoral_area()?
        } else {
            self.shape.surface_area_at_depth(0.0)?
        };
        if total_area <= 0.0 {
            debug!("no sediment area above {photic_depth} m, benthic production is zero");
            return Ok(Vec::new());
        }

        numeric::steps_through(0.0, photic_depth, depth_interval)
            .map(|depth| -> Result<BenthicBand, LakeforgeError> {
                let area = self.shape.sediment_area_at_depth(depth, depth_interval)?;
                Ok(BenthicBand {
                    depth,
                    area_fraction: area / total_area,
                    pmax: self.pmax_at_depth(depth)?,
                    ik: self.ik_at_depth(depth)?,
                })
            })
            .collect()
    }

    /// Whole-lake benthic production, mg C m⁻² day⁻¹.
    pub fn daily_whole_lake_production(
        &self,
        depth_interval: f64,
        use_littoral_area: bool,
    ) -> Result<f64, LakeforgeError> {
        let bands = self.littoral_bands(depth_interval, use_littoral_area)?;
        let daily: f64 = bands
            .iter()
            .map(|band| {
                let rates: f64 = self
                    .day_steps()
                    .map(|hour| self.band_productivity(band, hour))
                    .sum();
                per_day(rates, self.time_interval_hours) * band.area_fraction
            })
            .sum();
        Ok(daily)
    }

    /// Area-weighted production rate at each time step, mg C m⁻² h⁻¹.
    pub fn hourly_whole_lake_production(
        &self,
        depth_interval: f64,
        use_littoral_area: bool,
    ) -> Result<Vec<f64>, LakeforgeError> {
        let bands = self.littoral_bands(depth_interval, use_littoral_area)?;
        let hourly = self
            .day_steps()
            .map(|hour| {
                bands
                    .iter()
                    .map(|band| self.band_productivity(band, hour) * band.area_fraction)
                    .sum::<f64>()
            })
            .collect();
        Ok(hourly)
    }

    fn band_productivity(&self, band: &BenthicBand, hour: f64) -> f64 {
        let light = self.light.light_at_depth_and_time(band.depth, hour);
        Self::productivity(light, band.pmax, band.ik)
    }

    fn day_steps(&self) -> impl Iterator<Item = f64> {
        time_steps(self.light.length_of_day_hours, self.time_interval_hours)
    }
}
