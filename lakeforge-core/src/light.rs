//! Light climate of a pond: Beer-Lambert attenuation with depth and a
//! symmetric sinusoidal day at the surface.

use crate::numeric::clamp;
use std::f64::consts::PI;

/// Fraction of surface light that marks the bottom of the photic zone.
pub const PHOTIC_ZONE_LIGHT_PROPORTION: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightModel {
    /// Background attenuation coefficient kd, m⁻¹.
    pub attenuation_coefficient: f64,
    pub noon_surface_light: f64,
    pub length_of_day_hours: f64,
    /// Depths are clamped into `[0, max_depth]`.
    pub max_depth: f64,
}

impl LightModel {
    /// Proportion of surface light reaching `depth`, `exp(-kd·z)`.
    pub fn light_proportion_at_depth(&self, depth: f64) -> f64 {
        let depth = clamp(depth, 0.0, self.max_depth);
        (-self.attenuation_coefficient * depth).exp()
    }

    /// Depth at which `proportion` of surface light remains.
    ///
    /// Proportions are clamped into `[0, 1]`; anything not strictly between
    /// 0 and 1 maps to the surface. With kd = 0 the depth is infinite.
    pub fn depth_of_light_proportion(&self, proportion: f64) -> f64 {
        let proportion = clamp(proportion, 0.0, 1.0);
        if proportion > 0.0 && proportion < 1.0 {
            proportion.ln() / -self.attenuation_coefficient
        } else {
            0.0
        }
    }

    /// Depth of 1% light, never deeper than the basin.
    pub fn photic_zone_lower_bound(&self) -> f64 {
        self.depth_of_light_proportion(PHOTIC_ZONE_LIGHT_PROPORTION)
            .min(self.max_depth)
    }

    pub fn is_depth_in_photic_zone(&self, depth: f64) -> bool {
        depth >= 0.0 && depth <= self.photic_zone_lower_bound()
    }

    pub fn clamp_time(&self, hour: f64) -> f64 {
        clamp(hour, 0.0, self.length_of_day_hours)
    }

    /// Surface irradiance `hour` hours after sunrise.
    pub fn surface_light_at_time(&self, hour: f64) -> f64 {
        if self.length_of_day_hours <= 0.0 {
            return 0.0;
        }
        let hour = self.clamp_time(hour);
        self.noon_surface_light * (PI * hour / self.length_of_day_hours).sin()
    }

    pub fn light_at_depth_and_time(&self, depth: f64, hour: f64) -> f64 {
        self.surface_light_at_time(hour) * self.light_proportion_at_depth(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn model(kd: f64) -> LightModel {
        LightModel {
            attenuation_coefficient: kd,
            noon_surface_light: 1500.0,
            length_of_day_hours: 12.0,
            max_depth: 20.0,
        }
    }

    #[test]
    fn full_light_at_surface() {
        assert_eq!(model(0.5).light_proportion_at_depth(0.0), 1.0);
        assert_eq!(model(0.5).depth_of_light_proportion(1.0), 0.0);
    }

    #[test]
    fn depth_of_proportion_inverts_attenuation() {
        let light = model(0.37);
        for proportion in [0.9, 0.5, 0.1, 0.01] {
            let depth = light.depth_of_light_proportion(proportion);
            assert_relative_eq!(
                light.light_proportion_at_depth(depth),
                proportion,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn proportions_are_clamped() {
        let light = model(0.5);
        assert_eq!(light.depth_of_light_proportion(1.7), 0.0);
        assert_eq!(light.depth_of_light_proportion(-0.2), 0.0);
    }

    #[test]
    fn photic_zone_is_clamped_to_basin() {
        let mut light = model(0.1);
        light.max_depth = 10.0;
        assert_eq!(light.photic_zone_lower_bound(), 10.0);

        light.max_depth = 100.0;
        assert_relative_eq!(light.photic_zone_lower_bound(), 46.0517, max_relative = 1e-5);
    }

    #[test]
    fn clear_water_lights_the_whole_basin() {
        let light = model(0.0);
        assert_eq!(light.photic_zone_lower_bound(), 20.0);
        assert_eq!(light.light_proportion_at_depth(20.0), 1.0);
    }

    #[test]
    fn solar_curve_peaks_at_noon() {
        let light = model(0.5);
        assert_eq!(light.surface_light_at_time(0.0), 0.0);
        assert_relative_eq!(light.surface_light_at_time(6.0), 1500.0);
        assert_abs_diff_eq!(light.surface_light_at_time(12.0), 0.0, epsilon = 1e-9);
        assert_eq!(light.surface_light_at_time(-2.0), 0.0);
    }

    #[test]
    fn light_is_attenuated_with_depth() {
        let light = model(0.5);
        assert_relative_eq!(
            light.light_at_depth_and_time(2.0, 6.0),
            1500.0 * (-1.0f64).exp()
        );
    }

    #[test]
    fn polar_night_has_no_light() {
        let mut light = model(0.5);
        light.length_of_day_hours = 0.0;
        assert_eq!(light.surface_light_at_time(0.0), 0.0);
    }
}
