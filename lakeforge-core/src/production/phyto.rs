use super::{per_day, time_steps};
use crate::{error::LakeforgeError, light::LightModel, numeric, shape::PondShape};
use lakeforge_schemas::measurement::PhytoMeasurement;

/// Production of phytoplankton in the open water, one P-I curve per thermal layer.
///
/// Layers are ordered by measurement depth. A layer reaches from the previous
/// layer's depth (or the surface) down to its own depth.
pub struct PhytoProductionModel<'a, S: PondShape> {
    shape: &'a S,
    light: LightModel,
    time_interval_hours: f64,
    layers: Vec<PhytoMeasurement>,
}

impl<'a, S: PondShape> PhytoProductionModel<'a, S> {
    /// Layer depths deeper than the basin are pulled up to its bottom.
    pub fn new(
        shape: &'a S,
        light: LightModel,
        measurements: &[PhytoMeasurement],
        time_interval_hours: f64,
    ) -> Result<Self, LakeforgeError> {
        let mut layers = measurements
            .iter()
            .map(|m| -> Result<PhytoMeasurement, LakeforgeError> {
                Ok(PhytoMeasurement {
                    depth_m: shape.clamp_depth(m.depth_m)?,
                    ..*m
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        layers.sort_by(|a, b| a.depth_m.total_cmp(&b.depth_m));

        Ok(Self {
            shape,
            light,
            time_interval_hours,
            layers,
        })
    }

    pub fn layers(&self) -> &[PhytoMeasurement] {
        &self.layers
    }

    /// `(upper, lower)` depth bounds of every layer, shallowest first.
    pub fn layer_bounds(&self) -> Vec<(f64, f64)> {
        let mut upper = 0.0;
        self.layers
            .iter()
            .map(|layer| {
                let bounds = (upper, layer.depth_m);
                upper = layer.depth_m;
                bounds
            })
            .collect()
    }

    /// The shallowest layer whose depth is at or below `depth`.
    pub fn measurement_for_depth(&self, depth: f64) -> Option<&PhytoMeasurement> {
        self.layers.iter().find(|layer| layer.depth_m >= depth)
    }

    /// Production at `depth` under irradiance `light`, per unit volume.
    ///
    /// `use_photoinhibition` of `None` picks the photoinhibited curve for layers
    /// with a non-zero beta. Below the deepest layer there is no production.
    pub fn productivity(&self, light: f64, depth: f64, use_photoinhibition: Option<bool>) -> f64 {
        let Some(layer) = self.measurement_for_depth(depth) else {
            return 0.0;
        };
        if use_photoinhibition.unwrap_or(layer.beta != 0.0) {
            photoinhibited_productivity(light, layer.pmax, layer.alpha, layer.beta)
        } else {
            saturating_productivity(light, layer.pmax, layer.alpha)
        }
    }

    /// Volume-weighted production between `upper` and `lower`, one value per time step.
    pub fn hourly_rates_over_interval(
        &self,
        upper: f64,
        lower: f64,
        depth_interval: f64,
        use_photoinhibition: Option<bool>,
    ) -> Result<Vec<f64>, LakeforgeError> {
        let depth_interval = self.shape.clamp_interval(depth_interval)?;
        let total_volume = self
            .shape
            .volume_above_depth(self.shape.max_depth()?, depth_interval)?;

        let weights = numeric::steps_through(upper, lower, depth_interval)
            .map(|depth| -> Result<(f64, f64), LakeforgeError> {
                let weight = if total_volume > 0.0 {
                    self.shape.volume_at_depth(depth, depth_interval)? / total_volume
                } else {
                    0.0
                };
                Ok((depth, weight))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rates = time_steps(self.light.length_of_day_hours, self.time_interval_hours)
            .map(|hour| {
                weights
                    .iter()
                    .map(|&(depth, weight)| {
                        let light = self.light.light_at_depth_and_time(depth, hour);
                        weight * self.productivity(light, depth, use_photoinhibition)
                    })
                    .sum::<f64>()
            })
            .collect();
        Ok(rates)
    }

    /// Areal production of one layer, mg C m⁻² day⁻¹.
    pub fn daily_rate_in_interval(
        &self,
        upper: f64,
        lower: f64,
        depth_interval: f64,
        use_photoinhibition: Option<bool>,
    ) -> Result<f64, LakeforgeError> {
        let hourly =
            self.hourly_rates_over_interval(upper, lower, depth_interval, use_photoinhibition)?;
        let sum: f64 = hourly.iter().sum();
        Ok(per_day(sum, self.time_interval_hours) * (lower - upper))
    }

    /// Whole-lake phytoplankton production summed over the thermal layers, mg C m⁻² day⁻¹.
    pub fn daily_whole_lake_production(
        &self,
        depth_interval: f64,
        use_photoinhibition: Option<bool>,
    ) -> Result<f64, LakeforgeError> {
        let mut total = 0.0;
        for (upper, lower) in self.layer_bounds() {
            total += self.daily_rate_in_interval(upper, lower, depth_interval, use_photoinhibition)?;
        }
        Ok(total)
    }

    /// Areal production rate summed over the layers at each time step, mg C m⁻² h⁻¹.
    pub fn hourly_whole_lake_production(
        &self,
        depth_interval: f64,
        use_photoinhibition: Option<bool>,
    ) -> Result<Vec<f64>, LakeforgeError> {
        let steps = time_steps(self.light.length_of_day_hours, self.time_interval_hours).count();
        let mut totals = vec![0.0; steps];
        for (upper, lower) in self.layer_bounds() {
            let rates =
                self.hourly_rates_over_interval(upper, lower, depth_interval, use_photoinhibition)?;
            for (total, rate) in totals.iter_mut().zip(rates) {
                *total += rate * (lower - upper);
            }
        }
        Ok(totals)
    }
}

/// Platt/Jassby/Gallegos/Harrison curve with photoinhibition.
pub fn photoinhibited_productivity(light: f64, pmax: f64, alpha: f64, beta: f64) -> f64 {
    pmax * (1.0 - (-alpha * light / pmax).exp()) * (-beta * light / pmax).exp()
}

/// Hyperbolic tangent curve, no photoinhibition.
pub fn saturating_productivity(light: f64, pmax: f64, alpha: f64) -> f64 {
    pmax * (alpha * light / pmax).tanh()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::BathymetricShape;
    use approx::assert_relative_eq;
    use lakeforge_schemas::bathymetry::DepthAreaSample;

    fn straight_walled() -> BathymetricShape {
        BathymetricShape::from_samples([
            DepthAreaSample::new(0.0, 100.0),
            DepthAreaSample::new(2.0, 100.0),
        ])
        .unwrap()
    }

    fn clear_two_hour_day() -> LightModel {
        LightModel {
            attenuation_coefficient: 0.0,
            noon_surface_light: 10.0,
            length_of_day_hours: 2.0,
            max_depth: 2.0,
        }
    }

    #[test]
    fn single_layer_without_photoinhibition() {
        let shape = straight_walled();
        let measurements = [PhytoMeasurement::new(0, 2.0, 10.0, 1.0, 0.0)];
        let model =
            PhytoProductionModel::new(&shape, clear_two_hour_day(), &measurements, 1.0).unwrap();

        let expected = 20.0 * 1.0f64.tanh();
        assert_relative_eq!(
            model.daily_whole_lake_production(1.0, None).unwrap(),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn non_zero_beta_selects_photoinhibition() {
        let shape = straight_walled();
        let measurements = [PhytoMeasurement::new(0, 2.0, 10.0, 1.0, 1.0)];
        let model =
            PhytoProductionModel::new(&shape, clear_two_hour_day(), &measurements, 1.0).unwrap();

        let e = (-1.0f64).exp();
        assert_relative_eq!(
            model.daily_whole_lake_production(1.0, None).unwrap(),
            20.0 * (1.0 - e) * e,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            model.daily_whole_lake_production(1.0, Some(false)).unwrap(),
            20.0 * 1.0f64.tanh(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn hourly_rates_are_volume_weighted() {
        let shape = straight_walled();
        let measurements = [PhytoMeasurement::new(0, 2.0, 10.0, 1.0, 0.0)];
        let model =
            PhytoProductionModel::new(&shape, clear_two_hour_day(), &measurements, 1.0).unwrap();

        let rates = model.hourly_rates_over_interval(0.0, 2.0, 1.0, None).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0], 0.0);
        assert_relative_eq!(rates[1], 10.0 * 1.0f64.tanh(), max_relative = 1e-12);
    }

    #[test]
    fn depths_map_to_the_layer_at_or_below() {
        let shape = BathymetricShape::from_samples([
            DepthAreaSample::new(0.0, 100.0),
            DepthAreaSample::new(20.0, 10.0),
        ])
        .unwrap();
        let measurements = [
            PhytoMeasurement::new(2, 15.0, 2.0, 0.1, 0.0),
            PhytoMeasurement::new(0, 3.0, 10.0, 0.5, 0.0),
            PhytoMeasurement::new(1, 8.0, 6.0, 0.3, 0.0),
        ];
        let model =
            PhytoProductionModel::new(&shape, clear_two_hour_day(), &measurements, 1.0).unwrap();

        assert_eq!(model.measurement_for_depth(0.0).unwrap().thermal_layer, 0);
        assert_eq!(model.measurement_for_depth(3.0).unwrap().thermal_layer, 0);
        assert_eq!(model.measurement_for_depth(3.1).unwrap().thermal_layer, 1);
        assert_eq!(model.measurement_for_depth(15.0).unwrap().thermal_layer, 2);
        assert!(model.measurement_for_depth(16.0).is_none());
        assert_eq!(model.productivity(500.0, 16.0, None), 0.0);
        assert_eq!(
            model.layer_bounds(),
            vec![(0.0, 3.0), (3.0, 8.0), (8.0, 15.0)]
        );
    }

    #[test]
    fn layers_deeper_than_the_basin_are_clamped() {
        let shape = straight_walled();
        let measurements = [PhytoMeasurement::new(0, 9.0, 10.0, 1.0, 0.0)];
        let model =
            PhytoProductionModel::new(&shape, clear_two_hour_day(), &measurements, 1.0).unwrap();
        assert_eq!(model.layer_bounds(), vec![(0.0, 2.0)]);
    }

    #[test]
    fn no_layers_means_no_production() {
        let shape = straight_walled();
        let model = PhytoProductionModel::new(&shape, clear_two_hour_day(), &[], 1.0).unwrap();
        assert_eq!(model.daily_whole_lake_production(0.1, None).unwrap(), 0.0);
        assert_eq!(
            model.hourly_whole_lake_production(0.1, None).unwrap(),
            vec![0.0, 0.0]
        );
    }

    #[test]
    fn curves_agree_at_low_light() {
        let light = 1e-6;
        assert_relative_eq!(
            saturating_productivity(light, 10.0, 0.5),
            photoinhibited_productivity(light, 10.0, 0.5, 0.0),
            max_relative = 1e-6
        );
    }
}
