use crate::{
    error::LakeforgeError,
    light::LightModel,
    numeric::clamp,
    production::{
        time_steps, BenthicProductionModel, PhytoProductionModel, DEFAULT_TIME_INTERVAL_HOURS,
    },
    shape::{BathymetricShape, PondShape, DEFAULT_DEPTH_INTERVAL},
};
use lakeforge_schemas::{
    bathymetry::DepthAreaSample,
    measurement::{BenthicMeasurement, PhytoMeasurement, ThermalLayer},
    pond::PondRecord,
    production::{HourlyProduction, ProductionResult},
};
use log::{debug, warn};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;
pub const MIN_DAY_OF_YEAR: i32 = 0;
pub const MAX_DAY_OF_YEAR: i32 = 366;
pub const MIN_LENGTH_OF_DAY: f64 = 0.0;
/// A polar summer day with a leap second.
pub const MAX_LENGTH_OF_DAY: f64 = 24.0003;
pub const MIN_NOON_SURFACE_LIGHT: f64 = 0.0;
pub const MAX_NOON_SURFACE_LIGHT: f64 = 1_000_000.0;
pub const MIN_LIGHT_ATTENUATION_COEFFICIENT: f64 = 0.0;
pub const MAX_LIGHT_ATTENUATION_COEFFICIENT: f64 = 100.0;

/// Parameters of the two whole-lake production queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionSettings {
    pub depth_interval: f64,
    pub use_littoral_area: bool,
    /// `None` decides per thermal layer from its beta.
    pub use_photoinhibition: Option<bool>,
}

impl Default for ProductionSettings {
    fn default() -> Self {
        Self {
            depth_interval: DEFAULT_DEPTH_INTERVAL,
            use_littoral_area: true,
            use_photoinhibition: None,
        }
    }
}

/// One lake on one day: its shape, light climate and photosynthesis measurements.
///
/// Out-of-range scalars are clamped to the nearest bound on the way in.
/// Measurements are validated and rejected when malformed.
#[derive(Debug, Clone)]
pub struct Pond {
    lake_id: String,
    year: i32,
    day_of_year: i32,
    length_of_day_hours: f64,
    noon_surface_light: f64,
    light_attenuation_coefficient: f64,
    time_interval_hours: f64,
    shape: BathymetricShape,
    benthic_measurements: Vec<BenthicMeasurement>,
    phyto_measurements: Vec<PhytoMeasurement>,
}

impl Pond {
    pub fn new(record: PondRecord, shape: BathymetricShape) -> Self {
        let mut pond = Self {
            lake_id: record.lake_id,
            year: MIN_YEAR,
            day_of_year: MIN_DAY_OF_YEAR,
            length_of_day_hours: MIN_LENGTH_OF_DAY,
            noon_surface_light: MIN_NOON_SURFACE_LIGHT,
            light_attenuation_coefficient: MIN_LIGHT_ATTENUATION_COEFFICIENT,
            time_interval_hours: DEFAULT_TIME_INTERVAL_HOURS,
            shape,
            benthic_measurements: Vec::new(),
            phyto_measurements: Vec::new(),
        };
        pond.set_year(record.year);
        pond.set_day_of_year(record.day_of_year);
        pond.set_length_of_day_hours(record.length_of_day_hours);
        pond.set_noon_surface_light(record.noon_surface_light);
        pond.set_light_attenuation_coefficient(record.light_attenuation_coefficient);
        if let Some(time_interval) = record.time_interval_hours {
            pond.set_time_interval_hours(time_interval);
        }
        pond
    }

    pub fn lake_id(&self) -> &str {
        &self.lake_id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn day_of_year(&self) -> i32 {
        self.day_of_year
    }

    pub fn length_of_day_hours(&self) -> f64 {
        self.length_of_day_hours
    }

    pub fn noon_surface_light(&self) -> f64 {
        self.noon_surface_light
    }

    pub fn light_attenuation_coefficient(&self) -> f64 {
        self.light_attenuation_coefficient
    }

    pub fn time_interval_hours(&self) -> f64 {
        self.time_interval_hours
    }

    pub fn shape(&self) -> &BathymetricShape {
        &self.shape
    }

    pub fn benthic_measurements(&self) -> &[BenthicMeasurement] {
        &self.benthic_measurements
    }

    pub fn phyto_measurements(&self) -> &[PhytoMeasurement] {
        &self.phyto_measurements
    }

    pub fn max_depth(&self) -> Result<f64, LakeforgeError> {
        self.shape.max_depth()
    }

    pub fn set_lake_id(&mut self, lake_id: impl Into<String>) {
        self.lake_id = lake_id.into();
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = clamp_field("year", year, MIN_YEAR, MAX_YEAR);
    }

    pub fn set_day_of_year(&mut self, day_of_year: i32) {
        self.day_of_year = clamp_field("day_of_year", day_of_year, MIN_DAY_OF_YEAR, MAX_DAY_OF_YEAR);
    }

    pub fn set_length_of_day_hours(&mut self, hours: f64) {
        self.length_of_day_hours =
            clamp_field("length_of_day_hours", hours, MIN_LENGTH_OF_DAY, MAX_LENGTH_OF_DAY);
    }

    pub fn set_noon_surface_light(&mut self, light: f64) {
        self.noon_surface_light = clamp_field(
            "noon_surface_light",
            light,
            MIN_NOON_SURFACE_LIGHT,
            MAX_NOON_SURFACE_LIGHT,
        );
    }

    pub fn set_light_attenuation_coefficient(&mut self, kd: f64) {
        self.light_attenuation_coefficient = clamp_field(
            "light_attenuation_coefficient",
            kd,
            MIN_LIGHT_ATTENUATION_COEFFICIENT,
            MAX_LIGHT_ATTENUATION_COEFFICIENT,
        );
    }

    /// A non-positive step falls back to the default quarter hour.
    pub fn set_time_interval_hours(&mut self, hours: f64) {
        self.time_interval_hours = if hours > 0.0 {
            clamp_field("time_interval_hours", hours, f64::MIN_POSITIVE, MAX_LENGTH_OF_DAY)
        } else {
            debug!("time_interval_hours {hours} is not positive, using {DEFAULT_TIME_INTERVAL_HOURS}");
            DEFAULT_TIME_INTERVAL_HOURS
        };
    }

    pub fn add_bathymetry_sample(&mut self, depth: f64, area: f64) -> Result<(), LakeforgeError> {
        self.shape.add_sample(depth, area)
    }

    pub fn update_shape(&mut self, other: &BathymetricShape) {
        self.shape.merge(other);
    }

    pub fn add_benthic_measurement(
        &mut self,
        measurement: BenthicMeasurement,
    ) -> Result<(), LakeforgeError> {
        validate_benthic(&measurement)?;
        self.benthic_measurements.push(measurement);
        Ok(())
    }

    /// Adds the measurement only if it was taken above the 1% light depth.
    pub fn add_benthic_measurement_if_photic(
        &mut self,
        measurement: BenthicMeasurement,
    ) -> Result<bool, LakeforgeError> {
        let photic_depth = self.light_model()?.depth_of_light_proportion(
            crate::light::PHOTIC_ZONE_LIGHT_PROPORTION,
        );
        if measurement.depth_m < photic_depth {
            self.add_benthic_measurement(measurement)?;
            Ok(true)
        } else {
            warn!(
                "{}: benthic measurement at {} m is below the photic zone ({photic_depth:.2} m), skipped",
                self.lake_id, measurement.depth_m
            );
            Ok(false)
        }
    }

    /// Removes the first measurement equal to `measurement`, if any.
    pub fn remove_benthic_measurement(&mut self, measurement: &BenthicMeasurement) -> bool {
        match self.benthic_measurements.iter().position(|m| m == measurement) {
            Some(idx) => {
                self.benthic_measurements.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn set_benthic_measurements(
        &mut self,
        measurements: Vec<BenthicMeasurement>,
    ) -> Result<(), LakeforgeError> {
        measurements.iter().try_for_each(validate_benthic)?;
        self.benthic_measurements = measurements;
        Ok(())
    }

    /// Adds a phytoplankton measurement, replacing any earlier one for the same layer.
    pub fn add_phyto_measurement(
        &mut self,
        measurement: PhytoMeasurement,
    ) -> Result<(), LakeforgeError> {
        validate_phyto(&measurement)?;
        match self
            .phyto_measurements
            .iter_mut()
            .find(|m| m.thermal_layer == measurement.thermal_layer)
        {
            Some(existing) => *existing = measurement,
            None => self.phyto_measurements.push(measurement),
        }
        Ok(())
    }

    pub fn set_phyto_measurements(
        &mut self,
        measurements: Vec<PhytoMeasurement>,
    ) -> Result<(), LakeforgeError> {
        if measurements.len() > ThermalLayer::COUNT {
            return Err(LakeforgeError::TooManyThermalLayers(measurements.len()));
        }
        let previous = std::mem::take(&mut self.phyto_measurements);
        for measurement in measurements {
            if let Err(e) = self.add_phyto_measurement(measurement) {
                self.phyto_measurements = previous;
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn light_model(&self) -> Result<LightModel, LakeforgeError> {
        Ok(LightModel {
            attenuation_coefficient: self.light_attenuation_coefficient,
            noon_surface_light: self.noon_surface_light,
            length_of_day_hours: self.length_of_day_hours,
            max_depth: self.max_depth()?,
        })
    }

    pub fn light_proportion_at_depth(&self, depth: f64) -> Result<f64, LakeforgeError> {
        Ok(self.light_model()?.light_proportion_at_depth(depth))
    }

    pub fn depth_of_light_proportion(&self, proportion: f64) -> Result<f64, LakeforgeError> {
        Ok(self.light_model()?.depth_of_light_proportion(proportion))
    }

    pub fn depths_of_light_proportions(
        &self,
        proportions: &[f64],
    ) -> Result<Vec<f64>, LakeforgeError> {
        let light = self.light_model()?;
        Ok(proportions
            .iter()
            .map(|p| light.depth_of_light_proportion(*p))
            .collect())
    }

    pub fn photic_zone_lower_bound(&self) -> Result<f64, LakeforgeError> {
        Ok(self.light_model()?.photic_zone_lower_bound())
    }

    pub fn is_depth_in_photic_zone(&self, depth: f64) -> Result<bool, LakeforgeError> {
        Ok(self.light_model()?.is_depth_in_photic_zone(depth))
    }

    pub fn surface_light_at_time(&self, hour: f64) -> Result<f64, LakeforgeError> {
        Ok(self.light_model()?.surface_light_at_time(hour))
    }

    pub fn light_at_depth_and_time(&self, depth: f64, hour: f64) -> Result<f64, LakeforgeError> {
        Ok(self.light_model()?.light_at_depth_and_time(depth, hour))
    }

    pub fn benthic_model(
        &self,
    ) -> Result<BenthicProductionModel<'_, BathymetricShape>, LakeforgeError> {
        Ok(BenthicProductionModel::new(
            &self.shape,
            self.light_model()?,
            &self.benthic_measurements,
            self.time_interval_hours,
        ))
    }

    pub fn phyto_model(&self) -> Result<PhytoProductionModel<'_, BathymetricShape>, LakeforgeError> {
        PhytoProductionModel::new(
            &self.shape,
            self.light_model()?,
            &self.phyto_measurements,
            self.time_interval_hours,
        )
    }

    pub fn total_littoral_area(&self) -> Result<f64, LakeforgeError> {
        self.benthic_model()?.total_littoral_area()
    }

    pub fn benthic_pmax_at_depth(&self, depth: f64) -> Result<f64, LakeforgeError> {
        self.benthic_model()?.pmax_at_depth(depth)
    }

    pub fn benthic_ik_at_depth(&self, depth: f64) -> Result<f64, LakeforgeError> {
        self.benthic_model()?.ik_at_depth(depth)
    }

    /// Whole-lake benthic primary production, mg C m⁻² day⁻¹.
    pub fn daily_whole_lake_benthic_production(
        &self,
        depth_interval: f64,
        use_littoral_area: bool,
    ) -> Result<f64, LakeforgeError> {
        self.benthic_model()?
            .daily_whole_lake_production(depth_interval, use_littoral_area)
    }

    /// Whole-lake phytoplankton primary production, mg C m⁻² day⁻¹.
    pub fn daily_whole_lake_phyto_production(
        &self,
        depth_interval: f64,
        use_photoinhibition: Option<bool>,
    ) -> Result<f64, LakeforgeError> {
        self.phyto_model()?
            .daily_whole_lake_production(depth_interval, use_photoinhibition)
    }

    /// Runs both daily production queries. Nothing is cached between calls.
    pub fn production(
        &self,
        settings: &ProductionSettings,
    ) -> Result<ProductionResult, LakeforgeError> {
        Ok(ProductionResult {
            benthic_mgc_m2_day: self.daily_whole_lake_benthic_production(
                settings.depth_interval,
                settings.use_littoral_area,
            )?,
            phyto_mgc_m2_day: self.daily_whole_lake_phyto_production(
                settings.depth_interval,
                settings.use_photoinhibition,
            )?,
        })
    }

    /// Whole-lake production rates at every time step of the day.
    pub fn hourly_production(
        &self,
        settings: &ProductionSettings,
    ) -> Result<Vec<HourlyProduction>, LakeforgeError> {
        let benthic = self
            .benthic_model()?
            .hourly_whole_lake_production(settings.depth_interval, settings.use_littoral_area)?;
        let phyto = self
            .phyto_model()?
            .hourly_whole_lake_production(settings.depth_interval, settings.use_photoinhibition)?;

        Ok(time_steps(self.length_of_day_hours, self.time_interval_hours)
            .zip(benthic.into_iter().zip(phyto))
            .map(|(hour, (benthic, phyto))| HourlyProduction {
                hour,
                benthic_mgc_m2: benthic,
                phyto_mgc_m2: phyto,
            })
            .collect())
    }
}

/// Fluent construction of a `Pond` from raw records.
pub struct PondBuilder {
    record: PondRecord,
    bathymetry: Vec<DepthAreaSample>,
    shape: Option<BathymetricShape>,
    benthic_measurements: Vec<BenthicMeasurement>,
    phyto_measurements: Vec<PhytoMeasurement>,
}

impl PondBuilder {
    pub fn new(record: PondRecord) -> Self {
        Self {
            record,
            bathymetry: Vec::new(),
            shape: None,
            benthic_measurements: Vec::new(),
            phyto_measurements: Vec::new(),
        }
    }

    /// Survey samples, added on top of any shape given with [`with_shape`](Self::with_shape).
    pub fn with_bathymetry(mut self, samples: Vec<DepthAreaSample>) -> Self {
        self.bathymetry = samples;
        self
    }

    pub fn with_shape(mut self, shape: BathymetricShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_benthic_measurements(mut self, measurements: Vec<BenthicMeasurement>) -> Self {
        self.benthic_measurements = measurements;
        self
    }

    pub fn with_phyto_measurements(mut self, measurements: Vec<PhytoMeasurement>) -> Self {
        self.phyto_measurements = measurements;
        self
    }

    /// # Errors
    ///
    /// Fails on an invalid bathymetry sample, a malformed measurement or more
    /// than three phytoplankton measurements.
    pub fn build(self) -> Result<Pond, LakeforgeError> {
        let mut shape = self.shape.unwrap_or_default();
        shape.merge(&BathymetricShape::from_samples(self.bathymetry)?);

        let mut pond = Pond::new(self.record, shape);
        pond.set_benthic_measurements(self.benthic_measurements)?;
        pond.set_phyto_measurements(self.phyto_measurements)?;
        Ok(pond)
    }
}

/// Clamps into `[min, max]`. A value that compares with nothing (NaN) becomes `min`.
fn clamp_field<T>(field: &str, value: T, min: T, max: T) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if value.partial_cmp(&value).is_none() {
        debug!("{field} {value} is not a number, using {min}");
        return min;
    }
    let clamped = clamp(value, min, max);
    if clamped != value {
        debug!("{field} {value} outside [{min}, {max}], using {clamped}");
    }
    clamped
}

fn validate_benthic(measurement: &BenthicMeasurement) -> Result<(), LakeforgeError> {
    let valid = measurement.depth_m.is_finite()
        && measurement.depth_m >= 0.0
        && measurement.ik > 0.0
        && measurement.pmax > 0.0;
    if valid {
        Ok(())
    } else {
        Err(LakeforgeError::InvalidMeasurementType(format!(
            "benthic measurement needs depth >= 0, ik > 0 and pmax > 0, got {measurement:?}"
        )))
    }
}

fn validate_phyto(measurement: &PhytoMeasurement) -> Result<ThermalLayer, LakeforgeError> {
    let layer = ThermalLayer::try_from(measurement.thermal_layer).map_err(|layer| {
        LakeforgeError::InvalidMeasurementType(format!(
            "thermal layer must be 0, 1 or 2, got {layer}"
        ))
    })?;
    let valid = measurement.depth_m.is_finite()
        && measurement.depth_m >= 0.0
        && measurement.pmax > 0.0
        && measurement.alpha >= 0.0
        && measurement.beta >= 0.0;
    if valid {
        Ok(layer)
    } else {
        Err(LakeforgeError::InvalidMeasurementType(format!(
            "{layer} measurement needs depth >= 0, pmax > 0, alpha >= 0 and beta >= 0, got {measurement:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record() -> PondRecord {
        PondRecord {
            lake_id: "lake_ID".to_string(),
            year: 2015,
            day_of_year: 180,
            length_of_day_hours: 12.0,
            noon_surface_light: 1440.0,
            light_attenuation_coefficient: 0.3429805354,
            time_interval_hours: None,
        }
    }

    fn cone() -> Vec<DepthAreaSample> {
        vec![DepthAreaSample::new(0.0, 100.0), DepthAreaSample::new(10.0, 0.0)]
    }

    #[test]
    fn scalars_are_clamped_not_rejected() {
        let pond = Pond::new(
            PondRecord {
                year: 0,
                day_of_year: 400,
                length_of_day_hours: 30.0,
                noon_surface_light: -5.0,
                light_attenuation_coefficient: 150.0,
                time_interval_hours: Some(-1.0),
                ..record()
            },
            BathymetricShape::new(),
        );
        assert_eq!(pond.year(), 1);
        assert_eq!(pond.day_of_year(), 366);
        assert_eq!(pond.length_of_day_hours(), MAX_LENGTH_OF_DAY);
        assert_eq!(pond.noon_surface_light(), 0.0);
        assert_eq!(pond.light_attenuation_coefficient(), 100.0);
        assert_eq!(pond.time_interval_hours(), DEFAULT_TIME_INTERVAL_HOURS);
    }

    #[test]
    fn non_finite_scalars_fall_back_to_bounds() {
        let pond = Pond::new(
            PondRecord {
                length_of_day_hours: f64::NAN,
                noon_surface_light: f64::INFINITY,
                light_attenuation_coefficient: f64::NAN,
                time_interval_hours: Some(f64::NAN),
                ..record()
            },
            BathymetricShape::from_samples(cone()).unwrap(),
        );
        assert_eq!(pond.length_of_day_hours(), MIN_LENGTH_OF_DAY);
        assert_eq!(pond.noon_surface_light(), MAX_NOON_SURFACE_LIGHT);
        assert_eq!(pond.light_attenuation_coefficient(), MIN_LIGHT_ATTENUATION_COEFFICIENT);
        assert_eq!(pond.time_interval_hours(), DEFAULT_TIME_INTERVAL_HOURS);

        let result = pond.production(&ProductionSettings::default()).unwrap();
        assert!(result.benthic_mgc_m2_day.is_finite());
        assert!(result.phyto_mgc_m2_day.is_finite());
    }

    #[test]
    fn ponds_do_not_share_measurement_lists() {
        let mut first = PondBuilder::new(record()).with_bathymetry(cone()).build().unwrap();
        let second = PondBuilder::new(record()).with_bathymetry(cone()).build().unwrap();
        first
            .add_benthic_measurement(BenthicMeasurement::new(1.0, 100.0, 10.0))
            .unwrap();
        assert_eq!(first.benthic_measurements().len(), 1);
        assert!(second.benthic_measurements().is_empty());
    }

    #[test]
    fn phyto_measurement_replaces_same_layer() {
        let mut pond = PondBuilder::new(record()).with_bathymetry(cone()).build().unwrap();
        pond.add_phyto_measurement(PhytoMeasurement::new(0, 1.0, 5.0, 0.1, 0.0))
            .unwrap();
        pond.add_phyto_measurement(PhytoMeasurement::new(1, 4.0, 5.0, 0.1, 0.0))
            .unwrap();
        pond.add_phyto_measurement(PhytoMeasurement::new(0, 3.0, 8.0, 0.2, 0.0))
            .unwrap();

        let layers = pond.phyto_measurements();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].depth_m, 3.0);
        assert_eq!(layers[1].thermal_layer, 1);
    }

    #[test]
    fn more_than_three_phyto_layers_is_rejected() {
        let measurements = (0..4)
            .map(|i| PhytoMeasurement::new(i % 3, i as f64, 5.0, 0.1, 0.0))
            .collect();
        let result = PondBuilder::new(record())
            .with_bathymetry(cone())
            .with_phyto_measurements(measurements)
            .build();
        assert!(matches!(result, Err(LakeforgeError::TooManyThermalLayers(4))));
    }

    #[test]
    fn unknown_thermal_layer_is_rejected() {
        let mut pond = PondBuilder::new(record()).with_bathymetry(cone()).build().unwrap();
        let result = pond.add_phyto_measurement(PhytoMeasurement::new(3, 1.0, 5.0, 0.1, 0.0));
        assert!(matches!(result, Err(LakeforgeError::InvalidMeasurementType(_))));
        assert!(pond.phyto_measurements().is_empty());
    }

    #[test]
    fn invalid_phyto_list_leaves_previous_measurements() {
        let mut pond = PondBuilder::new(record()).with_bathymetry(cone()).build().unwrap();
        pond.add_phyto_measurement(PhytoMeasurement::new(0, 1.0, 5.0, 0.1, 0.0))
            .unwrap();
        let result = pond.set_phyto_measurements(vec![
            PhytoMeasurement::new(1, 2.0, 5.0, 0.1, 0.0),
            PhytoMeasurement::new(2, 3.0, -5.0, 0.1, 0.0),
        ]);
        assert!(result.is_err());
        assert_eq!(pond.phyto_measurements().len(), 1);
        assert_eq!(pond.phyto_measurements()[0].thermal_layer, 0);
    }

    #[test]
    fn non_positive_ik_is_rejected() {
        let mut pond = PondBuilder::new(record()).with_bathymetry(cone()).build().unwrap();
        let result = pond.add_benthic_measurement(BenthicMeasurement::new(1.0, 0.0, 10.0));
        assert!(matches!(result, Err(LakeforgeError::InvalidMeasurementType(_))));
    }

    #[test]
    fn photic_zone_of_shallow_clear_lake_is_whole_basin() {
        let pond = PondBuilder::new(PondRecord {
            light_attenuation_coefficient: 0.1,
            ..record()
        })
        .with_bathymetry(cone())
        .build()
        .unwrap();
        assert_eq!(pond.photic_zone_lower_bound().unwrap(), 10.0);
    }

    #[test]
    fn measurements_below_photic_zone_are_skipped() {
        let mut pond = PondBuilder::new(PondRecord {
            light_attenuation_coefficient: 1.0,
            ..record()
        })
        .with_bathymetry(cone())
        .build()
        .unwrap();
        // 1% light at about 4.6 m.
        assert!(pond
            .add_benthic_measurement_if_photic(BenthicMeasurement::new(2.0, 100.0, 10.0))
            .unwrap());
        assert!(!pond
            .add_benthic_measurement_if_photic(BenthicMeasurement::new(6.0, 100.0, 10.0))
            .unwrap());
        assert_eq!(pond.benthic_measurements().len(), 1);
    }

    #[test]
    fn remove_benthic_measurement_by_value() {
        let kept = BenthicMeasurement::new(0.0, 100.0, 10.0);
        let dropped = BenthicMeasurement::new(1.0, 80.0, 12.0);
        let mut pond = PondBuilder::new(record())
            .with_bathymetry(cone())
            .with_benthic_measurements(vec![kept, dropped])
            .build()
            .unwrap();
        assert!(pond.remove_benthic_measurement(&dropped));
        assert!(!pond.remove_benthic_measurement(&dropped));
        assert_eq!(pond.benthic_measurements(), &[kept]);
    }

    #[test]
    fn depths_of_several_light_proportions() {
        let pond = PondBuilder::new(PondRecord {
            light_attenuation_coefficient: 0.5,
            ..record()
        })
        .with_bathymetry(cone())
        .build()
        .unwrap();
        let depths = pond.depths_of_light_proportions(&[1.0, 0.5, 0.01]).unwrap();
        assert_eq!(depths[0], 0.0);
        assert_relative_eq!(depths[1], 2.0f64.ln() / 0.5);
        assert_relative_eq!(depths[2], 100.0f64.ln() / 0.5, max_relative = 1e-12);
    }

    #[test]
    fn builder_merges_shape_and_survey() {
        let mut shape = BathymetricShape::new();
        shape.add_sample(5.0, 80.0).unwrap();
        let pond = PondBuilder::new(record())
            .with_shape(shape)
            .with_bathymetry(cone())
            .build()
            .unwrap();
        assert_eq!(pond.shape().len(), 3);
        assert_eq!(pond.max_depth().unwrap(), 10.0);
    }

    #[test]
    fn light_and_interpolation_delegate_to_models() {
        let mut pond = PondBuilder::new(PondRecord {
            light_attenuation_coefficient: 0.5,
            ..record()
        })
        .with_bathymetry(cone())
        .with_benthic_measurements(vec![
            BenthicMeasurement::new(0.0, 100.0, 20.0),
            BenthicMeasurement::new(8.0, 60.0, 4.0),
        ])
        .build()
        .unwrap();
        pond.set_lake_id("renamed");
        assert_eq!(pond.lake_id(), "renamed");

        assert_relative_eq!(pond.surface_light_at_time(6.0).unwrap(), 1440.0);
        assert_relative_eq!(
            pond.light_at_depth_and_time(2.0, 6.0).unwrap(),
            1440.0 * (-1.0f64).exp()
        );
        assert!(pond.is_depth_in_photic_zone(9.0).unwrap());
        assert!(!pond.is_depth_in_photic_zone(9.5).unwrap());

        assert_relative_eq!(pond.benthic_pmax_at_depth(4.0).unwrap(), 12.0);
        assert_eq!(pond.benthic_pmax_at_depth(9.5).unwrap(), 0.0);
        assert_relative_eq!(pond.benthic_ik_at_depth(9.5).unwrap(), 60.0);

        pond.add_bathymetry_sample(5.0, 80.0).unwrap();
        assert_eq!(pond.shape().len(), 3);
        assert!(pond.add_bathymetry_sample(6.0, 0.0).is_err());
    }

    #[test]
    fn update_shape_merges_samples() {
        let mut pond = PondBuilder::new(record()).with_bathymetry(cone()).build().unwrap();
        let mut deeper = BathymetricShape::new();
        deeper.add_sample(12.0, 1.0).unwrap();
        pond.update_shape(&deeper);
        assert_eq!(pond.max_depth().unwrap(), 12.0);
    }
}
