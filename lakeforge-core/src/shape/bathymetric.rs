use super::PondShape;
use crate::{error::LakeforgeError, numeric};
use lakeforge_schemas::bathymetry::DepthAreaSample;

/// Basin shape built from surveyed (depth, surface area) pairs.
///
/// Area at unsampled depths is linearly interpolated between the neighbouring
/// samples. Depths are unique; inserting an existing depth replaces its area.
/// Results are only meaningful when the surface (depth 0) and the bottom are
/// both sampled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BathymetricShape {
    depths: Vec<f64>,
    areas: Vec<f64>,
}

impl BathymetricShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a shape from an initial survey.
    ///
    /// Unlike [`add_sample`](Self::add_sample), a zero area is accepted here so
    /// a survey can record the deepest point of the basin as area 0.
    pub fn from_samples<I>(samples: I) -> Result<Self, LakeforgeError>
    where
        I: IntoIterator<Item = DepthAreaSample>,
    {
        let mut shape = Self::new();
        for sample in samples {
            let valid = sample.depth_m.is_finite()
                && sample.depth_m >= 0.0
                && sample.area_m2.is_finite()
                && sample.area_m2 >= 0.0;
            if !valid {
                return Err(LakeforgeError::InvalidSample {
                    depth: sample.depth_m,
                    area: sample.area_m2,
                });
            }
            shape.insert(sample.depth_m, sample.area_m2);
        }
        Ok(shape)
    }

    pub fn add_sample(&mut self, depth: f64, area: f64) -> Result<(), LakeforgeError> {
        let valid = depth.is_finite() && depth >= 0.0 && area.is_finite() && area > 0.0;
        if !valid {
            return Err(LakeforgeError::InvalidSample { depth, area });
        }
        self.insert(depth, area);
        Ok(())
    }

    /// Copies every sample of `other` into this shape, `other` winning on equal depths.
    pub fn merge(&mut self, other: &BathymetricShape) {
        for (depth, area) in other.depths.iter().zip(other.areas.iter()) {
            self.insert(*depth, *area);
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = DepthAreaSample> + '_ {
        self.depths
            .iter()
            .zip(self.areas.iter())
            .map(|(depth, area)| DepthAreaSample::new(*depth, *area))
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    fn insert(&mut self, depth: f64, area: f64) {
        let idx = self.depths.partition_point(|&d| d < depth);
        if self.depths.get(idx) == Some(&depth) {
            self.areas[idx] = area;
        } else {
            self.depths.insert(idx, depth);
            self.areas.insert(idx, area);
        }
    }
}

impl PondShape for BathymetricShape {
    fn max_depth(&self) -> Result<f64, LakeforgeError> {
        self.depths.last().copied().ok_or(LakeforgeError::EmptyShape)
    }

    fn surface_area_at_depth(&self, depth: f64) -> Result<f64, LakeforgeError> {
        let depth = self.clamp_depth(depth)?;
        numeric::interpolate_clamped(depth, &self.depths, &self.areas, "water surface area")
    }
}

impl TryFrom<&[DepthAreaSample]> for BathymetricShape {
    type Error = LakeforgeError;

    fn try_from(samples: &[DepthAreaSample]) -> Result<Self, Self::Error> {
        Self::from_samples(samples.iter().copied())
    }
}
