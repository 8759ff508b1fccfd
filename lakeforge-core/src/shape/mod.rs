//! Basin shape: surface area, sediment area and volume as functions of depth.

mod bathymetric;

pub use bathymetric::BathymetricShape;

use crate::{error::LakeforgeError, numeric};

/// Depth step, in meters, used when a caller does not supply one.
pub const DEFAULT_DEPTH_INTERVAL: f64 = 0.1;

/// Forces a depth interval into `(0, max_depth]`.
///
/// A non-positive interval becomes 1% of the basin depth.
pub fn clamp_interval(interval: f64, max_depth: f64) -> f64 {
    if interval <= 0.0 {
        max_depth / 100.0
    } else if interval > max_depth {
        max_depth
    } else {
        interval
    }
}

/// Any description of a lake basin that can report its surface area at depth.
///
/// Sediment area and volume are derived from the area curve by the provided
/// methods. Depths and intervals outside the basin are clamped, never rejected.
pub trait PondShape {
    fn max_depth(&self) -> Result<f64, LakeforgeError>;

    fn surface_area_at_depth(&self, depth: f64) -> Result<f64, LakeforgeError>;

    fn clamp_depth(&self, depth: f64) -> Result<f64, LakeforgeError> {
        Ok(numeric::clamp(depth, 0.0, self.max_depth()?))
    }

    fn clamp_interval(&self, interval: f64) -> Result<f64, LakeforgeError> {
        Ok(clamp_interval(interval, self.max_depth()?))
    }

    /// Area of lake bottom between `depth - interval` and `depth`.
    ///
    /// Uses the difference of the two water surface areas, which stands in for
    /// the true slanted bottom area. Good enough for gentle littoral slopes.
    fn sediment_area_at_depth(&self, depth: f64, interval: f64) -> Result<f64, LakeforgeError> {
        let interval = self.clamp_interval(interval)?;
        match band_edges(self, depth, interval)? {
            Some((upper, lower)) => {
                let upper_area = self.surface_area_at_depth(upper)?;
                let lower_area = self.surface_area_at_depth(lower)?;
                Ok((upper_area - lower_area).abs())
            }
            None => Ok(0.0),
        }
    }

    /// Water volume of the band ending at `depth`, by the trapezoidal rule.
    fn volume_at_depth(&self, depth: f64, interval: f64) -> Result<f64, LakeforgeError> {
        let interval = self.clamp_interval(interval)?;
        match band_edges(self, depth, interval)? {
            Some((upper, lower)) => {
                let upper_area = self.surface_area_at_depth(upper)?;
                let lower_area = self.surface_area_at_depth(lower)?;
                Ok(interval * (upper_area + lower_area) / 2.0)
            }
            None => Ok(0.0),
        }
    }

    /// Sum of band volumes from the surface down to `depth`.
    ///
    /// The final band is always a full `interval` wide even when `depth` is not
    /// a multiple of it.
    fn volume_above_depth(&self, depth: f64, interval: f64) -> Result<f64, LakeforgeError> {
        let depth = self.clamp_depth(depth)?;
        let interval = self.clamp_interval(interval)?;
        numeric::steps_through(0.0, depth, interval)
            .map(|current| self.volume_at_depth(current, interval))
            .sum()
    }

    fn sediment_area_above_depth(&self, depth: f64, interval: f64) -> Result<f64, LakeforgeError> {
        let depth = self.clamp_depth(depth)?;
        let interval = self.clamp_interval(interval)?;
        numeric::steps_through(0.0, depth, interval)
            .map(|current| self.sediment_area_at_depth(current, interval))
            .sum()
    }

    fn total_volume(&self) -> Result<f64, LakeforgeError> {
        self.volume_above_depth(self.max_depth()?, DEFAULT_DEPTH_INTERVAL)
    }

    /// Sediment-area-weighted average depth.
    ///
    /// Returns the maximum depth when there is no sediment area at all.
    fn mean_depth(&self, interval: f64) -> Result<f64, LakeforgeError> {
        let interval = self.clamp_interval(interval)?;
        let max_depth = self.max_depth()?;
        let total_area = self.sediment_area_above_depth(max_depth, interval)?;
        if total_area == 0.0 {
            return Ok(max_depth);
        }

        let mut weighted_total = 0.0;
        for current in numeric::steps_through(interval, max_depth, interval) {
            weighted_total += self.sediment_area_at_depth(current, interval)? * current;
        }
        Ok(weighted_total / total_area)
    }

    /// Sediment area of the band ending at `depth` as a fraction of `total_sediment_area`,
    /// which defaults to the sediment area of the whole basin.
    fn fractional_sediment_area_at_depth(
        &self,
        depth: f64,
        total_sediment_area: Option<f64>,
        interval: f64,
    ) -> Result<f64, LakeforgeError> {
        let total = match total_sediment_area {
            Some(total) => total,
            None => self.sediment_area_above_depth(self.max_depth()?, interval)?,
        };
        Ok(self.sediment_area_at_depth(depth, interval)? / total)
    }
}

/// Upper and lower edge of the band `[depth - interval, depth]` after clamping,
/// shallower edge first. `None` when the band has collapsed to a single depth.
fn band_edges<S: PondShape + ?Sized>(
    shape: &S,
    depth: f64,
    interval: f64,
) -> Result<Option<(f64, f64)>, LakeforgeError> {
    let lower = shape.clamp_depth(depth)?;
    let upper = shape.clamp_depth(lower - interval)?;
    if lower == upper {
        return Ok(None);
    }
    Ok(Some((upper.min(lower), upper.max(lower))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Straight-walled basin: same area at every depth.
    struct Cylinder {
        depth: f64,
        area: f64,
    }

    impl PondShape for Cylinder {
        fn max_depth(&self) -> Result<f64, LakeforgeError> {
            Ok(self.depth)
        }

        fn surface_area_at_depth(&self, _depth: f64) -> Result<f64, LakeforgeError> {
            Ok(self.area)
        }
    }

    #[test]
    fn clamp_interval_policy() {
        assert_eq!(clamp_interval(0.0, 20.0), 0.2);
        assert_eq!(clamp_interval(-3.0, 20.0), 0.2);
        assert_eq!(clamp_interval(25.0, 20.0), 20.0);
        assert_eq!(clamp_interval(0.5, 20.0), 0.5);
    }

    #[test]
    fn vertical_walls_have_no_sediment_area() {
        let cylinder = Cylinder { depth: 4.0, area: 50.0 };
        assert_eq!(cylinder.sediment_area_at_depth(2.0, 1.0).unwrap(), 0.0);
        assert_eq!(cylinder.sediment_area_above_depth(4.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn mean_depth_of_vertical_walls_is_max_depth() {
        let cylinder = Cylinder { depth: 4.0, area: 50.0 };
        assert_eq!(cylinder.mean_depth(0.5).unwrap(), 4.0);
    }

    #[test]
    fn cylinder_volume_is_area_times_depth() {
        let cylinder = Cylinder { depth: 4.0, area: 50.0 };
        assert_relative_eq!(cylinder.volume_above_depth(4.0, 1.0).unwrap(), 200.0);
    }

    #[test]
    fn summation_stops_at_last_band_edge_above_depth() {
        let cylinder = Cylinder { depth: 4.0, area: 50.0 };
        // Bands end at 0, 1.5 and 3.0.
        assert_relative_eq!(cylinder.volume_above_depth(3.2, 1.5).unwrap(), 150.0);
    }

    #[test]
    fn clipped_band_is_counted_full_width() {
        let cylinder = Cylinder { depth: 4.0, area: 50.0 };
        assert_relative_eq!(cylinder.volume_at_depth(0.5, 1.0).unwrap(), 50.0);
    }

    #[test]
    fn band_at_surface_is_empty() {
        let cylinder = Cylinder { depth: 4.0, area: 50.0 };
        assert_eq!(cylinder.volume_at_depth(0.0, 1.0).unwrap(), 0.0);
    }
}
