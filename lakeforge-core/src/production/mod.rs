//! Daily primary production of the two carbon sources, integrated over depth
//! and time of day.

pub mod benthic;
pub mod phyto;

pub use benthic::{BenthicBand, BenthicProductionModel};
pub use phyto::PhytoProductionModel;

use crate::numeric;

pub const DEFAULT_TIME_INTERVAL_HOURS: f64 = 0.25;

/// Hours after sunrise at which production is sampled.
pub fn time_steps(length_of_day_hours: f64, time_interval_hours: f64) -> impl Iterator<Item = f64> {
    numeric::steps_until(0.0, length_of_day_hours, time_interval_hours)
}

/// Turns a sum of hourly rates sampled every `time_interval_hours` into a daily total.
pub fn per_day(sum_of_rates: f64, time_interval_hours: f64) -> f64 {
    sum_of_rates / (1.0 / time_interval_hours)
}
