//! Small numeric helpers shared by the shape, light and production models.

use crate::error::LakeforgeError;

/// Clamps `value` into `[min, max]`. NaN passes through unchanged.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Piecewise-linear interpolation of `ys` over `xs` at `x`.
///
/// `xs` must be sorted ascending. `x` is first clamped into `[xs[0], xs[n-1]]`,
/// so there is no extrapolation. At a node the stored value is returned exactly.
pub fn interpolate_clamped(
    x: f64,
    xs: &[f64],
    ys: &[f64],
    quantity: &'static str,
) -> Result<f64, LakeforgeError> {
    let points = xs.len().min(ys.len());
    if points < 2 {
        return Err(LakeforgeError::InsufficientData { quantity, points });
    }
    let x = clamp(x, xs[0], xs[points - 1]);

    let idx = xs[..points].partition_point(|&xi| xi < x);
    if idx >= points {
        // Only reachable with a NaN target.
        return Ok(ys[points - 1]);
    }
    if xs[idx] == x || idx == 0 {
        return Ok(ys[idx]);
    }

    let (x0, x1) = (xs[idx - 1], xs[idx]);
    let (y0, y1) = (ys[idx - 1], ys[idx]);
    Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

/// Yields `start, start + step, start + 2·step, ...` while the value is `<= end`.
///
/// The value is accumulated by repeated addition, so the last step may fall
/// slightly short of `end`. A non-positive or non-finite step yields `start` once.
pub fn steps_through(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let advancing = step > 0.0 && step.is_finite();
    std::iter::successors(Some(start), move |&current| advancing.then(|| current + step))
        .take_while(move |&current| current <= end)
}

/// Like [`steps_through`] but stops before reaching `end`.
pub fn steps_until(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let advancing = step > 0.0 && step.is_finite();
    std::iter::successors(Some(start), move |&current| advancing.then(|| current + step))
        .take_while(move |&current| current < end)
}
