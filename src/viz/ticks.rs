//! Tick placement for chart axes.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, FormatError};
use crate::format::AxisFormat;

/// A tick position and the exact text drawn next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// `n` equal steps from `min` to `max`, both endpoints included (`n + 1` values).
///
/// A zero-width range yields the single value `min`.
pub fn granular_ticks(min: f64, max: f64, n: usize) -> Result<Vec<f64>, DataError> {
    if n == 0 {
        return Err(DataError::InvalidParameter(
            "tick count must be at least 1".into(),
        ));
    }
    if !(min.is_finite() && max.is_finite()) {
        return Err(DataError::InvalidParameter(format!(
            "tick range must be finite, got {min}..{max}"
        )));
    }
    if max <= min {
        return Ok(vec![min]);
    }
    let step = (max - min) / n as f64;
    Ok((0..=n)
        .map(|i| if i == n { max } else { min + step * i as f64 })
        .collect())
}

/// Round-number ticks (steps of 1, 2, 2.5 or 5 × 10^k) covering `[min, max]`,
/// aiming at roughly `target` intervals. The first tick is ≤ `min`, the last ≥ `max`.
///
/// A flat range (relative to the size of its values) is widened by
/// `max(1, |min| / 1000)` on each side.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Result<Vec<f64>, DataError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(DataError::InvalidParameter(format!(
            "tick range must be finite, got {min}..{max}"
        )));
    }
    let (lo, hi) = (min.min(max), min.max(max));
    let scale = lo.abs().max(hi.abs());
    let (lo, hi) = if hi - lo <= scale * 1e-12 {
        let pad = (lo.abs() * 1e-3).max(1.0);
        (lo - pad, hi + pad)
    } else {
        (lo, hi)
    };
    let raw = (hi - lo) / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * mag);
    if !(step.is_finite() && step > 0.0) {
        return Err(DataError::InvalidParameter(format!(
            "no usable tick step for range {lo}..{hi}"
        )));
    }

    let first = (lo / step + 1e-9).floor() as i64;
    let last = (hi / step - 1e-9).ceil() as i64;
    Ok((first..=last)
        .map(|k| {
            let v = k as f64 * step;
            if v == 0.0 { 0.0 } else { v }
        })
        .collect())
}

/// Attach labels to tick values.
pub fn label_ticks(
    values: &[f64],
    format: &AxisFormat,
    locale_tag: &str,
) -> Result<Vec<Tick>, FormatError> {
    values
        .iter()
        .map(|&value| {
            Ok(Tick {
                value,
                label: format.format(value, locale_tag)?,
            })
        })
        .collect()
}
