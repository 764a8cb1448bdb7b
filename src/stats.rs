//! Aggregations behind the charts: group means, histogram bins, kernel density.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DataError;

/// Mean of one (category, level) cell of a grouped bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub category: usize,
    pub level: Option<usize>,
    pub count: usize,
    pub mean: f64,
}

/// Result of [`grouped_means`]: distinct categories/levels in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedMeans {
    pub categories: Vec<String>,
    pub levels: Vec<String>,
    pub means: Vec<GroupMean>,
}

fn position_or_push(seen: &mut Vec<String>, key: &str) -> usize {
    match seen.iter().position(|s| s == key) {
        Some(i) => i,
        None => {
            seen.push(key.to_string());
            seen.len() - 1
        }
    }
}

/// Mean of `values` per category (and per hue level when `levels` is given).
///
/// Rows with a missing category, level, or non-finite value are skipped.
pub fn grouped_means(
    categories: &[Option<String>],
    levels: Option<&[Option<String>]>,
    values: &[Option<f64>],
) -> GroupedMeans {
    let mut cat_order: Vec<String> = Vec::new();
    let mut level_order: Vec<String> = Vec::new();
    let mut sums: BTreeMap<(usize, Option<usize>), (f64, usize)> = BTreeMap::new();

    for (row, value) in values.iter().enumerate() {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            continue;
        };
        let Some(Some(cat)) = categories.get(row) else {
            continue;
        };
        let level = match levels {
            Some(lv) => match lv.get(row) {
                Some(Some(l)) => Some(l.as_str()),
                _ => continue,
            },
            None => None,
        };
        let ci = position_or_push(&mut cat_order, cat);
        let li = level.map(|l| position_or_push(&mut level_order, l));
        let entry = sums.entry((ci, li)).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }

    let means = sums
        .into_iter()
        .map(|((category, level), (sum, count))| GroupMean {
            category,
            level,
            count,
            mean: sum / count as f64,
        })
        .collect();

    GroupedMeans {
        categories: cat_order,
        levels: level_order,
        means,
    }
}

/// Smallest and largest finite value.
pub fn finite_range<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Equal-width bin edges over `[min, max]`. A zero-width range is widened by ±0.5.
pub fn bin_edges(min: f64, max: f64, nbins: usize) -> Result<Vec<f64>, DataError> {
    if nbins == 0 {
        return Err(DataError::InvalidParameter("nbins must be at least 1".into()));
    }
    let (lo, hi) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (hi - lo) / nbins as f64;
    Ok((0..=nbins)
        .map(|i| if i == nbins { hi } else { lo + width * i as f64 })
        .collect())
}

/// Count values per bin. Bins are half-open except the last, which is closed.
/// Values outside the edges are ignored.
pub fn bin_counts(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let nbins = edges.len().saturating_sub(1);
    let mut counts = vec![0usize; nbins];
    if nbins == 0 {
        return counts;
    }
    let lo = edges[0];
    let hi = edges[nbins];
    let width = (hi - lo) / nbins as f64;
    for &v in values {
        if !v.is_finite() || v < lo || v > hi {
            continue;
        }
        let idx = (((v - lo) / width).floor() as usize).min(nbins - 1);
        counts[idx] += 1;
    }
    counts
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(var.sqrt())
}

/// Gaussian kernel bandwidth by Scott's rule: `std * n^(-1/5)`.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std = sample_std(values)?;
    if std <= 0.0 {
        return None;
    }
    Some(std * (values.len() as f64).powf(-0.2))
}

/// Gaussian kernel density evaluated at each grid point. Integrates to 1.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Option<Vec<f64>> {
    let h = scott_bandwidth(values)?;
    let n = values.len() as f64;
    let norm = 1.0 / (n * h * (2.0 * std::f64::consts::PI).sqrt());
    Some(
        grid.iter()
            .map(|x| {
                values
                    .iter()
                    .map(|v| {
                        let u = (x - v) / h;
                        (-0.5 * u * u).exp()
                    })
                    .sum::<f64>()
                    * norm
            })
            .collect(),
    )
}

/// `n` evenly spaced points from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { hi } else { lo + step * i as f64 })
                .collect()
        }
    }
}
