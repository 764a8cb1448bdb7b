//! What each chart draws, computed without touching a backend.
//!
//! The render functions only translate these structs into plotters calls, so
//! every tick label and bar annotation can be checked (or exported as JSON)
//! before any pixels exist.

use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::format::{AxisFormat, BarLabelFormat, format_grouped};
use crate::models::Dataset;
use crate::stats::{
    bin_counts, bin_edges, finite_range, gaussian_kde, grouped_means, linspace,
};

use super::axis::AxisLayout;
use super::context::RenderContext;
use super::text::truncate_to_width;
use super::ticks::{Tick, granular_ticks, label_ticks, nice_ticks};
use super::types::{BarPlotConfig, DualAxisConfig, HistogramConfig, resolve_title};
use super::util::{inches_to_px, palette_color, parse_hex_color};

/// Share of a category slot covered by its dodged bars.
const GROUP_WIDTH: f64 = 0.8;
/// Head/foot room above/below the outermost tick so bar labels stay inside.
const VALUE_PAD: f64 = 0.08;
/// Points on which the density curve is evaluated.
const KDE_POINTS: usize = 200;

/// Where a bar's annotation sits relative to the bar end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelAnchor {
    /// Text bottom at the bar top (positive bars).
    Above,
    /// Text top at the bar end (zero and negative bars).
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub category: usize,
    pub level: Option<usize>,
    pub x0: f64,
    pub x1: f64,
    pub height: f64,
    pub label: String,
    pub anchor: LabelAnchor,
}

impl Bar {
    pub fn center(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub size_px: (u32, u32),
    pub title: Option<String>,
    pub categories: Vec<String>,
    pub levels: Vec<String>,
    pub hue_title: Option<String>,
    pub bars: Vec<Bar>,
    pub x_axis: AxisLayout,
    pub y_axis: AxisLayout,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramPanel {
    /// Group level shown in this panel; `None` without a group column.
    pub level: Option<String>,
    pub counts: Vec<usize>,
    /// Density curve scaled to counts; empty when disabled or undefined.
    pub density: Vec<(f64, f64)>,
    pub rug: Vec<f64>,
}

impl HistogramPanel {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramLayout {
    pub size_px: (u32, u32),
    pub title: Option<String>,
    pub edges: Vec<f64>,
    pub panels: Vec<HistogramPanel>,
    pub x_axis: AxisLayout,
    /// Shared by all panels.
    pub y_axis: AxisLayout,
    pub color: (u8, u8, u8),
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLayout {
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub axis: AxisLayout,
    pub color: (u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualAxisLayout {
    pub size_px: (u32, u32),
    pub title: Option<String>,
    pub x_axis: AxisLayout,
    pub left: LineLayout,
    pub right: LineLayout,
}

fn check_alpha(alpha: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&alpha) {
        bail!("alpha must be within [0, 1], got {alpha}");
    }
    Ok(())
}

fn non_empty(title: Option<&str>) -> Option<String> {
    title.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

/// Visible value range for the given tick extent, padded on the sides away from zero.
fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    let span = if hi > lo { hi - lo } else { 1.0 };
    let lo_r = if lo >= 0.0 { lo } else { lo - span * VALUE_PAD };
    let hi_r = if hi <= 0.0 && lo < hi { hi } else { hi + span * VALUE_PAD };
    (lo_r, hi_r)
}

fn tick_extent(ticks: &[f64]) -> Option<(f64, f64)> {
    finite_range(ticks.iter())
}

/// Means per category (and hue level) with formatted bar labels and y ticks.
pub fn dodged_bar_layout(
    ctx: &RenderContext,
    data: &Dataset,
    cfg: &BarPlotConfig,
) -> Result<BarLayout> {
    check_alpha(cfg.alpha)?;
    let size_px = inches_to_px(cfg.width, cfg.height, ctx.dpi)?;

    let categories = data.labels(&cfg.x)?;
    let values = data.numeric(&cfg.y)?;
    let levels = cfg
        .hue
        .as_deref()
        .map(|h| data.labels(h))
        .transpose()?;

    let grouped = grouped_means(&categories, levels.as_deref(), &values);
    if grouped.means.is_empty() {
        return Err(DataError::NoValues(cfg.y.clone()).into());
    }
    debug!(
        "bar layout: {} categories x {} levels from {} rows",
        grouped.categories.len(),
        grouped.levels.len().max(1),
        data.len()
    );

    let slots = grouped.levels.len().max(1);
    let bar_w = GROUP_WIDTH / slots as f64;
    let bar_fmt = BarLabelFormat::from_flags(cfg.y_as_pct, cfg.y_as_usd, cfg.bar_label_decimals);
    let bars: Vec<Bar> = grouped
        .means
        .iter()
        .map(|m| {
            let x0 = m.category as f64 - GROUP_WIDTH / 2.0 + m.level.unwrap_or(0) as f64 * bar_w;
            Bar {
                category: m.category,
                level: m.level,
                x0,
                x1: x0 + bar_w,
                height: m.mean,
                label: bar_fmt.format(m.mean),
                anchor: if m.mean > 0.0 {
                    LabelAnchor::Above
                } else {
                    LabelAnchor::Below
                },
            }
        })
        .collect();

    // Float data gets evenly spaced ticks from min to max (0 included);
    // integer counts keep round steps.
    let tick_values = if data.is_float(&cfg.y)? {
        let raw: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .chain(std::iter::once(0.0))
            .collect();
        let (lo, hi) = finite_range(raw.iter()).unwrap_or((0.0, 0.0));
        granular_ticks(lo, hi, cfg.yticks)?
    } else {
        let heights = bars.iter().map(|b| b.height).chain(std::iter::once(0.0));
        let (lo, hi) = heights.fold((0.0f64, 0.0f64), |(lo, hi), h| (lo.min(h), hi.max(h)));
        nice_ticks(lo, hi, cfg.yticks)?
    };
    let y_format = AxisFormat::from_flags(cfg.y_as_pct, cfg.y_as_usd, cfg.y_decimals, 1.0);
    let (t_lo, t_hi) = tick_extent(&tick_values).ok_or_else(|| anyhow!("no y ticks"))?;
    let y_axis = AxisLayout {
        title: resolve_title(cfg.ylab.as_deref(), Some(cfg.y.as_str())),
        range: padded_range(t_lo, t_hi),
        ticks: label_ticks(&tick_values, &y_format, &ctx.locale)?,
    };

    let n_cat = grouped.categories.len();
    let slot_px = (size_px.0.saturating_sub(160) / n_cat.max(1) as u32).max(24);
    let x_axis = AxisLayout {
        title: resolve_title(cfg.xlab.as_deref(), Some(cfg.x.as_str())),
        range: (-0.5, n_cat as f64 - 0.5),
        ticks: grouped
            .categories
            .iter()
            .enumerate()
            .map(|(i, name)| Tick {
                value: i as f64,
                label: truncate_to_width(name, ctx.fonts.tick, slot_px),
            })
            .collect(),
    };

    Ok(BarLayout {
        size_px,
        title: non_empty(cfg.title.as_deref()),
        categories: grouped.categories,
        levels: grouped.levels,
        hue_title: cfg.hue.clone(),
        bars,
        x_axis,
        y_axis,
        alpha: cfg.alpha,
    })
}

/// Shared bins, per-panel counts, density curves and rug marks.
pub fn histogram_layout(
    ctx: &RenderContext,
    data: &Dataset,
    cfg: &HistogramConfig,
) -> Result<HistogramLayout> {
    check_alpha(cfg.alpha)?;
    let size_px = inches_to_px(cfg.width, cfg.height, ctx.dpi)?;
    let color = parse_hex_color(&cfg.color)?;

    let values = data.numeric(&cfg.x)?;
    let groups = cfg
        .group
        .as_deref()
        .map(|g| data.labels(g))
        .transpose()?;

    let finite: Vec<f64> = values.iter().flatten().copied().filter(|v| v.is_finite()).collect();
    let (min, max) = finite_range(finite.iter()).ok_or_else(|| DataError::NoValues(cfg.x.clone()))?;
    if finite.len() < values.len() {
        warn!(
            "histogram of '{}': skipping {} missing or non-finite values",
            cfg.x,
            values.len() - finite.len()
        );
    }
    let edges = bin_edges(min, max, cfg.nbins)?;
    let bin_width = edges[1] - edges[0];

    // (level, values) in first-seen level order
    let mut panel_values: Vec<(Option<String>, Vec<f64>)> = Vec::new();
    match &groups {
        Some(labels) => {
            for (value, label) in values.iter().zip(labels) {
                let (Some(v), Some(l)) = (value.filter(|v| v.is_finite()), label) else {
                    continue;
                };
                match panel_values.iter_mut().find(|(k, _)| k.as_deref() == Some(l.as_str())) {
                    Some((_, vs)) => vs.push(v),
                    None => panel_values.push((Some(l.clone()), vec![v])),
                }
            }
        }
        None => panel_values.push((None, finite)),
    }

    let panels: Vec<HistogramPanel> = panel_values
        .into_iter()
        .map(|(level, vs)| {
            let counts = bin_counts(&vs, &edges);
            let density: Vec<(f64, f64)> = if cfg.kde {
                let (lo, hi) = finite_range(vs.iter()).unwrap_or((min, max));
                let grid = linspace(lo, hi, KDE_POINTS);
                let scale = vs.len() as f64 * bin_width;
                gaussian_kde(&vs, &grid)
                    .map(|d| grid.iter().zip(d).map(|(x, y)| (*x, y * scale)).collect())
                    .unwrap_or_default()
            } else {
                Vec::new()
            };
            let rug = if cfg.rug { vs } else { Vec::new() };
            HistogramPanel {
                level,
                counts,
                density,
                rug,
            }
        })
        .collect();
    debug!(
        "histogram layout: {} bins, {} panel(s), bin width {bin_width}",
        cfg.nbins,
        panels.len()
    );

    let x_format = AxisFormat::from_flags(cfg.x_as_pct, cfg.x_as_usd, cfg.x_decimals, 1.0);
    let x_ticks = granular_ticks(min, max, cfg.xticks)?;
    let x_axis = AxisLayout {
        title: resolve_title(cfg.xlab.as_deref(), Some(cfg.x.as_str())),
        range: (edges[0], edges[edges.len() - 1]),
        ticks: label_ticks(&x_ticks, &x_format, &ctx.locale)?,
    };

    let y_max = panels
        .iter()
        .flat_map(|p| {
            p.counts
                .iter()
                .map(|c| *c as f64)
                .chain(p.density.iter().map(|(_, y)| *y))
        })
        .fold(0.0f64, f64::max);
    let mut y_ticks = nice_ticks(0.0, y_max.max(1.0), 5)?;
    // counts: whole numbers only
    y_ticks.retain(|v| v.fract() == 0.0);
    let (_, y_hi) = tick_extent(&y_ticks).ok_or_else(|| anyhow!("no y ticks"))?;
    let y_axis = AxisLayout {
        title: Some("Count".to_string()),
        range: (0.0, y_hi.max(y_max)),
        ticks: label_ticks(&y_ticks, &AxisFormat::Plain { decimals: 0 }, &ctx.locale)?,
    };

    Ok(HistogramLayout {
        size_px,
        title: non_empty(cfg.title.as_deref()),
        edges,
        panels,
        x_axis,
        y_axis,
        color: (color.0, color.1, color.2),
        alpha: cfg.alpha,
    })
}

/// Decimals needed to print multiples of `step` exactly.
fn decimals_for_step(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    (0..10)
        .find(|d| {
            let scaled = step * 10f64.powi(*d as i32);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(10)
}

fn line_axis(
    name: &str,
    points: &[(f64, f64)],
    title: Option<String>,
    format: AxisFormat,
    target: usize,
    locale: &str,
) -> Result<AxisLayout> {
    let (lo, hi) = finite_range(points.iter().map(|(_, y)| y))
        .ok_or_else(|| DataError::NoValues(name.to_string()))?;
    let values = nice_ticks(lo, hi, target)?;
    let (t_lo, t_hi) = tick_extent(&values).ok_or_else(|| anyhow!("no ticks for '{name}'"))?;
    Ok(AxisLayout {
        title,
        range: (t_lo, t_hi),
        ticks: label_ticks(&values, &format, locale)?,
    })
}

/// Two series over the dataset index with independent y-axes.
pub fn dual_axis_layout(
    ctx: &RenderContext,
    data: &Dataset,
    cfg: &DualAxisConfig,
) -> Result<DualAxisLayout> {
    let size_px = inches_to_px(cfg.width, cfg.height, ctx.dpi)?;
    let index = data.index();
    let xs: Vec<f64> = match index {
        Some(idx) => idx.x_positions(),
        None => (0..data.len()).map(|i| i as f64).collect(),
    };
    let is_dates = index.is_some_and(|i| i.is_dates());

    let series = |name: &str| -> Result<Vec<(f64, f64)>> {
        let ys = data.numeric(name)?;
        Ok(xs
            .iter()
            .zip(ys)
            .filter_map(|(x, y)| y.filter(|v| v.is_finite()).map(|v| (*x, v)))
            .collect())
    };
    let left_points = series(&cfg.left_y)?;
    let right_points = series(&cfg.right_y)?;

    let (x_lo, x_hi) = finite_range(xs.iter()).ok_or_else(|| anyhow!("dataset has no rows"))?;
    let mut x_values = nice_ticks(x_lo, x_hi, 8)?;
    if is_dates {
        x_values = x_values.into_iter().map(f64::round).collect();
        x_values.dedup();
    }
    let x_range = if x_hi > x_lo {
        (x_lo, x_hi)
    } else {
        (x_lo - 1.0, x_hi + 1.0)
    };
    x_values.retain(|v| *v >= x_range.0 && *v <= x_range.1);
    let x_decimals = match x_values.as_slice() {
        [a, b, ..] => decimals_for_step(b - a),
        _ => 0,
    };
    let x_ticks = x_values
        .iter()
        .map(|&value| {
            let label = if is_dates {
                NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            } else {
                format_grouped(value, x_decimals, &ctx.locale)?
            };
            Ok(Tick { value, label })
        })
        .collect::<Result<Vec<_>>>()?;
    let index_name = index.and_then(|i| i.name.as_deref());
    let x_axis = AxisLayout {
        title: resolve_title(cfg.xlab.as_deref(), index_name),
        range: x_range,
        ticks: x_ticks,
    };

    let left_axis = line_axis(
        &cfg.left_y,
        &left_points,
        resolve_title(cfg.left_ylab.as_deref(), Some(cfg.left_y.as_str())),
        AxisFormat::from_flags(cfg.left_y_as_pct, cfg.left_y_as_usd, cfg.left_y_decimals, 100.0),
        cfg.left_yticks,
        &ctx.locale,
    )?;
    let right_axis = line_axis(
        &cfg.right_y,
        &right_points,
        resolve_title(cfg.right_ylab.as_deref(), Some(cfg.right_y.as_str())),
        AxisFormat::from_flags(
            cfg.right_y_as_pct,
            cfg.right_y_as_usd,
            cfg.right_y_decimals,
            100.0,
        ),
        cfg.right_yticks,
        &ctx.locale,
    )?;

    let left_color = palette_color(&ctx.palette, 0);
    let right_color = palette_color(&ctx.palette, 1);
    debug!(
        "dual-axis layout: {} left points, {} right points",
        left_points.len(),
        right_points.len()
    );

    Ok(DualAxisLayout {
        size_px,
        title: non_empty(cfg.title.as_deref()),
        x_axis,
        left: LineLayout {
            name: cfg.left_y.clone(),
            points: left_points,
            axis: left_axis,
            color: (left_color.0, left_color.1, left_color.2),
        },
        right: LineLayout {
            name: cfg.right_y.clone(),
            points: right_points,
            axis: right_axis,
            color: (right_color.0, right_color.1, right_color.2),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_keeps_zero_baseline() {
        assert_eq!(padded_range(0.0, 10.0), (0.0, 10.8));
        let (lo, hi) = padded_range(-10.0, 0.0);
        assert!((lo + 10.8).abs() < 1e-9);
        assert_eq!(hi, 0.0);
    }

    #[test]
    fn step_decimals() {
        assert_eq!(decimals_for_step(5.0), 0);
        assert_eq!(decimals_for_step(2.5), 1);
        assert_eq!(decimals_for_step(0.25), 2);
        assert_eq!(decimals_for_step(0.05), 2);
    }
}
