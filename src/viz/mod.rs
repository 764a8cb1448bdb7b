//! Chart rendering to **SVG** or **PNG**.
//!
//! - Dodged bar plot of group means, annotated with their values
//! - Histogram with density curve and rug, faceted by an optional group column
//! - Two line series over the dataset index with independent y-axes
//!
//! Every chart is first computed as a serializable layout (see [`layout`]),
//! then drawn. The output format follows the file extension.

pub mod axis;
mod bar;
pub mod context;
mod histogram;
pub mod layout;
mod lineplot;
pub mod text;
pub mod ticks;
pub mod types;
pub mod util;

pub use context::{FontSizes, RenderContext};
pub use layout::{
    BarLayout, DualAxisLayout, HistogramLayout, dodged_bar_layout, dual_axis_layout,
    histogram_layout,
};
pub use types::{BarPlotConfig, DualAxisConfig, HistogramConfig, OutputKind};

use crate::models::Dataset;
use anyhow::Result;
use log::info;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

/// Bar plot of the mean of `cfg.y` per `cfg.x` category, dodged by `cfg.hue`.
///
/// Writes the image to `out_path` and returns the layout that was drawn.
pub fn dodged_barplot<P: AsRef<Path>>(
    ctx: &RenderContext,
    data: &Dataset,
    cfg: &BarPlotConfig,
    out_path: P,
) -> Result<BarLayout> {
    let out_path = out_path.as_ref();
    let kind = OutputKind::from_path(out_path)?;
    let layout = dodged_bar_layout(ctx, data, cfg)?;
    ctx.ensure_font()?;
    match kind {
        OutputKind::Svg => {
            let root = SVGBackend::new(out_path, layout.size_px).into_drawing_area();
            bar::draw_bar_chart(ctx, &layout, root)?;
        }
        OutputKind::Png => {
            let root = BitMapBackend::new(out_path, layout.size_px).into_drawing_area();
            bar::draw_bar_chart(ctx, &layout, root)?;
        }
    }
    info!("bar plot of '{}' by '{}' written to {}", cfg.y, cfg.x, out_path.display());
    Ok(layout)
}

/// Histogram of `cfg.x`, one panel per level of `cfg.group`.
pub fn histogram<P: AsRef<Path>>(
    ctx: &RenderContext,
    data: &Dataset,
    cfg: &HistogramConfig,
    out_path: P,
) -> Result<HistogramLayout> {
    let out_path = out_path.as_ref();
    let kind = OutputKind::from_path(out_path)?;
    let layout = histogram_layout(ctx, data, cfg)?;
    ctx.ensure_font()?;
    match kind {
        OutputKind::Svg => {
            let root = SVGBackend::new(out_path, layout.size_px).into_drawing_area();
            histogram::draw_histogram(ctx, &layout, root)?;
        }
        OutputKind::Png => {
            let root = BitMapBackend::new(out_path, layout.size_px).into_drawing_area();
            histogram::draw_histogram(ctx, &layout, root)?;
        }
    }
    info!(
        "histogram of '{}' ({} panel(s)) written to {}",
        cfg.x,
        layout.panels.len(),
        out_path.display()
    );
    Ok(layout)
}

/// `cfg.left_y` and `cfg.right_y` against the dataset index, each on its own y-axis.
pub fn lineplot_dual_yaxes<P: AsRef<Path>>(
    ctx: &RenderContext,
    data: &Dataset,
    cfg: &DualAxisConfig,
    out_path: P,
) -> Result<DualAxisLayout> {
    let out_path = out_path.as_ref();
    let kind = OutputKind::from_path(out_path)?;
    let layout = dual_axis_layout(ctx, data, cfg)?;
    ctx.ensure_font()?;
    match kind {
        OutputKind::Svg => {
            let root = SVGBackend::new(out_path, layout.size_px).into_drawing_area();
            lineplot::draw_dual_axis(ctx, &layout, root)?;
        }
        OutputKind::Png => {
            let root = BitMapBackend::new(out_path, layout.size_px).into_drawing_area();
            lineplot::draw_dual_axis(ctx, &layout, root)?;
        }
    }
    info!(
        "dual-axis plot of '{}' and '{}' written to {}",
        cfg.left_y,
        cfg.right_y,
        out_path.display()
    );
    Ok(layout)
}
