//! Draw a [`HistogramLayout`], one facet panel per group level.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

use super::context::RenderContext;
use super::layout::{HistogramLayout, HistogramPanel};
use super::util::label_area_px;

/// Rug ticks reach this share of the visible y range.
const RUG_HEIGHT: f64 = 0.03;

pub(crate) fn draw_histogram<DB>(
    ctx: &RenderContext,
    layout: &HistogramLayout,
    root: DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&ctx.background)
        .map_err(|e| anyhow!("{:?}", e))?;
    let area = match &layout.title {
        Some(title) => root
            .titled(title, (FontFamily::SansSerif, ctx.fonts.title))
            .map_err(|e| anyhow!("{:?}", e))?,
        None => root.clone(),
    };

    let panels = area.split_evenly((1, layout.panels.len().max(1)));
    for (panel, panel_area) in layout.panels.iter().zip(panels.iter()) {
        draw_panel(ctx, layout, panel, panel_area)?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_panel<DB>(
    ctx: &RenderContext,
    layout: &HistogramLayout,
    panel: &HistogramPanel,
    area: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let y_labels: Vec<String> = layout.y_axis.ticks.iter().map(|t| t.label.clone()).collect();
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, label_area_px(&y_labels, ctx.fonts.tick))
        .set_label_area_size(LabelAreaPosition::Bottom, 44);
    if let Some(level) = &panel.level {
        builder.caption(level, (FontFamily::SansSerif, ctx.fonts.axis_title));
    }
    let mut chart = builder
        .build_cartesian_2d(layout.x_axis.coord(), layout.y_axis.coord())
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_fmt = |v: &f64| layout.x_axis.label_for(*v);
    let y_fmt = |v: &f64| layout.y_axis.label_for(*v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(layout.x_axis.ticks.len())
            .y_labels(layout.y_axis.ticks.len())
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .label_style((FontFamily::SansSerif, ctx.fonts.tick))
            .axis_desc_style((FontFamily::SansSerif, ctx.fonts.axis_title));
        if let Some(t) = &layout.x_axis.title {
            mesh.x_desc(t.as_str());
        }
        if let Some(t) = &layout.y_axis.title {
            mesh.y_desc(t.as_str());
        }
        mesh.draw().map_err(|e| anyhow!("{:?}", e))?;
    }

    let (r, g, b) = layout.color;
    let color = RGBColor(r, g, b);
    let fill = color.mix(layout.alpha).filled();
    let edge = WHITE.stroke_width(1);
    let bins = layout.edges.windows(2).zip(&panel.counts);
    chart
        .draw_series(bins.clone().map(|(e, c)| {
            Rectangle::new([(e[0], 0.0), (e[1], *c as f64)], fill)
        }))
        .map_err(|e| anyhow!("{:?}", e))?;
    chart
        .draw_series(
            bins.filter(|(_, c)| **c > 0)
                .map(|(e, c)| Rectangle::new([(e[0], 0.0), (e[1], *c as f64)], edge)),
        )
        .map_err(|e| anyhow!("{:?}", e))?;

    if !panel.density.is_empty() {
        chart
            .draw_series(LineSeries::new(
                panel.density.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    if !panel.rug.is_empty() {
        let (lo, hi) = layout.y_axis.range;
        let h = lo + (hi - lo) * RUG_HEIGHT;
        let rug_style = color.stroke_width(1);
        chart
            .draw_series(
                panel
                    .rug
                    .iter()
                    .map(|v| PathElement::new(vec![(*v, lo), (*v, h)], rug_style)),
            )
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
