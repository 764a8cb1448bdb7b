//! Draw a [`BarLayout`] on any plotters backend.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::context::RenderContext;
use super::layout::{BarLayout, LabelAnchor};
use super::util::{label_area_px, palette_color};

const MARGIN: u32 = 16;

pub(crate) fn draw_bar_chart<DB>(
    ctx: &RenderContext,
    layout: &BarLayout,
    root: DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&ctx.background)
        .map_err(|e| anyhow!("{:?}", e))?;

    let y_labels: Vec<String> = layout.y_axis.ticks.iter().map(|t| t.label.clone()).collect();
    let left_px = label_area_px(&y_labels, ctx.fonts.tick);

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 48);
    if let Some(title) = &layout.title {
        builder.caption(title, (FontFamily::SansSerif, ctx.fonts.title));
    }
    let mut chart = builder
        .build_cartesian_2d(layout.x_axis.coord(), layout.y_axis.coord())
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_fmt = |v: &f64| layout.x_axis.label_for(*v);
    let y_fmt = |v: &f64| layout.y_axis.label_for(*v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
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

    let rect = |x0: f64, x1: f64, h: f64| [(x0, h.min(0.0)), (x1, h.max(0.0))];

    if layout.levels.is_empty() {
        // No hue: one colour per category.
        for bar in &layout.bars {
            let style = palette_color(&ctx.palette, bar.category)
                .mix(layout.alpha)
                .filled();
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    rect(bar.x0, bar.x1, bar.height),
                    style,
                )))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    } else {
        for (li, level) in layout.levels.iter().enumerate() {
            let style = palette_color(&ctx.palette, li).mix(layout.alpha).filled();
            chart
                .draw_series(
                    layout
                        .bars
                        .iter()
                        .filter(|b| b.level == Some(li))
                        .map(|b| Rectangle::new(rect(b.x0, b.x1, b.height), style)),
                )
                .map_err(|e| anyhow!("{:?}", e))?
                .label(level.clone())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], style));
        }
    }

    let above = TextStyle::from((FontFamily::SansSerif, ctx.fonts.annotation))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let below = TextStyle::from((FontFamily::SansSerif, ctx.fonts.annotation))
        .pos(Pos::new(HPos::Center, VPos::Top));
    chart
        .draw_series(layout.bars.iter().map(|b| {
            let style = match b.anchor {
                LabelAnchor::Above => above.clone(),
                LabelAnchor::Below => below.clone(),
            };
            Text::new(b.label.clone(), (b.center(), b.height), style)
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    if !layout.levels.is_empty() {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, ctx.fonts.legend))
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
