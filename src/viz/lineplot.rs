//! Draw a [`DualAxisLayout`]: left series on the primary y-axis, right
//! series on a secondary y-axis, shared x-axis.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

use super::axis::AxisLayout;
use super::context::RenderContext;
use super::layout::DualAxisLayout;
use super::util::label_area_px;

pub(crate) fn draw_dual_axis<DB>(
    ctx: &RenderContext,
    layout: &DualAxisLayout,
    root: DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&ctx.background)
        .map_err(|e| anyhow!("{:?}", e))?;

    let gutter = |axis: &AxisLayout| {
        let labels: Vec<String> = axis.ticks.iter().map(|t| t.label.clone()).collect();
        label_area_px(&labels, ctx.fonts.tick)
    };
    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(16)
        .set_label_area_size(LabelAreaPosition::Left, gutter(&layout.left.axis))
        .set_label_area_size(LabelAreaPosition::Right, gutter(&layout.right.axis))
        .set_label_area_size(LabelAreaPosition::Bottom, 44);
    if let Some(title) = &layout.title {
        builder.caption(title, (FontFamily::SansSerif, ctx.fonts.title));
    }
    let mut chart = builder
        .build_cartesian_2d(layout.x_axis.coord(), layout.left.axis.coord())
        .map_err(|e| anyhow!("{:?}", e))?;

    let (r, g, b) = layout.left.color;
    let left_color = RGBColor(r, g, b);
    let (r, g, b) = layout.right.color;
    let right_color = RGBColor(r, g, b);

    let x_fmt = |v: &f64| layout.x_axis.label_for(*v);
    let left_fmt = |v: &f64| layout.left.axis.label_for(*v);
    let right_fmt = |v: &f64| layout.right.axis.label_for(*v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(layout.x_axis.ticks.len())
            .y_labels(layout.left.axis.ticks.len())
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&left_fmt)
            .label_style((FontFamily::SansSerif, ctx.fonts.tick))
            .y_label_style(
                TextStyle::from((FontFamily::SansSerif, ctx.fonts.tick)).color(&left_color),
            )
            .axis_desc_style((FontFamily::SansSerif, ctx.fonts.axis_title));
        if let Some(t) = &layout.x_axis.title {
            mesh.x_desc(t.as_str());
        }
        if let Some(t) = &layout.left.axis.title {
            mesh.y_desc(t.as_str());
        }
        mesh.draw().map_err(|e| anyhow!("{:?}", e))?;
    }

    let left_style = left_color.stroke_width(2);
    chart
        .draw_series(LineSeries::new(layout.left.points.iter().copied(), left_style))
        .map_err(|e| anyhow!("{:?}", e))?
        .label(layout.left.name.clone())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], left_style));

    // Same x range without ticks so nothing is printed along the top.
    let hidden_x = AxisLayout {
        title: None,
        range: layout.x_axis.range,
        ticks: Vec::new(),
    };
    let mut chart = chart.set_secondary_coord(hidden_x.coord(), layout.right.axis.coord());
    {
        let mut axes = chart.configure_secondary_axes();
        axes.y_labels(layout.right.axis.ticks.len())
            .y_label_formatter(&right_fmt)
            .label_style(
                TextStyle::from((FontFamily::SansSerif, ctx.fonts.tick)).color(&right_color),
            )
            .axis_desc_style(
                TextStyle::from((FontFamily::SansSerif, ctx.fonts.axis_title)).color(&right_color),
            );
        if let Some(t) = &layout.right.axis.title {
            axes.y_desc(t.as_str());
        }
        axes.draw().map_err(|e| anyhow!("{:?}", e))?;
    }

    let right_style = right_color.stroke_width(2);
    chart
        .draw_secondary_series(LineSeries::new(
            layout.right.points.iter().copied(),
            right_style,
        ))
        .map_err(|e| anyhow!("{:?}", e))?
        .label(layout.right.name.clone())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], right_style));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, ctx.fonts.legend))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
