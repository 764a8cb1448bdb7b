use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use quickplot::models::{Dataset, Index};
use quickplot::viz::{
    self, BarPlotConfig, DualAxisConfig, HistogramConfig, RenderContext,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Rendering needs a TrueType font on disk; skip quietly where there is none.
fn context() -> Option<RenderContext> {
    let ctx = RenderContext::default();
    if ctx.resolve_font_file().is_none() {
        eprintln!("no system font found, skipping render test");
        return None;
    }
    Some(ctx)
}

fn sample() -> Dataset {
    let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..8).map(|i| start + chrono::Days::new(i * 7)).collect();
    Dataset::new()
        .with_column(
            "region",
            vec!["North", "South", "East", "West", "North", "South", "East", "West"],
        )
        .unwrap()
        .with_column("segment", vec!["a", "a", "a", "a", "b", "b", "b", "b"])
        .unwrap()
        .with_column(
            "revenue",
            vec![1200.0, 2500.0, -300.0, 4100.0, 1800.0, 2200.0, 900.0, 3900.0],
        )
        .unwrap()
        .with_column("margin", vec![0.12, 0.2, 0.05, 0.3, 0.18, 0.22, 0.1, 0.28])
        .unwrap()
        .with_index(Index::dates(Some("week"), dates))
        .unwrap()
}

fn assert_svg(path: &Path) {
    let text = fs::read_to_string(path).expect("svg written");
    assert!(text.contains("<svg"), "not an svg document");
}

#[test]
fn all_chart_kinds_render_svg() {
    init_logging();
    let Some(ctx) = context() else { return };
    let dir = tempfile::tempdir().unwrap();
    let data = sample();

    let mut bar = BarPlotConfig::new("region", "revenue");
    bar.hue = Some("segment".into());
    bar.y_as_usd = true;
    bar.title = Some("Revenue by region".into());
    let path = dir.path().join("bar.svg");
    let layout = viz::dodged_barplot(&ctx, &data, &bar, &path).unwrap();
    assert_svg(&path);
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains(&layout.y_axis.ticks[0].label));

    let mut hist = HistogramConfig::new("margin");
    hist.group = Some("segment".into());
    hist.nbins = 6;
    hist.x_as_pct = true;
    let path = dir.path().join("hist.svg");
    viz::histogram(&ctx, &data, &hist, &path).unwrap();
    assert_svg(&path);

    let mut dual = DualAxisConfig::new("revenue", "margin");
    dual.left_y_as_usd = true;
    let path = dir.path().join("dual.svg");
    viz::lineplot_dual_yaxes(&ctx, &data, &dual, &path).unwrap();
    assert_svg(&path);
}

#[test]
fn png_output_is_written() {
    init_logging();
    let Some(ctx) = context() else { return };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bar.png");
    viz::dodged_barplot(&ctx, &sample(), &BarPlotConfig::new("region", "revenue"), &path)
        .unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn unsupported_extension_is_rejected_before_drawing() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.pdf");
    let err = viz::dodged_barplot(
        &RenderContext::default(),
        &sample(),
        &BarPlotConfig::new("region", "revenue"),
        &path,
    )
    .unwrap_err();
    assert!(err.to_string().contains("pdf"));
    assert!(!path.exists());
}

#[test]
fn bad_data_fails_without_output() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hist.svg");
    let empty = Dataset::new().with_column("x", Vec::<f64>::new()).unwrap();
    assert!(
        viz::histogram(&RenderContext::default(), &empty, &HistogramConfig::new("x"), &path)
            .is_err()
    );
    assert!(!path.exists());
}
