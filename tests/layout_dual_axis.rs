use chrono::NaiveDate;
use quickplot::models::{Dataset, Index};
use quickplot::viz::{DualAxisConfig, RenderContext, dual_axis_layout};

fn daily() -> Dataset {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..10).map(|i| start + chrono::Days::new(i)).collect();
    let revenue: Vec<f64> = (0..10).map(|i| 1000.0 + 500.0 * i as f64).collect();
    let rate: Vec<f64> = (0..10).map(|i| 10.0 + 5.0 * i as f64).collect();
    Dataset::new()
        .with_column("revenue", revenue)
        .unwrap()
        .with_column("rate", rate)
        .unwrap()
        .with_index(Index::dates(Some("date"), dates))
        .unwrap()
}

fn labels(axis: &quickplot::viz::axis::AxisLayout) -> Vec<&str> {
    axis.ticks.iter().map(|t| t.label.as_str()).collect()
}

#[test]
fn date_index_gives_date_labels_inside_the_range() {
    let layout = dual_axis_layout(
        &RenderContext::default(),
        &daily(),
        &DualAxisConfig::new("revenue", "rate"),
    )
    .unwrap();
    let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    assert!(layout.x_axis.ticks.len() >= 2);
    for tick in &layout.x_axis.ticks {
        let d = NaiveDate::parse_from_str(&tick.label, "%Y-%m-%d").unwrap();
        assert!(d >= first && d <= last, "{d} outside the index");
    }
    assert_eq!(layout.x_axis.title.as_deref(), Some("date"));
    assert_eq!(layout.left.points.len(), 10);
    assert_eq!(layout.right.points.len(), 10);
}

#[test]
fn each_axis_uses_its_own_format() {
    let mut cfg = DualAxisConfig::new("revenue", "rate");
    cfg.left_y_as_usd = true;
    cfg.right_y_as_pct = true;
    let layout = dual_axis_layout(&RenderContext::default(), &daily(), &cfg).unwrap();

    let left = labels(&layout.left.axis);
    assert_eq!(left.first(), Some(&"$1K"));
    assert_eq!(left.last(), Some(&"$6K"));
    let right = labels(&layout.right.axis);
    assert_eq!(right, vec!["10%", "20%", "30%", "40%", "50%", "60%"]);

    assert_eq!(layout.left.axis.title.as_deref(), Some("revenue"));
    assert_eq!(layout.right.axis.title.as_deref(), Some("rate"));
    assert_eq!(layout.left.color, (0, 143, 213));
    assert_eq!(layout.right.color, (109, 144, 79));
}

#[test]
fn explicit_titles_override_defaults() {
    let mut cfg = DualAxisConfig::new("revenue", "rate");
    cfg.xlab = Some(String::new());
    cfg.left_ylab = Some("Revenue".into());
    cfg.title = Some("Daily".into());
    let layout = dual_axis_layout(&RenderContext::default(), &daily(), &cfg).unwrap();
    assert_eq!(layout.x_axis.title, None);
    assert_eq!(layout.left.axis.title.as_deref(), Some("Revenue"));
    assert_eq!(layout.title.as_deref(), Some("Daily"));
}

#[test]
fn row_positions_without_index() {
    let mut b: Vec<Option<f64>> = (1..=10).map(|v| Some(v as f64)).collect();
    b[1] = None;
    let data = Dataset::new()
        .with_column("a", (0..10).map(|v| v as f64).collect::<Vec<f64>>())
        .unwrap()
        .with_column("b", b)
        .unwrap();
    let layout =
        dual_axis_layout(&RenderContext::default(), &data, &DualAxisConfig::new("a", "b")).unwrap();
    assert_eq!(labels(&layout.x_axis), vec!["0", "2", "4", "6", "8"]);
    assert_eq!(layout.x_axis.title, None);
    assert_eq!(layout.right.points.len(), 9);
}

#[test]
fn unknown_series_is_an_error() {
    let cfg = DualAxisConfig::new("revenue", "missing");
    assert!(dual_axis_layout(&RenderContext::default(), &daily(), &cfg).is_err());
}

#[test]
fn constant_huge_series_keeps_its_points_on_the_axis() {
    let data = Dataset::new()
        .with_column("a", vec![1e20; 3])
        .unwrap()
        .with_column("b", vec![1.0, 2.0, 3.0])
        .unwrap();
    let layout =
        dual_axis_layout(&RenderContext::default(), &data, &DualAxisConfig::new("a", "b")).unwrap();
    let (lo, hi) = layout.left.axis.range;
    assert!(lo < 1e20 && hi > 1e20, "range {lo}..{hi}");
    assert!(layout.left.axis.ticks.len() >= 2);
    assert!(layout.left.axis.ticks.iter().all(|t| t.value > 0.0));
}
