//! Plotters coordinate whose key points are exactly our precomputed ticks.
//!
//! Plotters normally picks its own tick positions; the charts here need the
//! granular ticks (min and max included) and must label them with the same
//! text the layouts report, so the axis hands plotters the tick list as-is.

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::ticks::Tick;

/// Axis title, visible range and labelled ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub title: Option<String>,
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl AxisLayout {
    /// Label for a value plotters asks about; empty when it is not one of our ticks.
    pub fn label_for(&self, value: f64) -> String {
        let span = (self.range.1 - self.range.0).abs().max(f64::MIN_POSITIVE);
        self.ticks
            .iter()
            .find(|t| (t.value - value).abs() <= span * 1e-9)
            .map(|t| t.label.clone())
            .unwrap_or_default()
    }

    pub fn coord(&self) -> TickedAxis {
        TickedAxis {
            lo: self.range.0,
            hi: self.range.1,
            ticks: self
                .ticks
                .iter()
                .map(|t| t.value)
                .filter(|v| *v >= self.range.0 && *v <= self.range.1)
                .collect(),
        }
    }
}

/// Linear f64 coordinate with fixed key points.
#[derive(Debug, Clone)]
pub struct TickedAxis {
    lo: f64,
    hi: f64,
    ticks: Vec<f64>,
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.hi - self.lo;
        let actual = limit.1 - limit.0;
        if span == 0.0 || actual == 0 {
            return limit.1;
        }
        let logic = (*value - self.lo) / span;
        limit.0 + (actual as f64 * logic + 1e-3).floor() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.lo..self.hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> AxisLayout {
        AxisLayout {
            title: None,
            range: (0.0, 10.0),
            ticks: vec![
                Tick { value: 0.0, label: "0".into() },
                Tick { value: 5.0, label: "5K".into() },
                Tick { value: 12.0, label: "12K".into() },
            ],
        }
    }

    #[test]
    fn maps_linearly_onto_pixels() {
        let c = axis().coord();
        assert_eq!(c.map(&0.0, (0, 100)), 0);
        assert_eq!(c.map(&5.0, (0, 100)), 50);
        assert_eq!(c.map(&10.0, (100, 0)), 0);
    }

    #[test]
    fn drops_ticks_outside_range() {
        let c = axis().coord();
        assert_eq!(c.key_points(3usize), vec![0.0, 5.0]);
    }

    #[test]
    fn labels_only_known_ticks() {
        let a = axis();
        assert_eq!(a.label_for(5.0), "5K");
        assert_eq!(a.label_for(5.5), "");
    }
}
