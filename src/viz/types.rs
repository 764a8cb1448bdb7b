//! Per-chart configuration structs and output kinds.
//!
//! Every field has the default the quick-plot helpers always had, so a
//! config can be built with `new(...)` and tweaked, or deserialized from a
//! partial JSON object.

use anyhow::{Result, anyhow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default figure width in inches.
pub const DEFAULT_WIDTH_IN: f64 = 10.0;
/// Default figure height in inches.
pub const DEFAULT_HEIGHT_IN: f64 = 4.0;
/// Default number of tick intervals on a formatted axis.
pub const DEFAULT_TICKS: usize = 8;

fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| anyhow!("invalid chart config: {e}"))
}

/// Dodged (grouped) bar chart options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarPlotConfig {
    /// Categorical column on the x-axis.
    pub x: String,
    /// Numeric column; bar height is its mean per group.
    pub y: String,
    /// Optional grouping column; one dodged bar per level.
    pub hue: Option<String>,
    pub title: Option<String>,
    /// Defaults to `x`; `Some("")` removes the label.
    pub xlab: Option<String>,
    /// Defaults to `y`; `Some("")` removes the label.
    pub ylab: Option<String>,
    pub y_as_pct: bool,
    pub y_as_usd: bool,
    pub y_decimals: usize,
    /// Number of y tick intervals when y holds floats.
    pub yticks: usize,
    pub alpha: f64,
    pub width: f64,
    pub height: f64,
    pub bar_label_decimals: usize,
}

impl Default for BarPlotConfig {
    fn default() -> Self {
        Self {
            x: String::new(),
            y: String::new(),
            hue: None,
            title: None,
            xlab: None,
            ylab: None,
            y_as_pct: false,
            y_as_usd: false,
            y_decimals: 0,
            yticks: DEFAULT_TICKS,
            alpha: 0.8,
            width: DEFAULT_WIDTH_IN,
            height: DEFAULT_HEIGHT_IN,
            bar_label_decimals: 0,
        }
    }
}

impl BarPlotConfig {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        from_json(text)
    }
}

/// Histogram (with density curve and rug) options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Numeric column to bin.
    pub x: String,
    /// Optional grouping column; one panel per level.
    pub group: Option<String>,
    pub nbins: usize,
    pub title: Option<String>,
    /// Defaults to `x`; `Some("")` removes the label.
    pub xlab: Option<String>,
    pub x_as_pct: bool,
    pub x_as_usd: bool,
    pub x_decimals: usize,
    pub xticks: usize,
    /// Hex colour for bars and density curve.
    pub color: String,
    pub alpha: f64,
    pub kde: bool,
    pub rug: bool,
    pub width: f64,
    pub height: f64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            x: String::new(),
            group: None,
            nbins: 50,
            title: None,
            xlab: None,
            x_as_pct: false,
            x_as_usd: false,
            x_decimals: 0,
            xticks: DEFAULT_TICKS,
            color: "#008FD5".to_string(),
            alpha: 0.4,
            kde: true,
            rug: true,
            width: DEFAULT_WIDTH_IN,
            height: DEFAULT_HEIGHT_IN,
        }
    }
}

impl HistogramConfig {
    pub fn new(x: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        from_json(text)
    }
}

/// Two series over the dataset index, each with its own y-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualAxisConfig {
    pub left_y: String,
    pub right_y: String,
    pub title: Option<String>,
    /// Defaults to the index name; `Some("")` removes the label.
    pub xlab: Option<String>,
    pub left_ylab: Option<String>,
    pub right_ylab: Option<String>,
    pub left_y_as_pct: bool,
    pub left_y_as_usd: bool,
    pub right_y_as_pct: bool,
    pub right_y_as_usd: bool,
    pub left_y_decimals: usize,
    pub right_y_decimals: usize,
    pub left_yticks: usize,
    pub right_yticks: usize,
    pub width: f64,
    pub height: f64,
}

impl Default for DualAxisConfig {
    fn default() -> Self {
        Self {
            left_y: String::new(),
            right_y: String::new(),
            title: None,
            xlab: None,
            left_ylab: None,
            right_ylab: None,
            left_y_as_pct: false,
            left_y_as_usd: false,
            right_y_as_pct: false,
            right_y_as_usd: false,
            left_y_decimals: 0,
            right_y_decimals: 0,
            left_yticks: DEFAULT_TICKS,
            right_yticks: DEFAULT_TICKS,
            width: DEFAULT_WIDTH_IN,
            height: DEFAULT_HEIGHT_IN,
        }
    }
}

impl DualAxisConfig {
    pub fn new(left_y: impl Into<String>, right_y: impl Into<String>) -> Self {
        Self {
            left_y: left_y.into(),
            right_y: right_y.into(),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        from_json(text)
    }
}

/// Image format, chosen from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Svg,
    Png,
}

impl OutputKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => Ok(OutputKind::Svg),
            Some("png") => Ok(OutputKind::Png),
            other => Err(anyhow!(
                "unsupported output extension {:?} for {}, expected .svg or .png",
                other.unwrap_or(""),
                path.display()
            )),
        }
    }
}

/// Resolve an optional axis title: `None` → default, `Some("")` → no title.
pub(crate) fn resolve_title(explicit: Option<&str>, default: Option<&str>) -> Option<String> {
    match explicit {
        Some(t) if t.trim().is_empty() => None,
        Some(t) => Some(t.to_string()),
        None => default.filter(|d| !d.is_empty()).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = BarPlotConfig::from_json(r#"{"x": "region", "y": "sales", "y_as_usd": true}"#)
            .unwrap();
        assert_eq!(cfg.x, "region");
        assert!(cfg.y_as_usd);
        assert_eq!(cfg.yticks, 8);
        assert_eq!(cfg.alpha, 0.8);
    }

    #[test]
    fn empty_title_removes_label() {
        assert_eq!(resolve_title(Some(""), Some("x")), None);
        assert_eq!(resolve_title(None, Some("x")), Some("x".into()));
        assert_eq!(resolve_title(Some("Custom"), Some("x")), Some("Custom".into()));
    }

    #[test]
    fn output_kind_from_extension() {
        assert_eq!(OutputKind::from_path(Path::new("a.SVG")).unwrap(), OutputKind::Svg);
        assert_eq!(OutputKind::from_path(Path::new("a.png")).unwrap(), OutputKind::Png);
        assert!(OutputKind::from_path(Path::new("a.pdf")).is_err());
    }
}
