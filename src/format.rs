//! Human-readable number formatting for tick labels and bar annotations.
//!
//! The central piece is [`human_format`]: it abbreviates a value with a
//! magnitude suffix (`1500` → `1.5K`) and optionally prefixes `$`.
//!
//! Rounding is whatever Rust's `{:.N}` produces: round-half-to-even on the
//! exact binary value, so `2.5` → `"2"` and `-1.5` → `"-2"`.

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::models::CellValue;

/// Suffixes indexed by how many times the value was divided by 1000.
pub const MAGNITUDE_SUFFIXES: [&str; 6] = ["", "K", "M", "B", "T", "P"];

/// How to render one number: currency prefix and fixed decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatSpec {
    use_currency: bool,
    decimal_places: usize,
}

impl FormatSpec {
    /// Checked constructor; negative `decimal_places` is rejected.
    pub fn new(use_currency: bool, decimal_places: i64) -> Result<Self, FormatError> {
        let decimal_places = usize::try_from(decimal_places).map_err(|_| {
            FormatError::InvalidArgument(format!(
                "decimal places must be non-negative, got {decimal_places}"
            ))
        })?;
        Ok(Self {
            use_currency,
            decimal_places,
        })
    }

    pub const fn number(decimal_places: usize) -> Self {
        Self {
            use_currency: false,
            decimal_places,
        }
    }

    pub const fn currency(decimal_places: usize) -> Self {
        Self {
            use_currency: true,
            decimal_places,
        }
    }

    pub fn use_currency(&self) -> bool {
        self.use_currency
    }

    pub fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    fn prefix(&self) -> &'static str {
        if self.use_currency { "$" } else { "" }
    }
}

/// Abbreviate `num` with a K/M/B/T/P suffix.
///
/// Zero (either sign) renders as `"0"` / `"$0"` regardless of decimals.
/// The sign stays on the scaled value after the currency symbol: `$-2K`.
pub fn human_format(num: f64, spec: &FormatSpec) -> Result<String, FormatError> {
    if !num.is_finite() {
        return Err(FormatError::TypeMismatch(num.to_string()));
    }
    if num == 0.0 {
        return Ok(format!("{}0", spec.prefix()));
    }

    let mut scaled = num;
    let mut magnitude = 0usize;
    while scaled.abs() >= 1000.0 {
        magnitude += 1;
        scaled /= 1000.0;
    }
    let suffix = MAGNITUDE_SUFFIXES
        .get(magnitude)
        .ok_or(FormatError::OutOfRange {
            value: num,
            magnitude,
        })?;

    Ok(format!(
        "{}{:.*}{}",
        spec.prefix(),
        spec.decimal_places,
        scaled,
        suffix
    ))
}

/// Same as [`human_format`] for a dynamically typed dataset cell.
pub fn format_cell(cell: &CellValue, spec: &FormatSpec) -> Result<String, FormatError> {
    match cell {
        CellValue::Int(v) => human_format(*v as f64, spec),
        CellValue::Float(v) => human_format(*v, spec),
        CellValue::Text(s) => Err(FormatError::TypeMismatch(format!("text '{s}'"))),
        CellValue::Missing => Err(FormatError::TypeMismatch("missing value".into())),
    }
}

/// `value / xmax * 100` with `decimals` places and a trailing `%`.
pub fn format_percent(value: f64, xmax: f64, decimals: usize) -> Result<String, FormatError> {
    if !(xmax.is_finite() && xmax > 0.0) {
        return Err(FormatError::InvalidArgument(format!(
            "percent scale must be positive, got {xmax}"
        )));
    }
    if !value.is_finite() {
        return Err(FormatError::TypeMismatch(value.to_string()));
    }
    Ok(format!("{:.*}%", decimals, value / xmax * 100.0))
}

/// Fixed-point with locale thousands grouping, e.g. `12,000.5` (en) or `12.000,5` (de).
pub fn format_grouped(value: f64, decimals: usize, locale_tag: &str) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::TypeMismatch(value.to_string()));
    }
    let (locale, dec_sep) = map_locale(locale_tag);
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let grouped = match int_part.parse::<u64>() {
        Ok(n) => n.to_formatted_string(locale),
        // beyond u64: leave the digits ungrouped
        Err(_) => int_part.to_string(),
    };
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    Ok(match frac_part {
        Some(f) => format!("{sign}{grouped}{dec_sep}{f}"),
        None => format!("{sign}{grouped}"),
    })
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Tick-label style for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisFormat {
    /// Fixed decimals with locale thousands grouping.
    Plain { decimals: usize },
    /// `$` plus abbreviated magnitude (`$1.5M`).
    Currency { decimals: usize },
    /// Abbreviated magnitude without a prefix (`1.5M`).
    Abbreviated { decimals: usize },
    /// `value / xmax * 100` with a `%` suffix.
    Percent { xmax: f64, decimals: usize },
}

impl AxisFormat {
    /// Resolve the `as_pct` / `as_usd` flag pair. Currency wins when both are set.
    pub fn from_flags(as_pct: bool, as_usd: bool, decimals: usize, pct_xmax: f64) -> Self {
        if as_usd {
            AxisFormat::Currency { decimals }
        } else if as_pct {
            AxisFormat::Percent {
                xmax: pct_xmax,
                decimals,
            }
        } else {
            AxisFormat::Plain { decimals }
        }
    }

    pub fn format(&self, value: f64, locale_tag: &str) -> Result<String, FormatError> {
        match *self {
            AxisFormat::Plain { decimals } => format_grouped(value, decimals, locale_tag),
            AxisFormat::Currency { decimals } => {
                human_format(value, &FormatSpec::currency(decimals))
            }
            AxisFormat::Abbreviated { decimals } => {
                human_format(value, &FormatSpec::number(decimals))
            }
            AxisFormat::Percent { xmax, decimals } => format_percent(value, xmax, decimals),
        }
    }
}

/// Text placed on top of (or under) each bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarLabelFormat {
    Fixed { decimals: usize },
    Currency { decimals: usize },
    Percent { decimals: usize },
}

impl BarLabelFormat {
    pub fn from_flags(as_pct: bool, as_usd: bool, decimals: usize) -> Self {
        if as_usd {
            BarLabelFormat::Currency { decimals }
        } else if as_pct {
            BarLabelFormat::Percent { decimals }
        } else {
            BarLabelFormat::Fixed { decimals }
        }
    }

    pub fn format(&self, value: f64) -> String {
        match *self {
            BarLabelFormat::Fixed { decimals } => format!("{:.*}", decimals, value),
            BarLabelFormat::Currency { decimals } => format!("${:.*}", decimals, value),
            BarLabelFormat::Percent { decimals } => format!("{:.*}%", decimals, value * 100.0),
        }
    }
}
