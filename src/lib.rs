//! quickplot
//!
//! Quick statistical charts with human-readable numbers. Values are shown the
//! way people read them in reports: `1.5K`, `$2M`, `35%`.
//!
//! ### Features
//! - Abbreviate numbers with magnitude suffixes and an optional `$` prefix
//! - Dodged bar plots of group means with value annotations
//! - Histograms with density curve and rug, faceted by group
//! - Two line series on independent y-axes over a date or numeric index
//! - SVG or PNG output, picked from the file extension
//!
//! ### Example
//! ```no_run
//! use quickplot::format::{FormatSpec, human_format};
//! use quickplot::models::Dataset;
//! use quickplot::viz::{BarPlotConfig, RenderContext, dodged_barplot};
//!
//! assert_eq!(human_format(1500.0, &FormatSpec::number(1))?, "1.5K");
//!
//! let data = Dataset::new()
//!     .with_column("region", vec!["North", "South", "North"])?
//!     .with_column("revenue", vec![1200.0, 2500.0, 1800.0])?;
//! let mut cfg = BarPlotConfig::new("region", "revenue");
//! cfg.y_as_usd = true;
//! let layout = dodged_barplot(&RenderContext::default(), &data, &cfg, "revenue.svg")?;
//! println!("{:?}", layout.y_axis.ticks);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod format;
pub mod models;
pub mod stats;
pub mod viz;

pub use error::{DataError, FormatError};
pub use format::{FormatSpec, human_format};
pub use models::{CellValue, ColumnData, Dataset, Index};
