//! Caller-owned rendering context.
//!
//! Everything a chart needs besides its data and per-call config lives here:
//! resolution, locale for plain tick labels, palette, fonts. Nothing about
//! the "current figure" is kept between calls.

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::util::FIVETHIRTYEIGHT;

/// Fonts tried in order when the caller does not name one.
const SYSTEM_FONT_CANDIDATES: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// The `ab_glyph` registry is process-wide; remember what went into it.
static REGISTERED_FONT: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Font sizes in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub title: u32,
    pub axis_title: u32,
    pub tick: u32,
    pub annotation: u32,
    pub legend: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 20,
            axis_title: 15,
            tick: 12,
            annotation: 12,
            legend: 13,
        }
    }
}

/// Figure settings shared by all plot calls made with it.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Pixels per inch used to turn config sizes into image sizes.
    pub dpi: f64,
    /// Locale tag for plain tick labels (`en`, `de`, ...).
    pub locale: String,
    pub palette: Vec<RGBColor>,
    pub background: RGBColor,
    pub fonts: FontSizes,
    font_file: Option<PathBuf>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            dpi: 100.0,
            locale: "en".to_string(),
            palette: FIVETHIRTYEIGHT.to_vec(),
            background: WHITE,
            fonts: FontSizes::default(),
            font_file: None,
        }
    }
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = tag.into();
        self
    }

    pub fn with_palette(mut self, palette: Vec<RGBColor>) -> Self {
        self.palette = palette;
        self
    }

    /// Use this TrueType file instead of searching the usual system locations.
    pub fn with_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_file = Some(path.into());
        self
    }

    /// Font file this context would register, if one can be found.
    pub fn resolve_font_file(&self) -> Option<PathBuf> {
        match &self.font_file {
            Some(p) => p.is_file().then(|| p.clone()),
            None => SYSTEM_FONT_CANDIDATES
                .iter()
                .map(Path::new)
                .find(|p| p.is_file())
                .map(Path::to_path_buf),
        }
    }

    /// Register the "sans-serif" family with plotters' `ab_glyph` text path.
    ///
    /// `ab_glyph` does not discover OS fonts. Only the first successful call
    /// registers a font; later calls are no-ops.
    pub fn ensure_font(&self) -> Result<()> {
        let mut registered = REGISTERED_FONT
            .lock()
            .map_err(|_| anyhow!("font registry lock poisoned"))?;
        if let Some(path) = registered.as_ref() {
            debug!("font already registered from {}", path.display());
            return Ok(());
        }
        let path = self.resolve_font_file().ok_or_else(|| {
            anyhow!(
                "no usable TrueType font found; pass one with RenderContext::with_font_file"
            )
        })?;
        let bytes = std::fs::read(&path)
            .with_context(|| format!("reading font file {}", path.display()))?;
        // plotters keeps a 'static reference for the life of the process
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, bytes)
            .map_err(|_| anyhow!("{} is not a valid TrueType font", path.display()))?;
        info!("registered sans-serif font from {}", path.display());
        *registered = Some(path);
        Ok(())
    }
}
