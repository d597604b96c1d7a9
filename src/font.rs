//! Font resolution, loading and text measurement

use crate::{Error, Result};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use log::debug;
use std::path::{Path, PathBuf};

/// File name of the font shipped with the crate
pub const DEFAULT_FONT_NAME: &str = "DejaVuSansMono.ttf";

/// Pixel size used when none (or zero) is configured
pub const DEFAULT_FONT_SIZE: u32 = 32;

static BUNDLED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono.ttf");

/// Directory holding the fonts distributed with the crate.
pub fn bundled_font_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("fonts")
}

/// Where the caption font comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// The default font, embedded at compile time
    Bundled,
    /// A TrueType/OpenType file on disk
    File(PathBuf),
}

impl FontSource {
    /// Combine an optional directory and file name. Empty values count as
    /// missing; a missing directory means the bundled font directory and a
    /// missing name means [`DEFAULT_FONT_NAME`].
    pub fn from_parts(path: Option<&Path>, name: Option<&str>) -> Self {
        let path = path.filter(|p| !p.as_os_str().is_empty());
        let name = name.filter(|n| !n.is_empty());
        match (path, name) {
            (None, None) => FontSource::Bundled,
            (None, Some(DEFAULT_FONT_NAME)) => FontSource::Bundled,
            (None, Some(name)) => FontSource::File(bundled_font_dir().join(name)),
            (Some(dir), name) => FontSource::File(dir.join(name.unwrap_or(DEFAULT_FONT_NAME))),
        }
    }

    pub fn load(&self) -> Result<FontArc> {
        match self {
            FontSource::Bundled => FontArc::try_from_slice(BUNDLED_FONT)
                .map_err(|e| Error::FontError(format!("bundled font: {}", e))),
            FontSource::File(path) => {
                debug!("loading font from {}", path.display());
                let bytes = std::fs::read(path)
                    .map_err(|e| Error::FontError(format!("{}: {}", path.display(), e)))?;
                FontArc::try_from_vec(bytes)
                    .map_err(|e| Error::FontError(format!("{}: {}", path.display(), e)))
            }
        }
    }
}

/// A loaded font at a fixed pixel size
#[derive(Clone)]
pub struct Typeface {
    pub font: FontArc,
    pub scale: PxScale,
}

impl Typeface {
    pub fn new(font: FontArc, size: u32) -> Self {
        Self {
            font,
            scale: PxScale::from(size as f32),
        }
    }

    /// Bounding box `(width, height)` of `text` in pixels.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        imageproc::drawing::text_size(self.scale, &self.font, text)
    }

    /// Distance from the top of the line box to the baseline, in pixels.
    pub fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }
}
