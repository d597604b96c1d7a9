//! Placeholder image generator
//!
//! Builds stand-in raster images of a given size, filled with a literal or
//! random background color, optionally decorated with random rectangles and
//! captioned with the image dimensions or a custom text.
//!
//! # Features
//!
//! - **Formats**: PNG (default), JPEG and GIF output
//! - **Random colors**: `dark-random` / `light-random` color specs
//! - **Lenient input**: unknown formats, modes and size classes fall back to
//!   their defaults instead of failing
//!
//! # Example
//!
//! ```no_run
//! use placeholder_image::ImagePlaceholderBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = ImagePlaceholderBuilder::new()
//!     .size(800, 600)
//!     .colors("light-random", None)
//!     .rectangles(5, "small", "dark-random")
//!     .generate(None, Some(std::path::Path::new("/tmp")))?;
//! println!("Wrote {}", path.display());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

pub mod builder;
pub mod color;
pub mod error;
pub mod font;
pub mod options;
pub mod rendering;
pub mod text;

pub use builder::ImagePlaceholderBuilder;
pub use color::{ColorSpec, Rgb};
pub use error::{Error, Result};
pub use options::{OutputFormat, RenderMode, SizeClass};

/// Caption used in `text` mode when none is configured
pub const DEFAULT_RENDER_TEXT: &str = "Lorem Ipsum";

/// Configuration for a placeholder
///
/// This is the state accumulated by [`ImagePlaceholderBuilder`]. It can also
/// be deserialized from JSON; missing fields take their defaults and invalid
/// option strings are normalized the same way the builder setters do it.
///
/// # Examples
///
/// ```
/// let cfg = placeholder_image::PlaceholderConfig::default();
/// assert_eq!(cfg.size.width, 1280);
/// assert_eq!(cfg.render_text, "Lorem Ipsum");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Output encoding
    pub format: OutputFormat,
    /// Canvas dimensions
    pub size: Dimensions,
    /// What to print on the image
    pub render_mode: RenderMode,
    /// Caption for `text` mode, markup already stripped
    pub render_text: String,
    /// Directory holding the font file (bundled font directory when unset)
    pub font_path: Option<PathBuf>,
    /// Font file name
    pub font_name: Option<String>,
    /// Font size in pixels
    #[serde(deserialize_with = "de_abs_u32")]
    pub font_size: u32,
    pub background: ColorSpec,
    pub text_color: ColorSpec,
    /// Number of decorative rectangles (0 disables them)
    #[serde(deserialize_with = "de_abs_u32")]
    pub rectangle_count: u32,
    pub rectangle_size: SizeClass,
    pub rectangle_color: ColorSpec,
    /// Default output directory for `generate` (current directory when unset)
    pub output_dir: Option<PathBuf>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            size: Dimensions::default(),
            render_mode: RenderMode::Size,
            render_text: DEFAULT_RENDER_TEXT.to_string(),
            font_path: None,
            font_name: None,
            font_size: font::DEFAULT_FONT_SIZE,
            background: ColorSpec::DarkRandom,
            text_color: ColorSpec::Literal("#ffffff".to_string()),
            rectangle_count: 0,
            rectangle_size: SizeClass::Big,
            rectangle_color: ColorSpec::LightRandom,
            output_dir: None,
        }
    }
}

impl PlaceholderConfig {
    /// Parse a JSON configuration and normalize it.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: PlaceholderConfig =
            serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))?;
        Ok(cfg.normalized())
    }

    /// Restore the invariants a hand-built or deserialized config may break:
    /// non-zero dimensions and font size, markup-free caption.
    pub fn normalized(mut self) -> Self {
        let defaults = Dimensions::default();
        if self.size.width == 0 {
            self.size.width = defaults.width;
        }
        if self.size.height == 0 {
            self.size.height = defaults.height;
        }
        if self.font_size == 0 {
            self.font_size = font::DEFAULT_FONT_SIZE;
        }
        self.render_text = text::strip_markup(&self.render_text);
        self
    }
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    #[serde(deserialize_with = "de_abs_u32")]
    pub width: u32,
    #[serde(deserialize_with = "de_abs_u32")]
    pub height: u32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Absolute value of any integer, saturated into `u32`.
pub(crate) fn abs_u32(v: i64) -> u32 {
    u32::try_from(v.unsigned_abs()).unwrap_or(u32::MAX)
}

fn de_abs_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(abs_u32)
}
