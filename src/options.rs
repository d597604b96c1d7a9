//! Closed option sets accepted by the builder
//!
//! Every option has a strict `FromStr` implementation and a lossy
//! `from_spec` constructor. The builder only ever calls `from_spec`, so an
//! unknown string silently becomes the documented default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned by the strict parsers when a token is not part of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption(pub String);

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown option '{}'", self.0)
    }
}

impl std::error::Error for UnknownOption {}

/// Encoded file format of the generated image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Gif,
}

impl OutputFormat {
    /// Parse a format token, falling back to PNG.
    pub fn from_spec(spec: &str) -> Self {
        spec.parse().unwrap_or_default()
    }

    /// File extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Gif => "gif",
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpg => image::ImageFormat::Jpeg,
            OutputFormat::Gif => image::ImageFormat::Gif,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(OutputFormat::Png),
            "jpg" => Ok(OutputFormat::Jpg),
            "gif" => Ok(OutputFormat::Gif),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// What is drawn as the caption of the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RenderMode {
    /// No caption
    Empty,
    /// `"{width} x {height}"`
    #[default]
    Size,
    /// The configured render text
    Text,
}

impl RenderMode {
    /// Parse a render mode token, falling back to `Size`.
    pub fn from_spec(spec: &str) -> Self {
        spec.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Empty => "empty",
            RenderMode::Size => "size",
            RenderMode::Text => "text",
        }
    }
}

impl FromStr for RenderMode {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(RenderMode::Empty),
            "size" => Ok(RenderMode::Size),
            "text" => Ok(RenderMode::Text),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// Upper bound on the extent of a decorative rectangle, relative to the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SizeClass {
    #[default]
    Big,
    Medium,
    Small,
}

impl SizeClass {
    /// Parse a size class token; anything unknown behaves like `Big`.
    pub fn from_spec(spec: &str) -> Self {
        spec.parse().unwrap_or_default()
    }

    /// Divisor applied to the canvas dimensions to get the maximum extent.
    pub fn divisor(self) -> u32 {
        match self {
            SizeClass::Big => 1,
            SizeClass::Medium => 2,
            SizeClass::Small => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::Big => "big",
            SizeClass::Medium => "medium",
            SizeClass::Small => "small",
        }
    }
}

impl FromStr for SizeClass {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "big" => Ok(SizeClass::Big),
            "medium" => Ok(SizeClass::Medium),
            "small" => Ok(SizeClass::Small),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

// serde goes through the lossy constructors so config files get the same
// fallbacks as the builder setters.
impl From<String> for OutputFormat {
    fn from(s: String) -> Self {
        OutputFormat::from_spec(&s)
    }
}

impl From<OutputFormat> for String {
    fn from(f: OutputFormat) -> Self {
        f.extension().to_string()
    }
}

impl From<String> for RenderMode {
    fn from(s: String) -> Self {
        RenderMode::from_spec(&s)
    }
}

impl From<RenderMode> for String {
    fn from(m: RenderMode) -> Self {
        m.as_str().to_string()
    }
}

impl From<String> for SizeClass {
    fn from(s: String) -> Self {
        SizeClass::from_spec(&s)
    }
}

impl From<SizeClass> for String {
    fn from(c: SizeClass) -> Self {
        c.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_falls_back_to_png() {
        assert_eq!(OutputFormat::from_spec("gif"), OutputFormat::Gif);
        assert_eq!(OutputFormat::from_spec("jpg"), OutputFormat::Jpg);
        assert_eq!(OutputFormat::from_spec("webp"), OutputFormat::Png);
        assert_eq!(OutputFormat::from_spec("JPG"), OutputFormat::Png);
        assert!("bmp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn unknown_render_mode_falls_back_to_size() {
        assert_eq!(RenderMode::from_spec("bogus"), RenderMode::Size);
        assert_eq!(RenderMode::from_spec("empty"), RenderMode::Empty);
        assert_eq!(RenderMode::from_spec("text"), RenderMode::Text);
    }

    #[test]
    fn size_class_divisors() {
        assert_eq!(SizeClass::from_spec("small").divisor(), 4);
        assert_eq!(SizeClass::from_spec("medium").divisor(), 2);
        assert_eq!(SizeClass::from_spec("huge"), SizeClass::Big);
        assert_eq!(SizeClass::Big.divisor(), 1);
    }

    #[test]
    fn options_deserialize_leniently() {
        let f: OutputFormat = serde_json::from_str("\"tiff\"").unwrap();
        assert_eq!(f, OutputFormat::Png);
        let m: RenderMode = serde_json::from_str("\"empty\"").unwrap();
        assert_eq!(m, RenderMode::Empty);
        assert_eq!(serde_json::to_string(&SizeClass::Small).unwrap(), "\"small\"");
    }
}
