//! Color specs and their resolution to concrete RGB values

use log::warn;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

pub const DARK_RANDOM: &str = "dark-random";
pub const LIGHT_RANDOM: &str = "light-random";

const DARK_CHANNEL: RangeInclusive<u8> = 0..=127;
const LIGHT_CHANNEL: RangeInclusive<u8> = 128..=255;

fn hex_color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap())
}

/// A requested color: a literal `#RGB`/`#RRGGBB` value or a random range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorSpec {
    /// Each channel drawn from 0..=127
    DarkRandom,
    /// Each channel drawn from 128..=255
    LightRandom,
    /// Kept verbatim; validated only when resolved
    Literal(String),
}

impl ColorSpec {
    pub fn parse(spec: &str) -> Self {
        match spec {
            DARK_RANDOM => ColorSpec::DarkRandom,
            LIGHT_RANDOM => ColorSpec::LightRandom,
            other => ColorSpec::Literal(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ColorSpec::DarkRandom => DARK_RANDOM,
            ColorSpec::LightRandom => LIGHT_RANDOM,
            ColorSpec::Literal(s) => s,
        }
    }

    pub fn is_random(&self) -> bool {
        !matches!(self, ColorSpec::Literal(_))
    }

    /// Resolve to a concrete color. Random specs draw a fresh color on every
    /// call; an invalid literal resolves to black.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        let hex = process_color(self.as_str(), rng);
        Rgb::from_hex(&hex).unwrap_or_else(|| {
            warn!("invalid color '{}', falling back to black", self.as_str());
            Rgb::BLACK
        })
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ColorSpec {
    fn from(s: String) -> Self {
        ColorSpec::parse(&s)
    }
}

impl From<ColorSpec> for String {
    fn from(c: ColorSpec) -> Self {
        c.as_str().to_string()
    }
}

/// Returns `color` unchanged if it is a `#RGB` or `#RRGGBB` literal,
/// otherwise an empty string.
pub fn sanitize_color(color: &str) -> String {
    if hex_color_pattern().is_match(color) {
        color.to_string()
    } else {
        String::new()
    }
}

/// Turn a color spec string into a hex color string.
///
/// `dark-random` and `light-random` produce a fresh `#rrggbb` value; anything
/// else goes through [`sanitize_color`] and may come back empty.
pub fn process_color<R: Rng + ?Sized>(spec: &str, rng: &mut R) -> String {
    match spec {
        DARK_RANDOM => random_hex(rng, DARK_CHANNEL),
        LIGHT_RANDOM => random_hex(rng, LIGHT_CHANNEL),
        other => sanitize_color(other),
    }
}

fn random_hex<R: Rng + ?Sized>(rng: &mut R, channel: RangeInclusive<u8>) -> String {
    let r = rng.gen_range(channel.clone());
    let g = rng.gen_range(channel.clone());
    let b = rng.gen_range(channel);
    Rgb { r, g, b }.to_hex()
}

/// A resolved color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    /// Decode a `#RGB` or `#RRGGBB` string. Short form digits are doubled.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        if !hex_color_pattern().is_match(hex) {
            return None;
        }
        let digits = &hex[1..];
        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{}", self.hex_digits())
    }

    /// `rrggbb`, as used in generated file names
    pub fn hex_digits(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}
