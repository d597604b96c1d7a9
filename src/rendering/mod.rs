//! Rendering pipeline: layout geometry, display list and rasterizer
//!
//! The builder turns its configuration into a [`paint::Scene`] using the
//! helpers in [`layout`]; [`raster`] draws the scene and writes it to disk.

pub mod layout;
pub mod paint;
pub mod raster;

pub use layout::{Rect, TextOrigin};
pub use paint::{PaintCommand, Scene};
