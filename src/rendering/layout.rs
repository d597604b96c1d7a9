/// Geometry for captions and decorative rectangles

use crate::options::SizeClass;
use crate::Dimensions;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Build from inclusive corner coordinates.
    pub fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Rect {
            x: saturating_i32(x1),
            y: saturating_i32(y1),
            width: x2.saturating_sub(x1).saturating_add(1),
            height: y2.saturating_sub(y1).saturating_add(1),
        }
    }

    /// Inclusive right edge
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64 - 1
    }

    /// Inclusive bottom edge
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64 - 1
    }
}

/// Draw origin for a caption: `x` is the left edge, `y` the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOrigin {
    pub x: i32,
    pub y: i32,
}

/// Center a text box of `text_width` x `text_height` on the canvas.
///
/// The vertical coordinate is a baseline, so it is pushed *down* by half the
/// text height rather than up.
pub fn center_text(canvas: Dimensions, text_width: u32, text_height: u32) -> TextOrigin {
    let x = (canvas.width as i64 - text_width as i64) / 2;
    let y = (canvas.height as i64 + text_height as i64) / 2;
    TextOrigin {
        x: clamp_i32(x),
        y: clamp_i32(y),
    }
}

/// Pick a random rectangle for the given size class.
///
/// The top-left corner lands anywhere on the canvas (edges included) and the
/// bottom-right corner at most `canvas / divisor` further along each axis, so
/// the rectangle may run past the canvas edge.
pub fn random_rect<R: Rng + ?Sized>(rng: &mut R, canvas: Dimensions, class: SizeClass) -> Rect {
    let max_x = canvas.width / class.divisor();
    let max_y = canvas.height / class.divisor();

    let x1 = rng.gen_range(0..=canvas.width);
    let y1 = rng.gen_range(0..=canvas.height);
    let x2 = rng.gen_range(x1..=x1.saturating_add(max_x));
    let y2 = rng.gen_range(y1..=y1.saturating_add(max_y));

    Rect::from_corners(x1, y1, x2, y2)
}

fn saturating_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
