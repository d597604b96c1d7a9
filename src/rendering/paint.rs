/// Display list produced by the builder and consumed by the rasterizer

use crate::color::Rgb;
use crate::font::Typeface;
use crate::Dimensions;

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Flood the whole canvas
    Fill { rgb: Rgb },
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgb: Rgb,
    },
    /// `y` is the baseline of the text
    Text {
        x: i32,
        y: i32,
        text: String,
        rgb: Rgb,
    },
}

/// Everything needed to rasterize one placeholder
#[derive(Clone)]
pub struct Scene {
    pub size: Dimensions,
    pub commands: Vec<PaintCommand>,
    /// Present whenever `commands` contains text
    pub typeface: Option<Typeface>,
}

impl Scene {
    pub fn new(size: Dimensions) -> Self {
        Self {
            size,
            commands: Vec::new(),
            typeface: None,
        }
    }

    pub fn push(&mut self, cmd: PaintCommand) {
        self.commands.push(cmd);
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::SolidRect { .. }))
            .count()
    }

    pub fn caption(&self) -> Option<&str> {
        self.commands.iter().find_map(|c| match c {
            PaintCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("size", &self.size)
            .field("commands", &self.commands)
            .field("typeface", &self.typeface.as_ref().map(|t| t.scale))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_counts_rects_and_finds_caption() {
        let mut scene = Scene::new(Dimensions { width: 10, height: 10 });
        scene.push(PaintCommand::Fill { rgb: Rgb::BLACK });
        scene.push(PaintCommand::SolidRect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            rgb: Rgb { r: 255, g: 0, b: 0 },
        });
        assert_eq!(scene.rect_count(), 1);
        assert_eq!(scene.caption(), None);

        scene.push(PaintCommand::Text {
            x: 1,
            y: 8,
            text: "hi".into(),
            rgb: Rgb::WHITE,
        });
        assert_eq!(scene.caption(), Some("hi"));
    }
}
