//! The placeholder builder
//!
//! Setters take the builder by value and hand it back, so a configuration is
//! owned by exactly one builder. `generate` only borrows it and can be called
//! again with the same or a modified configuration.

use crate::color::{ColorSpec, Rgb};
use crate::font::{FontSource, Typeface, DEFAULT_FONT_SIZE};
use crate::options::{OutputFormat, RenderMode, SizeClass};
use crate::rendering::layout::{center_text, random_rect};
use crate::rendering::paint::{PaintCommand, Scene};
use crate::rendering::raster;
use crate::text::strip_markup;
use crate::{abs_u32, Error, PlaceholderConfig, Result};
use image::RgbImage;
use log::debug;
use rand::Rng;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct ImagePlaceholderBuilder {
    config: PlaceholderConfig,
}

impl ImagePlaceholderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: PlaceholderConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &PlaceholderConfig {
        &self.config
    }

    pub fn into_config(self) -> PlaceholderConfig {
        self.config
    }

    /// `png`, `jpg` or `gif`; anything else selects PNG.
    pub fn format(mut self, spec: &str) -> Self {
        self.config.format = OutputFormat::from_spec(spec);
        self
    }

    /// Font directory, file name and pixel size. Missing or empty values
    /// select the bundled font and a size of 32.
    pub fn font(mut self, path: Option<&Path>, name: Option<&str>, size: Option<i64>) -> Self {
        self.config.font_path = path.filter(|p| !p.as_os_str().is_empty()).map(Path::to_path_buf);
        self.config.font_name = name.filter(|n| !n.is_empty()).map(str::to_string);
        self.config.font_size = match size.map(abs_u32) {
            Some(s) if s > 0 => s,
            _ => DEFAULT_FONT_SIZE,
        };
        self
    }

    /// Canvas size. Negative values count by their magnitude; zero leaves
    /// that dimension as it was.
    pub fn size(mut self, width: i64, height: i64) -> Self {
        let (width, height) = (abs_u32(width), abs_u32(height));
        if width > 0 {
            self.config.size.width = width;
        }
        if height > 0 {
            self.config.size.height = height;
        }
        self
    }

    /// Caption mode (`empty`, `size` or `text`, defaulting to `size`) and the
    /// caption used in `text` mode.
    pub fn render(mut self, mode: &str, text: &str) -> Self {
        self.config.render_mode = RenderMode::from_spec(mode);
        self.config.render_text = strip_markup(text);
        self
    }

    /// Background color spec and, optionally, text color spec.
    ///
    /// Without a text color: white on `dark-random`, black on `light-random`,
    /// and the background literal itself otherwise.
    pub fn colors(mut self, background: &str, text: Option<&str>) -> Self {
        let background = ColorSpec::parse(background);
        self.config.text_color = match text.filter(|t| !t.is_empty()) {
            Some(t) => ColorSpec::parse(t),
            None => match &background {
                ColorSpec::DarkRandom => ColorSpec::Literal(Rgb::WHITE.to_hex()),
                ColorSpec::LightRandom => ColorSpec::Literal(Rgb::BLACK.to_hex()),
                literal @ ColorSpec::Literal(_) => literal.clone(),
            },
        };
        self.config.background = background;
        self
    }

    /// Decorative rectangles drawn under the caption. A count of zero
    /// disables them.
    pub fn rectangles(mut self, count: i64, size_class: &str, color: &str) -> Self {
        self.config.rectangle_count = abs_u32(count);
        self.config.rectangle_size = SizeClass::from_spec(size_class);
        self.config.rectangle_color = ColorSpec::parse(color);
        self
    }

    /// Default output directory used when `generate` is not given one.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    /// Text to print for the current render mode, if any.
    pub fn caption(&self) -> Option<String> {
        let cfg = &self.config;
        let text = match cfg.render_mode {
            RenderMode::Empty => return None,
            RenderMode::Size => format!("{} x {}", cfg.size.width, cfg.size.height),
            RenderMode::Text => cfg.render_text.clone(),
        };
        Some(text).filter(|t| !t.is_empty())
    }

    /// Resolve colors and geometry into a display list.
    pub fn scene<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Scene> {
        let background = self.config.background.resolve(rng);
        let text_color = self.config.text_color.resolve(rng);
        self.build_scene(rng, background, text_color)
    }

    /// Draw the placeholder in memory.
    pub fn rasterize_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RgbImage> {
        raster::rasterize(&self.scene(rng)?)
    }

    /// Draw the placeholder and write it to `output_dir` (or the configured
    /// default directory). Returns the path of the written file.
    ///
    /// Without a `name`, one is derived from the size, colors, render mode,
    /// the current time and a random number.
    ///
    /// Without `output_dir` and without a configured default, the file goes
    /// to the current working directory rather than the system temp
    /// directory.
    pub fn generate(&self, name: Option<&str>, output_dir: Option<&Path>) -> Result<PathBuf> {
        self.generate_with_rng(name, output_dir, &mut rand::thread_rng())
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        name: Option<&str>,
        output_dir: Option<&Path>,
        rng: &mut R,
    ) -> Result<PathBuf> {
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| self.config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        check_output_dir(&dir)?;

        let background = self.config.background.resolve(rng);
        let text_color = self.config.text_color.resolve(rng);

        let ext = self.config.format.extension();
        let file_name = match name.filter(|n| !n.is_empty()) {
            Some(n) => format!("{}.{}", n, ext),
            None => format!("{}.{}", self.synthesize_name(background, text_color, rng), ext),
        };

        let scene = self.build_scene(rng, background, text_color)?;
        let canvas = raster::rasterize(&scene)?;

        let path = dir.join(file_name);
        raster::write_image(canvas, self.config.format, &path)?;
        Ok(path)
    }

    fn synthesize_name<R: Rng + ?Sized>(&self, background: Rgb, text: Rgb, rng: &mut R) -> String {
        format!(
            "placeholder-{}-{}-{}-{}-{}-{}-{}",
            self.config.size.width,
            self.config.size.height,
            background.hex_digits(),
            text.hex_digits(),
            self.config.render_mode.as_str(),
            chrono::Utc::now().timestamp(),
            rng.gen_range(1000..=9999)
        )
    }

    fn build_scene<R: Rng + ?Sized>(&self, rng: &mut R, background: Rgb, text_color: Rgb) -> Result<Scene> {
        let cfg = &self.config;
        let mut scene = Scene::new(cfg.size);
        scene.push(PaintCommand::Fill { rgb: background });

        for _ in 0..cfg.rectangle_count {
            let rgb = cfg.rectangle_color.resolve(rng);
            let rect = random_rect(rng, cfg.size, cfg.rectangle_size);
            scene.push(PaintCommand::SolidRect {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                rgb,
            });
        }

        if let Some(text) = self.caption() {
            let source = FontSource::from_parts(cfg.font_path.as_deref(), cfg.font_name.as_deref());
            let face = Typeface::new(source.load()?, cfg.font_size);
            let (text_width, text_height) = face.measure(&text);
            let origin = center_text(cfg.size, text_width, text_height);
            debug!(
                "caption '{}' measures {}x{}, drawn at ({}, {})",
                text, text_width, text_height, origin.x, origin.y
            );
            scene.push(PaintCommand::Text {
                x: origin.x,
                y: origin.y,
                text,
                rgb: text_color,
            });
            scene.typeface = Some(face);
        }

        debug!(
            "scene {}x{}: background {}, {} rectangle(s)",
            cfg.size.width,
            cfg.size.height,
            background.to_hex(),
            scene.rect_count()
        );
        Ok(scene)
    }
}

fn check_output_dir(dir: &Path) -> Result<()> {
    let meta = std::fs::metadata(dir)
        .map_err(|e| Error::IoError(format!("output directory {} is not accessible: {}", dir.display(), e)))?;
    if !meta.is_dir() {
        return Err(Error::IoError(format!("{} is not a directory", dir.display())));
    }
    // Permission bits only (ignores ACLs and the effective user); a denied
    // write still surfaces as IoError from write_image.
    if meta.permissions().readonly() {
        return Err(Error::IoError(format!("output directory {} is not writable", dir.display())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_size_keeps_previous_dimensions() {
        let b = ImagePlaceholderBuilder::new().size(800, 600).size(0, 0);
        assert_eq!(b.config().size.width, 800);
        assert_eq!(b.config().size.height, 600);

        let b = b.size(0, -300);
        assert_eq!(b.config().size.width, 800);
        assert_eq!(b.config().size.height, 300);
    }

    #[test]
    fn bogus_render_mode_becomes_size() {
        let b = ImagePlaceholderBuilder::new().render("bogus", "X");
        assert_eq!(b.config().render_mode, RenderMode::Size);
        assert_eq!(b.config().render_text, "X");
        assert_eq!(b.caption().as_deref(), Some("1280 x 720"));
    }

    #[test]
    fn render_strips_markup() {
        let b = ImagePlaceholderBuilder::new().render("text", "<em>Hero</em> image");
        assert_eq!(b.caption().as_deref(), Some("Hero image"));
        assert_eq!(ImagePlaceholderBuilder::new().render("empty", "x").caption(), None);
    }

    #[test]
    fn invalid_format_resets_to_png() {
        let b = ImagePlaceholderBuilder::new().format("gif");
        assert_eq!(b.config().format, OutputFormat::Gif);
        let b = b.format("tga");
        assert_eq!(b.config().format, OutputFormat::Png);
    }

    #[test]
    fn font_defaults_and_abs_size() {
        let b = ImagePlaceholderBuilder::new().font(None, None, Some(-18));
        assert_eq!(b.config().font_size, 18);
        let b = b.font(Some(Path::new("/fonts")), Some(""), Some(0));
        assert_eq!(b.config().font_size, DEFAULT_FONT_SIZE);
        assert_eq!(b.config().font_path.as_deref(), Some(Path::new("/fonts")));
        assert_eq!(b.config().font_name, None);
    }

    #[test]
    fn text_color_is_derived_from_background() {
        let b = ImagePlaceholderBuilder::new().colors("dark-random", None);
        assert_eq!(b.config().text_color, ColorSpec::Literal("#ffffff".into()));

        let b = b.colors("light-random", Some(""));
        assert_eq!(b.config().text_color, ColorSpec::Literal("#000000".into()));

        // literal background doubles as the text color
        let b = b.colors("#336699", None);
        assert_eq!(b.config().background, ColorSpec::Literal("#336699".into()));
        assert_eq!(b.config().text_color, ColorSpec::Literal("#336699".into()));

        let b = b.colors("#336699", Some("light-random"));
        assert_eq!(b.config().text_color, ColorSpec::LightRandom);
    }

    #[test]
    fn small_rectangles_stay_within_quarter_extent() {
        let b = ImagePlaceholderBuilder::new()
            .render("empty", "")
            .rectangles(5, "small", "#ff0000");
        let mut rng = StdRng::seed_from_u64(11);
        let scene = b.scene(&mut rng).unwrap();
        assert_eq!(scene.rect_count(), 5);
        for cmd in &scene.commands {
            if let PaintCommand::SolidRect { width, height, rgb, .. } = cmd {
                assert!(width - 1 <= 1280 / 4);
                assert!(height - 1 <= 720 / 4);
                assert_eq!(*rgb, Rgb { r: 255, g: 0, b: 0 });
            }
        }
    }

    #[test]
    fn random_rectangle_colors_are_redrawn_per_rectangle() {
        let b = ImagePlaceholderBuilder::new()
            .render("empty", "")
            .rectangles(20, "medium", "light-random");
        let mut rng = StdRng::seed_from_u64(5);
        let scene = b.scene(&mut rng).unwrap();
        let colors: Vec<Rgb> = scene
            .commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::SolidRect { rgb, .. } => Some(*rgb),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 20);
        assert!(colors.iter().all(|c| c.r >= 128 && c.g >= 128 && c.b >= 128));
        assert!(colors.iter().any(|c| *c != colors[0]));
    }

    #[test]
    fn scene_puts_fill_first_and_caption_last() {
        let b = ImagePlaceholderBuilder::new()
            .colors("#000", Some("#fff"))
            .rectangles(2, "big", "#0f0");
        let mut rng = StdRng::seed_from_u64(9);
        let scene = b.scene(&mut rng).unwrap();
        assert_eq!(scene.commands.len(), 4);
        assert_eq!(scene.commands[0], PaintCommand::Fill { rgb: Rgb::BLACK });
        assert!(matches!(scene.commands[3], PaintCommand::Text { rgb: Rgb::WHITE, .. }));
        assert_eq!(scene.caption(), Some("1280 x 720"));
        assert!(scene.typeface.is_some());
    }

    #[test]
    fn caption_is_centered_on_its_measured_box() {
        let b = ImagePlaceholderBuilder::new();
        let mut rng = StdRng::seed_from_u64(2);
        let scene = b.scene(&mut rng).unwrap();
        let face = scene.typeface.as_ref().unwrap();
        let (w, h) = face.measure("1280 x 720");
        match &scene.commands[1] {
            PaintCommand::Text { x, y, .. } => {
                assert_eq!(*x, (1280 - w as i32) / 2);
                assert_eq!(*y, (720 + h as i32) / 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn missing_output_dir_is_an_io_error() {
        let b = ImagePlaceholderBuilder::new();
        let res = b.generate(Some("x"), Some(Path::new("/definitely/not/a/dir")));
        assert!(matches!(res, Err(Error::IoError(_))));
    }

    #[test]
    fn missing_font_fails_before_writing() {
        let dir = std::env::temp_dir().join("placeholder_image_unit_font");
        std::fs::create_dir_all(&dir).unwrap();
        let b = ImagePlaceholderBuilder::new().font(Some(Path::new("/no/such/fonts")), None, None);
        let res = b.generate(Some("never"), Some(&dir));
        assert!(matches!(res, Err(Error::FontError(_))));
        assert!(!dir.join("never.png").exists());
    }
}
