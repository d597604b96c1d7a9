use anyhow::Context;
use clap::Parser;
use placeholder_image::{ImagePlaceholderBuilder, PlaceholderConfig};
use std::path::PathBuf;

/// Generate a placeholder image and print its path
#[derive(Parser, Debug)]
#[command(name = "placeholder-image", version, about)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// png, jpg or gif
    #[arg(long)]
    format: Option<String>,

    /// empty, size or text
    #[arg(long)]
    mode: Option<String>,

    /// Caption for `--mode text`
    #[arg(long)]
    text: Option<String>,

    /// Background color: #RGB, #RRGGBB, dark-random or light-random
    #[arg(long)]
    background: Option<String>,

    #[arg(long)]
    text_color: Option<String>,

    #[arg(long)]
    font_path: Option<PathBuf>,

    #[arg(long)]
    font_name: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    font_size: Option<i64>,

    /// Number of decorative rectangles
    #[arg(long, allow_negative_numbers = true)]
    rectangles: Option<i64>,

    /// big, medium or small
    #[arg(long, default_value = "big")]
    rectangle_size: String,

    #[arg(long, default_value = "light-random")]
    rectangle_color: String,

    /// File name without extension (generated when omitted)
    #[arg(long)]
    name: Option<String>,

    /// Output directory
    #[arg(long)]
    output: Option<PathBuf>,
}

fn build(args: &Args) -> anyhow::Result<ImagePlaceholderBuilder> {
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            PlaceholderConfig::from_json(&json)?
        }
        None => PlaceholderConfig::default(),
    };
    let mut builder = ImagePlaceholderBuilder::from_config(config);

    if args.width.is_some() || args.height.is_some() {
        builder = builder.size(args.width.unwrap_or(0), args.height.unwrap_or(0));
    }
    if let Some(format) = &args.format {
        builder = builder.format(format);
    }
    if args.mode.is_some() || args.text.is_some() {
        let mode = args
            .mode
            .clone()
            .unwrap_or_else(|| builder.config().render_mode.as_str().to_string());
        let text = args
            .text
            .clone()
            .unwrap_or_else(|| builder.config().render_text.clone());
        builder = builder.render(&mode, &text);
    }
    if let Some(background) = &args.background {
        builder = builder.colors(background, args.text_color.as_deref());
    } else if let Some(text_color) = &args.text_color {
        let background = builder.config().background.to_string();
        builder = builder.colors(&background, Some(text_color));
    }
    if args.font_path.is_some() || args.font_name.is_some() || args.font_size.is_some() {
        let current = builder.config().clone();
        let path = args.font_path.clone().or(current.font_path);
        let name = args.font_name.clone().or(current.font_name);
        let size = args.font_size.unwrap_or(i64::from(current.font_size));
        builder = builder.font(path.as_deref(), name.as_deref(), Some(size));
    }
    if let Some(count) = args.rectangles {
        builder = builder.rectangles(count, &args.rectangle_size, &args.rectangle_color);
    }

    Ok(builder)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = build(&args).and_then(|builder| {
        builder
            .generate(args.name.as_deref(), args.output.as_deref())
            .context("generating placeholder")
    });

    match result {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("placeholder-image: {:#}", e);
            std::process::exit(1);
        }
    }
}
