use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use image::{DynamicImage, RgbaImage};

use qrstamp::{parse_color, StampBuilder, StampError, StampResult};

/// Generate a stylized QR code with an optional centered logo and caption.
#[derive(Parser, Debug)]
#[command(name = "qrstamp", version, about)]
struct Args {
    /// URL (or any text payload) to encode
    #[arg(long)]
    url: String,

    /// Output image file (PNG recommended for transparency)
    #[arg(long, default_value = "qr.png")]
    output: PathBuf,

    /// Final square size in pixels
    #[arg(long, default_value_t = 1200, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Quiet zone border in modules
    #[arg(long, default_value_t = 4)]
    border: u32,

    /// Foreground color (#RRGGBB or R,G,B)
    #[arg(long, default_value = "#222222")]
    fg: String,

    /// Background color (#RRGGBB or R,G,B)
    #[arg(long, default_value = "#FFFFFF")]
    bg: String,

    /// Path to a logo image for the center
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Derive foreground/background from the logo palette (overrides --fg/--bg)
    #[arg(long, requires = "logo")]
    use_logo_colors: bool,

    /// Logo width as a fraction of the QR size (0.10-0.30 recommended)
    #[arg(long, default_value_t = 0.20)]
    logo_scale: f32,

    /// Logo corner rounding ratio (0-0.5)
    #[arg(long, default_value_t = 0.25)]
    logo_round: f32,

    /// Caption drawn in a strip below the code
    #[arg(long)]
    caption: Option<String>,

    /// Caption strip background color
    #[arg(long, default_value = "#FFFFFF")]
    strip_bg: String,

    /// Caption text color
    #[arg(long, default_value = "#000000")]
    text_color: String,

    /// TTF/OTF font for the caption (well-known system fonts probed otherwise)
    #[arg(long)]
    font: Option<PathBuf>,
}

fn run(args: &Args) -> StampResult<()> {
    let fg = parse_color(&args.fg)?;
    let bg = parse_color(&args.bg)?;
    let strip_bg = parse_color(&args.strip_bg)?;
    let text_color = parse_color(&args.text_color)?;

    let mut builder = StampBuilder::new(&args.url);
    builder
        .size(args.size)
        .border(args.border)
        .fg(fg)
        .bg(bg)
        .use_logo_colors(args.use_logo_colors)
        .logo_scale(args.logo_scale)
        .logo_round(args.logo_round)
        .strip_bg(strip_bg)
        .text_color(text_color);
    if let Some(logo) = &args.logo {
        builder.logo(logo);
    }
    if let Some(caption) = &args.caption {
        builder.caption(caption);
    }
    if let Some(font) = &args.font {
        builder.font(font);
    }

    let img = builder.build()?;
    save_output(img, &args.output)?;
    println!("Saved: {}", args.output.display());
    Ok(())
}

/// Save by extension; formats without an alpha channel get the image
/// flattened to RGB first.
fn save_output(img: RgbaImage, path: &Path) -> StampResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let result = match ext.as_deref() {
        Some("jpg" | "jpeg") => DynamicImage::ImageRgba8(img).to_rgb8().save(path),
        _ => img.save(path),
    };
    result.map_err(|e| StampError::WriteFailure(format!("{}: {e}", path.display())))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
