use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut, text_size};
use log::{debug, warn};

// Caption strip
//------------------------------------------------------------------------------

/// Strip height as a fraction of the QR height.
const STRIP_RATIO: f32 = 0.18;
/// Text size as a fraction of the strip height.
const TEXT_SCALE_RATIO: f32 = 0.38;
/// Opacity of the divider line between the code and the strip.
const DIVIDER_ALPHA: f32 = 40.0 / 255.0;

const FONT_CANDIDATES: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

/// Load the caption font from `explicit` when given, otherwise probe
/// well-known system font locations.
pub fn load_font(explicit: Option<&Path>) -> Option<FontVec> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }
    candidates.extend(FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in candidates {
        let Ok(bytes) = fs::read(&path) else { continue };
        match FontVec::try_from_vec(bytes) {
            Ok(font) => {
                debug!("caption font: {}", path.display());
                return Some(font);
            }
            Err(_) => debug!("not a usable font: {}", path.display()),
        }
    }
    None
}

/// Return a new canvas with a caption strip appended below `base`.
///
/// The strip carries a faint divider line and the caption centered in
/// `text_color`. Without a font the strip and divider are still drawn and the
/// text is skipped with a warning.
pub fn add_caption(
    base: &RgbaImage,
    caption: &str,
    strip_bg: Rgba<u8>,
    text_color: Rgba<u8>,
    font: Option<&FontVec>,
) -> RgbaImage {
    let (w, h) = base.dimensions();
    let strip_h = (h as f32 * STRIP_RATIO) as u32;
    let mut canvas = RgbaImage::from_pixel(w, h + strip_h, strip_bg);
    imageops::replace(&mut canvas, base, 0, 0);

    let divider = blend_over(strip_bg, Rgba([0, 0, 0, 255]), DIVIDER_ALPHA);
    for dy in 0..2u32 {
        draw_line_segment_mut(
            &mut canvas,
            (w as f32 * 0.12, (h + dy) as f32),
            (w as f32 * 0.88, (h + dy) as f32),
            divider,
        );
    }

    match font {
        Some(font) => {
            let scale = PxScale::from(strip_h as f32 * TEXT_SCALE_RATIO);
            let (tw, th) = text_size(scale, font, caption);
            let tx = (w as i32 - tw as i32) / 2;
            let ty = h as i32 + (strip_h as i32 - th as i32) / 2;
            draw_text_mut(&mut canvas, text_color, tx, ty, scale, font, caption);
        }
        None => warn!("no usable caption font found; strip rendered without text"),
    }
    canvas
}

fn blend_over(base: Rgba<u8>, top: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let mix = |b: u8, t: u8| (b as f32 * (1.0 - alpha) + t as f32 * alpha).round() as u8;
    Rgba([mix(base.0[0], top.0[0]), mix(base.0[1], top.0[1]), mix(base.0[2], top.0[2]), 255])
}
