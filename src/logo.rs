use std::path::Path;

use image::{imageops, imageops::FilterType, GrayImage, Luma, Rgba, RgbaImage};
use log::debug;

use crate::error::{StampError, StampResult};

// Logo overlay
//------------------------------------------------------------------------------

/// Padding around the logo, as a fraction of its smaller dimension.
const PAD_RATIO: f32 = 0.08;
/// Translucent white backdrop that keeps the logo readable over dark modules.
const PAD_COLOR: Rgba<u8> = Rgba([255, 255, 255, 230]);

/// Decode a logo file into an RGBA raster.
pub fn load_logo(path: &Path) -> StampResult<RgbaImage> {
    let img = image::open(path)
        .map_err(|e| StampError::InvalidImage(format!("{}: {e}", path.display())))?
        .to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(StampError::InvalidImage(format!("{}: zero-sized image", path.display())));
    }
    debug!("loaded logo {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img)
}

/// Paste the logo at the center of `base` over a translucent rounded pad.
///
/// The logo is shrunk only when wider than `base.width() * scale`, keeping its
/// aspect ratio; small logos are left at native resolution. Corners are
/// rounded with radius `min(w, h) * round_ratio`.
pub fn overlay_logo(base: &mut RgbaImage, mut logo: RgbaImage, scale: f32, round_ratio: f32) {
    let target_w = (base.width() as f32 * scale) as u32;
    if target_w > 0 && logo.width() > target_w {
        let aspect = logo.width() as f32 / logo.height() as f32;
        let new_h = ((target_w as f32 / aspect).round() as u32).max(1);
        logo = imageops::resize(&logo, target_w, new_h, FilterType::Lanczos3);
    }
    let (w, h) = logo.dimensions();

    let radius = (w.min(h) as f32 * round_ratio) as u32;
    if radius > 0 {
        let mask = rounded_mask(w, h, radius);
        for (x, y, px) in logo.enumerate_pixels_mut() {
            px.0[3] = px.0[3].min(mask.get_pixel(x, y).0[0]);
        }
    }

    let pad = (w.min(h) as f32 * PAD_RATIO) as u32;
    let (pw, ph) = (w + 2 * pad, h + 2 * pad);
    let mut backdrop = RgbaImage::new(pw, ph);
    let pad_mask = rounded_mask(pw, ph, radius + pad / 2);
    for (x, y, px) in backdrop.enumerate_pixels_mut() {
        if pad_mask.get_pixel(x, y).0[0] == 255 {
            *px = PAD_COLOR;
        }
    }

    let cx = (base.width() as i64 - pw as i64) / 2;
    let cy = (base.height() as i64 - ph as i64) / 2;
    imageops::overlay(base, &backdrop, cx, cy);
    imageops::overlay(base, &logo, cx + pad as i64, cy + pad as i64);
}

/// 255 inside the rounded rectangle, 0 outside.
fn rounded_mask(w: u32, h: u32, radius: u32) -> GrayImage {
    let r = radius.min(w / 2).min(h / 2) as f32;
    let (wf, hf) = (w as f32, h as f32);
    GrayImage::from_fn(w, h, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let dx = if px < r {
            r - px
        } else if px > wf - r {
            px - (wf - r)
        } else {
            0.0
        };
        let dy = if py < r {
            r - py
        } else if py > hf - r {
            py - (hf - r)
        } else {
            0.0
        };
        if dx * dx + dy * dy <= r * r {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

#[cfg(test)]
mod logo_tests {
    use super::*;

    #[test]
    fn test_rounded_mask_clips_corners_keeps_center() {
        let mask = rounded_mask(40, 40, 10);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(39, 0).0[0], 0);
        assert_eq!(mask.get_pixel(0, 39).0[0], 0);
        assert_eq!(mask.get_pixel(39, 39).0[0], 0);
        assert_eq!(mask.get_pixel(20, 20).0[0], 255);
        // edge midpoints are inside
        assert_eq!(mask.get_pixel(20, 0).0[0], 255);
        assert_eq!(mask.get_pixel(0, 20).0[0], 255);
    }

    #[test]
    fn test_overlay_keeps_base_dimensions() {
        let mut base = RgbaImage::from_pixel(300, 300, Rgba([255, 255, 255, 255]));
        let logo = RgbaImage::from_pixel(200, 100, Rgba([10, 120, 220, 255]));
        overlay_logo(&mut base, logo, 0.2, 0.25);
        assert_eq!(base.dimensions(), (300, 300));
        // center now carries the logo color, corner is untouched
        assert_eq!(base.get_pixel(150, 150).0, [10, 120, 220, 255]);
        assert_eq!(base.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_small_logo_is_not_upscaled() {
        let mut base = RgbaImage::from_pixel(1000, 1000, Rgba([255, 255, 255, 255]));
        let logo = RgbaImage::from_pixel(50, 50, Rgba([200, 30, 30, 255]));
        overlay_logo(&mut base, logo, 0.2, 0.0);
        // a 50px logo stays 50px even though the target width is 200px:
        // pixels 30px off-center are still white
        assert_eq!(base.get_pixel(500, 500).0, [200, 30, 30, 255]);
        assert_eq!(base.get_pixel(560, 500).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_load_logo_missing_file() {
        let err = load_logo(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, StampError::InvalidImage(_)));
    }
}
