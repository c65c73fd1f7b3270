use image::{imageops, imageops::FilterType, RgbaImage};
use log::debug;
use qrcode::{Color as ModuleColor, EcLevel, QrCode};

use crate::color::ColorPair;
use crate::error::{StampError, StampResult};

// QR rendering
//------------------------------------------------------------------------------

/// Pixels per module before the final resize.
const BOX_SIZE: u32 = 10;

/// Encode `url` and paint the module grid into a square image of exactly
/// `size` pixels, with a quiet zone of `border` modules on each side.
///
/// Error correction is pinned at level H so the code stays scannable under a
/// center logo overlay.
pub fn render_qr(url: &str, size: u32, border: u32, colors: ColorPair) -> StampResult<RgbaImage> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::H)
        .map_err(|e| StampError::EncodingFailure(e.to_string()))?;
    let modules = code.to_colors();
    let width = code.width() as u32;
    debug!("encoded {} bytes into a {width}x{width} module grid", url.len());

    let px = (width + 2 * border) * BOX_SIZE;
    let mut img = RgbaImage::from_pixel(px, px, colors.bg);
    for (i, module) in modules.iter().enumerate() {
        if *module != ModuleColor::Dark {
            continue;
        }
        let mx = (i as u32 % width + border) * BOX_SIZE;
        let my = (i as u32 / width + border) * BOX_SIZE;
        for dy in 0..BOX_SIZE {
            for dx in 0..BOX_SIZE {
                img.put_pixel(mx + dx, my + dy, colors.fg);
            }
        }
    }

    if px != size {
        img = imageops::resize(&img, size, size, FilterType::Lanczos3);
    }
    Ok(img)
}
