use std::cmp::Reverse;
use std::collections::HashMap;

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};
use log::debug;

use crate::color::{contrast_ratio, luminance, ColorPair};

// Color selection
//------------------------------------------------------------------------------

/// Minimum readable luminance contrast between foreground and background.
pub const MIN_CONTRAST_RATIO: f32 = 2.5;

/// Logos whose mean luminance falls below this are treated as "dark"; their
/// extracted palettes tend to produce unreadable pairs, so the fallback wins.
pub const DARK_LOGO_LUMINANCE: f32 = 0.30;

/// Fallback near-black on near-white pair; comfortably above the contrast
/// threshold.
pub const DEFAULT_PAIR: ColorPair =
    ColorPair { fg: Rgba([20, 20, 20, 255]), bg: Rgba([245, 245, 245, 255]) };

const SAMPLE_SIZE: u32 = 64;
const MAX_CANDIDATES: usize = 6;
const OPAQUE_CUTOFF: u8 = 128;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Selection {
    /// Pair derived from the logo's dominant colors.
    Extracted(ColorPair),
    /// Logo was unsuitable (dark, near-monochrome or empty); fallback pair.
    Default(ColorPair),
}

impl Selection {
    pub fn pair(&self) -> ColorPair {
        match self {
            Self::Extracted(pair) | Self::Default(pair) => *pair,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted(_))
    }
}

#[derive(Debug, Copy, Clone)]
struct ColorCandidate {
    color: Rgba<u8>,
    weight: u32,
}

/// Propose a foreground/background pair from the logo's palette.
///
/// Never fails: unsuitable rasters degrade to [`DEFAULT_PAIR`]. The returned
/// pair always satisfies [`MIN_CONTRAST_RATIO`], and the result is a pure
/// function of the raster.
pub fn select_qr_colors(logo: &RgbaImage) -> Selection {
    let (candidates, mean_luma) = dominant_colors(logo);
    if candidates.is_empty() {
        return Selection::Default(DEFAULT_PAIR);
    }
    if mean_luma < DARK_LOGO_LUMINANCE {
        debug!("dark logo (mean luminance {mean_luma:.2}), using fallback pair");
        return Selection::Default(DEFAULT_PAIR);
    }

    let mut best: Option<(f32, ColorPair)> = None;
    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            let ratio = contrast_ratio(a.color, b.color);
            if ratio < MIN_CONTRAST_RATIO {
                continue;
            }
            if best.map_or(true, |(r, _)| ratio > r) {
                // darker color scans as foreground
                let (fg, bg) = if luminance(a.color) <= luminance(b.color) {
                    (a.color, b.color)
                } else {
                    (b.color, a.color)
                };
                best = Some((ratio, ColorPair { fg, bg }));
            }
        }
    }

    match best {
        Some((ratio, pair)) => {
            debug!("extracted pair with contrast {ratio:.2}");
            Selection::Extracted(pair)
        }
        None => Selection::Default(DEFAULT_PAIR),
    }
}

/// Bucket opaque pixels into dominant color candidates ranked by frequency,
/// alongside the mean sampled luminance. Large logos are downsampled first.
fn dominant_colors(logo: &RgbaImage) -> (Vec<ColorCandidate>, f32) {
    let (w, h) = logo.dimensions();
    if w == 0 || h == 0 {
        return (Vec::new(), 0.0);
    }

    let scaled;
    let pixels = if w > SAMPLE_SIZE || h > SAMPLE_SIZE {
        scaled = imageops::resize(logo, SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Nearest);
        &scaled
    } else {
        logo
    };

    // 8 levels per channel; candidate color is the bucket mean
    let mut buckets: HashMap<(u8, u8, u8), (u64, u64, u64, u32)> = HashMap::new();
    let mut luma_sum = 0.0f64;
    let mut opaque = 0u32;
    for px in pixels.pixels() {
        let [r, g, b, a] = px.0;
        if a < OPAQUE_CUTOFF {
            continue;
        }
        opaque += 1;
        luma_sum += luminance(*px) as f64;
        let entry = buckets.entry((r >> 5, g >> 5, b >> 5)).or_default();
        entry.0 += r as u64;
        entry.1 += g as u64;
        entry.2 += b as u64;
        entry.3 += 1;
    }
    if opaque == 0 {
        return (Vec::new(), 0.0);
    }

    let mut candidates: Vec<ColorCandidate> = buckets
        .into_values()
        .map(|(r, g, b, n)| ColorCandidate {
            color: Rgba([(r / n as u64) as u8, (g / n as u64) as u8, (b / n as u64) as u8, 255]),
            weight: n,
        })
        .collect();
    // full ordering keeps the selection deterministic across calls
    candidates.sort_unstable_by_key(|c| (Reverse(c.weight), c.color.0));
    candidates.truncate(MAX_CANDIDATES);

    (candidates, (luma_sum / opaque as f64) as f32)
}

#[cfg(test)]
mod palette_unit_tests {
    use super::*;

    #[test]
    fn test_default_pair_meets_threshold() {
        assert!(contrast_ratio(DEFAULT_PAIR.fg, DEFAULT_PAIR.bg) >= MIN_CONTRAST_RATIO);
    }

    #[test]
    fn test_zero_sized_raster_falls_back() {
        let empty = RgbaImage::new(0, 0);
        assert_eq!(select_qr_colors(&empty), Selection::Default(DEFAULT_PAIR));
    }

    #[test]
    fn test_fully_transparent_raster_falls_back() {
        let clear = RgbaImage::from_pixel(16, 16, Rgba([90, 10, 200, 0]));
        assert_eq!(select_qr_colors(&clear), Selection::Default(DEFAULT_PAIR));
    }

    #[test]
    fn test_dominant_colors_rank_by_frequency() {
        // 3:1 red to white
        let logo = RgbaImage::from_fn(16, 16, |x, _| {
            if x < 12 {
                Rgba([200, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let (candidates, _) = dominant_colors(&logo);
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].weight > candidates[1].weight);
        assert_eq!(candidates[0].color, Rgba([200, 0, 0, 255]));
    }
}
