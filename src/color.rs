use image::Rgba;

use crate::error::{StampError, StampResult};

// Color pair
//------------------------------------------------------------------------------

/// Foreground/background colors for the rendered code. Foreground is always
/// the darker of the two.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ColorPair {
    pub fg: Rgba<u8>,
    pub bg: Rgba<u8>,
}

// Parsing
//------------------------------------------------------------------------------

/// Parse `#RGB`, `#RRGGBB` or `R,G,B` into an opaque color.
pub fn parse_color(spec: &str) -> StampResult<Rgba<u8>> {
    let spec = spec.trim();
    if let Some(hex) = spec.strip_prefix('#') {
        if !hex.is_ascii() {
            return Err(StampError::InvalidColorSpec(spec.to_string()));
        }
        let hex = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return Err(StampError::InvalidColorSpec(spec.to_string())),
        };
        let mut channels = [0u8; 3];
        for (i, chunk) in [&hex[0..2], &hex[2..4], &hex[4..6]].iter().enumerate() {
            channels[i] = u8::from_str_radix(chunk, 16)
                .map_err(|_| StampError::InvalidColorSpec(spec.to_string()))?;
        }
        return Ok(Rgba([channels[0], channels[1], channels[2], 255]));
    }
    if spec.contains(',') {
        let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(StampError::InvalidColorSpec(spec.to_string()));
        }
        let mut channels = [0u8; 3];
        for (i, part) in parts.iter().enumerate() {
            channels[i] =
                part.parse().map_err(|_| StampError::InvalidColorSpec(spec.to_string()))?;
        }
        return Ok(Rgba([channels[0], channels[1], channels[2], 255]));
    }
    Err(StampError::InvalidColorSpec(spec.to_string()))
}

// Luminance & contrast
//------------------------------------------------------------------------------

/// Perceived luminance in 0..1, `L = 0.299R + 0.587G + 0.114B`.
pub fn luminance(color: Rgba<u8>) -> f32 {
    let [r, g, b, _] = color.0;
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0
}

/// Normalized luminance contrast between two colors; 1.0 means identical,
/// black on white is 21.
pub fn contrast_ratio(a: Rgba<u8>, b: Rgba<u8>) -> f32 {
    let (la, lb) = (luminance(a), luminance(b));
    let (hi, lo) = if la > lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

#[cfg(test)]
mod color_tests {
    use test_case::test_case;

    use super::*;

    #[test_case("#000000", [0, 0, 0]; "black hex")]
    #[test_case("#fff9f2", [255, 249, 242]; "lowercase hex")]
    #[test_case("#F00", [255, 0, 0]; "short hex")]
    #[test_case("  #222222 ", [34, 34, 34]; "padded hex")]
    #[test_case("12, 34, 56", [12, 34, 56]; "rgb triple")]
    fn test_parse_color(spec: &str, expected: [u8; 3]) {
        let rgba = parse_color(spec).unwrap();
        assert_eq!(rgba, Rgba([expected[0], expected[1], expected[2], 255]));
    }

    #[test_case(""; "empty")]
    #[test_case("#12345"; "five digits")]
    #[test_case("#gggggg"; "non hex digits")]
    #[test_case("1,2"; "two components")]
    #[test_case("1,2,3,4"; "four components")]
    #[test_case("256,0,0"; "channel out of range")]
    #[test_case("red"; "named color")]
    fn test_parse_color_rejects(spec: &str) {
        assert!(matches!(parse_color(spec), Err(StampError::InvalidColorSpec(_))));
    }

    #[test]
    fn test_luminance_endpoints() {
        assert_eq!(luminance(Rgba([0, 0, 0, 255])), 0.0);
        assert!((luminance(Rgba([255, 255, 255, 255])) - 1.0).abs() < 1e-5);
        // green dominates the weighting
        assert!(luminance(Rgba([0, 255, 0, 255])) > luminance(Rgba([255, 0, 0, 255])));
        assert!(luminance(Rgba([255, 0, 0, 255])) > luminance(Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn test_contrast_ratio_is_symmetric() {
        let (blue, white) = (Rgba([0, 0, 255, 255]), Rgba([255, 255, 255, 255]));
        assert_eq!(contrast_ratio(blue, white), contrast_ratio(white, blue));
        assert!(contrast_ratio(blue, white) > 6.0);
        assert_eq!(contrast_ratio(blue, blue), 1.0);
    }
}
