//! # qrstamp
//!
//! Generate stylized QR codes: encode a URL, overlay a centered logo with
//! rounded corners, optionally derive the foreground/background pair from the
//! logo's palette, and append a caption strip.
//!
//! ## Features
//!
//! - **High error correction**: level H throughout, so the center logo does
//!   not break scanning
//! - **Palette-derived colors**: dominant logo colors are sampled and the best
//!   readable pair is picked; unsuitable logos fall back to near-black on
//!   near-white
//! - **Logo overlay**: rounded-corner mask and a translucent pad behind the
//!   logo
//! - **Caption strip**: centered TrueType text below the code
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qrstamp::StampBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = StampBuilder::new("https://example.com")
//!     .size(1200)
//!     .caption("Nali & Kioni • 18 Aug 2025")
//!     .build()?;
//! img.save("qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Picking colors from a logo
//!
//! ```rust
//! use image::{Rgba, RgbaImage};
//! use qrstamp::{select_qr_colors, Selection};
//!
//! let logo = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
//! // a plain white logo offers no usable contrast, so the fallback pair wins
//! assert!(matches!(select_qr_colors(&logo), Selection::Default(_)));
//! ```

pub mod builder;
pub mod caption;
pub mod color;
pub mod error;
pub mod logo;
pub mod palette;
pub mod render;

pub use builder::StampBuilder;
pub use color::{contrast_ratio, luminance, parse_color, ColorPair};
pub use error::{StampError, StampResult};
pub use palette::{select_qr_colors, Selection};
