use std::path::Path;

use image::{Rgba, RgbaImage};
use log::{debug, info};

use crate::caption::{add_caption, load_font};
use crate::color::ColorPair;
use crate::error::StampResult;
use crate::logo::{load_logo, overlay_logo};
use crate::palette::{select_qr_colors, Selection};
use crate::render::render_qr;

// Builder
//------------------------------------------------------------------------------

pub struct StampBuilder<'a> {
    url: &'a str,
    size: u32,
    border: u32,
    colors: ColorPair,
    use_logo_colors: bool,
    logo: Option<&'a Path>,
    logo_scale: f32,
    logo_round: f32,
    caption: Option<&'a str>,
    strip_bg: Rgba<u8>,
    text_color: Rgba<u8>,
    font: Option<&'a Path>,
}

impl<'a> StampBuilder<'a> {
    pub fn new(url: &'a str) -> Self {
        Self {
            url,
            size: 1200,
            border: 4,
            colors: ColorPair {
                fg: Rgba([0x22, 0x22, 0x22, 255]),
                bg: Rgba([255, 255, 255, 255]),
            },
            use_logo_colors: false,
            logo: None,
            logo_scale: 0.20,
            logo_round: 0.25,
            caption: None,
            strip_bg: Rgba([255, 255, 255, 255]),
            text_color: Rgba([0, 0, 0, 255]),
            font: None,
        }
    }

    pub fn size(&mut self, size: u32) -> &mut Self {
        self.size = size;
        self
    }

    pub fn border(&mut self, border: u32) -> &mut Self {
        self.border = border;
        self
    }

    pub fn fg(&mut self, fg: Rgba<u8>) -> &mut Self {
        self.colors.fg = fg;
        self
    }

    pub fn bg(&mut self, bg: Rgba<u8>) -> &mut Self {
        self.colors.bg = bg;
        self
    }

    pub fn use_logo_colors(&mut self, enable: bool) -> &mut Self {
        self.use_logo_colors = enable;
        self
    }

    pub fn logo(&mut self, path: &'a Path) -> &mut Self {
        self.logo = Some(path);
        self
    }

    pub fn logo_scale(&mut self, scale: f32) -> &mut Self {
        self.logo_scale = scale;
        self
    }

    pub fn logo_round(&mut self, ratio: f32) -> &mut Self {
        self.logo_round = ratio;
        self
    }

    pub fn caption(&mut self, caption: &'a str) -> &mut Self {
        self.caption = Some(caption);
        self
    }

    pub fn strip_bg(&mut self, color: Rgba<u8>) -> &mut Self {
        self.strip_bg = color;
        self
    }

    pub fn text_color(&mut self, color: Rgba<u8>) -> &mut Self {
        self.text_color = color;
        self
    }

    pub fn font(&mut self, path: &'a Path) -> &mut Self {
        self.font = Some(path);
        self
    }

    /// Run the whole pipeline: load logo, pick colors, render the code,
    /// composite the logo and append the caption strip.
    pub fn build(&self) -> StampResult<RgbaImage> {
        let logo = match self.logo {
            Some(path) => Some(load_logo(path)?),
            None => None,
        };

        let mut colors = self.colors;
        if self.use_logo_colors {
            if let Some(logo) = &logo {
                match select_qr_colors(logo) {
                    Selection::Extracted(pair) => {
                        info!("using logo palette: fg {:?}, bg {:?}", pair.fg.0, pair.bg.0);
                        colors = pair;
                    }
                    Selection::Default(pair) => {
                        info!("logo palette unsuitable, using fallback colors");
                        colors = pair;
                    }
                }
            }
        }

        debug!("rendering {}px QR for {}", self.size, self.url);
        let mut img = render_qr(self.url, self.size, self.border, colors)?;

        if let Some(logo) = logo {
            overlay_logo(&mut img, logo, self.logo_scale, self.logo_round);
        }

        if let Some(caption) = self.caption {
            let font = load_font(self.font);
            img = add_caption(&img, caption, self.strip_bg, self.text_color, font.as_ref());
        }

        Ok(img)
    }
}
