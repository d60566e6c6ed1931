use std::path::PathBuf;

use crate::types::Rgb;

/// One item in the marquee sequence.
///
/// Identity is positional: the same `Logo` value appearing twice is two
/// distinct items. A logo without a `source` is a text badge and renders
/// its label directly; one with a `source` renders decoded art once the
/// asset settles, falling back to the label if decoding fails.
#[derive(Debug, Clone)]
pub struct Logo {
    pub source: Option<PathBuf>,
    pub label: String,
}

impl Logo {
    /// A logo backed by an image file.
    pub fn image(source: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            label: label.into(),
        }
    }

    /// A text-only badge.
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            source: None,
            label: label.into(),
        }
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }
}

/// Decoded logo image as half-block cell art.
///
/// Each cell row covers two pixel rows: the upper pixel is drawn as the
/// foreground of a `▀` cell, the lower as its background. `None` pixels
/// are transparent and keep the strip background.
#[derive(Debug, Clone)]
pub struct LogoArt {
    width: u16,
    height: u16,
    pixels: Vec<(Option<Rgb>, Option<Rgb>)>,
}

impl LogoArt {
    pub fn new(width: u16, height: u16, pixels: Vec<(Option<Rgb>, Option<Rgb>)>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Scale a decoded image to `height` cell rows and map it to half-block
    /// pairs. Width follows the intrinsic aspect ratio, rounded up so the
    /// art never measures narrower than it draws.
    pub fn from_image(img: &image::DynamicImage, height: u16) -> Self {
        use image::imageops::FilterType;
        use image::GenericImageView;

        let height = height.max(1);
        let pixel_rows = u32::from(height) * 2;
        let (src_w, src_h) = (img.width().max(1), img.height().max(1));
        let width = ((u64::from(src_w) * u64::from(pixel_rows) + u64::from(src_h) - 1)
            / u64::from(src_h))
        .clamp(1, u64::from(u16::MAX)) as u16;

        let scaled = img
            .resize_exact(u32::from(width), pixel_rows, FilterType::Triangle)
            .to_rgba8();

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                let upper = scaled.get_pixel(u32::from(col), u32::from(row) * 2);
                let lower = scaled.get_pixel(u32::from(col), u32::from(row) * 2 + 1);
                pixels.push((rgba_to_cell(upper), rgba_to_cell(lower)));
            }
        }

        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Upper/lower pixel pair at cell position (x, y).
    pub fn pixel(&self, x: u16, y: u16) -> (Option<Rgb>, Option<Rgb>) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize]
        } else {
            (None, None)
        }
    }
}

fn rgba_to_cell(pixel: &image::Rgba<u8>) -> Option<Rgb> {
    let image::Rgba([r, g, b, a]) = *pixel;
    // Near-transparent pixels keep the strip background.
    if a < 128 {
        None
    } else {
        Some(Rgb::new(r, g, b))
    }
}
