use image::{imageops, imageops::FilterType, RgbImage, RgbaImage};

use crate::checkerboard::{checkerboard, DEFAULT_TILE};

/// Size of the preview canvas inside the card
pub const AREA: (u32, u32) = (420, 300);
/// Margin kept free around the thumbnail on each side
pub const MARGIN: u32 = 20;

/// Largest size no bigger than `max` that keeps the aspect ratio of `size`.
///
/// Never upscales: an image already inside the bounds keeps its size.
pub fn fit_within(size: (u32, u32), max: (u32, u32)) -> (u32, u32) {
    let (w, h) = size;
    let (max_w, max_h) = max;
    if w <= max_w && h <= max_h {
        return (w, h);
    }
    let scale = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);
    let fitted_w = ((w as f64 * scale).round() as u32).clamp(1, max_w);
    let fitted_h = ((h as f64 * scale).round() as u32).clamp(1, max_h);
    (fitted_w, fitted_h)
}

/// Checkerboard plus a centred, downscaled copy of the cutout
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    pub checker: RgbImage,
    pub thumbnail: RgbaImage,
    /// Top-left corner of the thumbnail inside the preview area
    pub offset: (u32, u32),
}

impl PreviewFrame {
    pub fn new(image: &RgbaImage) -> Self {
        let (area_w, area_h) = AREA;
        let bounds = (area_w - 2 * MARGIN, area_h - 2 * MARGIN);
        let (w, h) = fit_within(image.dimensions(), bounds);

        let thumbnail = if (w, h) == image.dimensions() {
            image.clone()
        } else {
            imageops::resize(image, w, h, FilterType::Lanczos3)
        };

        Self {
            checker: checkerboard(area_w, area_h, DEFAULT_TILE),
            offset: ((area_w - w) / 2, (area_h - h) / 2),
            thumbnail,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum Preview {
    /// Dashed drop zone with hint text
    #[default]
    Placeholder,
    Result(PreviewFrame),
}

impl Preview {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Preview::Placeholder)
    }

    pub fn frame(&self) -> Option<&PreviewFrame> {
        match self {
            Preview::Placeholder => None,
            Preview::Result(frame) => Some(frame),
        }
    }
}
