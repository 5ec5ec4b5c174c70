//! Background removal seam.
//!
//! The window only ever talks to [`BackgroundRemover`]; the shipped
//! implementation is [`U2NetRemover`], a salient-object mask model run with
//! tract. The mask post-processing below is model independent.

use image::{imageops, imageops::FilterType, DynamicImage, GrayImage, RgbaImage};
use rayon::prelude::*;

use crate::error::{EraserError, Result};

mod u2net;

pub use u2net::{U2NetRemover, DEFAULT_INPUT_SIZE};

/// Turns an image into a copy whose alpha channel masks out the background
pub trait BackgroundRemover: Send + Sync {
    fn name(&self) -> &str;

    fn remove(&self, image: &DynamicImage) -> Result<RgbaImage>;
}

/// Min-max normalise a raw `side × side` prediction into an 8-bit mask.
///
/// A flat prediction carries no foreground information and becomes an empty mask.
pub fn mask_from_prediction(prediction: &[f32], side: u32) -> Result<GrayImage> {
    let expected = (side as usize) * (side as usize);
    if prediction.len() != expected {
        return Err(EraserError::inference(format!(
            "expected {expected} mask values, got {}",
            prediction.len()
        )));
    }

    let (min, max) = prediction
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    let pixels = prediction
        .iter()
        .map(|&v| {
            if range > f32::EPSILON {
                (((v - min) / range) * 255.0).clamp(0.0, 255.0) as u8
            } else {
                0
            }
        })
        .collect();

    GrayImage::from_raw(side, side, pixels)
        .ok_or_else(|| EraserError::inference("mask buffer does not match its size"))
}

/// Use `mask` (stretched to the image size) as the alpha channel of `image`
pub fn apply_mask(image: &DynamicImage, mask: &GrayImage) -> RgbaImage {
    let mut cutout = image.to_rgba8();
    let (w, h) = cutout.dimensions();

    let resized;
    let mask = if mask.dimensions() == (w, h) {
        mask
    } else {
        resized = imageops::resize(mask, w, h, FilterType::Lanczos3);
        &resized
    };

    cutout
        .par_chunks_mut(4)
        .zip(mask.as_raw().par_iter())
        .for_each(|(pixel, &alpha)| pixel[3] = alpha);
    cutout
}
