//! U²-Net salient-object model executed with tract (pure Rust, CPU only).
//!
//! The model expects a square NCHW input scaled to `[0, 1]` by the brightest
//! channel value and then normalised with the ImageNet mean/std. Its first
//! output is a single-channel saliency map of the same side length.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use image::{imageops, imageops::FilterType, DynamicImage, RgbaImage};
use tract_onnx::prelude::*;

use super::{apply_mask, mask_from_prediction, BackgroundRemover};
use crate::error::{EraserError, Result};

type TractModel = RunnableModel<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

pub const DEFAULT_INPUT_SIZE: u32 = 320;
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

pub struct U2NetRemover {
    model_path: PathBuf,
    input_size: u32,
    // Loaded on the first job, then shared by every later one
    plan: Mutex<Option<Arc<TractModel>>>,
}

impl U2NetRemover {
    pub fn new(model_path: impl Into<PathBuf>, input_size: u32) -> Self {
        Self {
            model_path: model_path.into(),
            input_size: input_size.max(1),
            plan: Mutex::new(None),
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    fn plan(&self) -> Result<Arc<TractModel>> {
        let mut slot = self
            .plan
            .lock()
            .map_err(|_| EraserError::model("model slot poisoned by an earlier panic"))?;
        if let Some(plan) = slot.as_ref() {
            return Ok(Arc::clone(plan));
        }

        let plan = Arc::new(self.load()?);
        *slot = Some(Arc::clone(&plan));
        Ok(plan)
    }

    fn load(&self) -> Result<TractModel> {
        if !self.model_path.is_file() {
            return Err(EraserError::model(format!(
                "model file not found at {} (set --model or BG_ERASER_MODEL)",
                self.model_path.display()
            )));
        }

        log::info!("Loading model from {}", self.model_path.display());
        let started = Instant::now();
        let side = self.input_size as usize;

        let model = onnx()
            .model_for_path(&self.model_path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, 3, side, side]).into()))
            .map_err(|e| EraserError::model(format!("failed to read ONNX model: {e:#}")))?
            .into_optimized()
            .map_err(|e| EraserError::model(format!("failed to optimize model: {e:#}")))?
            .into_runnable()
            .map_err(|e| EraserError::model(format!("failed to build model plan: {e:#}")))?;

        log::info!("Model ready in {}ms", started.elapsed().as_millis());
        Ok(model)
    }
}

impl BackgroundRemover for U2NetRemover {
    fn name(&self) -> &str {
        "u2net"
    }

    fn remove(&self, image: &DynamicImage) -> Result<RgbaImage> {
        let plan = self.plan()?;
        let side = self.input_size;

        let input: Tensor = input_tensor(image, side).into();
        let started = Instant::now();
        let outputs = plan
            .run(tvec!(input.into()))
            .map_err(|e| EraserError::inference(format!("model run failed: {e:#}")))?;
        log::debug!("Inference took {}ms", started.elapsed().as_millis());

        let saliency = outputs
            .first()
            .ok_or_else(|| EraserError::inference("model produced no outputs"))?
            .to_array_view::<f32>()
            .map_err(|e| EraserError::inference(format!("unexpected output type: {e:#}")))?;

        let expected = [1, 1, side as usize, side as usize];
        if saliency.shape() != &expected[..] {
            return Err(EraserError::inference(format!(
                "expected output shape {expected:?}, got {:?}",
                saliency.shape()
            )));
        }

        let prediction: Vec<f32> = saliency.iter().copied().collect();
        let mask = mask_from_prediction(&prediction, side)?;
        Ok(apply_mask(image, &mask))
    }
}

/// Square `[1, 3, side, side]` tensor, stretched without keeping aspect ratio
fn input_tensor(image: &DynamicImage, side: u32) -> tract_ndarray::Array4<f32> {
    let rgb = image.to_rgb8();
    let rgb = if rgb.dimensions() == (side, side) {
        rgb
    } else {
        imageops::resize(&rgb, side, side, FilterType::Lanczos3)
    };
    let brightest = f32::from(rgb.as_raw().iter().copied().max().unwrap_or(0).max(1));

    let side = side as usize;
    tract_ndarray::Array4::from_shape_fn((1, 3, side, side), |(_, c, y, x)| {
        let value = f32::from(rgb.get_pixel(x as u32, y as u32)[c]) / brightest;
        (value - MEAN[c]) / STD[c]
    })
}
