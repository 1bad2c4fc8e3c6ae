//! Batched image resizing with label adjustment.
//!
//! [`ImageResizer`] resizes every image in a batch to a fixed target
//! resolution. For object-detection labels the bounding boxes are rescaled
//! to match the geometric transform applied to their image; classification
//! labels pass through untouched.

use std::sync::Arc;

use ndarray::{Array4, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PipelineStage, PreprocError, PreprocResult, Preprocessor};
use crate::processors::resample::{PlaneResampler, Resampler};
use crate::processors::types::{
    ChannelOrder, DetectionTargets, ImageScaleInfo, Interpolation, LabelKind, Labels,
};
use crate::utils::progress_bar;

/// Configuration for the [`ImageResizer`] step.
///
/// Validated once at construction; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageResizerConfig {
    /// Target height of the resized images. Must be positive.
    pub height: u32,
    /// Target width of the resized images. Must be positive.
    pub width: u32,
    /// Axis order of the input and output images.
    pub channel_order: ChannelOrder,
    /// The kind of labels this step adjusts.
    pub label_kind: LabelKind,
    /// Interpolation mode forwarded to the resampling backend.
    pub interpolation: Interpolation,
    /// Optional inclusive `(min, max)` range the output batch is clipped
    /// to. `min` must be strictly less than `max`.
    pub clip_values: Option<(f32, f32)>,
    /// Whether the host pipeline runs this step during fitting/training.
    pub apply_fit: bool,
    /// Whether the host pipeline runs this step during prediction.
    pub apply_predict: bool,
    /// Show a per-item progress bar while transforming.
    pub verbose: bool,
}

impl Default for ImageResizerConfig {
    fn default() -> Self {
        Self {
            height: 0,
            width: 0,
            channel_order: ChannelOrder::HWC,
            label_kind: LabelKind::Classification,
            interpolation: Interpolation::default(),
            clip_values: None,
            apply_fit: true,
            apply_predict: false,
            verbose: false,
        }
    }
}

/// Resizes batches of images (and object-detection boxes) to a fixed
/// target resolution.
///
/// The step is stateless: it is always "fitted" and a single instance may
/// transform separate batches concurrently.
#[derive(Debug, Clone)]
pub struct ImageResizer {
    config: ImageResizerConfig,
    resampler: Arc<dyn Resampler>,
}

impl ImageResizer {
    /// Creates a resizer backed by the default resampling backend.
    ///
    /// # Errors
    ///
    /// Returns `PreprocError::ConfigError` if the target height or width
    /// is zero, or if a clip range with `min >= max` is supplied.
    pub fn new(config: ImageResizerConfig) -> PreprocResult<Self> {
        Self::with_resampler(config, Arc::new(PlaneResampler))
    }

    /// Creates a resizer with an injected resampling backend.
    pub fn with_resampler(
        config: ImageResizerConfig,
        resampler: Arc<dyn Resampler>,
    ) -> PreprocResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config, resampler })
    }

    /// Returns the configuration of this step.
    pub fn config(&self) -> &ImageResizerConfig {
        &self.config
    }

    fn validate(config: &ImageResizerConfig) -> PreprocResult<()> {
        if config.height == 0 {
            return Err(PreprocError::config("height must be positive"));
        }
        if config.width == 0 {
            return Err(PreprocError::config("width must be positive"));
        }
        if let Some((min, max)) = config.clip_values {
            if min >= max {
                return Err(PreprocError::config(format!(
                    "invalid clip range: min ({min}) must be strictly less than max ({max})"
                )));
            }
        }
        Ok(())
    }

    /// Checks the supplied labels against the configured label kind and,
    /// for object detection, returns the records to be rescaled.
    fn detection_records<'y>(
        &self,
        batch_len: usize,
        y: Option<&'y Labels>,
    ) -> PreprocResult<Option<&'y [DetectionTargets]>> {
        if self.config.label_kind != LabelKind::ObjectDetection {
            return Ok(None);
        }
        match y {
            None => Ok(None),
            Some(Labels::Detection(records)) => {
                if records.len() != batch_len {
                    return Err(PreprocError::invalid_label_shape(format!(
                        "expected one detection record per image ({batch_len}), got {}",
                        records.len()
                    )));
                }
                Ok(Some(records.as_slice()))
            }
            Some(Labels::Classification(_)) => Err(PreprocError::invalid_label_shape(
                "label kind object_detection requires per-image detection records",
            )),
        }
    }
}

impl Preprocessor for ImageResizer {
    fn name(&self) -> &str {
        "ImageResize"
    }

    fn applies_at(&self, stage: PipelineStage) -> bool {
        match stage {
            PipelineStage::Fit => self.config.apply_fit,
            PipelineStage::Predict => self.config.apply_predict,
        }
    }

    fn transform(
        &self,
        x: &[ndarray::Array3<f32>],
        y: Option<&Labels>,
    ) -> PreprocResult<(Array4<f32>, Option<Labels>)> {
        let cfg = &self.config;
        debug!(
            batch = x.len(),
            height = cfg.height,
            width = cfg.width,
            "resizing image batch"
        );

        let records_in = self.detection_records(x.len(), y)?;
        let mut resized_images = Vec::with_capacity(x.len());
        let mut records_out = records_in.map(|_| Vec::with_capacity(x.len()));

        let pb = progress_bar(x.len() as u64, self.name(), cfg.verbose);
        for (i, x_i) in x.iter().enumerate() {
            let hwc = match cfg.channel_order {
                ChannelOrder::CHW => x_i.view().permuted_axes([1, 2, 0]),
                ChannelOrder::HWC => x_i.view(),
            };
            // Original size read before resizing; box scaling uses it.
            let (src_h, src_w, _) = hwc.dim();

            // The backend takes the target size as (width, height).
            let resized = self
                .resampler
                .resize(hwc, cfg.width, cfg.height, cfg.interpolation)?;
            let resized = match cfg.channel_order {
                ChannelOrder::CHW => resized.permuted_axes([2, 0, 1]),
                ChannelOrder::HWC => resized,
            };
            resized_images.push(resized);

            if let (Some(records), Some(out)) = (records_in, records_out.as_mut()) {
                let scale = ImageScaleInfo::for_target(src_h, src_w, cfg.height, cfg.width);
                out.push(records[i].rescale(&scale)?);
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        let mut batch = if resized_images.is_empty() {
            // No samples, so the channel count is unknowable.
            match cfg.channel_order {
                ChannelOrder::HWC => {
                    Array4::zeros((0, cfg.height as usize, cfg.width as usize, 0))
                }
                ChannelOrder::CHW => {
                    Array4::zeros((0, 0, cfg.height as usize, cfg.width as usize))
                }
            }
        } else {
            let views: Vec<_> = resized_images.iter().map(|img| img.view()).collect();
            ndarray::stack(Axis(0), &views)?
        };

        if let Some((min, max)) = cfg.clip_values {
            batch.mapv_inplace(|v| v.clamp(min, max));
        }

        let labels = match records_out {
            Some(records) => Some(Labels::Detection(records)),
            None => y.cloned(),
        };
        Ok((batch, labels))
    }
}
