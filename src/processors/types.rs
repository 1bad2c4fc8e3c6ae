//! Types used by the image preprocessing steps.
//!
//! This module defines the enums describing image layout and resampling
//! options, plus the label containers that accompany image batches through
//! the pipeline.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayD};
use serde::{Deserialize, Serialize};

use crate::core::{PreprocError, PreprocResult};

/// Specifies the order of axes in an image array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Channel, Height, Width order (channels-first, common in PyTorch)
    CHW,
    /// Height, Width, Channel order (channels-last, common in TensorFlow)
    HWC,
}

/// Specifies the resampling strategy used when mapping from source to
/// target resolution.
///
/// The token is forwarded to the resampling backend unchanged; which
/// kernel each mode selects is a backend decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Nearest neighbour, fastest.
    Nearest,
    /// Bilinear filter, good all-round default.
    #[default]
    Linear,
    /// Bicubic sharpening.
    Cubic,
    /// Blurring/smoothing.
    Gaussian,
    /// Lanczos with window 3, highest quality re-sampling but slowest.
    Lanczos,
}

/// Specifies which kind of labels a preprocessing step adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    /// Labels are opaque to the step and passed through unchanged.
    Classification,
    /// Labels are per-image object-detection records whose boxes follow
    /// the geometric transform applied to the image.
    ObjectDetection,
}

/// Information about image scaling during preprocessing.
///
/// Captures the original dimensions and the scaling ratios applied when an
/// image was resized, so that annotations expressed in original-image
/// coordinates can follow the transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageScaleInfo {
    /// Original image height before resizing
    pub src_h: f32,
    /// Original image width before resizing
    pub src_w: f32,
    /// Height scaling ratio (resized_height / original_height)
    pub ratio_h: f32,
    /// Width scaling ratio (resized_width / original_width)
    pub ratio_w: f32,
}

impl ImageScaleInfo {
    /// Creates a new `ImageScaleInfo` from original dimensions and ratios.
    pub fn new(src_h: f32, src_w: f32, ratio_h: f32, ratio_w: f32) -> Self {
        Self {
            src_h,
            src_w,
            ratio_h,
            ratio_w,
        }
    }

    /// Derives the scale info for resizing `(src_h, src_w)` to
    /// `(dst_h, dst_w)`.
    pub fn for_target(src_h: usize, src_w: usize, dst_h: u32, dst_w: u32) -> Self {
        Self {
            src_h: src_h as f32,
            src_w: src_w as f32,
            ratio_h: dst_h as f32 / src_h as f32,
            ratio_w: dst_w as f32 / src_w as f32,
        }
    }
}

/// Per-image object-detection annotations.
///
/// `boxes` holds one `[x_min, y_min, x_max, y_max]` row per object, in
/// absolute pixel coordinates of the image the record belongs to. Any
/// further fields (class ids, scores, ...) ride along in `extras` and are
/// never interpreted by the preprocessing steps.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionTargets {
    /// Bounding boxes with shape (N, 4).
    pub boxes: Array2<f32>,
    /// Additional per-record arrays, copied verbatim by every transform.
    pub extras: BTreeMap<String, ArrayD<f32>>,
}

impl DetectionTargets {
    /// Creates a record holding only boxes.
    pub fn new(boxes: Array2<f32>) -> Self {
        Self {
            boxes,
            extras: BTreeMap::new(),
        }
    }

    /// Adds an extra field to the record.
    pub fn with_extra(mut self, name: impl Into<String>, values: ArrayD<f32>) -> Self {
        self.extras.insert(name.into(), values);
        self
    }

    /// Returns a new record with box coordinates rescaled by the given
    /// image scale.
    ///
    /// Columns 0 and 2 (x_min, x_max) are multiplied by the width ratio,
    /// columns 1 and 3 (y_min, y_max) by the height ratio. No clamping to
    /// image bounds is performed. The box array is deep-copied first, so
    /// the original record is never mutated.
    pub fn rescale(&self, scale: &ImageScaleInfo) -> PreprocResult<Self> {
        if self.boxes.ncols() != 4 {
            return Err(PreprocError::invalid_label_shape(format!(
                "boxes must have shape (N, 4), got (N, {})",
                self.boxes.ncols()
            )));
        }

        let mut boxes = self.boxes.clone();
        boxes.column_mut(0).mapv_inplace(|x| x * scale.ratio_w);
        boxes.column_mut(1).mapv_inplace(|y| y * scale.ratio_h);
        boxes.column_mut(2).mapv_inplace(|x| x * scale.ratio_w);
        boxes.column_mut(3).mapv_inplace(|y| y * scale.ratio_h);

        Ok(Self {
            boxes,
            extras: self.extras.clone(),
        })
    }
}

/// Labels accompanying an image batch through a preprocessing step.
#[derive(Debug, Clone, PartialEq)]
pub enum Labels {
    /// Classification labels. Opaque to every step: passed through
    /// unchanged.
    Classification(ArrayD<f32>),
    /// Object-detection records, one per image in the batch.
    Detection(Vec<DetectionTargets>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_interpolation_default_is_linear() {
        assert_eq!(Interpolation::default(), Interpolation::Linear);
    }

    #[test]
    fn test_enum_serde_tokens() {
        let json = serde_json::to_string(&LabelKind::ObjectDetection).unwrap();
        assert_eq!(json, "\"object_detection\"");
        let order: ChannelOrder = serde_json::from_str("\"chw\"").unwrap();
        assert_eq!(order, ChannelOrder::CHW);
        let mode: Interpolation = serde_json::from_str("\"lanczos\"").unwrap();
        assert_eq!(mode, Interpolation::Lanczos);
    }

    #[test]
    fn test_scale_info_for_target() {
        let scale = ImageScaleInfo::for_target(100, 200, 50, 50);
        assert_eq!(scale.src_h, 100.0);
        assert_eq!(scale.src_w, 200.0);
        assert_eq!(scale.ratio_h, 0.5);
        assert_eq!(scale.ratio_w, 0.25);
    }

    #[test]
    fn test_rescale_boxes() {
        // Image of (H=100, W=200) resized to (50, 50).
        let scale = ImageScaleInfo::for_target(100, 200, 50, 50);
        let targets = DetectionTargets::new(array![[20.0, 10.0, 60.0, 40.0]]);

        let rescaled = targets.rescale(&scale).unwrap();
        assert_eq!(rescaled.boxes, array![[5.0, 5.0, 15.0, 20.0]]);
        // Original record is untouched.
        assert_eq!(targets.boxes, array![[20.0, 10.0, 60.0, 40.0]]);
    }

    #[test]
    fn test_rescale_copies_extras_verbatim() {
        let scale = ImageScaleInfo::for_target(10, 10, 20, 20);
        let classes = array![1.0, 3.0].into_dyn();
        let targets = DetectionTargets::new(array![[1.0, 1.0, 2.0, 2.0], [0.0, 0.0, 5.0, 5.0]])
            .with_extra("labels", classes.clone());

        let rescaled = targets.rescale(&scale).unwrap();
        assert_eq!(rescaled.extras["labels"], classes);
        assert_eq!(rescaled.boxes.nrows(), 2);
    }

    #[test]
    fn test_rescale_rejects_malformed_boxes() {
        let scale = ImageScaleInfo::for_target(10, 10, 20, 20);
        let targets = DetectionTargets::new(array![[1.0, 2.0, 3.0]]);
        assert!(matches!(
            targets.rescale(&scale),
            Err(PreprocError::InvalidLabelShape { .. })
        ));
    }
}
