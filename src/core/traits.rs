//! Traits defining the contract between preprocessing steps and the host
//! pipeline.
//!
//! Every step exposes the same two-argument `(x, y) -> (x', y')` transform
//! plus scheduling flags that let the host decide whether the step runs
//! during training-time preprocessing, prediction-time preprocessing, or
//! both. The flags are consumed by the host, never by the step itself.

use ndarray::{Array3, Array4};

use crate::core::PreprocResult;
use crate::processors::Labels;

/// The stage at which the host pipeline invokes a preprocessing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Training-time preprocessing.
    Fit,
    /// Prediction-time preprocessing.
    Predict,
}

/// A preprocessing step in the defense pipeline.
///
/// Implementations transform a batch of images and, optionally, the labels
/// that accompany it. Steps are stateless with respect to their
/// configuration: `transform` takes `&self` and the same instance may be
/// used concurrently on separate batches.
pub trait Preprocessor: Send + Sync {
    /// A short human-readable name for the step, used in logs and progress
    /// display.
    fn name(&self) -> &str;

    /// Whether the step has been fitted. Stateless steps report `true`.
    fn is_fitted(&self) -> bool {
        true
    }

    /// Whether the host should run this step at the given stage.
    fn applies_at(&self, stage: PipelineStage) -> bool;

    /// Transforms a batch of images and the labels accompanying it.
    ///
    /// Each image is a 3-D array whose axis order is step-specific (for
    /// example channels-first or channels-last). The output batch is
    /// stacked along a new leading axis.
    fn transform(
        &self,
        x: &[Array3<f32>],
        y: Option<&Labels>,
    ) -> PreprocResult<(Array4<f32>, Option<Labels>)>;
}
