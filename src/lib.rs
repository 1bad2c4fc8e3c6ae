//! # preproc-defense
//!
//! Preprocessing defenses that transform inputs (and optionally labels)
//! before they reach a machine-learning model.
//!
//! This crate provides:
//! - Error handling types
//! - The preprocessing-step contract shared by all pipeline steps
//! - The [`ImageResizer`](processors::ImageResizer) step, which resizes
//!   batches of images and rescales co-located object-detection boxes
//! - A pluggable resampling backend
//!
//! ## Modules
//!
//! * [`core`] - Core traits and error handling
//! * [`processors`] - Image processing steps and their supporting types
//! * [`utils`] - Logging and progress helpers

pub mod core;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    // Error handling
    pub use crate::core::{PreprocError, PreprocResult};

    // Pipeline contract
    pub use crate::core::{PipelineStage, Preprocessor};

    // Processing steps and types
    pub use crate::processors::{
        ChannelOrder, DetectionTargets, ImageResizer, ImageResizerConfig, Interpolation,
        LabelKind, Labels, Resampler,
    };
}
