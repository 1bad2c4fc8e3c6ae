//! Image processing steps and their supporting types.
//!
//! This module contains the concrete preprocessing steps offered by the
//! crate together with the enums and label containers they operate on.

pub mod resample;
pub mod resize;
pub mod types;

pub use resample::{PlaneResampler, Resampler};
pub use resize::{ImageResizer, ImageResizerConfig};
pub use types::{
    ChannelOrder, DetectionTargets, ImageScaleInfo, Interpolation, LabelKind, Labels,
};
