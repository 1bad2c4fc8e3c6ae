//! The core module of the preprocessing pipeline.
//!
//! This module contains the fundamental pieces shared by all preprocessing
//! steps:
//! - Error handling
//! - The step contract (trait) consumed by the host pipeline
//!
//! It also re-exports the commonly used types for convenience.

pub mod errors;
pub mod traits;

pub use errors::{PreprocError, PreprocResult, ProcessingStage};
pub use traits::{PipelineStage, Preprocessor};
