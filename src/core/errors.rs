//! Core error types for the preprocessing pipeline.
//!
//! This module defines the error types used throughout the crate, including
//! the main PreprocError enum and the ProcessingStage enum that identifies
//! where in a step an error occurred.

use thiserror::Error;

/// Convenience alias for results produced by preprocessing steps.
pub type PreprocResult<T> = Result<T, PreprocError>;

/// Enum representing different stages of processing in a preprocessing step.
///
/// Used to identify which stage of a step an error occurred in, providing
/// context for debugging and error handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred during image resizing.
    Resize,
    /// Error occurred while adjusting labels to match a geometric transform.
    LabelAdjustment,
    /// Error occurred while assembling a batch.
    BatchProcessing,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::LabelAdjustment => write!(f, "label adjustment"),
            ProcessingStage::BatchProcessing => write!(f, "batch processing"),
        }
    }
}

/// Enum representing the errors that can occur in a preprocessing step.
///
/// Configuration errors are raised once, at construction time; label and
/// input errors are raised during `transform`. Failures from the resampling
/// backend are wrapped with the stage they occurred in and kept as the
/// error source.
#[derive(Error, Debug)]
pub enum PreprocError {
    /// Error indicating a configuration problem, raised at construction.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error indicating that supplied labels do not have the shape the
    /// configured label kind requires.
    #[error("invalid label shape: {message}")]
    InvalidLabelShape {
        /// A message describing the violated expectation.
        message: String,
    },

    /// Error indicating invalid input data.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error occurred during processing.
    #[error("{stage} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        stage: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error from basic tensor operations (fallback for ndarray errors).
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),
}

impl PreprocError {
    /// Creates a configuration error with a formatted message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a label-shape error with a formatted message.
    pub fn invalid_label_shape(message: impl Into<String>) -> Self {
        Self::InvalidLabelShape {
            message: message.into(),
        }
    }

    /// Creates an invalid-input error with a formatted message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Wraps an error that occurred during a processing stage.
    pub fn processing(
        stage: ProcessingStage,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            stage,
            context: context.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = PreprocError::config("height must be positive");
        assert_eq!(err.to_string(), "configuration: height must be positive");
    }

    #[test]
    fn test_processing_stage_display() {
        assert_eq!(ProcessingStage::Resize.to_string(), "resize");
        assert_eq!(
            ProcessingStage::LabelAdjustment.to_string(),
            "label adjustment"
        );
    }

    #[test]
    fn test_processing_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "backend failure");
        let err = PreprocError::processing(ProcessingStage::Resize, "plane 0", io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "resize failed: plane 0");
    }
}
