//! Utility functions for the preprocessing pipeline.
//!
//! This module provides the small helpers shared by the processing steps:
//! progress display and logging setup.

pub mod logging;
pub mod progress;

pub use logging::init_tracing;
pub use progress::progress_bar;
