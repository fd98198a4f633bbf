//! Utility functions for string formatting and validation.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{format_timestamp, is_supported_image, truncate_string};
