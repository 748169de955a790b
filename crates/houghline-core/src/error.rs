// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for houghline.

use thiserror::Error;

/// Top-level error type for all houghline operations.
#[derive(Debug, Error)]
pub enum HoughError {
    // -- Geometry errors --
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index {index} out of range for accumulator of length {len}")]
    OutOfRange { index: usize, len: usize },

    // -- Image errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Compute errors --
    #[error("compute kernel failed: {0}")]
    Compute(String),

    #[error("compute backend unavailable: {0}")]
    ComputeUnavailable(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HoughError>;
