// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable diagnostics for failed runs.
//
// Every error is fatal to the run. This module turns it into a one-line
// message, a suggestion, and the process exit code the CLI returns.

use crate::error::HoughError;

/// Who has to act to make the next run succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The command line or config file is wrong.
    Usage,
    /// The input image could not be read, or the output not written.
    Input,
    /// The compute backend failed or is missing.
    Environment,
    /// A geometry invariant was violated inside the pipeline.
    Internal,
}

impl Severity {
    /// Exit code reported for this class of failure. Never zero.
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Usage => 2,
            Severity::Input => 3,
            Severity::Environment => 4,
            Severity::Internal => 70,
        }
    }
}

/// A diagnostic with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary printed first.
    pub message: String,
    /// What to try next.
    pub suggestion: String,
    /// Failure class, drives the exit code.
    pub severity: Severity,
}

impl HumanError {
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n  hint: {}", self.message, self.suggestion)
    }
}

/// Convert a `HoughError` into a `HumanError`.
pub fn humanize_error(err: &HoughError) -> HumanError {
    match err {
        HoughError::InvalidArgument(detail) => HumanError {
            message: "The detector was given an invalid parameter.".into(),
            suggestion: format!("Check --r-step, --phi-step and --lines. ({detail})"),
            severity: Severity::Usage,
        },

        HoughError::OutOfRange { index, len } => HumanError {
            message: "A peak pointed outside the vote accumulator.".into(),
            suggestion: format!(
                "This is a bug in the pipeline; please report it. (bin {index} of {len})"
            ),
            severity: Severity::Internal,
        },

        HoughError::ImageError(detail) => HumanError {
            message: "The image could not be processed.".into(),
            suggestion: format!(
                "Make sure the input is a readable PNG, JPEG or other common format. ({detail})"
            ),
            severity: Severity::Input,
        },

        HoughError::Compute(detail) => HumanError {
            message: "A compute kernel failed.".into(),
            suggestion: format!("Try again with --backend host. ({detail})"),
            severity: Severity::Environment,
        },

        HoughError::ComputeUnavailable(detail) => HumanError {
            message: "The requested compute backend is not available.".into(),
            suggestion: format!("Use --backend host, which runs on the CPU. ({detail})"),
            severity: Severity::Environment,
        },

        HoughError::Config(detail) => HumanError {
            message: "The configuration is invalid.".into(),
            suggestion: format!("Fix the value and run again. ({detail})"),
            severity: Severity::Usage,
        },

        HoughError::Io(io_err) => humanize_io_error(io_err),

        HoughError::Serialization(detail) => HumanError {
            message: "The config file is not valid JSON.".into(),
            suggestion: format!("Check the file for typos. ({detail})"),
            severity: Severity::Usage,
        },
    }
}

fn humanize_io_error(err: &std::io::Error) -> HumanError {
    match err.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: "A file could not be found.".into(),
            suggestion: format!("Check the path and try again. ({err})"),
            severity: Severity::Input,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "Permission denied.".into(),
            suggestion: format!("Check the file permissions of the input and output paths. ({err})"),
            severity: Severity::Input,
        },
        _ => HumanError {
            message: "A file operation failed.".into(),
            suggestion: format!("Check the disk and the paths given. ({err})"),
            severity: Severity::Input,
        },
    }
}
