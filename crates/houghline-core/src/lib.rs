// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// houghline: Core error and configuration types shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;

pub use config::{Backdrop, ComputeKind, HoughConfig};
pub use error::{HoughError, Result};
