// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// houghline-engine: Compute backends and pipeline orchestration.
//
// The greyscale, edge and voting kernels sit behind the `ComputeBackend`
// trait so an accelerator can replace the host implementation without the
// geometry code noticing. A `ComputeSession` scopes one backend to one run.

pub mod host;
pub mod pipeline;
pub mod session;
pub mod traits;

use houghline_core::config::{ComputeKind, HoughConfig};
use houghline_core::error::{HoughError, Result};

pub use pipeline::{PeakReport, RunReport, detect_and_draw, run};
pub use session::ComputeSession;

/// Build the backend selected by `config`.
///
/// RETURNS: a boxed trait object; fails with `ComputeUnavailable` when the
/// requested backend has no driver in this build.
pub fn compute_backend(config: &HoughConfig) -> Result<Box<dyn traits::ComputeBackend>> {
    match config.backend {
        ComputeKind::Host => Ok(Box::new(host::HostBackend::new(config.edge_threshold))),
        ComputeKind::Accelerator => Err(HoughError::ComputeUnavailable(
            "no accelerator driver is built into this binary".into(),
        )),
    }
}
