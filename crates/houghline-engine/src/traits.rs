// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kernel contracts of the compute boundary.
//
// Each kernel is a blocking, elementwise pass over row-major planes. A kernel
// either returns its full output or fails; there are no partial results.

use houghline_core::error::Result;
use houghline_detect::{AngleTables, Dimensions};

/// A backend able to run every kernel the pipeline needs.
pub trait ComputeBackend: GreyscaleKernel + EdgeKernel + VoteKernel {
    /// Short identifier used in logs and reports (e.g. "host").
    fn backend_name(&self) -> &str;
}

/// Combine R, G, B planes into luminance.
pub trait GreyscaleKernel {
    /// All three planes have the same length; so does the result.
    fn greyscale(&self, red: &[i32], green: &[i32], blue: &[i32]) -> Result<Vec<i32>>;
}

/// Turn a luminance plane into an edge map.
pub trait EdgeKernel {
    /// `grey` holds `pixel_count` values, `width` per row. Non-zero output
    /// values mark edge pixels.
    fn detect_edges(&self, grey: &[i32], width: u32, pixel_count: usize) -> Result<Vec<i32>>;
}

/// Vote every edge pixel into the (r, phi) accumulator.
pub trait VoteKernel {
    /// For every non-zero pixel of `edges`, add one vote to each
    /// `(r, phi)` bin whose line passes through it. The result has
    /// `dims.len()` bins with r varying fastest.
    fn accumulate_votes(
        &self,
        edges: &[i32],
        tables: &AngleTables,
        width: u32,
        dims: Dimensions,
        r_step: f64,
    ) -> Result<Vec<u32>>;
}
