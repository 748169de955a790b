// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// houghline-detect: Host-side geometry of the Hough line detector.
//
// Provides the discretized (r, phi) parameter space, top-N peak extraction
// from a vote accumulator, line rasterization back into image space, and the
// RGBA pixel buffer those steps mutate (with its PNG codec).

pub mod peaks;
pub mod pixels;
pub mod raster;
pub mod space;

// Re-export the primary types so callers can use `houghline_detect::ParameterSpace` etc.
pub use peaks::selector::{PeakList, select_top_n};
pub use pixels::buffer::PixelBuffer;
pub use raster::line::{MARKER_RGB, draw_line};
pub use space::params::{
    AngleTables, Dimensions, Discretization, ParameterSpace, PolarBin, build_angle_tables,
    compute_dimensions, index_to_polar,
};
