// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module: turns accumulator peaks back into lines drawn on the image.

pub mod line;

pub use line::draw_line;
