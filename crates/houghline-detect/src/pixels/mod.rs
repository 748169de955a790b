// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel module: the row-major RGBA buffer and its PNG codec.

pub mod buffer;
pub mod codec;

pub use buffer::PixelBuffer;
