// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parameter space module: accumulator dimensions, index/polar conversion,
// and the cos/sin tables the voting kernel consumes.

pub mod params;

pub use params::ParameterSpace;
