// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Peak module: bounded top-N selection over a vote accumulator.

pub mod selector;

pub use selector::PeakList;
