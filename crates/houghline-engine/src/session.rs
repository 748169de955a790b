// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compute session: one backend, acquired for one run and released on drop.
//
// The session checks every kernel result against the size it promised, so a
// misbehaving backend surfaces as `HoughError::Compute` instead of a panic
// further down the pipeline.

use houghline_core::config::HoughConfig;
use houghline_core::error::{HoughError, Result};
use houghline_detect::ParameterSpace;
use tracing::{debug, info};

use crate::traits::ComputeBackend;

pub struct ComputeSession {
    backend: Box<dyn ComputeBackend>,
    kernels_run: usize,
}

impl ComputeSession {
    /// Acquire the backend selected by `config`.
    pub fn open(config: &HoughConfig) -> Result<Self> {
        let backend = crate::compute_backend(config)?;
        Ok(Self::with_backend(backend))
    }

    /// Wrap an already-built backend.
    pub fn with_backend(backend: Box<dyn ComputeBackend>) -> Self {
        info!(backend = backend.backend_name(), "Compute session acquired");
        Self {
            backend,
            kernels_run: 0,
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }

    /// Number of kernels dispatched so far.
    pub fn kernels_run(&self) -> usize {
        self.kernels_run
    }

    // -- Kernels --------------------------------------------------------------

    pub fn greyscale(&mut self, planes: &[Vec<i32>; 3]) -> Result<Vec<i32>> {
        let [red, green, blue] = planes;
        self.kernels_run += 1;
        let grey = self.backend.greyscale(red, green, blue)?;
        expect_len("greyscale", grey.len(), red.len())?;
        Ok(grey)
    }

    pub fn detect_edges(&mut self, grey: &[i32], width: u32) -> Result<Vec<i32>> {
        self.kernels_run += 1;
        let edges = self.backend.detect_edges(grey, width, grey.len())?;
        expect_len("edge detection", edges.len(), grey.len())?;
        Ok(edges)
    }

    /// Vote `edges` into a fresh accumulator shaped by `space`.
    pub fn accumulate_votes(&mut self, edges: &[i32], space: &ParameterSpace) -> Result<Vec<u32>> {
        let dims = space.dimensions();
        let tables = space.angle_tables()?;
        debug!(
            bins = dims.len(),
            bytes = dims.len() * std::mem::size_of::<u32>(),
            "Allocating accumulator"
        );
        self.kernels_run += 1;
        let accumulator = self.backend.accumulate_votes(
            edges,
            &tables,
            space.width(),
            dims,
            space.discretization().r_step,
        )?;
        expect_len("voting", accumulator.len(), space.accumulator_len())?;
        Ok(accumulator)
    }
}

impl Drop for ComputeSession {
    fn drop(&mut self) {
        info!(
            backend = self.backend.backend_name(),
            kernels_run = self.kernels_run,
            "Compute session released"
        );
    }
}

fn expect_len(kernel: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(HoughError::Compute(format!(
            "{kernel} kernel returned {got} values, expected {expected}"
        )));
    }
    Ok(())
}
