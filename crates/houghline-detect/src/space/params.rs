// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Discretized (r, phi) parameter space of the Hough line transform.
//
// A line is stored in Hesse normal form: `r` is the distance of its foot
// point from the image origin, `phi` the angle of the origin→foot vector.
// The accumulator is a flat array where the r index varies fastest:
//
//   index = phi_index * r_dim + r_index

use std::f64::consts::PI;

use houghline_core::error::{HoughError, Result};
use tracing::debug;

/// Step sizes of the accumulator grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretization {
    /// Distance quantum, in pixels.
    pub r_step: f64,
    /// Angle quantum, in radians.
    pub phi_step: f64,
}

impl Discretization {
    /// Build a discretization, rejecting non-positive or non-finite steps.
    pub fn new(r_step: f64, phi_step: f64) -> Result<Self> {
        if !(r_step.is_finite() && r_step > 0.0) {
            return Err(HoughError::InvalidArgument(format!(
                "r step must be positive and finite, got {r_step}"
            )));
        }
        if !(phi_step.is_finite() && phi_step > 0.0) {
            return Err(HoughError::InvalidArgument(format!(
                "phi step must be positive and finite, got {phi_step}"
            )));
        }
        Ok(Self { r_step, phi_step })
    }
}

/// Shape of the vote accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of distance bins (the fast axis).
    pub r_dim: usize,
    /// Number of angle bins.
    pub phi_dim: usize,
}

impl Dimensions {
    /// Total number of accumulator bins.
    pub fn len(&self) -> usize {
        self.r_dim * self.phi_dim
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One accumulator bin in polar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarBin {
    /// Distance from the origin, in pixels.
    pub r: f64,
    /// Angle of the normal, in radians within `[0, pi)`.
    pub phi: f64,
}

impl PolarBin {
    /// Foot of the perpendicular from the origin, rounded to whole pixels.
    pub fn foot_point(&self) -> (i64, i64) {
        let x = (self.r * self.phi.cos()).round() as i64;
        let y = (self.r * self.phi.sin()).round() as i64;
        (x, y)
    }
}

/// Precomputed `cos(phi)` / `sin(phi)` for every angle bin.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleTables {
    pub cos: Vec<f64>,
    pub sin: Vec<f64>,
}

impl AngleTables {
    pub fn len(&self) -> usize {
        self.cos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }
}

/// Compute the accumulator shape for a `width` x `height` image.
///
/// `phi_dim = floor(pi / phi_step)` and
/// `r_dim = floor(((width + height) * 2 + 1) / r_step)`.
pub fn compute_dimensions(width: u32, height: u32, r_step: f64, phi_step: f64) -> Result<Dimensions> {
    let disc = Discretization::new(r_step, phi_step)?;

    let span = (width as f64 + height as f64) * 2.0 + 1.0;
    let r_dim = (span / disc.r_step).floor();
    let phi_dim = (PI / disc.phi_step).floor();

    if r_dim < 1.0 || phi_dim < 1.0 {
        return Err(HoughError::InvalidArgument(format!(
            "discretization too coarse: r_dim={r_dim}, phi_dim={phi_dim}"
        )));
    }
    if r_dim >= usize::MAX as f64 || phi_dim >= usize::MAX as f64 {
        return Err(HoughError::InvalidArgument(
            "discretization too fine for this platform".into(),
        ));
    }

    let dims = Dimensions {
        r_dim: r_dim as usize,
        phi_dim: phi_dim as usize,
    };
    if dims.r_dim.checked_mul(dims.phi_dim).is_none() {
        return Err(HoughError::InvalidArgument(format!(
            "accumulator of {} x {} bins overflows",
            dims.r_dim, dims.phi_dim
        )));
    }
    Ok(dims)
}

/// Map a linear accumulator index back to its `(r, phi)` bin.
pub fn index_to_polar(index: usize, dims: Dimensions, disc: Discretization) -> Result<PolarBin> {
    let len = dims.len();
    if index >= len {
        return Err(HoughError::OutOfRange { index, len });
    }
    let r_index = index % dims.r_dim;
    let phi_index = index / dims.r_dim;
    Ok(PolarBin {
        r: r_index as f64 * disc.r_step,
        phi: phi_index as f64 * disc.phi_step,
    })
}

/// Tabulate cos/sin for `phi = k * phi_step`, `k` in `[0, phi_dim)`.
pub fn build_angle_tables(phi_dim: usize, phi_step: f64) -> Result<AngleTables> {
    if !(phi_step.is_finite() && phi_step > 0.0) {
        return Err(HoughError::InvalidArgument(format!(
            "phi step must be positive and finite, got {phi_step}"
        )));
    }
    let (cos, sin) = (0..phi_dim)
        .map(|k| {
            let phi = k as f64 * phi_step;
            (phi.cos(), phi.sin())
        })
        .unzip();
    Ok(AngleTables { cos, sin })
}

/// The parameter space of one image: its size, grid steps and accumulator shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpace {
    width: u32,
    height: u32,
    disc: Discretization,
    dims: Dimensions,
}

impl ParameterSpace {
    pub fn new(width: u32, height: u32, disc: Discretization) -> Result<Self> {
        let dims = compute_dimensions(width, height, disc.r_step, disc.phi_step)?;
        debug!(
            width,
            height,
            r_dim = dims.r_dim,
            phi_dim = dims.phi_dim,
            "Parameter space sized"
        );
        Ok(Self {
            width,
            height,
            disc,
            dims,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn discretization(&self) -> Discretization {
        self.disc
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of bins the voting kernel must produce.
    pub fn accumulator_len(&self) -> usize {
        self.dims.len()
    }

    pub fn index_to_polar(&self, index: usize) -> Result<PolarBin> {
        index_to_polar(index, self.dims, self.disc)
    }

    pub fn angle_tables(&self) -> Result<AngleTables> {
        build_angle_tables(self.dims.phi_dim, self.disc.phi_step)
    }
}
