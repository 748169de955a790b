// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host backend: runs every kernel on the CPU.
//
// Greyscale uses Rec.601 integer luminance, edges come from a thresholded
// Sobel magnitude (imageproc), and voting walks the angle tables for every
// edge pixel.

use houghline_core::error::{HoughError, Result};
use houghline_detect::{AngleTables, Dimensions};
use image::GrayImage;
use imageproc::gradients::sobel_gradients;
use tracing::{debug, instrument};

use crate::traits::*;

/// Value written for edge pixels; everything else is 0.
pub const EDGE_VALUE: i32 = 255;

/// CPU implementation of the compute kernels.
#[derive(Debug, Clone, Copy)]
pub struct HostBackend {
    edge_threshold: u16,
}

impl HostBackend {
    /// `edge_threshold` is the minimum Sobel magnitude counted as an edge.
    pub fn new(edge_threshold: u16) -> Self {
        Self { edge_threshold }
    }

    pub fn edge_threshold(&self) -> u16 {
        self.edge_threshold
    }
}

impl ComputeBackend for HostBackend {
    fn backend_name(&self) -> &str {
        "host"
    }
}

impl GreyscaleKernel for HostBackend {
    fn greyscale(&self, red: &[i32], green: &[i32], blue: &[i32]) -> Result<Vec<i32>> {
        if red.len() != green.len() || red.len() != blue.len() {
            return Err(HoughError::Compute(format!(
                "channel planes differ in length: {}/{}/{}",
                red.len(),
                green.len(),
                blue.len()
            )));
        }
        Ok(red
            .iter()
            .zip(green)
            .zip(blue)
            .map(|((&r, &g), &b)| (299 * r + 587 * g + 114 * b + 500) / 1000)
            .collect())
    }
}

impl EdgeKernel for HostBackend {
    #[instrument(skip(self, grey), fields(threshold = self.edge_threshold()))]
    fn detect_edges(&self, grey: &[i32], width: u32, pixel_count: usize) -> Result<Vec<i32>> {
        let height = plane_height(grey.len(), width, pixel_count)?;
        if pixel_count == 0 {
            return Ok(Vec::new());
        }

        let bytes = grey.iter().map(|&v| v.clamp(0, 255) as u8).collect();
        let image = GrayImage::from_raw(width, height, bytes).ok_or_else(|| {
            HoughError::Compute(format!("grey plane does not fill {width}x{height}"))
        })?;

        let threshold = self.edge_threshold();
        let gradients = sobel_gradients(&image);
        let edges: Vec<i32> = gradients
            .pixels()
            .map(|px| {
                if px.0[0] >= threshold {
                    EDGE_VALUE
                } else {
                    0
                }
            })
            .collect();
        debug!(
            edge_pixels = edges.iter().filter(|&&v| v != 0).count(),
            "Edge map computed"
        );
        Ok(edges)
    }
}

impl VoteKernel for HostBackend {
    #[instrument(skip(self, edges, tables), fields(r_dim = dims.r_dim, phi_dim = dims.phi_dim))]
    fn accumulate_votes(
        &self,
        edges: &[i32],
        tables: &AngleTables,
        width: u32,
        dims: Dimensions,
        r_step: f64,
    ) -> Result<Vec<u32>> {
        if tables.len() != dims.phi_dim || tables.sin.len() != tables.cos.len() {
            return Err(HoughError::Compute(format!(
                "angle tables hold {} entries, expected {}",
                tables.len(),
                dims.phi_dim
            )));
        }
        if !(r_step.is_finite() && r_step > 0.0) {
            return Err(HoughError::Compute(format!("invalid r step {r_step}")));
        }
        plane_height(edges.len(), width, edges.len())?;

        let mut accumulator = vec![0u32; dims.len()];
        let mut votes = 0u64;
        for (index, _) in edges.iter().enumerate().filter(|&(_, &v)| v != 0) {
            let x = (index % width as usize) as f64;
            let y = (index / width as usize) as f64;
            for (phi_index, (cos, sin)) in tables.cos.iter().zip(&tables.sin).enumerate() {
                let r = x * cos + y * sin;
                // Lines on the far side of the origin belong to another phi.
                if r < 0.0 {
                    continue;
                }
                let r_index = (r / r_step).round() as usize;
                if r_index < dims.r_dim {
                    accumulator[phi_index * dims.r_dim + r_index] += 1;
                    votes += 1;
                }
            }
        }
        debug!(votes, "Votes accumulated");
        Ok(accumulator)
    }
}

/// Check a row-major plane against its declared size; returns the row count.
fn plane_height(len: usize, width: u32, pixel_count: usize) -> Result<u32> {
    if len != pixel_count {
        return Err(HoughError::Compute(format!(
            "plane holds {len} values, expected {pixel_count}"
        )));
    }
    if pixel_count == 0 {
        return Ok(0);
    }
    if width == 0 || pixel_count % width as usize != 0 {
        return Err(HoughError::Compute(format!(
            "{pixel_count} pixels do not form rows of width {width}"
        )));
    }
    u32::try_from(pixel_count / width as usize)
        .map_err(|_| HoughError::Compute("plane has too many rows".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use houghline_detect::{build_angle_tables, compute_dimensions};
    use std::f64::consts::FRAC_PI_4;

    fn backend() -> HostBackend {
        HostBackend::new(128)
    }

    #[test]
    fn luminance_weights() {
        let grey = backend()
            .greyscale(&[255, 0, 0, 255], &[0, 255, 0, 255], &[0, 0, 255, 255])
            .unwrap();
        assert_eq!(grey, vec![76, 150, 29, 255]);
    }

    #[test]
    fn mismatched_planes_fail() {
        assert!(matches!(
            backend().greyscale(&[1, 2], &[1], &[1, 2]),
            Err(HoughError::Compute(_))
        ));
    }

    #[test]
    fn flat_image_has_no_edges() {
        let edges = backend().detect_edges(&[90; 12 * 8], 12, 12 * 8).unwrap();
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn step_produces_a_vertical_edge() {
        let (w, h) = (12usize, 8usize);
        let grey: Vec<i32> = (0..w * h)
            .map(|i| if i % w < 6 { 0 } else { 255 })
            .collect();
        let edges = backend().detect_edges(&grey, w as u32, w * h).unwrap();
        for y in 0..h {
            assert_eq!(edges[y * w + 5], EDGE_VALUE);
            assert_eq!(edges[y * w + 6], EDGE_VALUE);
            assert_eq!(edges[y * w], 0);
            assert_eq!(edges[y * w + 11], 0);
        }
    }

    #[test]
    fn threshold_decides_what_counts_as_an_edge() {
        // A 40-level step gives a Sobel magnitude of 160.
        let (w, h) = (8usize, 4usize);
        let grey: Vec<i32> = (0..w * h)
            .map(|i| if i % w < 4 { 100 } else { 140 })
            .collect();

        let low = HostBackend::new(160);
        let high = HostBackend::new(161);
        assert_eq!(low.edge_threshold(), 160);
        assert_eq!(high.edge_threshold(), 161);

        let found = low.detect_edges(&grey, w as u32, w * h).unwrap();
        assert_eq!(found[3], EDGE_VALUE);
        assert_eq!(found[4], EDGE_VALUE);
        let missed = high.detect_edges(&grey, w as u32, w * h).unwrap();
        assert!(missed.iter().all(|&v| v == 0));
    }

    #[test]
    fn ragged_plane_is_rejected() {
        assert!(matches!(
            backend().detect_edges(&[0; 10], 3, 10),
            Err(HoughError::Compute(_))
        ));
    }

    #[test]
    fn single_pixel_votes_once_per_angle() {
        let (w, h) = (10u32, 10u32);
        let dims = compute_dimensions(w, h, 1.0, FRAC_PI_4).unwrap();
        let tables = build_angle_tables(dims.phi_dim, FRAC_PI_4).unwrap();
        let mut edges = vec![0; (w * h) as usize];
        edges[4 * w as usize + 3] = EDGE_VALUE; // (3, 4)

        let acc = backend()
            .accumulate_votes(&edges, &tables, w, dims, 1.0)
            .unwrap();
        assert_eq!(acc.len(), dims.len());
        assert_eq!(acc.iter().sum::<u32>(), 4);
        assert_eq!(acc[3], 1); // phi = 0, r = 3
        assert_eq!(acc[2 * dims.r_dim + 4], 1); // phi = 90, r = 4
    }

    #[test]
    fn negative_distances_are_skipped() {
        let (w, h) = (10u32, 10u32);
        let dims = compute_dimensions(w, h, 1.0, FRAC_PI_4).unwrap();
        let tables = build_angle_tables(dims.phi_dim, FRAC_PI_4).unwrap();
        let mut edges = vec![0; (w * h) as usize];
        edges[5] = EDGE_VALUE; // (5, 0): r < 0 at 135 degrees

        let acc = backend()
            .accumulate_votes(&edges, &tables, w, dims, 1.0)
            .unwrap();
        assert_eq!(acc.iter().sum::<u32>(), 3);
        assert!(acc[3 * dims.r_dim..].iter().all(|&v| v == 0));
    }

    #[test]
    fn collinear_pixels_share_a_bin() {
        let (w, h) = (20u32, 20u32);
        let dims = compute_dimensions(w, h, 1.25, 0.012).unwrap();
        let tables = build_angle_tables(dims.phi_dim, 0.012).unwrap();
        let mut edges = vec![0; (w * h) as usize];
        for y in 0..h as usize {
            edges[y * w as usize + 10] = EDGE_VALUE;
        }

        let acc = backend()
            .accumulate_votes(&edges, &tables, w, dims, 1.25)
            .unwrap();
        let best = acc
            .iter()
            .enumerate()
            .max_by_key(|&(i, &v)| (v, std::cmp::Reverse(i)))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(acc[best], h);
        assert_eq!(best, 8); // phi = 0, r = 10 / 1.25
    }

    #[test]
    fn short_angle_tables_fail() {
        let dims = compute_dimensions(4, 4, 1.0, FRAC_PI_4).unwrap();
        let tables = build_angle_tables(2, FRAC_PI_4).unwrap();
        assert!(matches!(
            backend().accumulate_votes(&[0; 16], &tables, 4, dims, 1.0),
            Err(HoughError::Compute(_))
        ));
    }
}
