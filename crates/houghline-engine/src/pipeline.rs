// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end pipeline: decode, run the compute kernels, pick the strongest
// peaks, draw their lines and encode the result.
//
// The output file is only written once every earlier stage has succeeded.

use houghline_core::config::{Backdrop, HoughConfig};
use houghline_core::error::Result;
use houghline_detect::pixels::codec;
use houghline_detect::{Discretization, ParameterSpace, PixelBuffer, draw_line, select_top_n};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::session::ComputeSession;

/// One drawn peak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakReport {
    pub bin: usize,
    pub votes: u32,
    pub r: f64,
    pub phi: f64,
    pub pixels_drawn: usize,
}

/// Summary of one pipeline run, printed with `--report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub backend: String,
    pub width: u32,
    pub height: u32,
    pub r_dim: usize,
    pub phi_dim: usize,
    pub accumulator_len: usize,
    pub requested_lines: usize,
    pub lines_found: usize,
    pub pixels_drawn: usize,
    pub peaks: Vec<PeakReport>,
}

/// Run the whole pipeline described by `config`.
#[instrument(skip_all, fields(input = %config.input.display(), output = %config.output.display()))]
pub fn run(config: &HoughConfig) -> Result<RunReport> {
    config.validate()?;
    let mut buffer = codec::decode(&config.input)?;
    let mut session = ComputeSession::open(config)?;

    let report = detect_and_draw(&mut session, &mut buffer, config)?;
    codec::encode(&config.output, &buffer)?;

    info!(
        lines = report.lines_found,
        pixels = report.pixels_drawn,
        "Pipeline complete"
    );
    Ok(report)
}

/// Detect lines in `buffer` and draw them over it in place.
///
/// With `Backdrop::Edges` the buffer's colours are first replaced by the
/// edge map, so the lines are drawn over what the voting actually saw.
pub fn detect_and_draw(
    session: &mut ComputeSession,
    buffer: &mut PixelBuffer,
    config: &HoughConfig,
) -> Result<RunReport> {
    let disc = Discretization::new(config.r_step, config.phi_step)?;
    let space = ParameterSpace::new(buffer.width(), buffer.height(), disc)?;
    let dims = space.dimensions();

    let planes = buffer.rgb_planes();
    let grey = session.greyscale(&planes)?;
    let edges = session.detect_edges(&grey, buffer.width())?;
    let accumulator = session.accumulate_votes(&edges, &space)?;

    let peaks = select_top_n(&accumulator, config.line_count)?;

    if config.backdrop == Backdrop::Edges {
        buffer.apply_grey(&edges)?;
    }

    let mut drawn = Vec::with_capacity(peaks.filled());
    for (bin, votes) in peaks.peaks() {
        let polar = space.index_to_polar(bin)?;
        let pixels_drawn = draw_line(buffer, dims, bin, disc)?;
        debug!(bin, votes, r = polar.r, phi = polar.phi, pixels_drawn, "Line drawn");
        drawn.push(PeakReport {
            bin,
            votes,
            r: polar.r,
            phi: polar.phi,
            pixels_drawn,
        });
    }

    Ok(RunReport {
        backend: session.backend_name().to_string(),
        width: buffer.width(),
        height: buffer.height(),
        r_dim: dims.r_dim,
        phi_dim: dims.phi_dim,
        accumulator_len: accumulator.len(),
        requested_lines: config.line_count,
        lines_found: drawn.len(),
        pixels_drawn: drawn.iter().map(|p| p.pixels_drawn).sum(),
        peaks: drawn,
    })
}
