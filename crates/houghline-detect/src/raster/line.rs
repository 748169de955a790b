// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line rasterization: draws the line of one accumulator peak over the image.
//
// A peak `(r, phi)` gives the foot point `p = (round(r cos phi), round(r sin phi))`
// of the perpendicular from the origin. The line passes through `p` at a right
// angle to the origin→p vector, so its slope is `-p.x / p.y`. Axis-aligned
// lines are painted as a full row or column; everything else is walked one
// column at a time in both directions from `p`, accumulating the row by the
// slope (DDA stepping).

use houghline_core::error::Result;
use tracing::{debug, trace};

use crate::pixels::buffer::PixelBuffer;
use crate::space::params::{Dimensions, Discretization, index_to_polar};

/// Colour written over R, G, B of every line pixel. Alpha is left alone.
pub const MARKER_RGB: [u8; 3] = [0, 255, 0];

/// Draw the line for accumulator bin `peak_index` into `buffer`.
///
/// Returns the number of pixels coloured. Fails with `OutOfRange` when the
/// index lies outside `dims`.
pub fn draw_line(
    buffer: &mut PixelBuffer,
    dims: Dimensions,
    peak_index: usize,
    disc: Discretization,
) -> Result<usize> {
    let bin = index_to_polar(peak_index, dims, disc)?;
    let (px, py) = bin.foot_point();
    trace!(peak_index, r = bin.r, phi = bin.phi, px, py, "Drawing line");

    let painted = if px == 0 {
        paint_row(buffer, py)
    } else if py == 0 {
        paint_column(buffer, px)
    } else {
        walk_orthogonal(buffer, px, py)
    };
    Ok(painted)
}

fn paint_row(buffer: &mut PixelBuffer, y: i64) -> usize {
    if y < 0 || y >= buffer.height() as i64 {
        debug!(y, "Horizontal line lies outside the image");
        return 0;
    }
    let y = y as u32;
    (0..buffer.width())
        .filter(|&x| buffer.set_rgb(x, y, MARKER_RGB))
        .count()
}

fn paint_column(buffer: &mut PixelBuffer, x: i64) -> usize {
    if x < 0 || x >= buffer.width() as i64 {
        debug!(x, "Vertical line lies outside the image");
        return 0;
    }
    let x = x as u32;
    (0..buffer.height())
        .filter(|&y| buffer.set_rgb(x, y, MARKER_RGB))
        .count()
}

/// Walk right while the column is left of the image edge, then left while it
/// is right of column 0. The foot point itself is only a start position.
fn walk_orthogonal(buffer: &mut PixelBuffer, px: i64, py: i64) -> usize {
    let width = buffer.width() as i64;
    let slope = -(px as f64) / py as f64;
    let mut painted = 0;

    let (mut x, mut y) = (px, py as f64);
    while x < width {
        x += 1;
        y += slope;
        painted += plot(buffer, x, y) as usize;
    }

    let (mut x, mut y) = (px, py as f64);
    while x > 0 {
        x -= 1;
        y -= slope;
        painted += plot(buffer, x, y) as usize;
    }

    painted
}

fn plot(buffer: &mut PixelBuffer, x: i64, y: f64) -> bool {
    let row = y.round();
    if !(row >= 0.0) {
        return false;
    }
    match u32::try_from(x) {
        Ok(column) => buffer.set_rgb(column, row as u32, MARKER_RGB),
        Err(_) => false,
    }
}
