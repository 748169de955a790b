// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Top-N peak selection over a vote accumulator.
//
// The accumulator holds tens of thousands of bins while only a few dozen
// lines are wanted, so the scan keeps a fixed-size list sorted ascending by
// score and only touches it when a bin beats the current minimum. Cost is
// O(L * N) with no allocation beyond the list itself.

use houghline_core::error::{HoughError, Result};
use tracing::{debug, instrument, warn};

/// The N best accumulator bins found so far.
///
/// `scores` and `ids` are parallel arrays sorted ascending by score, so
/// `scores[0]` is always the weakest retained bin. Slots never claimed by a
/// positive vote keep the `(0, 0)` sentinel; `filled` counts the claimed
/// ones, which always sit at the high end of the arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakList {
    scores: Vec<u32>,
    ids: Vec<usize>,
    filled: usize,
}

impl PeakList {
    /// An empty list with room for `capacity` peaks.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            scores: vec![0; capacity],
            ids: vec![0; capacity],
            filled: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.scores.len()
    }

    /// Number of slots holding a real peak.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_full(&self) -> bool {
        self.filled == self.capacity()
    }

    /// Raw scores, ascending, sentinels included.
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Raw bin ids parallel to `scores`, sentinels included.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Offer bin `index` with `votes`. Returns whether it was retained.
    ///
    /// A bin enters only if it strictly beats the current minimum, so among
    /// equal scores at the cut-off the first one seen stays.
    pub fn offer(&mut self, index: usize, votes: u32) -> bool {
        if self.scores.is_empty() || votes <= self.scores[0] {
            return false;
        }
        if self.filled < self.capacity() {
            self.filled += 1;
        }
        self.scores[0] = votes;
        self.ids[0] = index;

        let mut slot = 0;
        while slot + 1 < self.scores.len() && self.scores[slot] > self.scores[slot + 1] {
            self.scores.swap(slot, slot + 1);
            self.ids.swap(slot, slot + 1);
            slot += 1;
        }
        true
    }

    /// Claimed peaks as `(bin id, votes)`, strongest first.
    pub fn peaks(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        let start = self.capacity() - self.filled;
        self.ids[start..]
            .iter()
            .copied()
            .zip(self.scores[start..].iter().copied())
            .rev()
    }

    /// Claimed bin ids, strongest first.
    pub fn peak_ids(&self) -> Vec<usize> {
        self.peaks().map(|(id, _)| id).collect()
    }
}

/// Select the `n` highest-voted bins of `accumulator` in a single pass.
///
/// Fails with `InvalidArgument` when `n` exceeds the accumulator length.
#[instrument(skip(accumulator), fields(len = accumulator.len()))]
pub fn select_top_n(accumulator: &[u32], n: usize) -> Result<PeakList> {
    if n > accumulator.len() {
        return Err(HoughError::InvalidArgument(format!(
            "cannot select {n} peaks from an accumulator of {} bins",
            accumulator.len()
        )));
    }

    let mut list = PeakList::with_capacity(n);
    for (index, &votes) in accumulator.iter().enumerate() {
        list.offer(index, votes);
    }

    if !list.is_full() {
        warn!(
            requested = n,
            found = list.filled(),
            "Fewer voted bins than requested peaks"
        );
    }
    debug!(
        found = list.filled(),
        strongest = list.scores().last().copied().unwrap_or(0),
        "Peak selection complete"
    );
    Ok(list)
}
