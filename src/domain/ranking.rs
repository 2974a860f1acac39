//! Bounded top-K selection over streamed flip candidates.
//!
//! [`TopFlips`] keeps the K most profitable flips seen so far in a min-heap,
//! so the weakest held entry is always at the root and can be compared or
//! replaced in `O(log K)`. The heap is not sorted; [`TopFlips::into_ranked`]
//! sorts once at the end.
//!
//! Ties on profit keep whichever candidate was offered first: a newcomer
//! only displaces the weakest entry when it is strictly more profitable.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use super::flip::Flip;

/// Held entry ordered by profit, then by arrival (earlier ranks higher).
#[derive(Debug)]
struct Ranked {
    seq: u64,
    flip: Flip,
}

impl Ranked {
    fn key(&self) -> (f64, Reverse<u64>) {
        (self.flip.profit_per_hour(), Reverse(self.seq))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, a_seq) = self.key();
        let (b, b_seq) = other.key();
        a.total_cmp(&b).then(a_seq.cmp(&b_seq))
    }
}

/// Keeps the K most profitable flips offered to it.
#[derive(Debug)]
pub struct TopFlips {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
    offered: u64,
}

impl TopFlips {
    /// Creates a selector holding at most `capacity` flips.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
            offered: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Profit of the weakest held flip, if any.
    #[must_use]
    pub fn floor(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.0.flip.profit_per_hour())
    }

    /// Offers a candidate. Returns true if it is now held.
    ///
    /// NaN profits are rejected outright.
    pub fn offer(&mut self, flip: Flip) -> bool {
        if flip.profit_per_hour().is_nan() || self.capacity == 0 {
            debug!(product_id = %flip.product_id(), "Flip rejected");
            return false;
        }

        let entry = Ranked {
            seq: self.offered,
            flip,
        };
        self.offered += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(entry));
            return true;
        }

        match self.heap.peek_mut() {
            Some(mut weakest)
                if entry.flip.profit_per_hour() > weakest.0.flip.profit_per_hour() =>
            {
                *weakest = Reverse(entry);
                true
            }
            _ => false,
        }
    }

    /// Held flips, most profitable first.
    #[must_use]
    pub fn into_ranked(self) -> Vec<Flip> {
        // min-heap of Reverse: ascending order of Reverse is descending rank
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(entry)| entry.flip)
            .collect()
    }
}

impl Extend<Flip> for TopFlips {
    fn extend<I: IntoIterator<Item = Flip>>(&mut self, iter: I) {
        for flip in iter {
            self.offer(flip);
        }
    }
}
