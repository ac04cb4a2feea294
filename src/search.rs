use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::kdtree::{KdTree, NIL};
use crate::point::{dist_sq, is_finite, to_point, Neighbor, Point};

#[derive(Clone, Copy, Debug)]
struct Candidate<const D: usize> {
    neighbor: Neighbor<D>,
    /// Insertion counter, breaks distance ties in favor of earlier candidates.
    seq: u64,
}

impl<const D: usize> Candidate<D> {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.neighbor
            .dist_sq
            .total_cmp(&other.neighbor.dist_sq)
            .then(self.seq.cmp(&other.seq))
    }
}

impl<const D: usize> PartialEq for Candidate<D> {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl<const D: usize> Eq for Candidate<D> {}

impl<const D: usize> PartialOrd for Candidate<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const D: usize> Ord for Candidate<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

/// A bounded collection holding the `k` closest candidates offered so far.
///
/// Internally a max-heap on `(squared distance, insertion counter)`, so the
/// worst kept candidate is always on top. Once full, a candidate only
/// replaces the top if it is strictly closer; among equal distances the one
/// offered first is kept.
///
/// The heap can be reused across queries with [`NeighborHeap::reset`] to
/// avoid reallocating.
#[derive(Clone, Debug, Default)]
pub struct NeighborHeap<const D: usize> {
    heap: BinaryHeap<Candidate<D>>,
    capacity: usize,
    seq: u64,
}

impl<const D: usize> NeighborHeap<D> {
    pub fn with_capacity(k: usize) -> Self {
        NeighborHeap {
            heap: BinaryHeap::with_capacity(k),
            capacity: k,
            seq: 0,
        }
    }

    /// Empties the heap and sets a new capacity.
    pub fn reset(&mut self, k: usize) {
        self.heap.clear();
        self.heap.reserve(k);
        self.capacity = k;
        self.seq = 0;
    }

    /// Offers a candidate. Returns `true` if it was kept.
    pub fn offer(&mut self, point: Point<D>, index: usize, dist_sq: f64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let candidate = Candidate {
            neighbor: Neighbor { point, index, dist_sq },
            seq: self.seq,
        };
        self.seq += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(candidate);
            return true;
        }
        match self.heap.peek_mut() {
            Some(mut worst) if dist_sq < worst.neighbor.dist_sq => {
                *worst = candidate;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Squared distance of the worst kept candidate, if any.
    pub fn worst_dist_sq(&self) -> Option<f64> {
        self.heap.peek().map(|c| c.neighbor.dist_sq)
    }

    /// Removes all candidates, nearest first.
    pub fn drain_sorted(&mut self) -> Vec<Neighbor<D>> {
        let mut candidates: Vec<Candidate<D>> = self.heap.drain().collect();
        candidates.sort_unstable();
        candidates.into_iter().map(|c| c.neighbor).collect()
    }

    /// Consumes the heap, returning candidates nearest first.
    pub fn into_sorted_vec(self) -> Vec<Neighbor<D>> {
        self.heap.into_sorted_vec().into_iter().map(|c| c.neighbor).collect()
    }

    /// Whether a subtree whose splitting plane lies `plane_dist_sq` away from
    /// the query could still hold a closer candidate.
    #[inline]
    fn may_improve(&self, plane_dist_sq: f64) -> bool {
        match self.heap.peek() {
            Some(worst) if self.is_full() => plane_dist_sq < worst.neighbor.dist_sq,
            _ => true,
        }
    }
}

impl<const D: usize> KdTree<D> {
    /// Returns the `k` points closest to `query`, nearest first.
    ///
    /// Returns fewer than `k` results when the tree holds fewer points, and
    /// nothing when `k` is zero. Equal distances are ordered by the order in
    /// which the search met the points, which is fixed for a given tree and
    /// query.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `query` has a NaN or infinite coordinate.
    pub fn nearest(&self, query: &Point<D>, k: usize) -> Result<Vec<Neighbor<D>>> {
        let mut heap = NeighborHeap::with_capacity(k.min(self.len()));
        self.nearest_with(query, k, &mut heap)?;
        Ok(heap.into_sorted_vec())
    }

    /// Like [`KdTree::nearest`] for an untyped query.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `query` does not have exactly `D`
    /// coordinates or any of them is not finite.
    pub fn nearest_slice(&self, query: &[f64], k: usize) -> Result<Vec<Neighbor<D>>> {
        let query = to_point(query, "query")?;
        self.nearest(&query, k)
    }

    /// The single closest point, or `None` for an empty tree.
    pub fn nearest_one(&self, query: &Point<D>) -> Result<Option<Neighbor<D>>> {
        Ok(self.nearest(query, 1)?.into_iter().next())
    }

    /// Runs a `k`-nearest query into a caller-owned heap.
    ///
    /// The heap is reset first; afterwards it holds the results and can be
    /// drained with [`NeighborHeap::drain_sorted`]. Reusing one heap per
    /// thread avoids an allocation per query.
    pub fn nearest_with(&self, query: &Point<D>, k: usize, heap: &mut NeighborHeap<D>) -> Result<()> {
        if !is_finite(query) {
            return Err(Error::non_finite("query"));
        }
        heap.reset(k.min(self.len()));
        if k > 0 {
            self.search_recursive(self.root(), query, heap);
        }
        Ok(())
    }

    fn search_recursive(&self, node_idx: u32, query: &Point<D>, heap: &mut NeighborHeap<D>) {
        if node_idx == NIL {
            return;
        }
        let node = &self.nodes[node_idx as usize];

        heap.offer(node.point, node.index, dist_sq(query, &node.point));

        let axis = node.axis as usize;
        let diff = query[axis] - node.point[axis];

        // Visit the side of the splitting plane containing the query first
        let (near, far) = if diff < 0.0 { (node.left, node.right) } else { (node.right, node.left) };

        self.search_recursive(near, query, heap);

        if heap.may_improve(diff * diff) {
            self.search_recursive(far, query, heap);
        }
    }
}
