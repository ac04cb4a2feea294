use log::debug;

use crate::error::{Error, Result};
use crate::point::{is_finite, to_point, Point};

/// Marks an absent child in the node arena.
pub(crate) const NIL: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
pub(crate) struct KdNode<const D: usize> {
    pub(crate) point: Point<D>,
    /// Position of the point in the input list.
    pub(crate) index: usize,
    pub(crate) left: u32, // NIL if absent
    pub(crate) right: u32,
    pub(crate) axis: u32,
}

/// A balanced k-d tree over a static set of `D`-dimensional points.
///
/// Every node holds one input point. Nodes are stored in a flat arena and
/// refer to their children by index; the root is the last node pushed.
/// The tree is immutable once built and can be shared between threads.
#[derive(Clone, Debug)]
pub struct KdTree<const D: usize> {
    pub(crate) nodes: Vec<KdNode<D>>,
    depth: usize,
}

impl<const D: usize> KdTree<D> {
    /// Builds a tree from a list of points.
    ///
    /// At each depth the current subset is split on axis `depth % D` at its
    /// median. Points with equal coordinates on that axis are ordered by their
    /// position in `points`, so the same input always yields the same tree.
    ///
    /// An empty list yields an empty tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `D` is zero or a coordinate is NaN or
    /// infinite, [`Error::TooManyPoints`] if the arena cannot index every point.
    pub fn build(points: &[Point<D>]) -> Result<Self> {
        if D == 0 {
            return Err(Error::InvalidInput("points must have at least one dimension".into()));
        }
        if points.len() >= NIL as usize {
            return Err(Error::TooManyPoints(points.len()));
        }
        if let Some(i) = points.iter().position(|p| !is_finite(p)) {
            return Err(Error::non_finite(&format!("point {i}")));
        }

        let mut tree = KdTree {
            nodes: Vec::with_capacity(points.len()),
            depth: 0,
        };
        if points.is_empty() {
            return Ok(tree);
        }

        let mut indices: Vec<usize> = (0..points.len()).collect();
        let (_, depth) = tree.build_recursive(&mut indices, 0, points);
        tree.depth = depth;

        debug!("built kd-tree: {} points, {} dimensions, depth {}", tree.len(), D, depth);
        Ok(tree)
    }

    /// Builds a tree from interleaved coordinates `x0, y0, x1, y1, ...`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the length of `coords` is not a multiple of
    /// `D`, plus everything [`KdTree::build`] rejects.
    pub fn from_flat(coords: &[f64]) -> Result<Self> {
        if D == 0 {
            return Err(Error::InvalidInput("points must have at least one dimension".into()));
        }
        if coords.len() % D != 0 {
            return Err(Error::InvalidInput(format!(
                "{} coordinates cannot be split into points of dimension {}",
                coords.len(),
                D
            )));
        }
        let points = coords
            .chunks_exact(D)
            .enumerate()
            .map(|(i, chunk)| to_point(chunk, &format!("point {i}")))
            .collect::<Result<Vec<_>>>()?;
        Self::build(&points)
    }

    /// Builds a tree from rows of untyped coordinates.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] naming the first row whose length differs from
    /// `D`, plus everything [`KdTree::build`] rejects.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let points = rows
            .iter()
            .enumerate()
            .map(|(i, row)| to_point(row.as_ref(), &format!("row {i}")))
            .collect::<Result<Vec<_>>>()?;
        Self::build(&points)
    }

    /// Returns `(node index, subtree height)`.
    fn build_recursive(&mut self, indices: &mut [usize], depth: usize, points: &[Point<D>]) -> (u32, usize) {
        if indices.is_empty() {
            return (NIL, 0);
        }

        let axis = depth % D;
        let mid = indices.len() / 2;

        // (coordinate, input index) is a total key, so selecting the median
        // partitions exactly as a full sort would.
        indices.select_nth_unstable_by(mid, |&a, &b| {
            points[a][axis].total_cmp(&points[b][axis]).then(a.cmp(&b))
        });

        let (lower, rest) = indices.split_at_mut(mid);
        let median = rest[0];
        let upper = &mut rest[1..];

        let (left, left_height) = self.build_recursive(lower, depth + 1, points);
        let (right, right_height) = self.build_recursive(upper, depth + 1, points);

        let node_idx = self.nodes.len() as u32;
        self.nodes.push(KdNode {
            point: points[median],
            index: median,
            left,
            right,
            axis: axis as u32,
        });
        (node_idx, 1 + left_height.max(right_height))
    }

    /// Arena index of the root, or [`NIL`] for an empty tree.
    pub(crate) fn root(&self) -> u32 {
        match self.nodes.len() {
            0 => NIL,
            n => (n - 1) as u32,
        }
    }

    /// Number of points in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dimensionality of the points.
    pub fn dim(&self) -> usize {
        D
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Iterates over `(input index, point)` pairs in storage order.
    pub fn points(&self) -> impl Iterator<Item = (usize, &Point<D>)> + '_ {
        self.nodes.iter().map(|n| (n.index, &n.point))
    }
}
