//! Detection of isolated points.
//!
//! A point is isolated when the closest *other* point of the set lies
//! strictly farther away than a threshold `dist_min`. Every point is queried
//! against a [`KdTree`] built over the whole set for its two nearest
//! neighbors: itself at distance zero, and the nearest other point.
//!
//! ```
//! use isostars::isolated;
//!
//! let stars = [[0.0, 0.0], [1.0, 1.0], [23.0, 1.0], [2.0, 1.0]];
//! assert_eq!(isolated(&stars, 10.0).unwrap(), vec![2]);
//! ```

use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::kdtree::KdTree;
use crate::point::Point;
use crate::search::NeighborHeap;

/// Returns the indices of the points in `points` that are isolated at
/// threshold `dist_min`, in ascending order.
///
/// Shorthand for building a [`KdTree`] and running [`Isolation::find`] with
/// default settings.
pub fn isolated<const D: usize>(points: &[Point<D>], dist_min: f64) -> Result<Vec<usize>> {
    Isolation::new(dist_min).find_points(points)
}

/// Configurable isolated-point classifier.
///
/// ```
/// use isostars::{Isolation, KdTree};
///
/// let tree = KdTree::build(&[[0.0, 0.0], [0.5, 0.5], [9.0, 9.0]]).unwrap();
/// let lonely = Isolation::new(2.0).parallel(false).find(&tree).unwrap();
/// assert_eq!(lonely, vec![2]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Isolation {
    dist_min: f64,
    parallel: bool,
}

impl Isolation {
    /// Creates a classifier for threshold `dist_min`. Queries run in parallel
    /// on the current rayon pool by default.
    pub fn new(dist_min: f64) -> Self {
        Isolation {
            dist_min,
            parallel: true,
        }
    }

    /// Enables or disables parallel queries.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn dist_min(&self) -> f64 {
        self.dist_min
    }

    /// Builds a tree over `points` and classifies them.
    pub fn find_points<const D: usize>(&self, points: &[Point<D>]) -> Result<Vec<usize>> {
        self.validate()?;
        let tree = KdTree::build(points)?;
        self.find(&tree)
    }

    /// Classifies every point stored in `tree`, returning the input indices of
    /// the isolated ones in ascending order.
    ///
    /// A tree holding a single point reports it as isolated.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the threshold is negative, NaN or infinite.
    pub fn find<const D: usize>(&self, tree: &KdTree<D>) -> Result<Vec<usize>> {
        self.validate()?;
        let limit_sq = self.dist_min * self.dist_min;

        let mut indices: Vec<usize> = if self.parallel {
            tree.nodes
                .par_iter()
                .map_init(
                    || NeighborHeap::with_capacity(2),
                    |heap, node| is_isolated(tree, &node.point, node.index, limit_sq, heap).map(|iso| (node.index, iso)),
                )
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .filter_map(|(index, iso)| iso.then_some(index))
                .collect()
        } else {
            let mut heap = NeighborHeap::with_capacity(2);
            let mut out = Vec::new();
            for node in &tree.nodes {
                if is_isolated(tree, &node.point, node.index, limit_sq, &mut heap)? {
                    out.push(node.index);
                }
            }
            out
        };
        indices.sort_unstable();

        debug!(
            "isolation: {} of {} points farther than {} from any other (parallel: {})",
            indices.len(),
            tree.len(),
            self.dist_min,
            self.parallel
        );
        Ok(indices)
    }

    fn validate(&self) -> Result<()> {
        if !self.dist_min.is_finite() || self.dist_min < 0.0 {
            return Err(Error::InvalidInput(format!(
                "distance threshold must be finite and non-negative, got {}",
                self.dist_min
            )));
        }
        Ok(())
    }
}

/// Whether the nearest point other than `index` lies farther than
/// `sqrt(limit_sq)` from `point`.
fn is_isolated<const D: usize>(
    tree: &KdTree<D>,
    point: &Point<D>,
    index: usize,
    limit_sq: f64,
    heap: &mut NeighborHeap<D>,
) -> Result<bool> {
    tree.nearest_with(point, 2, heap)?;
    // With coincident points the other one may come first.
    let other = heap.drain_sorted().into_iter().find(|n| n.index != index);
    Ok(match other {
        Some(n) => n.dist_sq > limit_sq,
        None => true,
    })
}
