//! # isostars
//!
//! `isostars` answers exact k-nearest-neighbor queries over a static set of
//! points in a low-dimensional space, and uses them to find *isolated* points:
//! points whose nearest neighbor lies farther away than a given threshold.
//!
//! ## Features
//!
//! - **Balanced k-d tree**: built once by recursive median splits, with the axis cycling by depth.
//! - **Exact k-NN search**: branch-and-bound descent with a bounded max-heap of the `k` best candidates.
//! - **Deterministic**: ties are resolved by input order when building and by visit order when searching.
//! - **Any dimension**: points are `[f64; D]` for any compile-time `D >= 1`.
//! - **Parallel classification**: isolated-point detection fans out over `rayon`.
//!
//! ## Example
//!
//! ```
//! use isostars::KdTree;
//!
//! let stars = [[0.0, 0.0], [1.0, 1.0], [23.0, 1.0], [2.0, 1.0]];
//! let tree = KdTree::build(&stars).unwrap();
//!
//! let hits = tree.nearest(&[22.0, 0.0], 2).unwrap();
//! assert_eq!(hits[0].index, 2);
//! assert_eq!(hits[1].index, 3);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct; [`isolated`] and
//! [`Isolation`] build on top of it.

mod error;
mod isolation;
mod kdtree;
mod point;
mod search;

pub use error::Error;
pub use error::Result;
pub use isolation::isolated;
pub use isolation::Isolation;
pub use kdtree::KdTree;
pub use point::dist_sq;
pub use point::Neighbor;
pub use point::Point;
pub use search::NeighborHeap;
