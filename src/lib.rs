//! # hilbert-pack - static Hilbert R-tree
//!
//! A bulk-loaded spatial index over axis-aligned 2D bounding boxes. Insert
//! every box once, finish, then answer "which boxes overlap this rectangle"
//! as often as needed. Built for millions of static geometries: map
//! rendering, collision broad-phase, geo lookups.
//!
//! ## Features
//!
//! - **Hilbert Curve Ordering**: leaves are sorted along a Hilbert curve through their centers
//! - **Flat Packed Tree**: leaves and parents share one array, no pointers
//! - **Generic Coordinates**: `i8`, `i16`, `i32`, `i64`, `f32`, `f64` via [`Coord`]
//! - **Allocation-free Queries**: reuse one result buffer with [`HilbertRTree::search_into`]
//!
//! ## Quick Start
//!
//! ```rust
//! use hilbert_pack::prelude::*;
//!
//! // Create a new spatial index
//! let mut tree = HilbertRTree::new();
//!
//! // Add some bounding boxes (min_x, min_y, max_x, max_y)
//! tree.add(0.0, 0.0, 2.0, 2.0);    // Box 0: large box
//! tree.add(1.0, 1.0, 3.0, 3.0);    // Box 1: overlapping box
//! tree.add(5.0, 5.0, 6.0, 6.0);    // Box 2: distant box
//! tree.add(1.5, 1.5, 2.5, 2.5);    // Box 3: small box inside others
//!
//! // Build the spatial index (required before querying)
//! tree.finish();
//!
//! // Query for boxes intersecting a region
//! let mut results = Vec::new();
//! tree.search_into(1.2, 1.2, 2.8, 2.8, &mut results);
//! results.sort_unstable();
//! assert_eq!(results, vec![0, 1, 3]);
//!
//! // The buffer is cleared by every query
//! tree.search_into(4.0, 4.0, 7.0, 7.0, &mut results);
//! assert_eq!(results, vec![2]);
//! ```
//!
//! ## How It Works
//!
//! [`HilbertRTree::finish`] maps each box center onto a 16th-order Hilbert
//! curve spanning the overall bounds, sorts the boxes by that rank, then
//! groups every `node_size` consecutive nodes under one parent, level by
//! level, until a single root remains. Queries start at the root and only
//! descend into parents whose box overlaps the query.
//!
//! The index is static: boxes cannot be added or removed after `finish`.

pub mod bbox;
pub mod coord;
pub mod error;
pub mod hilbert;
pub mod hilbert_rtree;
pub mod options;
pub mod prelude;
mod sort;

pub use bbox::BBox;
pub use coord::Coord;
pub use error::IndexError;
pub use hilbert_rtree::HilbertRTree;
pub use options::IndexOptions;

#[cfg(test)]
mod proptests;
