//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use hilbert_pack::prelude::*;
//! ```

pub use crate::{BBox, Coord, HilbertRTree, IndexError, IndexOptions};
