//! Construction-time configuration.

/// Fan-out used when none is configured.
pub const DEFAULT_NODE_SIZE: usize = 16;

/// Smallest fan-out the builder accepts; anything lower is clamped to it.
pub const MIN_NODE_SIZE: usize = 2;

/// Options for [`HilbertRTree::with_options`](crate::HilbertRTree::with_options).
///
/// ```
/// use hilbert_pack::{HilbertRTree, IndexOptions};
///
/// let tree: HilbertRTree<f32> = HilbertRTree::with_options(IndexOptions::default().with_node_size(8));
/// assert_eq!(tree.node_size(), 8);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexOptions {
    /// Maximum children per internal node. Values below 2 are clamped to 2
    /// when the tree is finished.
    pub node_size: usize,
    /// Number of boxes to reserve room for up front.
    pub capacity: usize,
}

impl IndexOptions {
    /// Set the fan-out.
    #[must_use]
    pub const fn with_node_size(mut self, node_size: usize) -> Self {
        self.node_size = node_size;
        self
    }

    /// Set the expected number of boxes.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            node_size: DEFAULT_NODE_SIZE,
            capacity: 0,
        }
    }
}
