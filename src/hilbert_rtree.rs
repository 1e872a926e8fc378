//! Static Hilbert R-tree over 2D boxes.
//!
//! Boxes are collected, sorted once along a Hilbert curve through their
//! centers, and packed bottom-up into a single flat array:
//!
//! - positions `[0, num_items)` hold the leaves in Hilbert order,
//! - every following level holds one parent per window of `node_size`
//!   consecutive nodes of the level below,
//! - the last position holds the root.
//!
//! `level_bounds[l]` is the exclusive end of level `l` in that array, so a
//! node's level is never stored; traversal carries it along instead.

use crate::bbox::{BBox, Node};
use crate::coord::Coord;
use crate::error::{IndexError, Result};
use crate::hilbert::HilbertScale;
use crate::options::{IndexOptions, MIN_NODE_SIZE};
use crate::sort::sort_by_rank;

/// Hilbert R-tree for static 2D bounding boxes.
///
/// Usage is two-phase: [`add`](Self::add) every box, call
/// [`finish`](Self::finish) once, then run any number of
/// [`search`](Self::search) queries. The tree is generic over the coordinate
/// type; see [`Coord`] for the supported types.
///
/// # Examples
/// ```
/// use hilbert_pack::HilbertRTree;
///
/// let mut tree = HilbertRTree::new();
/// tree.add(0.0, 0.0, 1.0, 1.0);
/// tree.add(0.5, 0.5, 1.5, 1.5);
/// tree.add(5.0, 5.0, 6.0, 6.0);
/// tree.finish();
///
/// let mut results = tree.search(0.7, 0.7, 1.3, 1.3);
/// results.sort_unstable();
/// assert_eq!(results, vec![0, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct HilbertRTree<T = f64> {
    /// Leaves, then one run of parents per level, root last
    pub(crate) nodes: Vec<Node<T>>,
    /// Hilbert rank of each leaf, co-sorted with `nodes[..num_items]`
    pub(crate) hilbert_values: Vec<u32>,
    /// Exclusive end position of each level, leaves first
    pub(crate) level_bounds: Vec<usize>,
    /// Fan-out; clamped to at least 2 by `finish`
    pub(crate) node_size: usize,
    /// Number of leaf items
    pub(crate) num_items: usize,
    /// Union of all added boxes
    pub(crate) bounds: BBox<T>,
    pub(crate) finished: bool,
}

impl<T: Coord> HilbertRTree<T> {
    /// Creates a new empty tree with the default node size (16).
    ///
    /// # Example
    /// ```
    /// use hilbert_pack::HilbertRTree;
    /// let tree = HilbertRTree::<i32>::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.node_size(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_options(IndexOptions::default())
    }

    /// Creates a new tree with room for `capacity` boxes and their parents.
    ///
    /// # Example
    /// ```
    /// use hilbert_pack::HilbertRTree;
    /// let tree = HilbertRTree::<f32>::with_capacity(1000);
    /// assert_eq!(tree.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_options(IndexOptions::default().with_capacity(capacity))
    }

    /// Creates a new tree from explicit options.
    pub fn with_options(options: IndexOptions) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            hilbert_values: Vec::new(),
            level_bounds: Vec::new(),
            node_size: options.node_size,
            num_items: 0,
            bounds: BBox::inverted(),
            finished: false,
        };
        if options.capacity > 0 {
            tree.reserve(options.capacity);
        }
        tree
    }

    /// Sets the fan-out used by [`finish`](Self::finish).
    ///
    /// Values below 2 are accepted here and clamped to 2 when the tree is
    /// finished. Ignored once the tree is finished.
    pub fn set_node_size(&mut self, node_size: usize) {
        if self.finished {
            log::warn!("set_node_size({node_size}) ignored: index is already finished");
            return;
        }
        self.node_size = node_size;
    }

    /// Reserves room for `count` leaves plus the parents they will need.
    ///
    /// Purely a capacity hint.
    pub fn reserve(&mut self, count: usize) {
        let node_size = self.node_size.max(MIN_NODE_SIZE);
        let total = compute_level_bounds(count, node_size)
            .last()
            .copied()
            .unwrap_or(0);
        self.nodes.reserve(total.saturating_sub(self.nodes.len()));
    }

    /// Adds a bounding box and returns its index.
    ///
    /// Indices are zero-based and follow insertion order; queries report
    /// them. No validation happens here: a box with `min > max` is stored as
    /// given (see [`try_add`](Self::try_add) for a checked variant). A NaN
    /// coordinate makes the box overlap every query and spreads into the
    /// parents above it and into [`bounds`](Self::bounds), so those are never
    /// pruned.
    ///
    /// Calling this after [`finish`](Self::finish) stores nothing, logs a
    /// warning and returns the current [`len`](Self::len).
    ///
    /// # Example
    /// ```
    /// use hilbert_pack::HilbertRTree;
    /// let mut tree = HilbertRTree::new();
    /// assert_eq!(tree.add(0, 0, 10, 10), 0);
    /// assert_eq!(tree.add(5, 5, 15, 15), 1);
    /// ```
    pub fn add(&mut self, min_x: T, min_y: T, max_x: T, max_y: T) -> usize {
        if self.finished {
            log::warn!("add() ignored: index is already finished");
            return self.num_items;
        }

        let index = self.num_items;
        let bbox = BBox::new(min_x, min_y, max_x, max_y);
        self.nodes.push(Node::leaf(bbox, index));
        self.bounds = self.bounds.union(&bbox);
        self.num_items += 1;
        index
    }

    /// Checked [`add`](Self::add).
    ///
    /// # Errors
    /// - [`IndexError::AlreadyFinished`] after [`finish`](Self::finish),
    /// - [`IndexError::NonFiniteCoordinate`] if a coordinate is NaN or infinite,
    /// - [`IndexError::InvertedBox`] if `min > max` on either axis.
    pub fn try_add(&mut self, min_x: T, min_y: T, max_x: T, max_y: T) -> Result<usize> {
        if self.finished {
            return Err(IndexError::AlreadyFinished);
        }
        let index = self.num_items;
        if ![min_x, min_y, max_x, max_y].into_iter().all(Coord::is_finite) {
            return Err(IndexError::NonFiniteCoordinate { index });
        }
        if BBox::new(min_x, min_y, max_x, max_y).is_inverted() {
            return Err(IndexError::InvertedBox { index });
        }
        Ok(self.add(min_x, min_y, max_x, max_y))
    }

    /// Builds the index. Call once, after all boxes are added and before
    /// querying.
    ///
    /// Leaves are sorted by the Hilbert rank of their centers (normalized
    /// against the overall bounds), then parents are packed level by level
    /// until a single root remains. An axis along which all boxes share one
    /// coordinate ranks every center at 0 on that axis.
    ///
    /// Finishing an empty tree is allowed; it answers every query with no
    /// hits. A second call is ignored with a warning.
    ///
    /// # Example
    /// ```
    /// use hilbert_pack::HilbertRTree;
    /// let mut tree = HilbertRTree::new();
    /// tree.add(0.0, 0.0, 10.0, 10.0);
    /// tree.add(5.0, 5.0, 15.0, 15.0);
    /// tree.finish();
    /// assert!(tree.is_finished());
    /// ```
    pub fn finish(&mut self) {
        if self.finished {
            log::warn!("finish() ignored: index is already finished");
            return;
        }
        self.finished = true;

        let node_size = self.node_size.max(MIN_NODE_SIZE);
        if node_size != self.node_size {
            log::debug!("node size {} clamped to {node_size}", self.node_size);
            self.node_size = node_size;
        }

        let num_items = self.num_items;
        if num_items == 0 {
            log::debug!("finished empty index");
            return;
        }

        self.level_bounds = compute_level_bounds(num_items, node_size);
        let total_nodes = self.level_bounds[self.level_bounds.len() - 1];

        // Rank every leaf center along the curve
        let scale = HilbertScale::new(&self.bounds);
        if scale.is_degenerate() {
            log::debug!(
                "overall bounds {:?} have a flat axis; it maps to Hilbert coordinate 0",
                self.bounds
            );
        }
        self.hilbert_values = self.nodes.iter().map(|node| scale.rank(&node.bbox)).collect();

        sort_by_rank(&mut self.hilbert_values, &mut self.nodes);

        // Pack parents: one per window of `node_size` nodes, level by level
        self.nodes.reserve_exact(total_nodes - num_items);
        let mut pos = 0;
        for level in 0..self.level_bounds.len() - 1 {
            let level_end = self.level_bounds[level];
            while pos < level_end {
                let window_end = pos.saturating_add(node_size).min(level_end);
                let bbox = self.nodes[pos..window_end]
                    .iter()
                    .fold(BBox::inverted(), |acc, child| acc.union(&child.bbox));
                self.nodes.push(Node::parent(bbox, pos));
                pos = window_end;
            }
        }
        debug_assert_eq!(self.nodes.len(), total_nodes, "packed node count");

        log::debug!(
            "finished index: {num_items} items, {} levels, {total_nodes} nodes, node size {node_size}",
            self.level_bounds.len()
        );
    }

    /// Checked [`finish`](Self::finish).
    ///
    /// # Errors
    /// [`IndexError::AlreadyFinished`] if the tree was finished before.
    pub fn try_finish(&mut self) -> Result<()> {
        if self.finished {
            return Err(IndexError::AlreadyFinished);
        }
        self.finish();
        Ok(())
    }

    /// Finds all boxes that overlap the query rectangle.
    ///
    /// Touching edges or corners count as overlap. Returns item indices in
    /// traversal order, not insertion order. Before [`finish`](Self::finish)
    /// or on an empty tree the result is empty.
    ///
    /// # Example
    /// ```
    /// use hilbert_pack::HilbertRTree;
    /// let mut tree = HilbertRTree::new();
    /// tree.add(0, 0, 2, 2);  // Box 0
    /// tree.add(1, 1, 3, 3);  // Box 1
    /// tree.add(4, 4, 5, 5);  // Box 2
    /// tree.finish();
    ///
    /// let mut hits = tree.search(0, 0, 2, 2);
    /// hits.sort_unstable();
    /// assert_eq!(hits, vec![0, 1]);
    /// ```
    pub fn search(&self, min_x: T, min_y: T, max_x: T, max_y: T) -> Vec<usize> {
        let mut results = Vec::new();
        self.collect_overlapping(&BBox::new(min_x, min_y, max_x, max_y), &mut results);
        results
    }

    /// Like [`search`](Self::search), but fills a caller-owned buffer.
    ///
    /// `results` is cleared first, so reusing one buffer across many queries
    /// avoids reallocating. Returns the filled buffer as a slice.
    ///
    /// # Example
    /// ```
    /// use hilbert_pack::HilbertRTree;
    /// let mut tree = HilbertRTree::new();
    /// tree.add(0.0, 0.0, 1.0, 1.0);
    /// tree.add(2.0, 2.0, 3.0, 3.0);
    /// tree.finish();
    ///
    /// let mut results = Vec::new();
    /// assert_eq!(tree.search_into(0.5, 0.5, 0.6, 0.6, &mut results), &[0]);
    /// assert_eq!(tree.search_into(2.5, 2.5, 9.0, 9.0, &mut results), &[1]);
    /// ```
    pub fn search_into<'a>(
        &self,
        min_x: T,
        min_y: T,
        max_x: T,
        max_y: T,
        results: &'a mut Vec<usize>,
    ) -> &'a [usize] {
        results.clear();
        self.collect_overlapping(&BBox::new(min_x, min_y, max_x, max_y), results);
        results
    }

    /// [`search`](Self::search) taking the query as a [`BBox`].
    pub fn search_box(&self, query: &BBox<T>) -> Vec<usize> {
        let mut results = Vec::new();
        self.collect_overlapping(query, &mut results);
        results
    }

    /// Returns the number of boxes added.
    pub fn len(&self) -> usize {
        self.num_items
    }

    /// Returns whether no box was added.
    pub fn is_empty(&self) -> bool {
        self.num_items == 0
    }

    /// Returns whether [`finish`](Self::finish) has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the fan-out (clamped once the tree is finished).
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Union of all added boxes, or `None` for an empty tree.
    pub fn bounds(&self) -> Option<BBox<T>> {
        (self.num_items > 0).then_some(self.bounds)
    }

    /// Exclusive end position of each level in the flat node array,
    /// leaves first. Empty until a non-empty tree is finished.
    pub fn level_bounds(&self) -> &[usize] {
        &self.level_bounds
    }

    // --- Private helpers ---

    /// Walks the packed levels from the root down, pruning every window
    /// entry whose box misses `query`.
    fn collect_overlapping(&self, query: &BBox<T>, results: &mut Vec<usize>) {
        let Some(&total_nodes) = self.level_bounds.last() else {
            return;
        };

        // (position of the first node in the window, level of that window)
        let mut queue: Vec<(usize, usize)> = Vec::with_capacity(32);
        queue.push((total_nodes - 1, self.level_bounds.len() - 1));

        while let Some((node_index, level)) = queue.pop() {
            let end = node_index.saturating_add(self.node_size).min(self.level_bounds[level]);
            let at_leaves = node_index < self.num_items;

            for node in &self.nodes[node_index..end] {
                if !query.overlaps(&node.bbox) {
                    continue;
                }
                if at_leaves {
                    results.push(node.item());
                } else {
                    queue.push((node.first_child(), level - 1));
                }
            }
        }
    }
}

impl<T: Coord> Default for HilbertRTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Level end positions for `num_items` leaves packed with `node_size` fan-out.
///
/// Empty for zero items; otherwise the last entry is the total node count and
/// the last level holds exactly one node.
pub(crate) fn compute_level_bounds(num_items: usize, node_size: usize) -> Vec<usize> {
    if num_items == 0 {
        return Vec::new();
    }

    let mut level_bounds = Vec::with_capacity(16);
    let mut count = num_items;
    let mut total_nodes = num_items;
    level_bounds.push(total_nodes);

    // Create parent levels until we have a single root
    loop {
        count = count.div_ceil(node_size);
        total_nodes += count;
        level_bounds.push(total_nodes);
        if count <= 1 {
            break;
        }
    }
    level_bounds
}
