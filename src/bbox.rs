//! Axis-aligned bounding box and the flat-array node built from it.

use crate::coord::Coord;

/// Axis-aligned bounding box in 2D.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BBox<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (bottom)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (top)
    pub max_y: T,
}

impl<T> BBox<T> {
    /// Create a new box from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Coord> BBox<T> {
    /// The neutral element of [`union`](Self::union): min corner at `+MAX`,
    /// max corner at `MIN`. Unioning any box into it yields that box.
    #[inline]
    pub const fn inverted() -> Self {
        Self::new(T::MAX_VALUE, T::MAX_VALUE, T::MIN_VALUE, T::MIN_VALUE)
    }

    /// The smallest box enclosing both boxes.
    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: T::min_of(self.min_x, other.min_x),
            min_y: T::min_of(self.min_y, other.min_y),
            max_x: T::max_of(self.max_x, other.max_x),
            max_y: T::max_of(self.max_y, other.max_y),
        }
    }

    /// Whether the two boxes overlap. Shared edges and corners count.
    ///
    /// Uses separating-axis rejection, so a box with `min > max` on an axis
    /// matches nothing that lies entirely to one side of it.
    ///
    /// ```
    /// use hilbert_pack::BBox;
    ///
    /// let a = BBox::new(0, 0, 10, 10);
    /// assert!(a.overlaps(&BBox::new(10, 0, 20, 10)));
    /// assert!(!a.overlaps(&BBox::new(11, 0, 20, 10)));
    /// ```
    #[inline(always)]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.max_x < other.min_x
            || self.max_y < other.min_y
            || self.min_x > other.max_x
            || self.min_y > other.max_y)
    }

    /// Center of the box, widened to `f64`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x.to_f64() + self.max_x.to_f64()) / 2.0,
            (self.min_y.to_f64() + self.max_y.to_f64()) / 2.0,
        )
    }

    /// Whether `min > max` on either axis, as for a fresh [`inverted`](Self::inverted) box.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// One slot of the flat node array.
///
/// Leaves and parents share the layout. The `link` is the item index for a
/// leaf and the array position of the first child for a parent; the level a
/// node is visited at decides which accessor is valid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Node<T> {
    pub(crate) bbox: BBox<T>,
    link: usize,
}

impl<T> Node<T> {
    #[inline(always)]
    pub(crate) const fn leaf(bbox: BBox<T>, item: usize) -> Self {
        Self { bbox, link: item }
    }

    #[inline(always)]
    pub(crate) const fn parent(bbox: BBox<T>, first_child: usize) -> Self {
        Self {
            bbox,
            link: first_child,
        }
    }

    /// Insertion index of the item. Only meaningful at level 0.
    #[inline(always)]
    pub(crate) const fn item(&self) -> usize {
        self.link
    }

    /// Array position of the first child. Only meaningful above level 0.
    #[inline(always)]
    pub(crate) const fn first_child(&self) -> usize {
        self.link
    }
}
