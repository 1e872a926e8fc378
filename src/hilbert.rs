//! Hilbert curve ranks for 2D points.
//!
//! The transform is the branch-free prefix-scan formulation from
//! <https://github.com/rawrunprotected/hilbert_curves> (public domain): a fixed
//! sequence of shift/xor rounds, no loop over bits.

use crate::bbox::BBox;
use crate::coord::Coord;

/// Largest normalized coordinate on either axis (`2^16 - 1`).
pub const HILBERT_MAX: u32 = u16::MAX as u32;

/// Highest supported curve order. At order 16 the curve covers `2^32` cells.
pub const MAX_ORDER: u32 = 16;

/// Rank of `(x, y)` on the order-16 Hilbert curve.
///
/// Both coordinates must lie in `[0, HILBERT_MAX]`; higher bits are ignored.
/// Distinct cells always get distinct ranks.
///
/// ```
/// use hilbert_pack::hilbert::xy_to_index;
///
/// assert_eq!(xy_to_index(0, 0), 0);
/// assert_eq!(xy_to_index(65535, 0), u32::MAX);
/// ```
#[inline]
pub fn xy_to_index(x: u32, y: u32) -> u32 {
    prefix_scan(x & HILBERT_MAX, y & HILBERT_MAX)
}

/// Rank of `(x, y)` on the Hilbert curve of the given `order`.
///
/// Coordinates lie in `[0, 2^order - 1]` and the rank in `[0, 4^order - 1]`.
///
/// # Panics
/// Panics if `order` is not in `1..=16`.
#[inline]
pub fn xy_to_index_order(order: u32, x: u32, y: u32) -> u32 {
    assert!(
        (1..=MAX_ORDER).contains(&order),
        "hilbert order must be in 1..=16, got {order}"
    );
    let shift = MAX_ORDER - order;
    prefix_scan((x << shift) & HILBERT_MAX, (y << shift) & HILBERT_MAX) >> (2 * shift)
}

#[allow(non_snake_case, reason = "upper-case names hold the next prefix-scan round")]
fn prefix_scan(x: u32, y: u32) -> u32 {
    // Initial prefix scan round, prime with x and y
    let a = x ^ y;
    let b = 0xFFFF ^ a;
    let c = 0xFFFF ^ (x | y);
    let d = x & (y ^ 0xFFFF);
    let mut A = a | (b >> 1);
    let mut B = (a >> 1) ^ a;
    let mut C = ((c >> 1) ^ (b & (d >> 1))) ^ c;
    let mut D = ((a & (c >> 1)) ^ (d >> 1)) ^ d;

    for shift in [2, 4] {
        let (a, b, c, d) = (A, B, C, D);
        A = (a & (a >> shift)) ^ (b & (b >> shift));
        B = (a & (b >> shift)) ^ (b & ((a ^ b) >> shift));
        C ^= (a & (c >> shift)) ^ (b & (d >> shift));
        D ^= (b & (c >> shift)) ^ ((a ^ b) & (d >> shift));
    }

    // Final round and projection
    let (a, b, c, d) = (A, B, C, D);
    C ^= (a & (c >> 8)) ^ (b & (d >> 8));
    D ^= (b & (c >> 8)) ^ ((a ^ b) & (d >> 8));

    // Undo transformation prefix scan
    let a = C ^ (C >> 1);
    let b = D ^ (D >> 1);

    // Recover index bits
    let i0 = x ^ y;
    let i1 = b | (0xFFFF ^ (i0 | a));

    (interleave(i1) << 1) | interleave(i0)
}

/// Spread the low 16 bits of `x` into the even bit positions.
#[inline(always)]
fn interleave(mut x: u32) -> u32 {
    x = (x | (x << 8)) & 0x00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333;
    x = (x | (x << 1)) & 0x5555_5555;
    x
}

/// Maps box centers into Hilbert space relative to the overall bounds.
///
/// An axis with zero (or non-finite) extent cannot be normalized; every
/// center then lands on coordinate 0 of that axis.
#[derive(Copy, Clone, Debug)]
pub(crate) struct HilbertScale {
    min_x: f64,
    min_y: f64,
    width: Option<f64>,
    height: Option<f64>,
}

impl HilbertScale {
    pub(crate) fn new<T: Coord>(bounds: &BBox<T>) -> Self {
        let (min_x, max_x) = (bounds.min_x.to_f64(), bounds.max_x.to_f64());
        let (min_y, max_y) = (bounds.min_y.to_f64(), bounds.max_y.to_f64());
        Self {
            min_x,
            min_y,
            width: extent(min_x, max_x),
            height: extent(min_y, max_y),
        }
    }

    /// Whether at least one axis collapses to coordinate 0.
    pub(crate) fn is_degenerate(&self) -> bool {
        self.width.is_none() || self.height.is_none()
    }

    /// Hilbert rank of a box's center.
    #[inline]
    pub(crate) fn rank<T: Coord>(&self, bbox: &BBox<T>) -> u32 {
        let (cx, cy) = bbox.center();
        let hx = normalize(cx, self.min_x, self.width);
        let hy = normalize(cy, self.min_y, self.height);
        xy_to_index(hx, hy)
    }
}

#[inline]
fn extent(min: f64, max: f64) -> Option<f64> {
    let w = max - min;
    (w > 0.0 && w.is_finite()).then_some(w)
}

#[inline]
#[allow(clippy::cast_possible_truncation, reason = "value is clamped to [0, HILBERT_MAX]")]
fn normalize(center: f64, min: f64, extent: Option<f64>) -> u32 {
    let Some(extent) = extent else {
        return 0;
    };
    let v = (f64::from(HILBERT_MAX) * (center - min) / extent).round();
    if v.is_finite() {
        v.clamp(0.0, f64::from(HILBERT_MAX)) as u32
    } else {
        0
    }
}
