//! Symbolic perturbation ordering.
//!
//! Exact ties are broken by pretending every point is perturbed by an
//! infinitesimal whose size depends on its lexicographic rank. All tie-break
//! tiers share this one ordering so that answers stay mutually consistent.

use crate::Point;
use std::cmp::Ordering;

/// Lexicographic comparison of coordinates (x, then y, then z).
///
/// Agrees with `==` on points: `-0.0` and `0.0` compare equal.
pub fn lex_cmp(a: &Point, b: &Point) -> Ordering {
    for i in 0..3 {
        match a[i].partial_cmp(&b[i]) {
            Some(Ordering::Equal) | None => continue,
            Some(ord) => return ord,
        }
    }
    Ordering::Equal
}

/// `a < b` in the perturbation order.
#[inline]
pub fn lex_less(a: &Point, b: &Point) -> bool {
    lex_cmp(a, b) == Ordering::Less
}

/// Sorts three points lexicographically.
///
/// Returns the sorted triple and the sign of the permutation applied (+1 for
/// an even permutation, -1 for an odd one).
pub fn sort3<'a>(a: &'a Point, b: &'a Point, c: &'a Point) -> ([&'a Point; 3], i32) {
    let mut pts = [a, b, c];
    let mut parity = 1;
    // Three compare-and-swap steps sort three elements.
    for (i, j) in [(0usize, 1usize), (1, 2), (0, 1)] {
        if lex_less(pts[j], pts[i]) {
            pts.swap(i, j);
            parity = -parity;
        }
    }
    (pts, parity)
}
