//! Ordering of edge crossings along great circles.
//!
//! Purpose
//! - Locate where an edge crosses a great circle relative to other circles
//!   without normalizing the crossing point, which is unstable near the poles
//!   of the reference circle.
//!
//! The crossing of edge AB with the circle of normal N lies along
//! `(A × B) × N = B (N·A) - A (N·B)`. Both expansions are exact identities, so
//! the right-hand side is used everywhere: it needs no nested cross products
//! and keeps the exact tier cheap.
//!
//! Preconditions are established by the caller and not checked here.

use crate::bound::{Bounded, BoundedVec};
use crate::exact::{sgn, sign_sqrt_sum2, ExactVec3};
use crate::{Point, Predicates};
use num_traits::Zero;
use tracing::trace;

/// Unnormalized crossing of edge `a b` with the circle of normal `n`.
fn bounded_crossing(a: &BoundedVec, b: &BoundedVec, n: &BoundedVec) -> BoundedVec {
    b.scale(n.dot(a)) - a.scale(n.dot(b))
}

fn exact_crossing(a: &ExactVec3, b: &ExactVec3, n: &ExactVec3) -> ExactVec3 {
    b.scale(&n.dot(a)).sub(&a.scale(&n.dot(b)))
}

fn triage_intersection_sign(a: &Point, b: &Point, n: &Point, x: &Point) -> i32 {
    let (ba, bb) = (BoundedVec::exact(a), BoundedVec::exact(b));
    let (bn, bx) = (BoundedVec::exact(n), BoundedVec::exact(x));
    let value: Bounded = bn.dot(&ba) * bx.dot(&bb) - bn.dot(&bb) * bx.dot(&ba);
    value.sign()
}

fn exact_intersection_sign(a: &Point, b: &Point, n: &Point, x: &Point) -> i32 {
    let xa: ExactVec3 = ExactVec3::lift(a);
    let xb: ExactVec3 = ExactVec3::lift(b);
    let xn: ExactVec3 = ExactVec3::lift(n);
    let xx: ExactVec3 = ExactVec3::lift(x);
    sgn(&exact_crossing(&xa, &xb, &xn).dot(&xx))
}

/// Sine of the angle between the crossing of `ab` with circle `m` and the
/// plane of circle `n`, up to the positive factor `|n|`.
fn bounded_offset(a: &Point, b: &Point, m: &BoundedVec, n: &BoundedVec) -> Bounded {
    let p = bounded_crossing(&BoundedVec::exact(a), &BoundedVec::exact(b), m);
    p.dot(n).div(p.norm2().sqrt())
}

fn triage_intersection_ordering(
    a: &Point,
    b: &Point,
    c: &Point,
    d: &Point,
    m: &Point,
    n: &Point,
) -> i32 {
    let (bm, bn) = (BoundedVec::exact(m), BoundedVec::exact(n));
    (bounded_offset(a, b, &bm, &bn) - bounded_offset(c, d, &bm, &bn)).sign()
}

fn exact_intersection_ordering(
    a: &Point,
    b: &Point,
    c: &Point,
    d: &Point,
    m: &Point,
    n: &Point,
) -> i32 {
    let xm: ExactVec3 = ExactVec3::lift(m);
    let xn: ExactVec3 = ExactVec3::lift(n);
    let p = exact_crossing(&ExactVec3::lift(a), &ExactVec3::lift(b), &xm);
    let q = exact_crossing(&ExactVec3::lift(c), &ExactVec3::lift(d), &xm);
    let (p2, q2) = (p.norm2(), q.norm2());
    if p2.is_zero() || q2.is_zero() {
        return 0;
    }
    // sign(pn/|p| - qn/|q|) = sign(√q2·pn - √p2·qn)
    let (pn, qn) = (p.dot(&xn), q.dot(&xn));
    sign_sqrt_sum2(&q2, &pn, &p2, &-qn)
}

impl Predicates {
    /// Side of the plane through `x` on which edge `ab` crosses the circle
    /// with normal `n`: the sign of `((a × b) × n) · x`.
    ///
    /// Requires `a`, `b` distinct and not antipodal, and `ab` to actually cross
    /// the circle (`n·a` and `n·b` of opposite signs).
    pub fn circle_edge_intersection_sign(&self, a: &Point, b: &Point, n: &Point, x: &Point) -> i32 {
        let s = triage_intersection_sign(a, b, n, x);
        if s != 0 {
            return self.checked("circle_edge_intersection_sign", s, || {
                exact_intersection_sign(a, b, n, x)
            });
        }
        trace!(predicate = "circle_edge_intersection_sign", "exact fallback");
        exact_intersection_sign(a, b, n, x)
    }

    /// Orders the crossings of edges `ab` and `cd` with circle `m` by their
    /// angular distance from circle `n`: +1 if the crossing of `ab` is
    /// farther from `n`, -1 if it is closer, 0 if both are equally far.
    ///
    /// Requires `a`, `c` on the positive side of `m`, `b`, `d` on its negative
    /// side, and both crossings on the positive side of `n`.
    pub fn circle_edge_intersection_ordering(
        &self,
        a: &Point,
        b: &Point,
        c: &Point,
        d: &Point,
        m: &Point,
        n: &Point,
    ) -> i32 {
        let s = triage_intersection_ordering(a, b, c, d, m, n);
        if s != 0 {
            return self.checked("circle_edge_intersection_ordering", s, || {
                exact_intersection_ordering(a, b, c, d, m, n)
            });
        }
        trace!(predicate = "circle_edge_intersection_ordering", "exact fallback");
        exact_intersection_ordering(a, b, c, d, m, n)
    }
}

/// `Predicates::circle_edge_intersection_sign` with the default configuration.
pub fn circle_edge_intersection_sign(a: &Point, b: &Point, n: &Point, x: &Point) -> i32 {
    Predicates::default().circle_edge_intersection_sign(a, b, n, x)
}

/// `Predicates::circle_edge_intersection_ordering` with the default
/// configuration.
pub fn circle_edge_intersection_ordering(
    a: &Point,
    b: &Point,
    c: &Point,
    d: &Point,
    m: &Point,
    n: &Point,
) -> i32 {
    Predicates::default().circle_edge_intersection_ordering(a, b, c, d, m, n)
}
