//! Orientation predicate `Sign(a, b, c)`.
//!
//! Purpose
//! - Decide whether `a, b, c` are counterclockwise (+1) or clockwise (-1) as
//!   seen from outside the sphere; 0 only when two of the points are equal.
//!
//! Tiers
//! - `triage_sign`: `(a × b) · c` against a fixed error bound.
//! - `stable_sign`: the same determinant rebuilt from the two shortest edges,
//!   which stays accurate for nearly coincident points (run-time bound).
//! - `exact_sign`: `BigRational` determinant, followed by symbolic
//!   perturbation when it is exactly zero.
//!
//! Invariants (for pairwise distinct inputs)
//! - `sign(a,b,c) == sign(b,c,a) == sign(c,a,b) == -sign(c,b,a) != 0`.
//!
//! Code cross-refs: `ordered_ccw`, `Predicates::unperturbed_sign`,
//! `perturb::sort3`.

mod exact;

pub use exact::exact_sign;

use crate::bound::BoundedVec;
use crate::{Point, Predicates};
use tracing::{error, trace};

/// Error bound of `(a × b) · c` in `f64` when every input has squared norm at
/// most 2: the rounded cross product is within `4√2·u` of the true one, which
/// contributes `8u` after the dot with `c`, and the dot itself adds at most
/// `γ₃·2√2 ≈ 8.49u`. With `u = ε/2` the total stays below `8.25 ε`.
pub const MAX_DET_ERROR: f64 = 8.25 * f64::EPSILON;

/// Verification only compares triage answers this close to the bound.
const VERIFY_MARGIN: f64 = 100.0;

/// Fast sign of `a_cross_b · c`, or 0 if the bound cannot certify it.
#[inline]
pub fn triage_sign(a: &Point, b: &Point, c: &Point, a_cross_b: &Point) -> i32 {
    debug_assert!(a.norm_squared() <= 2.0, "point exceeds squared norm 2");
    debug_assert!(b.norm_squared() <= 2.0, "point exceeds squared norm 2");
    debug_assert!(c.norm_squared() <= 2.0, "point exceeds squared norm 2");
    let det = a_cross_b.dot(c);
    if det > MAX_DET_ERROR {
        1
    } else if det < -MAX_DET_ERROR {
        -1
    } else {
        0
    }
}

/// Determinant from the two shortest triangle edges and the opposite vertex.
///
/// Returns 0 when the run-time bound cannot certify the sign.
pub fn stable_sign(a: &Point, b: &Point, c: &Point) -> i32 {
    let (ba, bb, bc) = (
        BoundedVec::exact(a),
        BoundedVec::exact(b),
        BoundedVec::exact(c),
    );
    let ab = bb - ba;
    let bc_ = bc - bb;
    let ca = ba - bc;
    let (ab2, bc2, ca2) = (ab.v.norm_squared(), bc_.v.norm_squared(), ca.v.norm_squared());
    // Skip the longest edge; the determinant is invariant under the choice.
    let det = if ab2 >= bc2 && ab2 >= ca2 {
        -(ca.cross(&bc_).dot(&bc))
    } else if bc2 >= ca2 {
        -(ab.cross(&ca).dot(&ba))
    } else {
        -(bc_.cross(&ab).dot(&bb))
    };
    det.sign()
}

/// Sign without triage: 0 on duplicates, otherwise stable then exact.
///
/// With `perturb == false` the result is 0 for exactly coplanar triples.
pub fn expensive_sign(a: &Point, b: &Point, c: &Point, perturb: bool) -> i32 {
    if a == b || b == c || c == a {
        return 0;
    }
    let s = stable_sign(a, b, c);
    if s != 0 {
        return s;
    }
    trace!(predicate = "sign", perturb, "exact fallback");
    exact_sign(a, b, c, perturb)
}

impl Predicates {
    /// Orientation of `a, b, c`; see the module docs.
    pub fn sign(&self, a: &Point, b: &Point, c: &Point) -> i32 {
        self.sign_with_cross(a, b, c, &a.cross(b))
    }

    /// `sign` with a caller-supplied `a × b` (computed in `f64` as `a.cross(b)`),
    /// for loops that test many `c` against one edge.
    pub fn sign_with_cross(&self, a: &Point, b: &Point, c: &Point, a_cross_b: &Point) -> i32 {
        let s = triage_sign(a, b, c, a_cross_b);
        if s == 0 {
            return expensive_sign(a, b, c, true);
        }
        if self.cfg.verify {
            let det = a_cross_b.dot(c);
            if det.abs() < VERIFY_MARGIN * MAX_DET_ERROR {
                let slow = expensive_sign(a, b, c, true);
                if slow != s {
                    error!(predicate = "sign", det, fast = s, exact = slow, "triage disagrees with exact tier");
                    panic!("sign: triage returned {s} (det = {det:e}) but exact evaluation gives {slow}");
                }
            }
        }
        s
    }

    /// Like `sign`, but returns 0 when `a, b, c` are exactly coplanar with the
    /// origin instead of breaking the tie.
    pub fn unperturbed_sign(&self, a: &Point, b: &Point, c: &Point) -> i32 {
        let s = triage_sign(a, b, c, &a.cross(b));
        if s != 0 {
            return s;
        }
        expensive_sign(a, b, c, false)
    }

    /// True iff the edges OA, OB, OC are met in that order when sweeping
    /// counterclockwise around O.
    ///
    /// Equivalently, B lies in the closed CCW range of directions from A to C.
    ///
    /// Properties (for points distinct from `o`):
    /// 1. `ordered_ccw(a,b,c,o) && ordered_ccw(b,a,c,o)` implies `a == b`;
    /// 2. `ordered_ccw(a,b,c,o) && ordered_ccw(a,c,b,o)` implies `b == c`;
    /// 3. `ordered_ccw(a,b,c,o) && ordered_ccw(c,b,a,o)` implies `a == b == c`;
    /// 4. if `a == b` or `b == c` the result is true;
    /// 5. otherwise, if `a == c` the result is false.
    pub fn ordered_ccw(&self, a: &Point, b: &Point, c: &Point, o: &Point) -> bool {
        debug_assert!(a != o && b != o && c != o);
        let mut sum = 0;
        if self.sign(b, o, a) >= 0 {
            sum += 1;
        }
        if self.sign(c, o, b) >= 0 {
            sum += 1;
        }
        if self.sign(a, o, c) > 0 {
            sum += 1;
        }
        sum >= 2
    }
}

/// `Predicates::sign` with the default configuration.
pub fn sign(a: &Point, b: &Point, c: &Point) -> i32 {
    Predicates::default().sign(a, b, c)
}

/// `Predicates::sign_with_cross` with the default configuration.
pub fn sign_with_cross(a: &Point, b: &Point, c: &Point, a_cross_b: &Point) -> i32 {
    Predicates::default().sign_with_cross(a, b, c, a_cross_b)
}

/// `Predicates::unperturbed_sign` with the default configuration.
pub fn unperturbed_sign(a: &Point, b: &Point, c: &Point) -> i32 {
    Predicates::default().unperturbed_sign(a, b, c)
}

/// `Predicates::ordered_ccw` with the default configuration.
pub fn ordered_ccw(a: &Point, b: &Point, c: &Point, o: &Point) -> bool {
    Predicates::default().ordered_ccw(a, b, c, o)
}

#[cfg(test)]
mod tests;
