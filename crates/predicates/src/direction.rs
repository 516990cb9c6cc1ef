//! Edge direction and dot-product signs.
//!
//! Neither predicate breaks ties: an exact zero (perpendicular normals, a
//! degenerate edge, orthogonal vectors) is a meaningful answer that callers
//! must handle.

use crate::bound::BoundedVec;
use crate::exact::{dot_sign, sgn, ExactVec3};
use crate::{Point, Predicates};
use tracing::trace;

/// Error bound of `a · b` in `f64` for squared norms at most 2: the rounding
/// error is at most `γ₃ Σ|aᵢbᵢ| ≤ 3.03 u |a||b| ≤ 3.03 ε`, rounded up to a
/// representable constant.
pub const MAX_DOT_ERROR: f64 = 3.046875 * f64::EPSILON;

fn triage_sign_dot_prod(a: &Point, b: &Point) -> i32 {
    let d = a.dot(b);
    if d > MAX_DOT_ERROR {
        1
    } else if d < -MAX_DOT_ERROR {
        -1
    } else {
        0
    }
}

fn triage_compare_edge_directions(a0: &Point, a1: &Point, b0: &Point, b1: &Point) -> i32 {
    let (p0, p1) = (BoundedVec::exact(a0), BoundedVec::exact(a1));
    let (q0, q1) = (BoundedVec::exact(b0), BoundedVec::exact(b1));
    let na = (p0 - p1).cross(&(p0 + p1));
    let nb = (q0 - q1).cross(&(q0 + q1));
    na.dot(&nb).sign()
}

fn exact_compare_edge_directions(a0: &Point, a1: &Point, b0: &Point, b1: &Point) -> i32 {
    let na: ExactVec3 = ExactVec3::lift(a0).cross(&ExactVec3::lift(a1));
    let nb: ExactVec3 = ExactVec3::lift(b0).cross(&ExactVec3::lift(b1));
    sgn(&na.dot(&nb))
}

impl Predicates {
    /// Sign of `(a0 × a1) · (b0 × b1)`: +1 if the edges point in similar
    /// directions, -1 if opposite, 0 if the normals are perpendicular or
    /// either edge is degenerate. Never perturbed.
    ///
    /// An edge with antipodal endpoints has no defined normal; the result is
    /// then meaningless.
    pub fn compare_edge_directions(&self, a0: &Point, a1: &Point, b0: &Point, b1: &Point) -> i32 {
        let s = triage_compare_edge_directions(a0, a1, b0, b1);
        if s != 0 {
            return self.checked("compare_edge_directions", s, || {
                exact_compare_edge_directions(a0, a1, b0, b1)
            });
        }
        if a0 == a1 || b0 == b1 {
            return 0;
        }
        trace!(predicate = "compare_edge_directions", "exact fallback");
        exact_compare_edge_directions(a0, a1, b0, b1)
    }

    /// Exact sign of `a · b` for vectors of squared norm at most 2. Never
    /// perturbed.
    pub fn sign_dot_prod(&self, a: &Point, b: &Point) -> i32 {
        let s = triage_sign_dot_prod(a, b);
        if s != 0 {
            return self.checked("sign_dot_prod", s, || dot_sign(a, b));
        }
        trace!(predicate = "sign_dot_prod", "exact fallback");
        dot_sign(a, b)
    }
}

/// `Predicates::compare_edge_directions` with the default configuration.
pub fn compare_edge_directions(a0: &Point, a1: &Point, b0: &Point, b1: &Point) -> i32 {
    Predicates::default().compare_edge_directions(a0, a1, b0, b1)
}

/// `Predicates::sign_dot_prod` with the default configuration.
pub fn sign_dot_prod(a: &Point, b: &Point) -> i32 {
    Predicates::default().sign_dot_prod(a, b)
}
