//! Distance comparison family.
//!
//! Purpose
//! - Compare angular distances between points, and between points/edges and a
//!   threshold, without inverse trigonometry or normalization.
//! - Results are -1 (closer / below threshold), 0, or +1 (farther / above).
//!
//! Why this design
//! - Cosines are accurate near 90° and useless near 0° or 180°; squared sines
//!   are the opposite. Triage tries cosines first and falls back to `sin²`
//!   only in the range where it is the better-conditioned quantity.
//! - Exact tiers produce the answer the inputs would give after reprojection
//!   onto the unit sphere, so non-unit inputs are compared consistently.
//!
//! Code cross-refs: `ChordAngle`, `perturb::lex_cmp`, `edge` submodule.

mod edge;

pub use edge::{compare_edge_distance, compare_edge_pair_distance, crossing_sign};

use crate::bound::{Bounded, BoundedVec};
use crate::exact::{sgn, ExactField, ExactVec3};
use crate::perturb::lex_cmp;
use crate::{ChordAngle, Point, Predicates};
use num_rational::BigRational;
use std::cmp::Ordering;
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::trace;

/// Squared chord length of 45°, i.e. `2 - √2`.
pub(crate) const LENGTH2_45_DEGREES: f64 = 2.0 - std::f64::consts::SQRT_2;

/// Cosine of the angle between `x` and `y` (inputs need not be unit length).
pub(crate) fn cos_distance(x: &Point, y: &Point) -> Bounded {
    let (bx, by) = (BoundedVec::exact(x), BoundedVec::exact(y));
    bx.dot(&by).div((bx.norm2() * by.norm2()).sqrt())
}

/// Squared sine of the angle between `x` and `y`, via `(x - y) × (x + y)`
/// which stays accurate for nearby points.
pub(crate) fn sin2_distance(x: &Point, y: &Point) -> Bounded {
    let (bx, by) = (BoundedVec::exact(x), BoundedVec::exact(y));
    let n = (bx - by).cross(&(bx + by));
    n.norm2().div(Bounded::exact(4.0) * bx.norm2() * by.norm2())
}

fn triage_compare_cos_distances(x: &Point, a: &Point, b: &Point) -> i32 {
    -(cos_distance(x, a) - cos_distance(x, b)).sign()
}

fn triage_compare_sin2_distances(x: &Point, a: &Point, b: &Point) -> i32 {
    (sin2_distance(x, a) - sin2_distance(x, b)).sign()
}

/// Compares `|x a|` with `|x b|` as if both were reprojected onto the sphere.
fn exact_compare_distances(x: &Point, a: &Point, b: &Point) -> i32 {
    let xx: ExactVec3 = ExactVec3::lift(x);
    let xa: ExactVec3 = ExactVec3::lift(a);
    let xb: ExactVec3 = ExactVec3::lift(b);
    let cos_ax = xx.dot(&xa);
    let cos_bx = xx.dot(&xb);
    let (sa, sb) = (sgn(&cos_ax), sgn(&cos_bx));
    if sa != sb {
        return if sa > sb { -1 } else { 1 };
    }
    let diff = cos_bx.clone() * cos_bx * xa.norm2() - cos_ax.clone() * cos_ax * xb.norm2();
    sa * sgn(&diff)
}

/// Tie-break for exactly equal distances: the lexicographically smaller site
/// is treated as farther.
fn symbolic_compare_distances(a: &Point, b: &Point) -> i32 {
    match lex_cmp(a, b) {
        Ordering::Less => 1,
        Ordering::Greater => -1,
        Ordering::Equal => 0,
    }
}

fn triage_compare_cos_distance(x: &Point, y: &Point, r2: f64) -> i32 {
    let cos_r = Bounded::exact(1.0) - Bounded::exact(0.5 * r2);
    -(cos_distance(x, y) - cos_r).sign()
}

fn triage_compare_sin2_distance(x: &Point, y: &Point, r2: f64) -> i32 {
    let r2b = Bounded::exact(r2);
    let sin2_r = r2b * (Bounded::exact(1.0) - Bounded::exact(0.25 * r2));
    (sin2_distance(x, y) - sin2_r).sign()
}

/// Cosine triage, then `sin²` triage when `r < 45°`.
pub(crate) fn triage_compare_distance(x: &Point, y: &Point, r2: f64) -> i32 {
    let s = triage_compare_cos_distance(x, y, r2);
    if s == 0 && r2 < LENGTH2_45_DEGREES {
        return triage_compare_sin2_distance(x, y, r2);
    }
    s
}

fn exact_compare_distance(x: &Point, y: &Point, r2: f64) -> i32 {
    let xx: ExactVec3 = ExactVec3::lift(x);
    let xy: ExactVec3 = ExactVec3::lift(y);
    let cos_xy = xx.dot(&xy);
    let r2 = BigRational::lift_f64(r2);
    let half = BigRational::lift_f64(0.5);
    let cos_r = BigRational::lift_f64(1.0) - half * r2;
    let (sxy, sr) = (sgn(&cos_xy), sgn(&cos_r));
    if sxy != sr {
        return if sxy > sr { -1 } else { 1 };
    }
    let diff = cos_r.clone() * cos_r * xx.norm2() * xy.norm2() - cos_xy.clone() * cos_xy;
    sxy * sgn(&diff)
}

impl Predicates {
    /// Sign of `|x a| - |x b|`: -1 if `a` is closer to `x`, +1 if `b` is.
    ///
    /// Returns 0 only when `a == b`; exact ties between distinct sites are
    /// broken consistently so the order stays transitive.
    pub fn compare_distances(&self, x: &Point, a: &Point, b: &Point) -> i32 {
        let s = triage_compare_cos_distances(x, a, b);
        if s != 0 {
            return self.checked("compare_distances", s, || self.expensive_compare_distances(x, a, b));
        }
        if a == b {
            return 0;
        }
        // The cosine test failed, so both angles are nearly equal and either
        // one decides which representation is better conditioned.
        let cos_ax = a.dot(x);
        let s = if cos_ax > FRAC_1_SQRT_2 {
            triage_compare_sin2_distances(x, a, b)
        } else if cos_ax < -FRAC_1_SQRT_2 {
            // sin² decreases past 90°.
            -triage_compare_sin2_distances(x, a, b)
        } else {
            0
        };
        if s != 0 {
            return self.checked("compare_distances", s, || self.expensive_compare_distances(x, a, b));
        }
        self.expensive_compare_distances(x, a, b)
    }

    fn expensive_compare_distances(&self, x: &Point, a: &Point, b: &Point) -> i32 {
        if a == b {
            return 0;
        }
        trace!(predicate = "compare_distances", "exact fallback");
        let s = exact_compare_distances(x, a, b);
        if s != 0 {
            return s;
        }
        trace!(predicate = "compare_distances", "symbolic perturbation");
        symbolic_compare_distances(a, b)
    }

    /// Sign of `|x y| - r`. A `NEGATIVE` threshold always gives +1 and an
    /// `INFINITY` threshold always gives -1; exact equality gives 0.
    pub fn compare_distance(&self, x: &Point, y: &Point, r: ChordAngle) -> i32 {
        let r2 = r.length2();
        if r2 < 0.0 {
            return 1;
        }
        if r2 > crate::chord::MAX_LENGTH2 {
            return -1;
        }
        let s = triage_compare_distance(x, y, r2);
        if s != 0 {
            return self.checked("compare_distance", s, || exact_compare_distance(x, y, r2));
        }
        trace!(predicate = "compare_distance", "exact fallback");
        exact_compare_distance(x, y, r2)
    }
}

/// `Predicates::compare_distances` with the default configuration.
pub fn compare_distances(x: &Point, a: &Point, b: &Point) -> i32 {
    Predicates::default().compare_distances(x, a, b)
}

/// `Predicates::compare_distance` with the default configuration.
pub fn compare_distance(x: &Point, y: &Point, r: ChordAngle) -> i32 {
    Predicates::default().compare_distance(x, y, r)
}
