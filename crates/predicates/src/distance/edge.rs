//! Point-to-edge and edge-to-edge distance comparisons.
//!
//! The closest point of edge `(a0, a1)` to `x` is either an endpoint or lies
//! in the edge interior. Let `M` be the normal of the plane through `x`
//! perpendicular to the edge; the closest point is interior iff `a0` and `a1`
//! lie strictly on opposite sides of that plane. In the interior case the
//! distance is the distance from `x` to the edge's great circle.

use super::{triage_compare_distance, LENGTH2_45_DEGREES};
use crate::bound::{Bounded, BoundedVec};
use crate::exact::{sgn, ExactField, ExactVec3};
use crate::{ChordAngle, Point, Predicates};
use num_rational::BigRational;
use tracing::trace;

/// Distance to the great circle with normal `n`, compared with `r`, when the
/// closest edge point is known to be interior.
fn triage_compare_line_distance(
    x: &Point,
    a0: &Point,
    a1: &Point,
    r2: f64,
    n: &BoundedVec,
) -> i32 {
    // Interior distances are below 90°.
    if r2 >= 2.0 {
        return -1;
    }
    let bx = BoundedVec::exact(x);
    let n2 = n.norm2();
    let x2 = bx.norm2();
    if r2 < LENGTH2_45_DEGREES {
        // sin² of the distance; subtracting the nearer vertex keeps the dot
        // product small when x is close to the edge.
        let v = if (x - a0).norm_squared() <= (x - a1).norm_squared() {
            a0
        } else {
            a1
        };
        let x_dn = (bx - BoundedVec::exact(v)).dot(n);
        let sin2 = (x_dn * x_dn).div(x2 * n2);
        let sin2_r = Bounded::exact(r2) * (Bounded::exact(1.0) - Bounded::exact(0.25 * r2));
        (sin2 - sin2_r).sign()
    } else {
        // cos² of the distance is |x × n|² / (|x|² |n|²).
        let m2 = bx.cross(n).norm2();
        let cos2 = m2.div(x2 * n2);
        let cos_r = Bounded::exact(1.0) - Bounded::exact(0.5 * r2);
        -(cos2 - cos_r * cos_r).sign()
    }
}

fn triage_compare_edge_distance(x: &Point, a0: &Point, a1: &Point, r2: f64) -> i32 {
    let (bx, b0, b1) = (
        BoundedVec::exact(x),
        BoundedVec::exact(a0),
        BoundedVec::exact(a1),
    );
    let n = (b0 - b1).cross(&(b0 + b1));
    let m = n.cross(&bx);
    // Subtract x first for accuracy on short edges.
    let s0 = (b0 - bx).dot(&m).sign();
    let s1 = (b1 - bx).dot(&m).sign();
    let vertex = || triage_compare_distance(x, a0, r2).min(triage_compare_distance(x, a1, r2));
    if s0 > 0 || s1 < 0 {
        return vertex();
    }
    let line = triage_compare_line_distance(x, a0, a1, r2, &n);
    if s0 < 0 && s1 > 0 {
        return line;
    }
    // Regime uncertain: answer only if both regimes agree.
    if vertex() == line {
        line
    } else {
        0
    }
}

fn exact_compare_line_distance(x: &Point, a0: &Point, a1: &Point, r2: f64) -> i32 {
    if r2 >= 2.0 {
        return -1;
    }
    let xx: ExactVec3 = ExactVec3::lift(x);
    let n: ExactVec3 = ExactVec3::lift(a0).cross(&ExactVec3::lift(a1));
    let sin_d = xx.dot(&n);
    let r2 = BigRational::lift_f64(r2);
    let quarter = BigRational::lift_f64(0.25);
    let sin2_r = r2.clone() * (BigRational::lift_f64(1.0) - quarter * r2);
    let diff = sin_d.clone() * sin_d - sin2_r * xx.norm2() * n.norm2();
    sgn(&diff)
}

impl Predicates {
    /// Sign of `dist(x, edge(a0, a1)) - r`, where the edge is the shorter
    /// great-circle arc between its endpoints.
    ///
    /// Requires `a0` and `a1` not antipodal. A degenerate edge behaves as a
    /// single point.
    pub fn compare_edge_distance(&self, x: &Point, a0: &Point, a1: &Point, r: ChordAngle) -> i32 {
        debug_assert!(*a0 != -a1, "edge endpoints are antipodal");
        let r2 = r.length2();
        if r2 < 0.0 {
            return 1;
        }
        if r2 > crate::chord::MAX_LENGTH2 {
            return -1;
        }
        let s = triage_compare_edge_distance(x, a0, a1, r2);
        if s != 0 {
            return self.checked("compare_edge_distance", s, || {
                self.exact_compare_edge_distance(x, a0, a1, r)
            });
        }
        if a0 == a1 {
            return self.compare_distance(x, a0, r);
        }
        self.exact_compare_edge_distance(x, a0, a1, r)
    }

    fn exact_compare_edge_distance(&self, x: &Point, a0: &Point, a1: &Point, r: ChordAngle) -> i32 {
        // Only the line distance always needs exact arithmetic; the regime
        // test and the endpoint distances run their own triage.
        if self.compare_edge_directions(a0, a1, a0, x) > 0
            && self.compare_edge_directions(a0, a1, x, a1) > 0
        {
            trace!(predicate = "compare_edge_distance", "exact line distance");
            exact_compare_line_distance(x, a0, a1, r.length2())
        } else {
            self.compare_distance(x, a0, r)
                .min(self.compare_distance(x, a1, r))
        }
    }

    /// Sign of `dist(edge(a0, a1), edge(b0, b1)) - r`.
    ///
    /// Crossing or touching edges are at distance zero. Consistent with
    /// `compare_edge_distance` when either edge is degenerate.
    pub fn compare_edge_pair_distance(
        &self,
        a0: &Point,
        a1: &Point,
        b0: &Point,
        b1: &Point,
        r: ChordAngle,
    ) -> i32 {
        if a0 == a1 {
            return self.compare_edge_distance(a0, b0, b1, r);
        }
        if b0 == b1 {
            return self.compare_edge_distance(b0, a0, a1, r);
        }
        if self.crossing_sign(a0, a1, b0, b1) >= 0 {
            let r2 = r.length2();
            return if r2 > 0.0 {
                -1
            } else if r2 == 0.0 {
                0
            } else {
                1
            };
        }
        self.compare_edge_distance(a0, b0, b1, r)
            .min(self.compare_edge_distance(a1, b0, b1, r))
            .min(self.compare_edge_distance(b0, a0, a1, r))
            .min(self.compare_edge_distance(b1, a0, a1, r))
    }

    /// Whether edge `(a, b)` crosses edge `(c, d)`: +1 if they cross at an
    /// interior point of both, 0 if they share a vertex, -1 otherwise
    /// (including degenerate edges).
    pub fn crossing_sign(&self, a: &Point, b: &Point, c: &Point, d: &Point) -> i32 {
        if a == c || a == d || b == c || b == d {
            return 0;
        }
        if a == b || c == d {
            return -1;
        }
        let acb = -self.sign(a, b, c);
        let bda = self.sign(a, b, d);
        if bda != acb {
            return -1;
        }
        let c_cross_d = c.cross(d);
        let cbd = -self.sign_with_cross(c, d, b, &c_cross_d);
        if cbd != acb {
            return -1;
        }
        let dac = self.sign_with_cross(c, d, a, &c_cross_d);
        if dac != acb {
            -1
        } else {
            1
        }
    }
}

/// `Predicates::compare_edge_distance` with the default configuration.
pub fn compare_edge_distance(x: &Point, a0: &Point, a1: &Point, r: ChordAngle) -> i32 {
    Predicates::default().compare_edge_distance(x, a0, a1, r)
}

/// `Predicates::compare_edge_pair_distance` with the default configuration.
pub fn compare_edge_pair_distance(a0: &Point, a1: &Point, b0: &Point, b1: &Point, r: ChordAngle) -> i32 {
    Predicates::default().compare_edge_pair_distance(a0, a1, b0, b1, r)
}

/// `Predicates::crossing_sign` with the default configuration.
pub fn crossing_sign(a: &Point, b: &Point, c: &Point, d: &Point) -> i32 {
    Predicates::default().crossing_sign(a, b, c, d)
}
