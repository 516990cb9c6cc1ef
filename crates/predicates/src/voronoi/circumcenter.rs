//! `EdgeCircumcenterSign`: side of an edge on which a triangle's circumcenter
//! lies.
//!
//! For unit points the circumcenter direction of a counterclockwise triangle
//! is `a×b + b×c + c×a`. Reprojecting non-unit inputs and clearing the
//! denominators gives `Z = |c| (a×b) + |a| (b×c) + |b| (c×a)`, so
//! `sign(nx · Z)` only needs square roots of squared norms, which the exact
//! tier decides with `sign_sqrt_sum3`.

use crate::bound::BoundedVec;
use crate::exact::{sign_sqrt_sum3, ExactVec3};
use crate::perturb::sort3;
use crate::{Point, Predicates};
use tracing::trace;

fn triage_edge_circumcenter_sign(
    x0: &Point,
    x1: &Point,
    a: &Point,
    b: &Point,
    c: &Point,
    abc_sign: i32,
) -> i32 {
    let (bx0, bx1) = (BoundedVec::exact(x0), BoundedVec::exact(x1));
    let (ba, bb, bc) = (BoundedVec::exact(a), BoundedVec::exact(b), BoundedVec::exact(c));
    // (p - q) × (p + q) = 2 p×q, accurate for nearby points.
    let nx = (bx0 - bx1).cross(&(bx0 + bx1));
    let nab = (ba - bb).cross(&(ba + bb));
    let nbc = (bb - bc).cross(&(bb + bc));
    let nca = (bc - ba).cross(&(bc + ba));
    let z = nab.scale(bc.norm2().sqrt()) + nbc.scale(ba.norm2().sqrt()) + nca.scale(bb.norm2().sqrt());
    abc_sign * nx.dot(&z).sign()
}

/// Exact normal of the edge; zero iff `x0` and `x1` project to the same point.
fn exact_edge_normal(x0: &Point, x1: &Point) -> ExactVec3 {
    ExactVec3::lift(x0).cross(&ExactVec3::lift(x1))
}

fn exact_edge_circumcenter_sign(nx: &ExactVec3, a: &Point, b: &Point, c: &Point, abc_sign: i32) -> i32 {
    let xa: ExactVec3 = ExactVec3::lift(a);
    let xb: ExactVec3 = ExactVec3::lift(b);
    let xc: ExactVec3 = ExactVec3::lift(c);
    let dab = nx.dot(&xa.cross(&xb));
    let dbc = nx.dot(&xb.cross(&xc));
    let dca = nx.dot(&xc.cross(&xa));
    let (a2, b2, c2) = (xa.norm2(), xb.norm2(), xc.norm2());
    abc_sign * sign_sqrt_sum3(&c2, &dab, &a2, &dbc, &b2, &dca)
}

impl Predicates {
    /// Tie-break when the circumcenter lies exactly on the edge's great
    /// circle: perturbing the lexicographically smallest site moves the
    /// circumcenter towards it, so the first site not on the circle decides.
    fn symbolic_edge_circumcenter_sign(
        &self,
        x0: &Point,
        x1: &Point,
        a: &Point,
        b: &Point,
        c: &Point,
    ) -> i32 {
        let (sorted, _) = sort3(a, b, c);
        sorted
            .into_iter()
            .map(|p| self.unperturbed_sign(x0, x1, p))
            .find(|&s| s != 0)
            .unwrap_or(0)
    }

    /// Sign of `Sign(x0, x1, Z)` where `Z` is the circumcenter of triangle
    /// `abc`, oriented so that it lies inside a counterclockwise triangle.
    ///
    /// Returns 0 only when two of `a, b, c` coincide or `x0`, `x1` are the same
    /// point after projection onto the sphere.
    pub fn edge_circumcenter_sign(
        &self,
        x0: &Point,
        x1: &Point,
        a: &Point,
        b: &Point,
        c: &Point,
    ) -> i32 {
        if x0 == x1 {
            return 0;
        }
        let abc_sign = self.sign(a, b, c);
        let s = triage_edge_circumcenter_sign(x0, x1, a, b, c, abc_sign);
        if s != 0 {
            return self.checked("edge_circumcenter_sign", s, || {
                exact_edge_circumcenter_sign(&exact_edge_normal(x0, x1), a, b, c, abc_sign)
            });
        }
        if a == b || b == c || c == a {
            return 0;
        }
        trace!(predicate = "edge_circumcenter_sign", "exact fallback");
        let nx = exact_edge_normal(x0, x1);
        if nx.is_zero() {
            return 0;
        }
        let s = exact_edge_circumcenter_sign(&nx, a, b, c, abc_sign);
        if s != 0 {
            return s;
        }
        trace!(predicate = "edge_circumcenter_sign", "symbolic perturbation");
        self.symbolic_edge_circumcenter_sign(x0, x1, a, b, c)
    }
}

/// `Predicates::edge_circumcenter_sign` with the default configuration.
pub fn edge_circumcenter_sign(x0: &Point, x1: &Point, a: &Point, b: &Point, c: &Point) -> i32 {
    Predicates::default().edge_circumcenter_sign(x0, x1, a, b, c)
}
