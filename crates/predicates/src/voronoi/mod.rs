//! Circumcenter and Voronoi-site predicates.
//!
//! Purpose
//! - `edge_circumcenter_sign`: which side of an edge the circumcenter of a
//!   triangle lies on.
//! - `get_voronoi_site_exclusion`: given two sites within distance `r` of an
//!   edge, decide whether one of them has no part of the edge that is both
//!   within `r` of it and closer to it than to the other site.
//!
//! Geometry (sites A, B; edge X = (x0, x1) on the great circle with normal
//! n = x0 × x1; c = cos r)
//! - Projected onto X's circle, a site S covers an arc centred at its
//!   projection: the points within `r` of S.
//! - A is assumed closer to x0, so along the edge A wins before the bisector
//!   crossing and B after it. B is excluded when the far end of B's arc lies
//!   on the edge and A is strictly closer there; A is excluded when the near
//!   end of A's arc lies on the edge and B is strictly closer there. An arc
//!   end off the edge means the arc reaches past the edge endpoint, where
//!   that site already wins.
//! - Each test is a sign of sums of square-root weighted terms, decided
//!   exactly by `sign_sqrt_sum2`/`sign_sqrt_sum3`.
//!
//! Code cross-refs: `Excluded`, `Predicates::compare_distances`.

mod circumcenter;

pub use circumcenter::edge_circumcenter_sign;

use crate::bound::{Bounded, BoundedVec};
use crate::exact::{sign_sqrt_sum2, sign_sqrt_sum3, ExactField, ExactVec3};
use crate::{ChordAngle, Point, Predicates};
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::fmt;
use tracing::trace;

/// Outcome of `get_voronoi_site_exclusion`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Excluded {
    /// The first site can be dropped.
    First,
    /// The second site can be dropped.
    Second,
    /// Both sites keep part of the edge.
    Neither,
    /// The two sites are identical.
    Uncertain,
}

impl fmt::Display for Excluded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Excluded::First => "FIRST",
            Excluded::Second => "SECOND",
            Excluded::Neither => "NEITHER",
            Excluded::Uncertain => "UNCERTAIN",
        };
        f.write_str(s)
    }
}

/// Exclusion test for site `s` against `o`, as floats with bounds.
///
/// With `M = (o·s)|n|² - (n·o)(n·s)`, `K = |s|²|n|² - (n·s)²` and
/// `W = max(K - c²|s|²|n|², 0)`, the end of `s`'s arc is
/// `P = c|s|(|n|²s - (n·s)n) ± √W (n × s)`, taking `+` for the far end, and
/// `t = ±n·(s×o)` with the same sign.
/// `o` is strictly closer at `P` iff `√|s|²·cM - √|o|²·cK + √W·t > 0`, and
/// `P` lies on the edge iff `P·(n × x0) ≥ 0` and `P·(x1 × n) ≥ 0`.
///
/// 1 if `s` is certainly excluded, -1 if certainly not, 0 if unknown.
#[allow(clippy::too_many_arguments)]
fn triage_exclusion(
    o: &BoundedVec,
    s: &BoundedVec,
    n: &BoundedVec,
    ends: [&BoundedVec; 2],
    c: Bounded,
    m: Bounded,
    t: Bounded,
    far: bool,
) -> i32 {
    let n2 = n.norm2();
    let (o2, s2) = (o.norm2(), s.norm2());
    let ns = n.dot(s);
    let k = s2 * n2 - ns * ns;
    let w = (k - c * c * s2 * n2).clamp_nonneg();
    let value = s2.sqrt() * (c * m) - o2.sqrt() * (c * k) + w.sqrt() * t;
    let nxs = n.cross(s);
    let mut on_edge = 1;
    for e in ends {
        let along = w.sqrt() * nxs.dot(e);
        let d = s2.sqrt() * (c * n2 * s.dot(e)) + if far { along } else { -along };
        on_edge = on_edge.min(d.sign());
    }
    match (on_edge, value.sign()) {
        (-1, _) | (_, -1) => -1,
        (1, 1) => 1,
        _ => 0,
    }
}

#[allow(clippy::too_many_arguments)]
fn exact_exclusion(
    o: &ExactVec3,
    s: &ExactVec3,
    n: &ExactVec3,
    ends: [&ExactVec3; 2],
    c: &BigRational,
    m: &BigRational,
    t: &BigRational,
    far: bool,
) -> bool {
    let n2 = n.norm2();
    let (o2, s2) = (o.norm2(), s.norm2());
    let ns = n.dot(s);
    let k = s2.clone() * n2.clone() - ns.clone() * ns;
    let mut w = k.clone() - c.clone() * c.clone() * s2.clone() * n2.clone();
    if w.is_negative() {
        w = BigRational::zero();
    }
    let nxs = n.cross(s);
    for e in ends {
        let x = c.clone() * n2.clone() * s.dot(e);
        let along = nxs.dot(e);
        let y = if far { along } else { -along };
        if sign_sqrt_sum2(&s2, &x, &w, &y) < 0 {
            return false;
        }
    }
    let cm = c.clone() * m.clone();
    let neg_ck = -(c.clone() * k);
    sign_sqrt_sum3(&s2, &cm, &o2, &neg_ck, &w, t) > 0
}

/// `(exclude_a, exclude_b)`, each 1 if certain, -1 if certainly not, 0 if unknown.
fn triage_site_exclusion(a: &Point, b: &Point, x0: &Point, x1: &Point, r2: f64) -> (i32, i32) {
    let (ba, bb) = (BoundedVec::exact(a), BoundedVec::exact(b));
    let (b0, b1) = (BoundedVec::exact(x0), BoundedVec::exact(x1));
    let n = (b0 - b1).cross(&(b0 + b1));
    let (e0, e1) = (n.cross(&b0), b1.cross(&n));
    let ends = [&e0, &e1];
    let c = Bounded::exact(1.0) - Bounded::exact(0.5 * r2);
    let n2 = n.norm2();
    let m = ba.dot(&bb) * n2 - n.dot(&ba) * n.dot(&bb);
    let t = n.dot(&bb.cross(&ba));
    let exclude_b = triage_exclusion(&ba, &bb, &n, ends, c, m, t, true);
    let exclude_a = triage_exclusion(&bb, &ba, &n, ends, c, m, t, false);
    (exclude_a, exclude_b)
}

fn exact_site_exclusion(a: &Point, b: &Point, x0: &Point, x1: &Point, r2: f64) -> Excluded {
    let xa: ExactVec3 = ExactVec3::lift(a);
    let xb: ExactVec3 = ExactVec3::lift(b);
    let (y0, y1): (ExactVec3, ExactVec3) = (ExactVec3::lift(x0), ExactVec3::lift(x1));
    let n = y0.cross(&y1);
    let (e0, e1) = (n.cross(&y0), y1.cross(&n));
    let ends = [&e0, &e1];
    let half = BigRational::lift_f64(0.5);
    let c = BigRational::lift_f64(1.0) - half * BigRational::lift_f64(r2);
    let m = xa.dot(&xb) * n.norm2() - n.dot(&xa) * n.dot(&xb);
    let t = n.dot(&xb.cross(&xa));
    if exact_exclusion(&xa, &xb, &n, ends, &c, &m, &t, true) {
        return Excluded::Second;
    }
    if exact_exclusion(&xb, &xa, &n, ends, &c, &m, &t, false) {
        return Excluded::First;
    }
    Excluded::Neither
}

impl Predicates {
    /// Decides whether site `a` or site `b` can be dropped from the
    /// `r`-clipped Voronoi diagram restricted to edge `(x0, x1)`.
    ///
    /// Requires `compare_distances(x0, a, b) < 0`, both sites within `r` of
    /// the edge, `r` below 90°, and a non-degenerate edge. Returns
    /// `Uncertain` iff `a == b`, and never reports both sites excluded.
    pub fn get_voronoi_site_exclusion(
        &self,
        a: &Point,
        b: &Point,
        x0: &Point,
        x1: &Point,
        r: ChordAngle,
    ) -> Excluded {
        if a == b {
            return Excluded::Uncertain;
        }
        debug_assert!(r.length2() < 2.0, "exclusion radius must be below 90 degrees");
        // A is closer at both ends, so B never wins anywhere along the edge.
        if self.compare_distances(x1, a, b) < 0 {
            return Excluded::Second;
        }
        let r2 = r.length2();
        let slow = || exact_site_exclusion(a, b, x0, x1, r2);
        let fast = match triage_site_exclusion(a, b, x0, x1, r2) {
            (_, 1) => Some(Excluded::Second),
            (1, _) => Some(Excluded::First),
            (-1, -1) => Some(Excluded::Neither),
            _ => None,
        };
        match fast {
            Some(result) => {
                if self.cfg.verify {
                    let exact = slow();
                    if exact != result {
                        tracing::error!(
                            predicate = "get_voronoi_site_exclusion",
                            fast = %result,
                            exact = %exact,
                            "triage disagrees with exact tier"
                        );
                        panic!("get_voronoi_site_exclusion: triage returned {result} but exact evaluation gives {exact}");
                    }
                }
                result
            }
            None => {
                trace!(predicate = "get_voronoi_site_exclusion", "exact fallback");
                slow()
            }
        }
    }
}

/// `Predicates::get_voronoi_site_exclusion` with the default configuration.
pub fn get_voronoi_site_exclusion(
    a: &Point,
    b: &Point,
    x0: &Point,
    x1: &Point,
    r: ChordAngle,
) -> Excluded {
    Predicates::default().get_voronoi_site_exclusion(a, b, x0, x1, r)
}
