//! Exact and symbolically perturbed orientation.

use crate::exact::{sgn, ExactVec3};
use crate::perturb::sort3;
use crate::Point;
use tracing::trace;

/// Exact sign of `a · (b × c)`; with `perturb`, an exact zero is replaced by
/// the sign of the symbolically perturbed determinant.
///
/// Points are sorted into perturbation order first so the outcome does not
/// depend on argument order beyond the permutation parity.
pub fn exact_sign(a: &Point, b: &Point, c: &Point, perturb: bool) -> i32 {
    let ([pa, pb, pc], perm_sign) = sort3(a, b, c);
    let xa: ExactVec3 = ExactVec3::lift(pa);
    let xb: ExactVec3 = ExactVec3::lift(pb);
    let xc: ExactVec3 = ExactVec3::lift(pc);
    let b_cross_c = xb.cross(&xc);
    let mut det_sign = sgn(&xa.dot(&b_cross_c));
    if det_sign == 0 && perturb {
        trace!(predicate = "sign", "symbolic perturbation");
        det_sign = symbolically_perturbed_sign(&xa, &xb, &xc, &b_cross_c);
    }
    perm_sign * det_sign
}

/// Sign of the determinant after perturbing each point by a distinct power of
/// an infinitesimal, for `a < b < c` in perturbation order.
///
/// The terms of the expanded determinant are tested in order of decreasing
/// magnitude; the first non-zero one decides. For distinct points some term
/// is always non-zero.
fn symbolically_perturbed_sign(
    a: &ExactVec3,
    b: &ExactVec3,
    c: &ExactVec3,
    b_cross_c: &ExactVec3,
) -> i32 {
    let terms = [
        sgn(&b_cross_c.z),
        sgn(&b_cross_c.y),
        sgn(&b_cross_c.x),
        sgn(&(c.x.clone() * a.y.clone() - c.y.clone() * a.x.clone())),
        sgn(&c.x),
        -sgn(&c.y),
        sgn(&(c.z.clone() * a.x.clone() - c.x.clone() * a.z.clone())),
        sgn(&c.z),
        // c is now known to be the origin.
        sgn(&(a.x.clone() * b.y.clone() - a.y.clone() * b.x.clone())),
        -sgn(&b.x),
        sgn(&b.y),
        sgn(&a.x),
    ];
    terms.into_iter().find(|&s| s != 0).unwrap_or(1)
}
