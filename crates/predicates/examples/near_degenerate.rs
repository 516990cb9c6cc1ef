//! Near-degenerate inputs and which tier resolves them.
//!
//! Purpose
//! - Show that nearly coincident and exactly coplanar triples still get a
//!   consistent, non-zero orientation.
//! - Run every predicate through `Predicates::verifying()` so each certain
//!   triage answer is cross-checked against exact arithmetic.

use nalgebra::Vector3;
use sphere_predicates::api::{exact_sign, stable_sign, triage_sign, ChordAngle, Predicates};

fn main() {
    let p = Predicates::verifying();

    let a = Vector3::new(1.0, 0.0, 0.0);
    let b = Vector3::new(1.0, 1e-15, 0.0).normalize();
    let c = Vector3::new(1.0, 0.0, 1e-15).normalize();
    println!(
        "close triple: triage={} stable={} exact={} sign={}",
        triage_sign(&a, &b, &c, &a.cross(&b)),
        stable_sign(&a, &b, &c),
        exact_sign(&a, &b, &c, true),
        p.sign(&a, &b, &c)
    );

    let d = Vector3::new(0.0, 1.0, 0.0);
    let e = Vector3::new(-1.0, 0.0, 0.0);
    println!(
        "coplanar triple: unperturbed={} sign={} reversed={}",
        p.unperturbed_sign(&a, &d, &e),
        p.sign(&a, &d, &e),
        p.sign(&e, &d, &a)
    );

    let pole = Vector3::new(0.0, 0.0, 1.0);
    println!(
        "equidistant sites: compare_distances={} compare_distance(90°)={}",
        p.compare_distances(&pole, &a, &d),
        p.compare_distance(&pole, &a, ChordAngle::RIGHT)
    );
}
