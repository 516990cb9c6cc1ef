use super::*;
use crate::exact::det_sign;
use crate::testutil::{jitter, lattice_unit_strategy, on_great_circle, random_unit, sph, unit, unit_strategy};
use nalgebra::vector;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Checks the perturbed sign of an exactly degenerate triple under all six
/// argument orders.
fn check_symbolic(a: Point, b: Point, c: Point, expected: i32) {
    assert_eq!(det_sign(&a, &b, &c), 0, "triple must be exactly coplanar");
    assert_eq!(expensive_sign(&a, &b, &c, true), expected);
    assert_eq!(expensive_sign(&b, &c, &a, true), expected);
    assert_eq!(expensive_sign(&c, &a, &b, true), expected);
    assert_eq!(expensive_sign(&c, &b, &a, true), -expected);
    assert_eq!(expensive_sign(&b, &a, &c, true), -expected);
    assert_eq!(expensive_sign(&a, &c, &b, true), -expected);
    assert_eq!(expensive_sign(&a, &b, &c, false), 0);
}

#[test]
fn axes_are_counterclockwise() {
    let (x, y, z) = (vector![1.0, 0.0, 0.0], vector![0.0, 1.0, 0.0], vector![0.0, 0.0, 1.0]);
    assert_eq!(sign(&x, &y, &z), 1);
    assert_eq!(sign(&z, &y, &x), -1);
    assert_eq!(sign(&x, &y, &x), 0);
    assert_eq!(sign(&x, &x, &y), 0);
}

#[test]
fn antipodal_pair_with_third_point_is_non_zero_and_consistent() {
    let a = vector![1.0, 0.0, 0.0];
    let b = vector![-1.0, 0.0, 0.0];
    let c = vector![0.0, 1.0, 0.0];
    let s = sign(&a, &b, &c);
    assert_ne!(s, 0);
    assert_eq!(sign(&b, &c, &a), s);
    assert_eq!(sign(&c, &a, &b), s);
    assert_eq!(sign(&c, &b, &a), -s);
    assert_eq!(unperturbed_sign(&a, &b, &c), 0);
}

#[test]
fn coplanar_equator_points_are_resolved() {
    let a = unit(1.0, 0.0, 0.0);
    let b = unit(1.0, 1.0, 0.0);
    let c = unit(0.0, 1.0, 0.0);
    assert_eq!(det_sign(&a, &b, &c), 0);
    assert_eq!(unperturbed_sign(&a, &b, &c), 0);
    let s = sign(&a, &b, &c);
    assert_ne!(s, 0);
    assert_eq!(sign(&c, &a, &b), s);
    assert_eq!(sign(&a, &c, &b), -s);
}

#[test]
fn symbolic_perturbation_covers_every_term() {
    let v = |x: f64, y: f64, z: f64| vector![x, y, z];
    check_symbolic(v(-3.0, -1.0, 0.0), v(-2.0, 1.0, 0.0), v(1.0, -2.0, 0.0), 1);
    check_symbolic(v(-6.0, 3.0, 3.0), v(-4.0, 2.0, -1.0), v(-2.0, 1.0, 4.0), 1);
    check_symbolic(v(0.0, -1.0, -1.0), v(0.0, 1.0, -2.0), v(0.0, 2.0, 1.0), 1);
    check_symbolic(v(-1.0, 2.0, 7.0), v(2.0, 1.0, -4.0), v(4.0, 2.0, -8.0), 1);
    check_symbolic(v(-4.0, -2.0, 7.0), v(2.0, 1.0, -4.0), v(4.0, 2.0, -8.0), 1);
    check_symbolic(v(0.0, -5.0, 7.0), v(0.0, -4.0, 8.0), v(0.0, -2.0, 4.0), 1);
    check_symbolic(v(-5.0, -2.0, 7.0), v(0.0, 0.0, -2.0), v(0.0, 0.0, -1.0), 1);
    check_symbolic(v(0.0, -2.0, 7.0), v(0.0, 0.0, 1.0), v(0.0, 0.0, 2.0), 1);
    check_symbolic(v(-3.0, 1.0, 7.0), v(-1.0, -4.0, 1.0), v(0.0, 0.0, 0.0), 1);
    check_symbolic(v(-6.0, -4.0, 7.0), v(-3.0, -2.0, 1.0), v(0.0, 0.0, 0.0), 1);
    check_symbolic(v(0.0, -4.0, 7.0), v(0.0, -2.0, 1.0), v(0.0, 0.0, 0.0), -1);
    check_symbolic(v(-1.0, -4.0, 5.0), v(0.0, 0.0, -3.0), v(0.0, 0.0, 0.0), -1);
    check_symbolic(v(0.0, -4.0, 5.0), v(0.0, 0.0, -5.0), v(0.0, 0.0, 0.0), 1);
}

#[test]
fn stable_sign_handles_nearly_coincident_points() {
    let a = sph(10.0, 20.0);
    let b = sph(10.0 + 1e-10, 20.0);
    let c = sph(10.0, 20.0 + 1e-10);
    // Longitude then latitude: counterclockwise seen from outside.
    assert_eq!(stable_sign(&a, &b, &c), 1);
    assert_eq!(sign(&a, &b, &c), 1);
    assert_eq!(sign(&a, &c, &b), -1);
}

#[test]
fn near_degenerate_triples_agree_with_exact_determinant() {
    let mut rng = StdRng::seed_from_u64(0x5167);
    for _ in 0..500 {
        let a = random_unit(&mut rng);
        let base = random_unit(&mut rng);
        let b = jitter(&mut rng, &base, 1e-3);
        let c = on_great_circle(&mut rng, &a, &b);
        let exact = det_sign(&a, &b, &c);
        let s = sign(&a, &b, &c);
        if a == b || b == c || c == a {
            assert_eq!(s, 0);
            continue;
        }
        assert_ne!(s, 0);
        if exact != 0 {
            assert_eq!(s, exact);
        }
        assert_eq!(sign(&c, &a, &b), s);
        assert_eq!(sign(&b, &a, &c), -s);
    }
}

#[test]
fn verification_accepts_near_bound_answers() {
    let p = Predicates::verifying();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let a = random_unit(&mut rng);
        let b = random_unit(&mut rng);
        let base = on_great_circle(&mut rng, &a, &b);
        let c = jitter(&mut rng, &base, 1e-14);
        let s = p.sign(&a, &b, &c);
        assert_eq!(s, sign(&a, &b, &c));
    }
}

#[test]
fn ordered_ccw_around_the_pole() {
    let o = vector![0.0, 0.0, 1.0];
    let a = sph(0.0, 0.0);
    let b = sph(90.0, 0.0);
    let c = sph(200.0, 0.0);
    assert!(ordered_ccw(&a, &b, &c, &o));
    assert!(ordered_ccw(&b, &c, &a, &o));
    assert!(!ordered_ccw(&a, &c, &b, &o));
    assert!(ordered_ccw(&a, &a, &c, &o));
    assert!(ordered_ccw(&a, &b, &b, &o));
    assert!(!ordered_ccw(&a, &b, &a, &o));
}

proptest! {
    #[test]
    fn sign_is_cyclic_and_antisymmetric(a in unit_strategy(), b in unit_strategy(), c in unit_strategy()) {
        let s = sign(&a, &b, &c);
        prop_assert_eq!(sign(&b, &c, &a), s);
        prop_assert_eq!(sign(&c, &a, &b), s);
        prop_assert_eq!(sign(&c, &b, &a), -s);
        prop_assert_eq!(sign(&b, &a, &c), -s);
        prop_assert_eq!(s == 0, a == b || b == c || c == a);
    }

    #[test]
    fn sign_is_consistent_on_lattice_ties(
        a in lattice_unit_strategy(), b in lattice_unit_strategy(), c in lattice_unit_strategy()
    ) {
        let s = sign(&a, &b, &c);
        prop_assert_eq!(sign(&b, &c, &a), s);
        prop_assert_eq!(sign(&a, &c, &b), -s);
        prop_assert_eq!(s == 0, a == b || b == c || c == a);
        let u = unperturbed_sign(&a, &b, &c);
        prop_assert!(u == 0 || u == s);
    }

    #[test]
    fn ordered_ccw_properties(
        a in unit_strategy(), b in unit_strategy(), c in unit_strategy(), o in unit_strategy()
    ) {
        prop_assume!(a != o && b != o && c != o);
        if ordered_ccw(&a, &b, &c, &o) {
            if ordered_ccw(&b, &a, &c, &o) {
                prop_assert_eq!(a, b);
            }
            if ordered_ccw(&a, &c, &b, &o) {
                prop_assert_eq!(b, c);
            }
            if ordered_ccw(&c, &b, &a, &o) {
                prop_assert!(a == b && b == c);
            }
        }
        prop_assert!(ordered_ccw(&a, &a, &c, &o));
        prop_assert!(ordered_ccw(&a, &b, &b, &o));
        if a != b {
            prop_assert!(!ordered_ccw(&a, &b, &a, &o));
        }
    }
}
