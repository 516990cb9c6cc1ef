//! Shared helpers for unit tests.

use crate::Point;
use nalgebra::vector;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

/// Unit vector in the direction of `(x, y, z)`.
pub fn unit(x: f64, y: f64, z: f64) -> Point {
    vector![x, y, z].normalize()
}

/// Unit vector at longitude `lon` and latitude `lat`, in degrees.
pub fn sph(lon: f64, lat: f64) -> Point {
    let (lon, lat) = (lon.to_radians(), lat.to_radians());
    vector![lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Uniformly distributed unit vector.
pub fn random_unit(rng: &mut StdRng) -> Point {
    loop {
        let v = vector![
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0)
        ];
        let n2: f64 = v.norm_squared();
        if n2 > 1e-4 && n2 <= 1.0 {
            return v.normalize();
        }
    }
}

/// Unit vector within roughly `eps` radians of `p`.
pub fn jitter(rng: &mut StdRng, p: &Point, eps: f64) -> Point {
    let d = vector![
        rng.gen_range(-eps..eps),
        rng.gen_range(-eps..eps),
        rng.gen_range(-eps..eps)
    ];
    (p + d).normalize()
}

/// Unit vector (nearly) on the great circle through `a` and `b`.
pub fn on_great_circle(rng: &mut StdRng, a: &Point, b: &Point) -> Point {
    let s: f64 = rng.gen_range(-1.0..1.0);
    let t: f64 = rng.gen_range(-1.0..1.0);
    let v = a * s + b * t;
    if v.norm_squared() < 1e-6 {
        *a
    } else {
        v.normalize()
    }
}

/// Proptest strategy producing unit vectors.
pub fn unit_strategy() -> impl Strategy<Value = Point> {
    (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0)
        .prop_filter("away from the origin", |(x, y, z)| x * x + y * y + z * z > 1e-2)
        .prop_map(|(x, y, z)| unit(x, y, z))
}

/// Proptest strategy producing unit vectors with small integer directions, so
/// that exact ties (coplanar triples, equal distances) occur often.
pub fn lattice_unit_strategy() -> impl Strategy<Value = Point> {
    (-2i32..=2, -2i32..=2, -2i32..=2)
        .prop_filter("non-zero", |(x, y, z)| (*x, *y, *z) != (0, 0, 0))
        .prop_map(|(x, y, z)| unit(x as f64, y as f64, z as f64))
}
