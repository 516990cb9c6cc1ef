//! Criterion benchmarks for the orientation predicate.
//! Three input families: well-separated random triples (triage only), nearly
//! coincident triples (stable tier) and exactly coplanar triples (exact tier
//! plus symbolic perturbation).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sphere_predicates::api::{sign, Point};

fn random_unit(rng: &mut StdRng) -> Point {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.norm_squared() > 1e-4 && v.norm_squared() <= 1.0 {
            return v.normalize();
        }
    }
}

fn triples(family: &str, n: usize, seed: u64) -> Vec<(Point, Point, Point)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let a = random_unit(&mut rng);
            match family {
                "close" => {
                    let d = |rng: &mut StdRng| {
                        Vector3::new(
                            rng.gen_range(-1e-13..1e-13),
                            rng.gen_range(-1e-13..1e-13),
                            rng.gen_range(-1e-13..1e-13),
                        )
                    };
                    let b = (a + d(&mut rng)).normalize();
                    let c = (a + d(&mut rng)).normalize();
                    (a, b, c)
                }
                "coplanar" => {
                    // Points on a coordinate great circle give exact zeros.
                    let t: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
                    let u: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
                    let v: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
                    (
                        Vector3::new(t.cos(), t.sin(), 0.0),
                        Vector3::new(u.cos(), u.sin(), 0.0),
                        Vector3::new(v.cos(), v.sin(), 0.0),
                    )
                }
                _ => (a, random_unit(&mut rng), random_unit(&mut rng)),
            }
        })
        .collect()
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign");
    for family in ["random", "close", "coplanar"] {
        let input = triples(family, 256, 41);
        group.bench_with_input(BenchmarkId::new("sign", family), &input, |b, input| {
            b.iter(|| {
                input
                    .iter()
                    .map(|(a, b, c)| sign(a, b, c))
                    .sum::<i32>()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sign);
criterion_main!(benches);
