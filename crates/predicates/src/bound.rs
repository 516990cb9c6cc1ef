//! Running forward error bounds for `f64` triage.
//!
//! Purpose
//! - Carry a rigorous upper bound on the absolute error next to every value
//!   computed in floating point, so that the triage tier of each predicate can
//!   decide whether the sign of its result is certain.
//! - `Bounded` tracks scalars, `BoundedVec` tracks 3-vectors (bound on the
//!   Euclidean norm of the error vector).
//!
//! Model
//! - Inputs are exact (`e = 0`). Every operation adds the propagated input
//!   error and the rounding error of the operation itself, using the unit
//!   roundoff `u = EPSILON / 2` of round-to-nearest.
//! - Products add an absolute `f64::MIN_POSITIVE` so gradual underflow never
//!   makes a bound optimistic.
//! - `sign()` inflates the bound by `SLACK` to absorb the rounding incurred
//!   while computing the bound itself.
//!
//! The fixed-constant triage in `sign` and `direction` does not use these
//! types; it relies on closed-form bounds instead.

use nalgebra::Vector3;
use std::ops::{Add, Mul, Neg, Sub};

/// Unit roundoff for round-to-nearest `f64`.
pub(crate) const UNIT_ROUNDOFF: f64 = f64::EPSILON * 0.5;

/// Relative inflation applied to every bound before a sign decision.
const SLACK: f64 = 1.0 + 1e-12;

/// A floating-point value with an upper bound on its absolute error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounded {
    /// Computed value.
    pub v: f64,
    /// Upper bound on `|true - v|`.
    pub e: f64,
}

impl Bounded {
    /// An exactly represented input.
    #[inline]
    pub fn exact(v: f64) -> Self {
        Self { v, e: 0.0 }
    }

    /// Sign of the true value if it is certain, else 0.
    ///
    /// NaN values and infinite bounds yield 0.
    #[inline]
    pub fn sign(self) -> i32 {
        let e = self.e * SLACK;
        if self.v > e {
            1
        } else if self.v < -e {
            -1
        } else {
            0
        }
    }

    /// `sqrt(max(x, 0))`.
    pub fn sqrt(self) -> Self {
        let x = self.v.max(0.0);
        let v = x.sqrt();
        let prop = if x > 0.0 {
            (self.e / v).min(self.e.sqrt())
        } else {
            self.e.sqrt()
        };
        Self {
            v,
            e: prop + UNIT_ROUNDOFF * v,
        }
    }

    /// Quotient; the bound is infinite when the divisor may be zero.
    pub fn div(self, rhs: Self) -> Self {
        let v = self.v / rhs.v;
        let margin = rhs.v.abs() - rhs.e;
        if margin.is_nan() || margin <= 0.0 {
            return Self {
                v,
                e: f64::INFINITY,
            };
        }
        Self {
            v,
            e: (self.e + v.abs() * rhs.e) / margin + UNIT_ROUNDOFF * v.abs(),
        }
    }

    /// `max(x, 0)`; clamping is 1-Lipschitz so the bound carries over.
    #[inline]
    pub fn clamp_nonneg(self) -> Self {
        Self {
            v: self.v.max(0.0),
            e: self.e,
        }
    }
}

impl Add for Bounded {
    type Output = Bounded;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let v = self.v + rhs.v;
        Self {
            v,
            e: self.e + rhs.e + UNIT_ROUNDOFF * v.abs(),
        }
    }
}

impl Sub for Bounded {
    type Output = Bounded;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let v = self.v - rhs.v;
        Self {
            v,
            e: self.e + rhs.e + UNIT_ROUNDOFF * v.abs(),
        }
    }
}

impl Mul for Bounded {
    type Output = Bounded;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let v = self.v * rhs.v;
        Self {
            v,
            e: self.v.abs() * rhs.e
                + rhs.v.abs() * self.e
                + self.e * rhs.e
                + UNIT_ROUNDOFF * v.abs()
                + f64::MIN_POSITIVE,
        }
    }
}

impl Neg for Bounded {
    type Output = Bounded;
    #[inline]
    fn neg(self) -> Self {
        Self {
            v: -self.v,
            e: self.e,
        }
    }
}

/// A floating-point 3-vector with a bound on the norm of its error vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedVec {
    pub v: Vector3<f64>,
    pub e: f64,
}

impl BoundedVec {
    #[inline]
    pub fn exact(v: &Vector3<f64>) -> Self {
        Self { v: *v, e: 0.0 }
    }

    /// Cross product. Each rounded component `a_i b_j - a_j b_i` is off by at
    /// most `2u(|a_i b_j| + |a_j b_i|)`, which sums to `2 sqrt(2) u |a||b|`.
    pub fn cross(&self, rhs: &Self) -> Self {
        let v = self.v.cross(&rhs.v);
        let (na, nb) = (self.v.norm(), rhs.v.norm());
        Self {
            v,
            e: self.e * nb
                + na * rhs.e
                + self.e * rhs.e
                + 3.0 * UNIT_ROUNDOFF * na * nb
                + f64::MIN_POSITIVE,
        }
    }

    /// Dot product; rounding is bounded by `gamma_3 sum |a_i b_i|`.
    pub fn dot(&self, rhs: &Self) -> Bounded {
        let v = self.v.dot(&rhs.v);
        let (na, nb) = (self.v.norm(), rhs.v.norm());
        Bounded {
            v,
            e: self.e * nb
                + na * rhs.e
                + self.e * rhs.e
                + 3.0 * UNIT_ROUNDOFF * na * nb
                + f64::MIN_POSITIVE,
        }
    }

    #[inline]
    pub fn norm2(&self) -> Bounded {
        self.dot(self)
    }

    /// Scalar multiple `s * self`.
    pub fn scale(&self, s: Bounded) -> Self {
        let v = self.v * s.v;
        let nx = self.v.norm();
        Self {
            v,
            e: s.v.abs() * self.e
                + nx * s.e
                + s.e * self.e
                + UNIT_ROUNDOFF * v.norm()
                + f64::MIN_POSITIVE,
        }
    }
}

impl Add for BoundedVec {
    type Output = BoundedVec;
    fn add(self, rhs: Self) -> Self {
        let v = self.v + rhs.v;
        Self {
            v,
            e: self.e + rhs.e + UNIT_ROUNDOFF * v.norm(),
        }
    }
}

impl Sub for BoundedVec {
    type Output = BoundedVec;
    fn sub(self, rhs: Self) -> Self {
        let v = self.v - rhs.v;
        Self {
            v,
            e: self.e + rhs.e + UNIT_ROUNDOFF * v.norm(),
        }
    }
}

impl Neg for BoundedVec {
    type Output = BoundedVec;
    fn neg(self) -> Self {
        Self {
            v: -self.v,
            e: self.e,
        }
    }
}
