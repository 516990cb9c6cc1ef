//! Exact arithmetic backend.
//!
//! Every finite `f64` is a dyadic rational, so lifting inputs into
//! `BigRational` and evaluating with ring operations gives exact signs. The
//! field is abstracted behind `ExactField` so the vector helpers stay generic.
//!
//! Predicates that reproject points onto the sphere need the sign of sums of
//! square-root weighted terms; `sign_sqrt_sum2`/`sign_sqrt_sum3` decide those
//! without ever taking a root.

use nalgebra::Vector3;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// A field with exact `+ - *` and an exact embedding of finite `f64`.
pub trait ExactField: Clone + PartialOrd + Signed {
    /// Exact value of `x`; non-finite inputs map to zero.
    fn lift_f64(x: f64) -> Self;
}

impl ExactField for BigRational {
    fn lift_f64(x: f64) -> Self {
        BigRational::from_float(x).unwrap_or_else(BigRational::zero)
    }
}

/// Sign of an exact value as -1, 0 or +1.
#[inline]
pub fn sgn<F: Signed>(x: &F) -> i32 {
    if x.is_positive() {
        1
    } else if x.is_negative() {
        -1
    } else {
        0
    }
}

/// An exact 3-vector.
#[derive(Clone, Debug, PartialEq)]
pub struct ExactVec3<F: ExactField = BigRational> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: ExactField> ExactVec3<F> {
    pub fn lift(p: &Vector3<f64>) -> Self {
        Self {
            x: F::lift_f64(p.x),
            y: F::lift_f64(p.y),
            z: F::lift_f64(p.z),
        }
    }

    pub fn dot(&self, o: &Self) -> F {
        self.x.clone() * o.x.clone() + self.y.clone() * o.y.clone() + self.z.clone() * o.z.clone()
    }

    pub fn cross(&self, o: &Self) -> Self {
        Self {
            x: self.y.clone() * o.z.clone() - self.z.clone() * o.y.clone(),
            y: self.z.clone() * o.x.clone() - self.x.clone() * o.z.clone(),
            z: self.x.clone() * o.y.clone() - self.y.clone() * o.x.clone(),
        }
    }

    pub fn norm2(&self) -> F {
        self.dot(self)
    }

    pub fn add(&self, o: &Self) -> Self {
        Self {
            x: self.x.clone() + o.x.clone(),
            y: self.y.clone() + o.y.clone(),
            z: self.z.clone() + o.z.clone(),
        }
    }

    pub fn sub(&self, o: &Self) -> Self {
        Self {
            x: self.x.clone() - o.x.clone(),
            y: self.y.clone() - o.y.clone(),
            z: self.z.clone() - o.z.clone(),
        }
    }

    pub fn scale(&self, s: &F) -> Self {
        Self {
            x: self.x.clone() * s.clone(),
            y: self.y.clone() * s.clone(),
            z: self.z.clone() * s.clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero() && self.z.is_zero()
    }
}

/// Exact sign of `a · (b × c)`.
pub fn det_sign(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> i32 {
    let xa: ExactVec3 = ExactVec3::lift(a);
    let xb: ExactVec3 = ExactVec3::lift(b);
    let xc: ExactVec3 = ExactVec3::lift(c);
    sgn(&xa.dot(&xb.cross(&xc)))
}

/// Exact sign of `a · b`.
pub fn dot_sign(a: &Vector3<f64>, b: &Vector3<f64>) -> i32 {
    let xa: ExactVec3 = ExactVec3::lift(a);
    sgn(&xa.dot(&ExactVec3::lift(b)))
}

/// Sign of `√p·x + √q·y` for `p, q ≥ 0`.
///
/// Uses monotonicity of `t ↦ t|t|`: the sum is positive iff
/// `p·x|x| + q·y|y| > 0`.
pub fn sign_sqrt_sum2<F: ExactField>(p: &F, x: &F, q: &F, y: &F) -> i32 {
    let lhs = p.clone() * x.clone() * x.abs() + q.clone() * y.clone() * y.abs();
    sgn(&lhs)
}

/// Sign of `√p·x + √q·y + √s·z` for `p, q, s ≥ 0`.
pub fn sign_sqrt_sum3<F: ExactField>(p: &F, x: &F, q: &F, y: &F, s: &F, z: &F) -> i32 {
    // Compare L = √p·x + √q·y against R = -√s·z.
    let sl = sign_sqrt_sum2(p, x, q, y);
    let sr = if s.is_zero() { 0 } else { -sgn(z) };
    if sl != sr {
        return if sl > sr { 1 } else { -1 };
    }
    if sl == 0 {
        return 0;
    }
    // Same sign: sign(L - R) = sl * sign(L² - R²), and
    // L² - R² = (p x² + q y² - s z²) + 2xy·√(pq).
    let u = p.clone() * x.clone() * x.clone() + q.clone() * y.clone() * y.clone()
        - s.clone() * z.clone() * z.clone();
    let two = F::lift_f64(2.0);
    let v = two * x.clone() * y.clone();
    let one = F::lift_f64(1.0);
    sl * sign_sqrt_sum2(&one, &u, &(p.clone() * q.clone()), &v)
}
