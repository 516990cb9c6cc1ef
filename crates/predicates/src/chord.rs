//! Angular distances stored as squared chord lengths.
//!
//! A `ChordAngle` keeps `|x - y|²` for unit points `x`, `y` at angle θ, which
//! is `(2 sin(θ/2))²` and lies in `[0, 4]`. Comparisons need no inverse
//! trigonometry, and the distance predicates consume `length2()` directly.
//! `NEGATIVE` and `INFINITY` are sentinels outside that range.

use crate::Point;
use std::cmp::Ordering;
use std::fmt;

/// Largest meaningful squared chord length (two antipodal unit points).
pub const MAX_LENGTH2: f64 = 4.0;

/// An angular distance in `[0°, 180°]`, or one of two sentinels.
#[derive(Clone, Copy, Debug)]
pub struct ChordAngle {
    length2: f64,
}

impl ChordAngle {
    /// Zero distance.
    pub const ZERO: ChordAngle = ChordAngle { length2: 0.0 };
    /// 90 degrees.
    pub const RIGHT: ChordAngle = ChordAngle { length2: 2.0 };
    /// 180 degrees, the largest finite angle.
    pub const STRAIGHT: ChordAngle = ChordAngle { length2: MAX_LENGTH2 };
    /// Larger than every finite angle.
    pub const INFINITY: ChordAngle = ChordAngle {
        length2: f64::INFINITY,
    };
    /// Smaller than every finite angle.
    pub const NEGATIVE: ChordAngle = ChordAngle { length2: -1.0 };

    /// From a squared chord length; values above 4 clamp to `STRAIGHT`.
    pub fn from_length2(length2: f64) -> Self {
        // +0.0 keeps the total order free of a separate -0.0 class.
        let l = if length2 == 0.0 { 0.0 } else { length2 };
        Self {
            length2: l.min(MAX_LENGTH2),
        }
    }

    /// From an angle in radians. Negative angles give `NEGATIVE`, angles of
    /// at least π give `STRAIGHT`, infinite angles give `INFINITY`.
    pub fn from_radians(radians: f64) -> Self {
        if radians < 0.0 {
            return Self::NEGATIVE;
        }
        if radians.is_infinite() {
            return Self::INFINITY;
        }
        let theta = radians.min(std::f64::consts::PI);
        let chord = 2.0 * (0.5 * theta).sin();
        Self::from_length2(chord * chord)
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    /// Squared chord distance between two unit points.
    pub fn between(x: &Point, y: &Point) -> Self {
        Self::from_length2((x - y).norm_squared())
    }

    #[inline]
    pub fn length2(self) -> f64 {
        self.length2
    }

    /// Angle in radians; `NEGATIVE` maps to -1 and `INFINITY` to infinity.
    pub fn radians(self) -> f64 {
        if self.is_negative() {
            return -1.0;
        }
        if self.is_infinity() {
            return f64::INFINITY;
        }
        2.0 * (0.5 * self.length2.sqrt()).asin()
    }

    pub fn degrees(self) -> f64 {
        if self.is_negative() {
            return -1.0;
        }
        self.radians().to_degrees()
    }

    pub fn is_zero(self) -> bool {
        self.length2 == 0.0
    }

    pub fn is_negative(self) -> bool {
        self.length2 < 0.0
    }

    pub fn is_infinity(self) -> bool {
        self.length2 == f64::INFINITY
    }

    /// `NEGATIVE` or `INFINITY`.
    pub fn is_special(self) -> bool {
        self.is_negative() || self.is_infinity()
    }
}

impl Default for ChordAngle {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for ChordAngle {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ChordAngle {}

impl PartialOrd for ChordAngle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChordAngle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length2.total_cmp(&other.length2)
    }
}

impl fmt::Display for ChordAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinity() {
            return write!(f, "inf");
        }
        write!(f, "{:.7}°", self.degrees())
    }
}
