//! Robust decision predicates for points on the unit sphere.
//!
//! Every predicate answers a sign or ordering question about points that only
//! approximately lie on the sphere, and the answer is always correct and
//! self-consistent. Each predicate runs the same tiers:
//! - triage: plain `f64` evaluation with a rigorous forward error bound,
//! - exact: recomputation with arbitrary-precision rationals,
//! - symbolic perturbation: a deterministic tie-break for exact ties
//!   (where the predicate promises a non-zero answer).
//!
//! Layout
//! - `sign`: orientation `Sign(a, b, c)` and its low-level tiers, `ordered_ccw`.
//! - `distance`: point/point, point/threshold, point/edge, edge/edge comparisons.
//! - `direction`: `compare_edge_directions`, `sign_dot_prod` (never perturbed).
//! - `circle`: ordering of edge crossings along a great circle.
//! - `voronoi`: `edge_circumcenter_sign`, `get_voronoi_site_exclusion`.
//! - `chord`, `exact`, `bound`, `perturb`, `cfg`: shared plumbing.
//!
//! Points are `nalgebra::Vector3<f64>` with squared norm at most 2; they need
//! not be exactly unit length. All predicates are pure functions and may be
//! called concurrently without synchronization.

pub mod api;
pub mod bound;
pub mod cfg;
pub mod chord;
pub mod circle;
pub mod direction;
pub mod distance;
pub mod exact;
pub mod perturb;
pub mod sign;
pub mod voronoi;

#[cfg(test)]
pub(crate) mod testutil;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A point on (or near) the unit sphere.
pub type Point = nalgebra::Vector3<f64>;

pub use cfg::{PredCfg, Predicates};
pub use chord::ChordAngle;
pub use voronoi::Excluded;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::chord::ChordAngle;
    pub use crate::circle::{circle_edge_intersection_ordering, circle_edge_intersection_sign};
    pub use crate::direction::{compare_edge_directions, sign_dot_prod};
    pub use crate::distance::{
        compare_distance, compare_distances, compare_edge_distance, compare_edge_pair_distance,
    };
    pub use crate::sign::{ordered_ccw, sign};
    pub use crate::voronoi::{edge_circumcenter_sign, get_voronoi_site_exclusion, Excluded};
    pub use crate::{Point, PredCfg, Predicates};
}
