//! Curated API surface for callers that want the predicates and their
//! low-level tiers from one place.
//!
//! Important
//! - The free functions use the default `Predicates` (no verification). Build
//!   a `Predicates::verifying()` to cross-check every triage answer.
//! - The tier functions (`triage_sign`, `stable_sign`, `exact_sign`, ...) are
//!   exposed for benchmarking and testing; prefer the full predicates.

// Orientation
pub use crate::sign::{
    exact_sign, expensive_sign, ordered_ccw, sign, sign_with_cross, stable_sign, triage_sign,
    unperturbed_sign, MAX_DET_ERROR,
};
// Distances
pub use crate::distance::{
    compare_distance, compare_distances, compare_edge_distance, compare_edge_pair_distance,
    crossing_sign,
};
// Directions
pub use crate::direction::{compare_edge_directions, sign_dot_prod, MAX_DOT_ERROR};
// Great-circle crossings
pub use crate::circle::{circle_edge_intersection_ordering, circle_edge_intersection_sign};
// Voronoi
pub use crate::voronoi::{edge_circumcenter_sign, get_voronoi_site_exclusion, Excluded};
// Shared types
pub use crate::chord::{ChordAngle, MAX_LENGTH2};
pub use crate::perturb::{lex_cmp, lex_less};
pub use crate::{Point, PredCfg, Predicates};
