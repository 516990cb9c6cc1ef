//! Predicate cases: parsing, the batch file schema, and evaluation.
//!
//! A case names a predicate, lists its points in argument order and, for the
//! distance predicates, a threshold in degrees:
//!
//! ```json
//! {"predicate": "compare_distance", "points": [[1,0,0],[0,1,0]], "r_deg": 90}
//! ```

use anyhow::{bail, ensure, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sphere_predicates::{ChordAngle, Point, Predicates};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Predicate {
    Sign,
    UnperturbedSign,
    OrderedCcw,
    CrossingSign,
    CompareDistances,
    CompareDistance,
    CompareEdgeDistance,
    CompareEdgePairDistance,
    CompareEdgeDirections,
    SignDotProd,
    CircleEdgeIntersectionSign,
    CircleEdgeIntersectionOrdering,
    EdgeCircumcenterSign,
    GetVoronoiSiteExclusion,
}

impl Predicate {
    /// Number of points the predicate takes.
    pub fn arity(self) -> usize {
        use Predicate::*;
        match self {
            SignDotProd | CompareDistance => 2,
            Sign | UnperturbedSign | CompareDistances | CompareEdgeDistance => 3,
            OrderedCcw
            | CrossingSign
            | CompareEdgePairDistance
            | CompareEdgeDirections
            | CircleEdgeIntersectionSign
            | GetVoronoiSiteExclusion => 4,
            EdgeCircumcenterSign => 5,
            CircleEdgeIntersectionOrdering => 6,
        }
    }

    /// Whether the predicate takes a threshold angle.
    pub fn needs_radius(self) -> bool {
        matches!(
            self,
            Predicate::CompareDistance
                | Predicate::CompareEdgeDistance
                | Predicate::CompareEdgePairDistance
                | Predicate::GetVoronoiSiteExclusion
        )
    }
}

/// One entry of a batch input file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub predicate: Predicate,
    pub points: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_deg: Option<f64>,
}

/// One entry of a batch output file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub predicate: Predicate,
    pub result: Value,
}

/// Parses `"x,y,z"`.
pub fn parse_point(s: &str) -> Result<[f64; 3]> {
    let coords = s
        .split(',')
        .map(|c| {
            c.trim()
                .parse::<f64>()
                .with_context(|| format!("bad coordinate {c:?} in point {s:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    match coords.as_slice() {
        &[x, y, z] => Ok([x, y, z]),
        _ => bail!("point {s:?} must have three comma-separated coordinates"),
    }
}

/// Evaluates one case. Integer answers come back as JSON numbers,
/// `ordered_ccw` as a boolean and Voronoi exclusion as its display name.
pub fn evaluate(p: &Predicates, case: &Case) -> Result<Value> {
    let pred = case.predicate;
    ensure!(
        case.points.len() == pred.arity(),
        "{pred:?} takes {} points, got {}",
        pred.arity(),
        case.points.len()
    );
    for pt in &case.points {
        ensure!(pt.iter().all(|c| c.is_finite()), "non-finite coordinate in {pt:?}");
    }
    let r = match (pred.needs_radius(), case.r_deg) {
        (true, Some(deg)) => ChordAngle::from_degrees(deg),
        (true, None) => bail!("{pred:?} needs r_deg"),
        (false, _) => ChordAngle::ZERO,
    };
    let v: Vec<Point> = case.points.iter().map(|c| Point::new(c[0], c[1], c[2])).collect();
    let out = match pred {
        Predicate::Sign => json!(p.sign(&v[0], &v[1], &v[2])),
        Predicate::UnperturbedSign => json!(p.unperturbed_sign(&v[0], &v[1], &v[2])),
        Predicate::OrderedCcw => {
            ensure!(v[..3].iter().all(|x| *x != v[3]), "center must differ from a, b and c");
            json!(p.ordered_ccw(&v[0], &v[1], &v[2], &v[3]))
        }
        Predicate::CrossingSign => json!(p.crossing_sign(&v[0], &v[1], &v[2], &v[3])),
        Predicate::CompareDistances => json!(p.compare_distances(&v[0], &v[1], &v[2])),
        Predicate::CompareDistance => json!(p.compare_distance(&v[0], &v[1], r)),
        Predicate::CompareEdgeDistance => {
            ensure!(v[1] != -v[2], "edge endpoints are antipodal");
            json!(p.compare_edge_distance(&v[0], &v[1], &v[2], r))
        }
        Predicate::CompareEdgePairDistance => {
            ensure!(v[0] != -v[1] && v[2] != -v[3], "edge endpoints are antipodal");
            json!(p.compare_edge_pair_distance(&v[0], &v[1], &v[2], &v[3], r))
        }
        Predicate::CompareEdgeDirections => {
            json!(p.compare_edge_directions(&v[0], &v[1], &v[2], &v[3]))
        }
        Predicate::SignDotProd => json!(p.sign_dot_prod(&v[0], &v[1])),
        Predicate::CircleEdgeIntersectionSign => {
            json!(p.circle_edge_intersection_sign(&v[0], &v[1], &v[2], &v[3]))
        }
        Predicate::CircleEdgeIntersectionOrdering => json!(p
            .circle_edge_intersection_ordering(&v[0], &v[1], &v[2], &v[3], &v[4], &v[5])),
        Predicate::EdgeCircumcenterSign => {
            json!(p.edge_circumcenter_sign(&v[0], &v[1], &v[2], &v[3], &v[4]))
        }
        Predicate::GetVoronoiSiteExclusion => {
            ensure!(r.length2() < 2.0, "r_deg must be below 90");
            json!(p
                .get_voronoi_site_exclusion(&v[0], &v[1], &v[2], &v[3], r)
                .to_string())
        }
    };
    Ok(out)
}

/// Evaluates every case in order; the first failure aborts with its index.
pub fn evaluate_all(p: &Predicates, cases: &[Case]) -> Result<Vec<CaseResult>> {
    cases
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let result = evaluate(p, case).with_context(|| format!("case {i}"))?;
            Ok(CaseResult {
                predicate: case.predicate,
                result,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(predicate: Predicate, points: &[[f64; 3]], r_deg: Option<f64>) -> Case {
        Case {
            predicate,
            points: points.to_vec(),
            r_deg,
        }
    }

    const X: [f64; 3] = [1.0, 0.0, 0.0];
    const Y: [f64; 3] = [0.0, 1.0, 0.0];
    const Z: [f64; 3] = [0.0, 0.0, 1.0];

    #[test]
    fn parse_point_accepts_three_coordinates() {
        assert_eq!(parse_point("1, 0,-2.5").unwrap(), [1.0, 0.0, -2.5]);
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,2,3,4").is_err());
        assert!(parse_point("1,a,3").is_err());
    }

    #[test]
    fn evaluates_orientation_of_the_axes() {
        let p = Predicates::verifying();
        assert_eq!(evaluate(&p, &case(Predicate::Sign, &[X, Y, Z], None)).unwrap(), json!(1));
        assert_eq!(evaluate(&p, &case(Predicate::Sign, &[Z, Y, X], None)).unwrap(), json!(-1));
        let ccw = case(Predicate::OrderedCcw, &[X, Y, [-1.0, 0.0, 0.0], Z], None);
        assert_eq!(evaluate(&p, &ccw).unwrap(), json!(true));
    }

    #[test]
    fn distance_predicates_need_a_radius() {
        let p = Predicates::default();
        let c = case(Predicate::CompareDistance, &[X, Y], None);
        assert!(evaluate(&p, &c).is_err());
        // 90 degrees rounds to a chord slightly shorter than the exact right angle.
        let c = case(Predicate::CompareDistance, &[X, Y], Some(90.0));
        assert_eq!(evaluate(&p, &c).unwrap(), json!(1));
        let c = case(Predicate::CompareDistance, &[X, Y], Some(90.5));
        assert_eq!(evaluate(&p, &c).unwrap(), json!(-1));
    }

    #[test]
    fn wrong_arity_is_an_error() {
        let p = Predicates::default();
        let err = evaluate(&p, &case(Predicate::Sign, &[X, Y], None)).unwrap_err();
        assert!(err.to_string().contains("takes 3 points"));
    }

    #[test]
    fn voronoi_exclusion_is_reported_by_name() {
        let p = Predicates::default();
        let c = case(Predicate::GetVoronoiSiteExclusion, &[X, X, X, Y], Some(30.0));
        assert_eq!(evaluate(&p, &c).unwrap(), json!("UNCERTAIN"));
        let c = case(Predicate::GetVoronoiSiteExclusion, &[X, X, X, Y], Some(120.0));
        assert!(evaluate(&p, &c).is_err());
    }

    #[test]
    fn batch_file_schema() {
        let text = r#"[
            {"predicate": "sign", "points": [[1,0,0],[0,1,0],[0,0,1]]},
            {"predicate": "compare_distances", "points": [[0,0,1],[1,0,0],[0,0,-1]]},
            {"predicate": "compare_edge_distance", "points": [[0,0,1],[1,0,0],[0,1,0]], "r_deg": 45}
        ]"#;
        let cases: Vec<Case> = serde_json::from_str(text).unwrap();
        assert_eq!(cases[2].r_deg, Some(45.0));
        let results = evaluate_all(&Predicates::verifying(), &cases).unwrap();
        let values: Vec<Value> = results.into_iter().map(|r| r.result).collect();
        assert_eq!(values, vec![json!(1), json!(-1), json!(1)]);
    }

    #[test]
    fn batch_failure_names_the_case() {
        let cases = vec![
            case(Predicate::Sign, &[X, Y, Z], None),
            case(Predicate::SignDotProd, &[X], None),
        ];
        let err = evaluate_all(&Predicates::default(), &cases).unwrap_err();
        assert_eq!(err.to_string(), "case 1");
    }
}
