//! Stratified pair sampling
//!
//! Reduces two parallel point lists to `count` pairs while keeping index
//! correspondence: pair `k` of the output is always `(source[j], target[j])`
//! for the same `j`. One seeded pick per contiguous stratum keeps coverage
//! even across the original ordering.

use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;
use crate::core::random::Prng;
use crate::domain::config::{coerce_seed, DEFAULT_SEED};

/// JSON request for `downsamplePairedPoints`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PairSampleRequest {
    pub source_points: Vec<Point>,
    pub target_points: Vec<Point>,
    pub count: f64,
    pub seed: Option<f64>,
}

impl PairSampleRequest {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid pair sample request: {}", e))
    }

    pub fn run(&self) -> PairedPoints {
        let seed = self.seed.and_then(coerce_seed).unwrap_or(DEFAULT_SEED);
        downsample_paired_points(&self.source_points, &self.target_points, self.count, seed)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairedPoints {
    pub source_points: Vec<Point>,
    pub target_points: Vec<Point>,
}

impl PairedPoints {
    pub fn len(&self) -> usize {
        self.source_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_points.is_empty()
    }
}

/// Number of pairs `downsample_paired_points` returns for `count` over a
/// universe of `upper` pairs.
pub fn capped_count(count: f64, upper: usize) -> usize {
    if !count.is_finite() || count < 1.0 {
        return 0;
    }
    let floored = count.floor();
    if floored >= upper as f64 {
        upper
    } else {
        floored as usize
    }
}

pub fn downsample_paired_points(
    source: &[Point],
    target: &[Point],
    count: f64,
    seed: i32,
) -> PairedPoints {
    let upper = source.len().min(target.len());
    let capped = capped_count(count, upper);
    if capped == 0 {
        return PairedPoints::default();
    }
    if upper <= capped {
        return PairedPoints {
            source_points: source[..upper].to_vec(),
            target_points: target[..upper].to_vec(),
        };
    }

    let mut rng = Prng::new(seed);
    let stride = upper as f64 / capped as f64;
    let mut source_points = Vec::with_capacity(capped);
    let mut target_points = Vec::with_capacity(capped);

    for i in 0..capped {
        let start = (i as f64 * stride).floor() as usize;
        let end = (((i + 1) as f64 * stride).floor() as usize).min(upper);
        let span = end.saturating_sub(start).max(1);
        let pick = start + (rng.next_f64() * span as f64).floor() as usize;
        let idx = pick.min(upper - 1);
        source_points.push(source[idx]);
        target_points.push(target[idx]);
    }

    PairedPoints {
        source_points,
        target_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize, y: f32) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f32, y)).collect()
    }

    #[test]
    fn output_length_is_clamped_count() {
        let source = line(50, 0.0);
        let target = line(30, 9.0);
        for (count, expected) in [(0.0, 0), (-3.0, 0), (7.9, 7), (30.0, 30), (500.0, 30)] {
            let out = downsample_paired_points(&source, &target, count, 1);
            assert_eq!(out.source_points.len(), expected, "count {}", count);
            assert_eq!(out.target_points.len(), expected, "count {}", count);
        }
    }

    #[test]
    fn non_finite_count_is_empty() {
        let pts = line(10, 0.0);
        assert!(downsample_paired_points(&pts, &pts, f64::NAN, 1).is_empty());
        assert!(downsample_paired_points(&pts, &pts, f64::INFINITY, 1).is_empty());
    }

    #[test]
    fn oversized_request_returns_leading_pairs_unchanged() {
        let source = line(5, 0.0);
        let target = line(8, 3.0);
        let out = downsample_paired_points(&source, &target, 20.0, 99);
        assert_eq!(out.source_points, source);
        assert_eq!(out.target_points, &target[..5]);
    }

    #[test]
    fn picks_stay_inside_their_strata_and_keep_pairs() {
        let source = line(100, 0.0);
        let target = line(100, 5.0);
        let out = downsample_paired_points(&source, &target, 10.0, 42);
        assert_eq!(out.len(), 10);
        for (k, (s, t)) in out.source_points.iter().zip(&out.target_points).enumerate() {
            assert_eq!(s.x, t.x);
            let idx = s.x as usize;
            assert!(idx >= k * 10 && idx < (k + 1) * 10, "stratum {} got {}", k, idx);
        }
    }

    #[test]
    fn same_seed_same_selection() {
        let source = line(1000, 0.0);
        let target = line(1000, 1.0);
        let a = downsample_paired_points(&source, &target, 37.0, 7);
        let b = downsample_paired_points(&source, &target, 37.0, 7);
        let c = downsample_paired_points(&source, &target, 37.0, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn request_parses_camel_case() {
        let request = PairSampleRequest::from_json(
            r#"{"sourcePoints":[{"x":1,"y":2},{"x":3,"y":4}],"targetPoints":[{"x":5,"y":6}],"count":4,"seed":3}"#,
        )
        .unwrap();
        let out = request.run();
        assert_eq!(out.source_points, vec![Point::new(1.0, 2.0)]);
        assert_eq!(out.target_points, vec![Point::new(5.0, 6.0)]);

        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("sourcePoints"));
        assert!(PairSampleRequest::from_json("[").is_err());
    }
}
