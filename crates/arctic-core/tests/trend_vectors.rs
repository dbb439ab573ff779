//! Trend classification vectors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

use arctic_core::telemetry::Trend;

#[derive(Debug, Deserialize)]
struct TrendVector {
    description: String,
    delta: f64,
    trend: String,
}

fn load(name: &str) -> Vec<TrendVector> {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn trend_boundaries() {
    for v in load("trend_boundaries.json") {
        let expected: Trend = v.trend.parse().expect("vector trend must parse");
        assert_eq!(Trend::from_delta(v.delta), expected, "vector={}", v.description);
    }
}
