//! Random walk invariants.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use arctic_core::telemetry::{MetricKind, MetricStore, Trend};

#[test]
fn values_stay_within_bounds() {
    let mut store = MetricStore::new();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..5_000 {
        let snap = store.tick(&mut rng);
        for m in &snap.metrics {
            let spec = m.kind.spec();
            assert!(
                spec.min <= m.value && m.value <= spec.max,
                "{} out of range: {}",
                m.kind,
                m.value
            );
            assert_eq!((m.min, m.max), (spec.min, spec.max));
        }
    }
    assert_eq!(store.ticks(), 5_000);
}

#[test]
fn extreme_perturbations_clamp() {
    let mut store = MetricStore::new();
    for _ in 0..3 {
        store.tick_with(|_, _| 1_000.0);
    }
    let snap = store.tick_with(|_, _| -1_000.0);
    for m in snap.iter_all() {
        assert_eq!(m.value, m.kind.spec().min, "metric={}", m.kind);
        assert_eq!(m.trend, Trend::Down);
    }
}

#[test]
fn forced_pollution_rise_is_up_and_bounded() {
    let mut store = MetricStore::new();
    let snap = store.tick_with(|k, _| if k == MetricKind::Pollution { 5.0 } else { 0.0 });

    let p = snap.get(MetricKind::Pollution);
    assert!(p.value <= 35.0);
    assert_eq!(p.value, 28.1);
    assert_eq!(p.change_24h, 5.0);
    assert_eq!(p.trend, Trend::Up);

    let t = snap.get(MetricKind::Temperature);
    assert_eq!(t.value, -15.3);
    assert_eq!(t.trend, Trend::Stable);
}

#[test]
fn unknown_metric_is_not_found() {
    let err = "unknown".parse::<MetricKind>().expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "NOT_FOUND");

    let t: MetricKind = "temperature".parse().unwrap();
    let m = MetricStore::new().snapshot().get(t);
    assert_eq!((m.min, m.max), (-25.0, -5.0));
}

#[test]
fn perturbation_scales_with_volatility() {
    let mut store = MetricStore::new();
    let mut seen = Vec::new();
    store.tick_with(|k, vol| {
        seen.push((k, vol));
        0.0
    });
    assert_eq!(seen.len(), 6);
    assert!(seen.contains(&(MetricKind::Wildlife, 5.0)));
    assert!(seen.contains(&(MetricKind::SeaLevel, 0.1)));
}
