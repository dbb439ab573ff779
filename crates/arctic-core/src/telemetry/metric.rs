use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ArcticError, Result};

/// Deltas strictly beyond this magnitude classify as `up`/`down`.
pub const TREND_THRESHOLD: f64 = 0.1;

/// One of the six tracked environmental readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Temperature,
    IceCoverage,
    Pollution,
    Wildlife,
    WindSpeed,
    SeaLevel,
}

/// Fixed bounds, start value and per-tick volatility of a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSpec {
    pub min: f64,
    pub max: f64,
    pub initial: f64,
    pub volatility: f64,
}

impl MetricKind {
    /// All metrics in wire order.
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Temperature,
        MetricKind::IceCoverage,
        MetricKind::Pollution,
        MetricKind::Wildlife,
        MetricKind::WindSpeed,
        MetricKind::SeaLevel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Temperature => "temperature",
            MetricKind::IceCoverage => "ice_coverage",
            MetricKind::Pollution => "pollution",
            MetricKind::Wildlife => "wildlife",
            MetricKind::WindSpeed => "wind_speed",
            MetricKind::SeaLevel => "sea_level",
        }
    }

    pub fn spec(self) -> MetricSpec {
        let (min, max, initial, volatility) = match self {
            MetricKind::Temperature => (-25.0, -5.0, -15.3, 0.5),
            MetricKind::IceCoverage => (80.0, 95.0, 87.2, 1.0),
            MetricKind::Pollution => (15.0, 35.0, 23.1, 0.8),
            MetricKind::Wildlife => (1200.0, 1300.0, 1247.0, 5.0),
            MetricKind::WindSpeed => (5.0, 25.0, 12.5, 2.0),
            MetricKind::SeaLevel => (0.0, 5.0, 2.3, 0.1),
        };
        MetricSpec { min, max, initial, volatility }
    }

    /// Position in `ALL`.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = ArcticError;

    fn from_str(s: &str) -> Result<Self> {
        MetricKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ArcticError::NotFound(format!("metric type '{s}' not found")))
    }
}

/// Categorical direction of the latest delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Exactly `±TREND_THRESHOLD` is still `Stable`.
    pub fn from_delta(delta: f64) -> Self {
        if delta > TREND_THRESHOLD {
            Trend::Up
        } else if delta < -TREND_THRESHOLD {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

impl FromStr for Trend {
    type Err = ArcticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(Trend::Up),
            "down" => Ok(Trend::Down),
            "stable" => Ok(Trend::Stable),
            other => Err(ArcticError::BadRequest(format!("unknown trend: {other}"))),
        }
    }
}

/// Current state of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric {
    pub kind: MetricKind,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub change_24h: f64,
    pub trend: Trend,
}

impl Metric {
    /// Start-of-process record: initial value, no change, stable.
    pub fn initial(kind: MetricKind) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            value: spec.initial,
            min: spec.min,
            max: spec.max,
            change_24h: 0.0,
            trend: Trend::Stable,
        }
    }

    /// Apply one perturbation: clamp, derive change and trend, round for display.
    pub fn advanced(&self, perturbation: f64) -> Self {
        let next = (self.value + perturbation).clamp(self.min, self.max);
        let change = next - self.value;
        Self {
            kind: self.kind,
            value: round_to(next, 10.0),
            min: self.min,
            max: self.max,
            change_24h: round_to(change, 100.0),
            trend: Trend::from_delta(change),
        }
    }
}

fn round_to(v: f64, scale: f64) -> f64 {
    (v * scale).round() / scale
}
