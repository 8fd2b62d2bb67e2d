/*!
 * Turn the statistics of a cluster into a risk score.
 *
 * The score is the sum of four components, each of which saturates at a cap:
 *
 * | component | cap |
 * |-----------|-----|
 * | frequency | 30  |
 * | magnitude | 40  |
 * | depth     | 20  |
 * | recency   | 10  |
 */

use crate::cluster::Cluster;
use chrono::{Duration, NaiveDateTime};
use static_assertions::const_assert;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

const FREQUENCY_CAP: f64 = 30.0;
const MAGNITUDE_CAP: f64 = 40.0;
const RECENCY_CAP: f64 = 10.0;
const MAX_SCORE: f64 = 100.0;

/// Magnitude that earns the full share of a magnitude based component.
pub(crate) const REFERENCE_MAGNITUDE: f64 = 8.0;

/// Members newer than this count as recent activity.
const RECENT_DAYS: i64 = 30;

const CRITICAL_THRESHOLD: f64 = 70.0;
const HIGH_THRESHOLD: f64 = 50.0;
const MODERATE_THRESHOLD: f64 = 30.0;

const_assert!(CRITICAL_THRESHOLD > HIGH_THRESHOLD);
const_assert!(HIGH_THRESHOLD > MODERATE_THRESHOLD);
const_assert!(CRITICAL_THRESHOLD <= MAX_SCORE);

/** Discrete risk classes, from most to least severe. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    /// Classify a score. Each threshold belongs to the level above it.
    pub fn from_score(score: f64) -> Self {
        use RiskLevel::*;

        if score >= CRITICAL_THRESHOLD {
            Critical
        } else if score >= HIGH_THRESHOLD {
            High
        } else if score >= MODERATE_THRESHOLD {
            Moderate
        } else {
            Low
        }
    }

    /// Upper case name used in descriptions.
    pub fn shout(&self) -> String {
        self.as_ref().to_uppercase()
    }
}

/// Points for how many events happened in an area, full marks at 10 events.
pub(crate) fn frequency_score(count: usize) -> f64 {
    (count as f64 / 10.0 * FREQUENCY_CAP).min(FREQUENCY_CAP)
}

fn magnitude_score(magnitude_avg: f64, magnitude_max: f64) -> f64 {
    let avg_mag_score = magnitude_avg / REFERENCE_MAGNITUDE * 20.0;
    let max_mag_score = magnitude_max / REFERENCE_MAGNITUDE * 20.0;

    (avg_mag_score + max_mag_score).min(MAGNITUDE_CAP)
}

/// Shallow earthquakes do more damage at the surface.
fn depth_score(depth_avg: f64) -> f64 {
    if depth_avg < 30.0 {
        20.0
    } else if depth_avg < 60.0 {
        15.0
    } else if depth_avg < 100.0 {
        10.0
    } else {
        5.0
    }
}

fn recency_score(cluster: &Cluster, now: NaiveDateTime) -> f64 {
    let recent_count = cluster
        .members()
        .iter()
        .filter(|eq| now - eq.triggered_at < Duration::days(RECENT_DAYS))
        .count();

    (recent_count as f64 / 5.0 * RECENCY_CAP).min(RECENCY_CAP)
}

/**
 * Calculate the risk score for a cluster.
 *
 * #Arguments
 * cluster - the cluster to score.
 * now - the time to measure recent activity against.
 *
 * #Returns
 * A score between 0 and 100.
 */
pub fn risk_score(cluster: &Cluster, now: NaiveDateTime) -> f64 {
    let total = frequency_score(cluster.count())
        + magnitude_score(cluster.magnitude_avg(), cluster.magnitude_max())
        + depth_score(cluster.depth_avg())
        + recency_score(cluster, now);

    total.min(MAX_SCORE)
}
