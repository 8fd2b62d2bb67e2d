/*!
 * Rank the places in the Caraga region most likely to produce a damaging earthquake.
 *
 * Historical earthquakes are clustered and each cluster is scored. Then every known fault zone
 * that isn't already covered by an earlier prediction is assessed on its own, so dangerous areas
 * show up even when they have been quiet. The combined list is sorted by risk score.
 */

use crate::{
    cluster::{cluster_earthquakes, Cluster},
    error::PredictionError,
    geo::{great_circle_distance, BoundingBox, Coord},
    kml::{KmlFile, KmlWriter, KmzFile},
    quake::{QuakeSource, SeismicEvent},
    risk::{risk_score, RiskLevel},
    zone::{KnownZone, KNOWN_ZONES},
    QuakeRiskResult,
};
use chrono::{Duration, Local, NaiveDateTime};
use log::{debug, info};
use std::{
    fmt::{self, Display, Write},
    path::Path,
};
use strum::{AsRefStr, Display as StrumDisplay, IntoStaticStr};

/// The area analyzed, the Caraga region of Mindanao.
pub const CARAGA_BOUNDS: BoundingBox = BoundingBox {
    ll: Coord {
        lat: 8.0,
        lon: 124.5,
    },
    ur: Coord {
        lat: 10.0,
        lon: 126.5,
    },
};

/// How far back to look for historical earthquakes.
pub const HISTORY_DAYS: i64 = 365;

/// A known zone closer than this to an existing prediction is already represented.
pub const ZONE_DEDUP_RADIUS_KM: f64 = 30.0;

/** Where a prediction came from. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Provenance {
    /// Derived from clustering historical earthquakes.
    Prediction,
    /// Derived from the catalog of known fault zones.
    KnownZone,
}

/// A location with an assessment of how likely it is to have a damaging earthquake.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub risk_level: RiskLevel,
    /// Between 0 and 100.
    pub risk_score: f64,
    pub predicted_magnitude_range: String,
    /// Number of historical earthquakes behind this prediction.
    pub historical_count: usize,
    pub depth_avg: f64,
    pub provenance: Provenance,
    /// Between 0 and 100.
    pub confidence: f64,
    pub description: String,
    pub analysis_method: &'static str,
}

impl Prediction {
    /// Build a prediction from a cluster of historical earthquakes.
    fn from_cluster(cluster: &Cluster, now: NaiveDateTime) -> Self {
        let score = risk_score(cluster, now);
        let risk_level = RiskLevel::from_score(score);

        let count = cluster.count();
        let Coord { lat, lon } = cluster.centroid();
        let magnitude_avg = cluster.magnitude_avg();

        Prediction {
            id: format!("pred_{:.2}_{:.2}", lat, lon),
            name: format!("Predicted Zone - {} historical events", count),
            lat: round_to(lat, 4),
            lon: round_to(lon, 4),
            risk_level,
            risk_score: round_to(score, 2),
            predicted_magnitude_range: format!(
                "{:.1} - {:.1}",
                magnitude_avg,
                cluster.magnitude_max()
            ),
            historical_count: count,
            depth_avg: round_to(cluster.depth_avg(), 1),
            provenance: Provenance::Prediction,
            confidence: (count as f64 / 30.0 * 100.0).min(100.0),
            description: format!(
                concat!(
                    "AI-Analyzed Seismic Zone: {} historical earthquakes detected. ",
                    "Average magnitude: {:.1}. Risk assessment: {}"
                ),
                count,
                magnitude_avg,
                risk_level.shout()
            ),
            analysis_method: "Data-driven clustering of historical seismic patterns",
        }
    }

    /// Build a prediction for a known zone from the earthquakes in its search area.
    fn from_known_zone(zone: &KnownZone, zone_quakes: &[SeismicEvent]) -> Self {
        let score = zone.risk_score(zone_quakes);
        let risk_level = RiskLevel::from_score(score);

        Prediction {
            id: zone.id(),
            name: zone.name.to_owned(),
            lat: zone.lat,
            lon: zone.lon,
            risk_level,
            risk_score: score.min(100.0),
            predicted_magnitude_range: zone.predicted_magnitude_range().to_owned(),
            historical_count: zone_quakes.len(),
            depth_avg: 25.0,
            provenance: Provenance::KnownZone,
            confidence: zone.confidence(),
            description: format!(
                concat!(
                    "AI-Analyzed Known Fault Zone: {} Recent seismic activity: {} events ",
                    "detected. Risk level: {}"
                ),
                zone.description,
                zone_quakes.len(),
                risk_level.shout()
            ),
            analysis_method: "Geological fault analysis + historical seismic pattern analysis",
        }
    }

    pub fn coord(&self) -> Coord {
        Coord {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

impl Display for Prediction {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "               ID: {}", self.id)?;
        writeln!(f, "             Name: {}", self.name)?;
        writeln!(f, "           Source: {}", self.provenance)?;
        writeln!(f, "         Location: {:.4},{:.4}", self.lat, self.lon)?;
        writeln!(f, "       Risk Score: {:.2} ({})", self.risk_score, self.risk_level)?;
        writeln!(f, "  Magnitude Range: {}", self.predicted_magnitude_range)?;
        writeln!(f, " Historical Count: {}", self.historical_count)?;
        writeln!(f, "    Average Depth: {:.1} km", self.depth_avg)?;
        writeln!(f, "       Confidence: {:.0}%", self.confidence)
    }
}

/// Round to a number of decimal places. Exact ties go to the even neighbor.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;

    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };

    rounded / scale
}

/// Fetch the earthquakes analyzed, the last year of activity in the Caraga region.
pub(crate) fn historical_quakes<S: QuakeSource>(
    source: &S,
    now: NaiveDateTime,
) -> QuakeRiskResult<Vec<SeismicEvent>> {
    let cutoff = now - Duration::days(HISTORY_DAYS);
    source.quakes_since(cutoff, CARAGA_BOUNDS)
}

/**
 * Combine clusters of historical earthquakes with the known zones and rank them.
 *
 * #Arguments
 * historical - the earthquakes to analyze, in the order they should be clustered.
 * now - the time recent activity is measured against.
 *
 * #Returns
 * Predictions sorted by risk score, highest first.
 */
pub(crate) fn predictions_from(historical: &[SeismicEvent], now: NaiveDateTime) -> Vec<Prediction> {
    let clusters = cluster_earthquakes(historical);

    info!(target: "predict",
        "{} historical earthquakes formed {} clusters.", historical.len(), clusters.len());

    let mut predictions: Vec<Prediction> = clusters
        .iter()
        .map(|cluster| Prediction::from_cluster(cluster, now))
        .collect();

    for zone in KNOWN_ZONES.iter() {
        let has_nearby_prediction = predictions.iter().any(|pred| {
            great_circle_distance(pred.lat, pred.lon, zone.lat, zone.lon) < ZONE_DEDUP_RADIUS_KM
        });

        if has_nearby_prediction {
            debug!(target: "predict", "{} is already covered by a prediction.", zone.name);
            continue;
        }

        let zone_quakes = zone.quakes_in_area(historical);
        debug!(target: "predict",
            "{} assessed with {} earthquakes nearby.", zone.name, zone_quakes.len());

        predictions.push(Prediction::from_known_zone(zone, &zone_quakes));
    }

    predictions.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));

    predictions
}

/// Predict the places most at risk using the current local time.
pub fn predict_possible_earthquakes<S: QuakeSource>(
    source: &S,
) -> Result<Vec<Prediction>, PredictionError> {
    predict_possible_earthquakes_at(source, Local::now().naive_local())
}

/**
 * Predict the places most at risk of a damaging earthquake.
 *
 * #Arguments
 * source - where to get the historical earthquakes.
 * now - the time of the analysis. Timestamps are compared without regard to time zones.
 *
 * #Returns
 * Predictions sorted by risk score, highest first.
 */
pub fn predict_possible_earthquakes_at<S: QuakeSource>(
    source: &S,
    now: NaiveDateTime,
) -> Result<Vec<Prediction>, PredictionError> {
    let historical = historical_quakes(source, now)?;
    Ok(predictions_from(&historical, now))
}

/// Save predictions as map placemarks.
///
/// If the path ends in ".kmz" the output is compressed, otherwise a plain KML file is written.
pub fn save_kml<P: AsRef<Path>>(predictions: &[Prediction], path: P) -> QuakeRiskResult<()> {
    let path = path.as_ref();

    let is_kmz = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("kmz"))
        .unwrap_or(false);

    if is_kmz {
        let mut kmz = KmzFile::new(path)?;
        write_predictions(&mut kmz, predictions)?;
        kmz.finish()
    } else {
        let mut kml = KmlFile::new(path)?;
        write_predictions(&mut kml, predictions)?;
        kml.finish()
    }
}

fn write_predictions<K: KmlWriter>(kml: &mut K, predictions: &[Prediction]) -> QuakeRiskResult<()> {
    const ICON: &str = "http://maps.google.com/mapfiles/kml/shapes/earthquake.png";

    for (level, color) in [
        (RiskLevel::Critical, "ff0000ff"),
        (RiskLevel::High, "ff0080ff"),
        (RiskLevel::Moderate, "ff00ffff"),
        (RiskLevel::Low, "ff00ff00"),
    ] {
        kml.start_style(Some(level.as_ref()))?;
        kml.create_icon_style(Some(ICON), Some(color), 1.0)?;
        kml.finish_style()?;
    }

    let mut description = String::with_capacity(512);
    let mut style = String::with_capacity(16);

    for (provenance, folder) in [
        (Provenance::Prediction, "Predicted Zones"),
        (Provenance::KnownZone, "Known Fault Zones"),
    ] {
        kml.start_folder(Some(folder), None, true)?;

        for pred in predictions.iter().filter(|p| p.provenance == provenance) {
            description.clear();
            let _ = write!(
                &mut description,
                concat!(
                    "<h3>Risk: {} ({:.2})</h3>",
                    "Magnitude Range: {}<br/>",
                    "Historical Events: {}<br/>",
                    "Average Depth: {:.1} km<br/>",
                    "Confidence: {:.0}%<br/>",
                    "<p>{}</p>",
                ),
                pred.risk_level.shout(),
                pred.risk_score,
                pred.predicted_magnitude_range,
                pred.historical_count,
                pred.depth_avg,
                pred.confidence,
                pred.description,
            );

            style.clear();
            let _ = write!(&mut style, "#{}", pred.risk_level);

            kml.start_placemark(Some(&pred.name), Some(&description), Some(&style))?;
            kml.create_point(pred.lat, pred.lon, 0.0)?;
            kml.finish_placemark()?;
        }

        kml.finish_folder()?;
    }

    Ok(())
}
