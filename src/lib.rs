pub use cluster::{cluster_earthquakes, Cluster, CLUSTER_RADIUS_KM};
pub use database::{QuakeDatabase, QuakeDatabaseAddQuake};
pub use error::PredictionError;
pub use geo::{great_circle_distance, quakes_near, BoundingBox, Coord};
pub use kml::{KmlFile, KmlWriter, KmzFile};
pub use predict::{
    predict_possible_earthquakes, predict_possible_earthquakes_at, save_kml, Prediction,
    Provenance, CARAGA_BOUNDS, HISTORY_DAYS, ZONE_DEDUP_RADIUS_KM,
};
pub use quake::{EventType, QuakeSource, Region, SeismicEvent};
pub use risk::{risk_score, RiskLevel};
pub use statistics::{
    get_zone_statistics, get_zone_statistics_at, PredictionSummary, RegionStatistics,
    ZoneStatistics,
};
pub use zone::{ZoneHazard, KnownZone, KNOWN_ZONES};

/// Result type used throughout the library.
pub type QuakeRiskResult<T> = Result<T, Box<dyn std::error::Error>>;

/**************************************************************************************************
 * Private Implementation
 *************************************************************************************************/
mod cluster;
mod database;
mod error;
mod geo;
mod kml;
mod predict;
mod quake;
mod risk;
mod statistics;
mod zone;
