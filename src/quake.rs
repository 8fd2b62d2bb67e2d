/*!
 * Earthquake records and the interface for retrieving them.
 *
 * A SeismicEvent is an immutable record of a single earthquake as it was stored by the disaster
 * response system. The analysis in this crate only ever reads them.
 */

use crate::{
    geo::{BoundingBox, Coord},
    QuakeRiskResult,
};
use chrono::NaiveDateTime;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/** The classification of an earthquake within a sequence. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    MainShock,
    Aftershock,
    Foreshock,
}

/**
 * All the data recorded about a single earthquake.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicEvent {
    /// Row id from the database, unique for every event.
    pub id: i64,
    /// The catalog identifier, e.g. "EQ001-2025-11".
    pub event_id: String,
    /// Magnitude, recorded with one decimal place.
    pub magnitude: f64,
    /// Latitude of the epicenter in degrees.
    pub lat: f64,
    /// Longitude of the epicenter in degrees.
    pub lon: f64,
    /// Depth of the hypocenter in kilometers.
    pub depth: f64,
    pub event_type: EventType,
    pub description: Option<String>,
    /// When the earthquake happened. Naive, no time zone is kept.
    pub triggered_at: NaiveDateTime,
    /// When the record was created.
    pub recorded_at: NaiveDateTime,
    /// Row id of the Region this event belongs to.
    pub region_id: i64,
}

impl SeismicEvent {
    /// The epicenter.
    pub fn coord(&self) -> Coord {
        Coord {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// An administrative region events are filed under.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
}

/// A store of historical earthquakes the analysis can query.
pub trait QuakeSource {
    /// All events with `triggered_at >= cutoff` whose epicenter lies in `area`, most recent first.
    fn quakes_since(
        &self,
        cutoff: NaiveDateTime,
        area: BoundingBox,
    ) -> QuakeRiskResult<Vec<SeismicEvent>>;

    /// All the regions.
    fn regions(&self) -> QuakeRiskResult<Vec<Region>>;
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::cmp::Reverse;

    /// A fixed "now" so tests don't depend on the clock.
    pub fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 20)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    pub fn quake(id: i64, magnitude: f64, lat: f64, lon: f64, depth: f64, days_ago: i64) -> SeismicEvent {
        let triggered_at = now() - Duration::days(days_ago);

        SeismicEvent {
            id,
            event_id: format!("EQ{:03}", id),
            magnitude,
            lat,
            lon,
            depth,
            event_type: EventType::MainShock,
            description: None,
            triggered_at,
            recorded_at: triggered_at,
            region_id: 1,
        }
    }

    /// Keeps everything in a couple of vectors.
    pub struct MemorySource {
        pub quakes: Vec<SeismicEvent>,
        pub regions: Vec<Region>,
    }

    impl QuakeSource for MemorySource {
        fn quakes_since(
            &self,
            cutoff: NaiveDateTime,
            area: BoundingBox,
        ) -> QuakeRiskResult<Vec<SeismicEvent>> {
            let mut quakes: Vec<SeismicEvent> = self
                .quakes
                .iter()
                .filter(|eq| eq.triggered_at >= cutoff && area.contains(eq.coord()))
                .cloned()
                .collect();

            quakes.sort_by_key(|eq| Reverse(eq.triggered_at));

            Ok(quakes)
        }

        fn regions(&self) -> QuakeRiskResult<Vec<Region>> {
            Ok(self.regions.clone())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_event_type_names() {
        assert_eq!(EventType::MainShock.as_ref(), "main_shock");
        assert_eq!(EventType::Aftershock.to_string(), "aftershock");
        assert_eq!(EventType::from_str("foreshock").unwrap(), EventType::Foreshock);
        assert!(EventType::from_str("tremor").is_err());
    }
}
