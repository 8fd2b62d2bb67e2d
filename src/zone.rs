/*!
 * Known fault zones in the Caraga region.
 *
 * These are included in every analysis, even when there has been no recent activity near them,
 * because the geology says they are capable of large earthquakes.
 */

use crate::{
    geo::{BoundingBox, Coord},
    quake::SeismicEvent,
    risk::{frequency_score, REFERENCE_MAGNITUDE},
};
use strum::{AsRefStr, Display, IntoStaticStr};

/// How far, in degrees, around a zone to look for events.
const ZONE_SEARCH_DEGREES: f64 = 1.0;

/** The hazard class assigned to a zone from geological knowledge. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ZoneHazard {
    High,
    Moderate,
}

/// A fault zone or basin with known seismic potential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownZone {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub hazard: ZoneHazard,
    pub description: &'static str,
}

/// The catalog of known zones.
pub static KNOWN_ZONES: [KnownZone; 4] = [
    KnownZone {
        name: "Butuan Bay Fault Zone",
        lat: 8.9801,
        lon: 125.5381,
        hazard: ZoneHazard::High,
        description: "Active fault zone with frequent seismic activity",
    },
    KnownZone {
        name: "Surigao Fault Zone",
        lat: 9.5,
        lon: 125.8,
        hazard: ZoneHazard::High,
        description: "Major fault line with high magnitude earthquake potential",
    },
    KnownZone {
        name: "Agusan Marsh Zone",
        lat: 8.6,
        lon: 125.4,
        hazard: ZoneHazard::Moderate,
        description: "Moderate seismic activity zone",
    },
    KnownZone {
        name: "Cabadbaran Basin",
        lat: 9.1,
        lon: 125.5,
        hazard: ZoneHazard::Moderate,
        description: "Basin with moderate earthquake frequency",
    },
];

impl KnownZone {
    pub fn coord(&self) -> Coord {
        Coord {
            lat: self.lat,
            lon: self.lon,
        }
    }

    /// Identifier built from the name, e.g. "zone_Surigao_Fault_Zone".
    pub fn id(&self) -> String {
        format!("zone_{}", self.name.replace(' ', "_"))
    }

    /// The coarse box events are gathered from when assessing this zone.
    pub fn search_area(&self) -> BoundingBox {
        BoundingBox::around(self.coord(), ZONE_SEARCH_DEGREES)
    }

    /// The events from `quakes` inside the search area, in their original order.
    pub fn quakes_in_area(&self, quakes: &[SeismicEvent]) -> Vec<SeismicEvent> {
        let area = self.search_area();

        quakes
            .iter()
            .filter(|eq| area.contains(eq.coord()))
            .cloned()
            .collect()
    }

    /**
     * Assess the risk of this zone from the events near it.
     *
     * With no events nearby the zone still gets a fixed score based on its hazard class. The
     * result is not clamped.
     */
    pub fn risk_score(&self, zone_quakes: &[SeismicEvent]) -> f64 {
        if zone_quakes.is_empty() {
            return match self.hazard {
                ZoneHazard::High => 65.0,
                ZoneHazard::Moderate => 45.0,
            };
        }

        let avg_magnitude =
            zone_quakes.iter().map(|eq| eq.magnitude).sum::<f64>() / zone_quakes.len() as f64;

        let mag_score = avg_magnitude / REFERENCE_MAGNITUDE * 40.0;
        let geological_score = match self.hazard {
            ZoneHazard::High => 20.0,
            ZoneHazard::Moderate => 15.0,
        };

        mag_score + frequency_score(zone_quakes.len()) + geological_score
    }

    pub fn predicted_magnitude_range(&self) -> &'static str {
        match self.hazard {
            ZoneHazard::High => "6.0 - 7.5",
            ZoneHazard::Moderate => "5.5 - 6.5",
        }
    }

    pub fn confidence(&self) -> f64 {
        match self.hazard {
            ZoneHazard::High => 80.0,
            ZoneHazard::Moderate => 70.0,
        }
    }
}
