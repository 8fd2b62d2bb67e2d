/*!
 * Geographic calculations.
 *
 * Everything here works on a spherical Earth. That is plenty accurate for grouping earthquakes
 * that are tens of kilometers apart.
 */

use crate::quake::SeismicEvent;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// An axis aligned latitude-longitude box, edges included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// The lower left (southwest) corner.
    pub ll: Coord,
    /// The upper right (northeast) corner.
    pub ur: Coord,
}

impl BoundingBox {
    /// Create a box that extends `degrees` in every direction from `center`.
    pub fn around(center: Coord, degrees: f64) -> Self {
        BoundingBox {
            ll: Coord {
                lat: center.lat - degrees,
                lon: center.lon - degrees,
            },
            ur: Coord {
                lat: center.lat + degrees,
                lon: center.lon + degrees,
            },
        }
    }

    /// Check if a coordinate is inside the box or on its edge.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.lat >= self.ll.lat
            && coord.lat <= self.ur.lat
            && coord.lon >= self.ll.lon
            && coord.lon <= self.ur.lon
    }
}

/**
 * The haversine great circle distance.
 *
 * #Arguments
 * * lat1 - the latitude of the first point in degrees.
 * * lon1 - the longitude of the first point in degrees.
 * * lat2 - the latitude of the second point in degrees.
 * * lon2 - the longitude of the second point in degrees.
 *
 * #Returns
 * The distance between the points in kilometers.
 */
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let dlat2 = (lat2 - lat1).to_radians() / 2.0;
    let dlon2 = (lon2 - lon1).to_radians() / 2.0;

    let sin2_dlat = f64::powi(f64::sin(dlat2), 2);
    let sin2_dlon = f64::powi(f64::sin(dlon2), 2);

    let arc = 2.0
        * f64::asin(f64::sqrt(
            sin2_dlat + f64::cos(lat1_r) * f64::cos(lat2_r) * sin2_dlon,
        ));

    arc * EARTH_RADIUS_KM
}

/// Select the events within `radius_km` of `center`, keeping their original order.
pub fn quakes_near(events: &[SeismicEvent], center: Coord, radius_km: f64) -> Vec<SeismicEvent> {
    events
        .iter()
        .filter(|eq| {
            let Coord { lat, lon } = eq.coord();
            great_circle_distance(center.lat, center.lon, lat, lon) <= radius_km
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::quake::test_util::quake;

    #[test]
    fn test_distance_to_self_is_zero() {
        let points = [(8.975, 125.535), (-45.0, -120.0), (0.0, 0.0), (89.9, 179.9)];

        for (lat, lon) in points {
            assert_eq!(great_circle_distance(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = (8.975, 125.535);
        let b = (8.2422, 125.2449);

        let ab = great_circle_distance(a.0, a.1, b.0, b.1);
        let ba = great_circle_distance(b.0, b.1, a.0, a.1);

        assert!((ab - ba).abs() < 1.0e-9);
    }

    #[test]
    fn test_known_distances() {
        // One degree of latitude along a meridian.
        let one_degree = great_circle_distance(0.0, 0.0, 1.0, 0.0);
        assert!((one_degree - 6371.0 * std::f64::consts::PI / 180.0).abs() < 1.0e-9);

        // Butuan to the southern sample quake.
        let d = great_circle_distance(8.975, 125.535, 8.2422, 125.2449);
        assert!(d > 85.0 && d < 90.0, "{}", d);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox::around(Coord { lat: 9.0, lon: 125.5 }, 1.0);

        assert_eq!(bbox.ll, Coord { lat: 8.0, lon: 124.5 });
        assert_eq!(bbox.ur, Coord { lat: 10.0, lon: 126.5 });

        assert!(bbox.contains(Coord { lat: 9.0, lon: 125.5 }));
        assert!(bbox.contains(Coord { lat: 8.0, lon: 126.5 }));
        assert!(!bbox.contains(Coord { lat: 7.99, lon: 125.5 }));
        assert!(!bbox.contains(Coord { lat: 9.0, lon: 126.51 }));
    }

    #[test]
    fn test_quakes_near() {
        let events = vec![
            quake(1, 5.0, 8.975, 125.535, 10.0, 1),
            quake(2, 5.0, 8.2422, 125.2449, 10.0, 1),
            quake(3, 5.0, 9.05, 125.45, 10.0, 1),
        ];

        let near = quakes_near(&events, Coord { lat: 9.0, lon: 125.5 }, 50.0);
        let ids: Vec<i64> = near.iter().map(|eq| eq.id).collect();

        assert_eq!(ids, vec![1, 3]);
    }
}
