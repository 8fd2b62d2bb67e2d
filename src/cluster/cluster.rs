use crate::{geo::Coord, quake::SeismicEvent};

/**
 * The aggregate properties of a group of nearby SeismicEvent objects.
 *
 * The statistics are recalculated from the full member list every time an event is absorbed, so
 * they always describe exactly the events in the cluster.
 */
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Mean latitude and longitude of the members.
    center: Coord,
    /// The members in the order they were discovered. The first one is the seed.
    members: Vec<SeismicEvent>,
    /// Mean magnitude of the members.
    magnitude_avg: f64,
    /// Largest magnitude of the members.
    magnitude_max: f64,
    /// Mean depth of the members in kilometers.
    depth_avg: f64,
}

impl Cluster {
    /// Start a new cluster with a single event.
    pub(crate) fn new(seed: SeismicEvent) -> Self {
        Cluster {
            center: seed.coord(),
            magnitude_avg: seed.magnitude,
            magnitude_max: seed.magnitude,
            depth_avg: seed.depth,
            members: vec![seed],
        }
    }

    /// Add an event to the cluster and update the statistics.
    pub(crate) fn absorb(&mut self, event: SeismicEvent) {
        self.members.push(event);
        self.update_statistics();
    }

    fn update_statistics(&mut self) {
        let n = self.members.len() as f64;

        let mut lat_sum = 0.0;
        let mut lon_sum = 0.0;
        let mut mag_sum = 0.0;
        let mut depth_sum = 0.0;
        let mut mag_max = f64::NEG_INFINITY;

        for eq in &self.members {
            lat_sum += eq.lat;
            lon_sum += eq.lon;
            mag_sum += eq.magnitude;
            depth_sum += eq.depth;
            mag_max = mag_max.max(eq.magnitude);
        }

        self.center = Coord {
            lat: lat_sum / n,
            lon: lon_sum / n,
        };
        self.magnitude_avg = mag_sum / n;
        self.magnitude_max = mag_max;
        self.depth_avg = depth_sum / n;
    }

    /// The mean location of all the members.
    pub fn centroid(&self) -> Coord {
        self.center
    }

    /// The event that started this cluster.
    pub fn seed(&self) -> &SeismicEvent {
        &self.members[0]
    }

    /// The members in discovery order.
    pub fn members(&self) -> &[SeismicEvent] {
        &self.members
    }

    /// The number of events in the cluster.
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn magnitude_avg(&self) -> f64 {
        self.magnitude_avg
    }

    pub fn magnitude_max(&self) -> f64 {
        self.magnitude_max
    }

    pub fn depth_avg(&self) -> f64 {
        self.depth_avg
    }
}
