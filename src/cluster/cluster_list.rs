use crate::{cluster::Cluster, geo::great_circle_distance, quake::SeismicEvent};
use rustc_hash::FxHashSet as HashSet;
use std::cmp::Reverse;

/// Events within this distance of a cluster's seed are absorbed into the cluster.
pub const CLUSTER_RADIUS_KM: f64 = 50.0;

/**
 * Group SeismicEvent objects into clusters.
 *
 * Events are visited in the order given. The first event not yet in a cluster becomes a seed, and
 * every other unclustered event within [CLUSTER_RADIUS_KM] of the seed joins it. Distances are
 * always measured from the seed, never from the moving centroid, so the result depends on the
 * order of the input.
 *
 * #Arguments
 * events - the events to group, usually most recent first.
 *
 * #Returns
 * The clusters sorted by the number of members, largest first. Clusters with the same number of
 * members stay in the order they were discovered.
 */
pub fn cluster_earthquakes(events: &[SeismicEvent]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = vec![];
    let mut processed: HashSet<i64> = HashSet::default();

    for seed in events {
        if processed.contains(&seed.id) {
            continue;
        }

        processed.insert(seed.id);
        let mut cluster = Cluster::new(seed.clone());

        for other in events {
            if other.id == seed.id || processed.contains(&other.id) {
                continue;
            }

            let distance = great_circle_distance(seed.lat, seed.lon, other.lat, other.lon);

            if distance <= CLUSTER_RADIUS_KM {
                cluster.absorb(other.clone());
                processed.insert(other.id);
            }
        }

        log::trace!(
            "cluster seeded by {} has {} members",
            seed.event_id,
            cluster.count()
        );

        clusters.push(cluster);
    }

    clusters.sort_by_key(|c| Reverse(c.count()));

    clusters
}
