/*!
 * Types and functions for working with clusters.
 *
 * A cluster describes the aggregate properties of a spatially connected group of SeismicEvent
 * objects.
 */

pub use cluster::Cluster;
pub use cluster_list::{cluster_earthquakes, CLUSTER_RADIUS_KM};

mod cluster;
mod cluster_list;
