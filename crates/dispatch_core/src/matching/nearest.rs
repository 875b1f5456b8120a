use bevy_ecs::prelude::Entity;

use crate::network::{NodeId, RoadNetwork};

use super::algorithm::MatchingAlgorithm;

/// Default matching strategy: the candidate with the smallest road distance
/// to the pickup node wins.
///
/// Candidates are scanned in registration order with a strict `<`
/// comparison, so the earliest registered driver keeps the slot on a
/// distance tie. A candidate that cannot reach the pickup at all is skipped
/// without affecting the running minimum.
#[derive(Debug, Default)]
pub struct NearestDriverMatching;

impl MatchingAlgorithm for NearestDriverMatching {
    fn find_match(
        &self,
        pickup: NodeId,
        candidates: &[(Entity, NodeId)],
        network: &RoadNetwork,
    ) -> Option<Entity> {
        let mut best: Option<(Entity, u64)> = None;

        for &(driver, location) in candidates {
            let distances = network.shortest_paths_from(location);
            let Some(&distance) = distances.get(&pickup) else {
                continue;
            };
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((driver, distance));
            }
        }

        best.map(|(driver, _)| driver)
    }
}
