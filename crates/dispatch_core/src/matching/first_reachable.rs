use bevy_ecs::prelude::Entity;

use crate::network::{NodeId, RoadNetwork};

use super::algorithm::MatchingAlgorithm;

/// Baseline strategy: the first candidate in registration order that can
/// reach the pickup at all, regardless of how far away it is.
///
/// Useful as a comparison point for [`super::NearestDriverMatching`] and in
/// tests where predictability matters more than ride quality. O(n) with at
/// most one shortest-path query per candidate.
#[derive(Debug, Default)]
pub struct FirstReachableMatching;

impl MatchingAlgorithm for FirstReachableMatching {
    fn find_match(
        &self,
        pickup: NodeId,
        candidates: &[(Entity, NodeId)],
        network: &RoadNetwork,
    ) -> Option<Entity> {
        candidates
            .iter()
            .find(|(_, location)| {
                network
                    .shortest_paths_from(*location)
                    .contains_key(&pickup)
            })
            .map(|&(driver, _)| driver)
    }
}
