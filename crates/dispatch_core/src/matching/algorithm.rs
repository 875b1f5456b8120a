use bevy_ecs::prelude::Entity;

use crate::network::{NodeId, RoadNetwork};

/// Trait for strategies that pick one driver for a pickup node.
///
/// `candidates` arrives pre-filtered by the dispatch engine (available at
/// the current clock, vehicle type already matched) in registration order;
/// implementations must respect that order when breaking ties.
pub trait MatchingAlgorithm: Send + Sync {
    /// Pick the driver to send to `pickup`, or `None` if no candidate can
    /// reach it at all.
    fn find_match(
        &self,
        pickup: NodeId,
        candidates: &[(Entity, NodeId)],
        network: &RoadNetwork,
    ) -> Option<Entity>;
}
