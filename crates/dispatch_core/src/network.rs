//! Road network: weighted undirected graph over location nodes, with
//! single-source shortest-path queries.
//!
//! Distance maps are cached per source node (LRU) because one dispatch runs
//! the same query once per candidate driver, and consecutive dispatches tend
//! to revisit the same hot nodes.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::Resource;
use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a location in the road network.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared shortest-distance map: absent key means the node is unreachable
/// from the query source. Distance 0 is reserved for the source itself.
pub type DistanceMap = Arc<HashMap<NodeId, u64>>;

/// Frontier entry for Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    distance: u64,
    node: NodeId,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by tentative
        // distance; NodeId as secondary key keeps pops reproducible.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Number of source nodes whose distance maps are kept cached.
const DISTANCE_CACHE_CAPACITY: usize = 1_024;

/// Weighted undirected road graph. Read-only after the build phase; the
/// interior mutex only guards the query cache, so shared `&RoadNetwork`
/// access from concurrent dispatches is safe.
#[derive(Debug, Resource)]
pub struct RoadNetwork {
    adjacency: HashMap<NodeId, Vec<(NodeId, u64)>>,
    cache: Mutex<LruCache<NodeId, DistanceMap>>,
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(DISTANCE_CACHE_CAPACITY).expect("cache size must be non-zero"),
            )),
        }
    }

    /// Insert a road of the given weight in both directions. Parallel edges
    /// between the same pair are retained; queries prefer the cheaper one.
    ///
    /// Must not be called after queries started: cached distance maps are
    /// not invalidated.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: u64) {
        self.adjacency.entry(u).or_default().push((v, weight));
        self.adjacency.entry(v).or_default().push((u, weight));
    }

    /// Number of distinct nodes that appear in at least one edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Iterate all edges as (u, v, weight), each undirected road once.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, u64)> + '_ {
        self.adjacency.iter().flat_map(|(&u, neighbors)| {
            neighbors
                .iter()
                .filter(move |&&(v, _)| u <= v)
                .map(move |&(v, w)| (u, v, w))
        })
    }

    /// Minimum total weight from `source` to every reachable node.
    ///
    /// Convention: nodes that cannot be reached are **absent** from the map;
    /// callers must treat a missing key as unreachable, never as distance 0.
    /// A `source` outside the network behaves as an isolated node: distance
    /// 0 to itself, everything else unreachable.
    pub fn shortest_paths_from(&self, source: NodeId) -> DistanceMap {
        let mut cache = match self.cache.lock() {
            Ok(cache) => cache,
            // Fallback: compute without cache if the mutex is poisoned.
            Err(_) => return Arc::new(self.dijkstra(source)),
        };
        cache
            .get_or_insert(source, || Arc::new(self.dijkstra(source)))
            .clone()
    }

    fn dijkstra(&self, source: NodeId) -> HashMap<NodeId, u64> {
        let mut distances = HashMap::with_capacity(self.adjacency.len().max(1));
        distances.insert(source, 0);

        let mut frontier = BinaryHeap::new();
        frontier.push(Frontier {
            distance: 0,
            node: source,
        });

        while let Some(Frontier { distance, node }) = frontier.pop() {
            // Stale entry: the node was already finalized with a shorter path.
            if distances.get(&node).is_some_and(|&d| d < distance) {
                continue;
            }
            let Some(neighbors) = self.adjacency.get(&node) else {
                continue;
            };
            for &(next, weight) in neighbors {
                let tentative = distance + weight;
                if distances.get(&next).map_or(true, |&d| tentative < d) {
                    distances.insert(next, tentative);
                    frontier.push(Frontier {
                        distance: tentative,
                        node: next,
                    });
                }
            }
        }
        distances
    }
}
