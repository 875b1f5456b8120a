//! Scenario setup: seed the road network, pricing policy, and driver roster
//! into a fresh world.
//!
//! The default scenario is the eight-node demo city with its seven-driver
//! roster; [`ScenarioParams::random`] generates grid cities at benchmark
//! scale from a seed.

use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::clock::DispatchClock;
use crate::ecs::VehicleType;
use crate::matching::{MatchingAlgorithmResource, NearestDriverMatching};
use crate::network::{NodeId, RoadNetwork};
use crate::pricing::FareSchedule;
use crate::roster::{register_driver, DriverRoster, DriverSpec};
use crate::telemetry::DispatchStats;

/// Everything needed to build a world: roads, drivers, pricing.
///
/// Driver order is preserved into the roster and is semantically
/// significant (matching tie-break). The matching algorithm itself is not a
/// parameter; `build_scenario` installs [`NearestDriverMatching`] and
/// callers swap the [`MatchingAlgorithmResource`] afterwards if they want a
/// different strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub edges: Vec<(NodeId, NodeId, u64)>,
    pub drivers: Vec<DriverSpec>,
    pub fare_schedule: FareSchedule,
}

impl ScenarioParams {
    /// Empty scenario: no roads, no drivers, default pricing.
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            drivers: Vec::new(),
            fare_schedule: FareSchedule::default(),
        }
    }

    pub fn with_edge(mut self, u: NodeId, v: NodeId, weight: u64) -> Self {
        self.edges.push((u, v, weight));
        self
    }

    pub fn with_driver(mut self, driver: DriverSpec) -> Self {
        self.drivers.push(driver);
        self
    }

    pub fn with_fare_schedule(mut self, fare_schedule: FareSchedule) -> Self {
        self.fare_schedule = fare_schedule;
        self
    }

    /// Random `grid_dim` x `grid_dim` city with `num_drivers` drivers at
    /// uniform positions. Deterministic for a fixed seed.
    pub fn random(num_drivers: usize, grid_dim: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut params = Self::new();

        let node_at = |row: u32, col: u32| NodeId(row * grid_dim + col + 1);
        for row in 0..grid_dim {
            for col in 0..grid_dim {
                if col + 1 < grid_dim {
                    params
                        .edges
                        .push((node_at(row, col), node_at(row, col + 1), rng.gen_range(1..=9)));
                }
                if row + 1 < grid_dim {
                    params
                        .edges
                        .push((node_at(row, col), node_at(row + 1, col), rng.gen_range(1..=9)));
                }
            }
        }

        let node_count = grid_dim * grid_dim;
        for index in 0..num_drivers {
            let location = NodeId(rng.gen_range(1..=node_count));
            let vehicle = VehicleType::ALL[rng.gen_range(0..VehicleType::ALL.len())];
            params.drivers.push(DriverSpec::new(
                format!("driver-{index}"),
                1000 + index as u32,
                location,
                vehicle,
            ));
        }
        params
    }
}

impl Default for ScenarioParams {
    /// The demo city: 8 nodes, 9 roads, 7 drivers.
    fn default() -> Self {
        let mut params = Self::new()
            .with_edge(NodeId(1), NodeId(2), 4)
            .with_edge(NodeId(1), NodeId(3), 2)
            .with_edge(NodeId(2), NodeId(4), 5)
            .with_edge(NodeId(3), NodeId(4), 7)
            .with_edge(NodeId(4), NodeId(5), 3)
            .with_edge(NodeId(3), NodeId(6), 1)
            .with_edge(NodeId(6), NodeId(5), 3)
            .with_edge(NodeId(6), NodeId(7), 2)
            .with_edge(NodeId(7), NodeId(8), 2);
        params.drivers = vec![
            DriverSpec::new("Deepak", 101, NodeId(2), VehicleType::Bike),
            DriverSpec::new("Bunny", 102, NodeId(5), VehicleType::Car),
            DriverSpec::new("Pranav", 103, NodeId(4), VehicleType::Suv),
            DriverSpec::new("Sai", 104, NodeId(3), VehicleType::Auto),
            DriverSpec::new("Kishore", 105, NodeId(6), VehicleType::Bike),
            DriverSpec::new("Deekshith", 106, NodeId(7), VehicleType::Car),
            DriverSpec::new("Yashwanth", 107, NodeId(8), VehicleType::Auto),
        ];
        params
    }
}

/// Build the network once, install the shared resources, then register the
/// drivers in order.
pub fn build_scenario(world: &mut World, params: ScenarioParams) {
    let mut network = RoadNetwork::new();
    for (u, v, weight) in &params.edges {
        network.add_edge(*u, *v, *weight);
    }

    world.insert_resource(network);
    world.insert_resource(DispatchClock::default());
    world.insert_resource(params.fare_schedule);
    world.insert_resource(DispatchStats::default());
    world.insert_resource(DriverRoster::default());
    world.insert_resource(MatchingAlgorithmResource::new(Box::new(
        NearestDriverMatching,
    )));

    for driver in params.drivers {
        register_driver(world, driver);
    }
}
