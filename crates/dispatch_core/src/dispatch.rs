//! The dispatch engine: turns one ride request into a driver assignment,
//! a priced route, and a driver state change — or a failure value.

use bevy_ecs::prelude::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::clock::DispatchClock;
use crate::ecs::{Driver, Position, Rider, VehicleType};
use crate::matching::MatchingAlgorithmResource;
use crate::network::{NodeId, RoadNetwork};
use crate::pricing::FareSchedule;
use crate::roster::{mark_on_trip, DriverRoster};
use crate::telemetry::DispatchStats;

/// One ride request as supplied by the caller. The vehicle type arrives as
/// the caller's raw string; a string that parses to no known type matches
/// no drivers and resolves to [`DispatchError::NoAvailableDriver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideRequest {
    pub rider: Rider,
    pub pickup: NodeId,
    pub dropoff: NodeId,
    pub vehicle: String,
}

impl RideRequest {
    pub fn new(rider: Rider, pickup: NodeId, dropoff: NodeId, vehicle: impl Into<String>) -> Self {
        Self {
            rider,
            pickup,
            dropoff,
            vehicle: vehicle.into(),
        }
    }
}

/// Successful assignment. The driver is identified by id and name rather
/// than by a reference into storage, so the receipt stays valid across
/// later roster changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideReceipt {
    pub rider: Rider,
    pub driver_name: String,
    pub driver_id: u32,
    pub vehicle: VehicleType,
    pub pickup: NodeId,
    pub dropoff: NodeId,
    /// Road distance in abstract distance units.
    pub distance: u64,
    pub duration_min: u64,
    pub fare: u64,
}

/// Why a request could not be served. Both cases are values for the caller
/// to act on (retry with another vehicle type, report to the user); the
/// engine never aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchError {
    /// No available driver of the requested type can reach the pickup.
    NoAvailableDriver,
    /// Pickup and drop-off are in disconnected parts of the network.
    UnreachableDestination,
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::NoAvailableDriver => {
                write!(f, "no available driver of the requested type nearby")
            }
            DispatchError::UnreachableDestination => {
                write!(f, "no route between pickup and drop-off")
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// Serve one ride request against the world.
///
/// Filter, ranking, route measurement, pricing and the driver state change
/// happen under a single `&mut World`, so the whole sequence is atomic:
/// two requests can never both observe the same driver as available.
pub fn dispatch(world: &mut World, request: &RideRequest) -> Result<RideReceipt, DispatchError> {
    let now = world.resource::<DispatchClock>().now();
    let requested_vehicle = VehicleType::parse(&request.vehicle);

    // Candidate filter, in registration order (the ranking tie-break).
    let mut candidates: Vec<(Entity, NodeId)> = Vec::new();
    if let Some(vehicle) = requested_vehicle {
        let roster = world.resource::<DriverRoster>().entities().to_vec();
        for entity in roster {
            let Some(driver) = world.get::<Driver>(entity) else {
                continue;
            };
            if driver.vehicle != vehicle || !driver.state.is_available(now) {
                continue;
            }
            let Some(position) = world.get::<Position>(entity) else {
                continue;
            };
            candidates.push((entity, position.0));
        }
    }

    let selected = {
        let network = world.resource::<RoadNetwork>();
        let algorithm = world.resource::<MatchingAlgorithmResource>();
        algorithm.find_match(request.pickup, &candidates, network)
    };
    let Some(driver_entity) = selected else {
        world.resource_mut::<DispatchStats>().record_no_driver();
        return Err(DispatchError::NoAvailableDriver);
    };

    // Route measurement. A missing key means unreachable, never distance 0.
    let route_distance = world
        .resource::<RoadNetwork>()
        .shortest_paths_from(request.pickup)
        .get(&request.dropoff)
        .copied();
    let Some(distance) = route_distance else {
        world.resource_mut::<DispatchStats>().record_unreachable();
        return Err(DispatchError::UnreachableDestination);
    };

    let driver = world
        .get::<Driver>(driver_entity)
        .expect("selected driver entity must exist");
    let (driver_name, driver_id, driver_vehicle) =
        (driver.name.clone(), driver.id, driver.vehicle);

    let schedule = world.resource::<FareSchedule>();
    let duration_min = schedule.duration_min(distance);
    let fare = schedule.fare(distance, Some(driver_vehicle));

    mark_on_trip(world, driver_entity, duration_min);
    world
        .resource_mut::<DispatchStats>()
        .record_assigned(distance, fare);

    Ok(RideReceipt {
        rider: request.rider.clone(),
        driver_name,
        driver_id,
        vehicle: driver_vehicle,
        pickup: request.pickup,
        dropoff: request.dropoff,
        distance,
        duration_min,
        fare,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::DriverState;
    use crate::roster::DriverSpec;
    use crate::scenario::{build_scenario, ScenarioParams};

    fn rider() -> Rider {
        Rider::new("Asha", 1)
    }

    fn demo_world() -> World {
        let mut world = World::new();
        build_scenario(&mut world, ScenarioParams::default());
        world
    }

    fn driver_states(world: &mut World) -> Vec<(u32, DriverState)> {
        let roster = world.resource::<DriverRoster>().entities().to_vec();
        roster
            .iter()
            .map(|&entity| {
                let driver = world.get::<Driver>(entity).expect("driver");
                (driver.id, driver.state)
            })
            .collect()
    }

    #[test]
    fn bike_request_matches_worked_example() {
        let mut world = World::new();
        let params = ScenarioParams::new()
            .with_edge(NodeId(1), NodeId(2), 4)
            .with_edge(NodeId(1), NodeId(3), 2)
            .with_edge(NodeId(3), NodeId(6), 1)
            .with_driver(DriverSpec::new("Kishore", 105, NodeId(6), VehicleType::Bike));
        build_scenario(&mut world, params);

        let receipt = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(1), NodeId(6), "bike"),
        )
        .expect("assignment");

        assert_eq!(receipt.driver_id, 105);
        assert_eq!(receipt.vehicle, VehicleType::Bike);
        assert_eq!(receipt.distance, 3);
        assert_eq!(receipt.duration_min, 15);
        assert_eq!(receipt.fare, 30);
    }

    #[test]
    fn nearest_available_driver_of_matching_type_is_selected() {
        let mut world = demo_world();
        // Demo roster has bikes at node 2 (Deepak, 101) and node 6
        // (Kishore, 105); from pickup 1 they are 4 and 3 units away.
        let receipt = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(1), NodeId(5), "Bike"),
        )
        .expect("assignment");
        assert_eq!(receipt.driver_id, 105);
    }

    #[test]
    fn assignment_flips_only_the_selected_driver() {
        let mut world = demo_world();
        let before = driver_states(&mut world);

        let receipt = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(1), NodeId(5), "car"),
        )
        .expect("assignment");

        let after = driver_states(&mut world);
        for ((id, old), (_, new)) in before.into_iter().zip(after) {
            if id == receipt.driver_id {
                assert_eq!(
                    new,
                    DriverState::OnTrip {
                        ready_at_min: receipt.duration_min
                    }
                );
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn tie_break_prefers_the_earlier_registered_driver() {
        let mut world = World::new();
        let params = ScenarioParams::new()
            .with_edge(NodeId(1), NodeId(2), 5)
            .with_edge(NodeId(1), NodeId(3), 5)
            .with_driver(DriverSpec::new("First", 1, NodeId(2), VehicleType::Auto))
            .with_driver(DriverSpec::new("Second", 2, NodeId(3), VehicleType::Auto));
        build_scenario(&mut world, params);

        let receipt = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(1), NodeId(2), "auto"),
        )
        .expect("assignment");
        assert_eq!(receipt.driver_id, 1);
    }

    #[test]
    fn busy_driver_is_not_a_candidate_until_ready() {
        let mut world = demo_world();
        let first = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(6), NodeId(1), "bike"),
        )
        .expect("assignment");
        assert_eq!(first.driver_id, 105);

        // Kishore is on a trip; the bike at node 2 takes the next request.
        let second = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(6), NodeId(1), "bike"),
        )
        .expect("assignment");
        assert_eq!(second.driver_id, 101);

        // Once the clock passes the ride duration, Kishore is back.
        let wait = first.duration_min.max(second.duration_min);
        world.resource_mut::<DispatchClock>().advance(wait);
        let third = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(6), NodeId(1), "bike"),
        )
        .expect("assignment");
        assert_eq!(third.driver_id, 105);
    }

    #[test]
    fn missing_vehicle_class_yields_no_available_driver() {
        let mut world = World::new();
        let params = ScenarioParams::new()
            .with_edge(NodeId(1), NodeId(2), 4)
            .with_driver(DriverSpec::new("Deepak", 101, NodeId(2), VehicleType::Bike));
        build_scenario(&mut world, params);

        let outcome = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(1), NodeId(2), "SUV"),
        );
        assert_eq!(outcome, Err(DispatchError::NoAvailableDriver));

        // Unknown type strings resolve the same way, not to a distinct error.
        let outcome = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(1), NodeId(2), "tuk-tuk"),
        );
        assert_eq!(outcome, Err(DispatchError::NoAvailableDriver));
    }

    #[test]
    fn disconnected_dropoff_is_surfaced_not_priced_as_zero() {
        let mut world = World::new();
        let params = ScenarioParams::new()
            .with_edge(NodeId(1), NodeId(2), 4)
            .with_edge(NodeId(7), NodeId(8), 2)
            .with_driver(DriverSpec::new("Deepak", 101, NodeId(2), VehicleType::Bike));
        build_scenario(&mut world, params);

        let outcome = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(1), NodeId(7), "bike"),
        );
        assert_eq!(outcome, Err(DispatchError::UnreachableDestination));

        // The driver must not have been assigned to an unroutable ride.
        let states = driver_states(&mut world);
        assert_eq!(states[0].1, DriverState::Available);
    }

    #[test]
    fn outcomes_are_tallied_in_stats() {
        let mut world = demo_world();
        dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(1), NodeId(5), "bike"),
        )
        .expect("assignment");
        let _ = dispatch(
            &mut world,
            &RideRequest::new(rider(), NodeId(1), NodeId(5), "tractor"),
        );

        let stats = world.resource::<DispatchStats>();
        assert_eq!(stats.requests, 2);
        assert_eq!(stats.assigned, 1);
        assert_eq!(stats.no_driver, 1);
        assert_eq!(stats.unreachable, 0);
        assert!(stats.total_fare > 0);
    }
}
