//! Dispatch telemetry: outcome counters and roster snapshots for callers
//! that render statistics.

use std::collections::HashMap;

use bevy_ecs::prelude::{Resource, World};
use serde::{Deserialize, Serialize};

use crate::clock::DispatchClock;
use crate::ecs::{Driver, VehicleType};
use crate::roster::DriverRoster;

/// Running counters over every dispatch attempt since world creation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Resource, Serialize, Deserialize)]
pub struct DispatchStats {
    pub requests: u64,
    pub assigned: u64,
    pub no_driver: u64,
    pub unreachable: u64,
    pub total_distance: u64,
    pub total_fare: u64,
}

impl DispatchStats {
    pub fn record_assigned(&mut self, distance: u64, fare: u64) {
        self.requests += 1;
        self.assigned += 1;
        self.total_distance += distance;
        self.total_fare += fare;
    }

    pub fn record_no_driver(&mut self) {
        self.requests += 1;
        self.no_driver += 1;
    }

    pub fn record_unreachable(&mut self) {
        self.requests += 1;
        self.unreachable += 1;
    }
}

/// Point-in-time view of the roster, evaluated against the current clock.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStatistics {
    pub total: usize,
    pub available_now: usize,
    pub by_vehicle: HashMap<VehicleType, usize>,
}

pub fn driver_statistics(world: &World) -> DriverStatistics {
    let now = world.resource::<DispatchClock>().now();
    let mut stats = DriverStatistics::default();

    for &entity in world.resource::<DriverRoster>().entities() {
        let Some(driver) = world.get::<Driver>(entity) else {
            continue;
        };
        stats.total += 1;
        if driver.state.is_available(now) {
            stats.available_now += 1;
        }
        *stats.by_vehicle.entry(driver.vehicle).or_insert(0) += 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::DriverState;
    use crate::network::NodeId;
    use crate::roster::{register_driver, DriverSpec};

    #[test]
    fn statistics_count_availability_against_the_clock() {
        let mut world = World::new();
        world.insert_resource(DispatchClock::default());
        world.insert_resource(DriverRoster::default());

        let busy = register_driver(
            &mut world,
            DriverSpec::new("Deepak", 101, NodeId(2), VehicleType::Bike),
        );
        register_driver(
            &mut world,
            DriverSpec::new("Sai", 104, NodeId(3), VehicleType::Auto),
        );
        world.get_mut::<Driver>(busy).expect("driver").state =
            DriverState::OnTrip { ready_at_min: 30 };

        let stats = driver_statistics(&world);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.available_now, 1);
        assert_eq!(stats.by_vehicle.get(&VehicleType::Bike), Some(&1));
        assert_eq!(stats.by_vehicle.get(&VehicleType::Auto), Some(&1));

        world.resource_mut::<DispatchClock>().advance(30);
        assert_eq!(driver_statistics(&world).available_now, 2);
    }
}
