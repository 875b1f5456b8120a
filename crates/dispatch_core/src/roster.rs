//! Driver registry: owns the set of driver entities and their availability
//! transitions.
//!
//! Registration order is preserved and semantically significant: the
//! matching algorithms walk candidates in this order, so the earliest
//! registered driver wins distance ties. Selection results are handed out
//! as `Entity` ids, never as references into storage, so later
//! registrations cannot invalidate an in-flight selection.

use bevy_ecs::prelude::{Entity, Resource, World};
use serde::{Deserialize, Serialize};

use crate::clock::DispatchClock;
use crate::ecs::{Driver, DriverState, Position, VehicleType};
use crate::network::NodeId;

/// Seed record for one driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSpec {
    pub name: String,
    pub id: u32,
    pub location: NodeId,
    pub vehicle: VehicleType,
}

impl DriverSpec {
    pub fn new(name: impl Into<String>, id: u32, location: NodeId, vehicle: VehicleType) -> Self {
        Self {
            name: name.into(),
            id,
            location,
            vehicle,
        }
    }
}

/// Driver entities in registration order.
#[derive(Debug, Default, Clone, Resource)]
pub struct DriverRoster(Vec<Entity>);

impl DriverRoster {
    pub fn entities(&self) -> &[Entity] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Spawn a driver entity from its seed record and append it to the roster.
/// New drivers start `Available`.
pub fn register_driver(world: &mut World, spec: DriverSpec) -> Entity {
    let entity = world
        .spawn((
            Driver {
                name: spec.name,
                id: spec.id,
                vehicle: spec.vehicle,
                state: DriverState::Available,
            },
            Position(spec.location),
        ))
        .id();
    world.resource_mut::<DriverRoster>().0.push(entity);
    entity
}

/// Put a driver on a trip of the given duration; they become available
/// again once the clock reaches `now + duration`.
pub fn mark_on_trip(world: &mut World, driver: Entity, duration_min: u64) {
    let ready_at_min = world.resource::<DispatchClock>().now() + duration_min;
    if let Some(mut record) = world.get_mut::<Driver>(driver) {
        record.state = DriverState::OnTrip { ready_at_min };
    }
}

/// Force a driver back to `Available` regardless of any pending trip.
pub fn mark_available(world: &mut World, driver: Entity) {
    if let Some(mut record) = world.get_mut::<Driver>(driver) {
        record.state = DriverState::Available;
    }
}
