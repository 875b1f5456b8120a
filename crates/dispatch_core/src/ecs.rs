use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::network::NodeId;

/// Vehicle classes a driver can operate. Parsing is case-insensitive; an
/// unrecognized string parses to `None` rather than an error, so an exotic
/// request simply matches no drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Bike,
    Auto,
    Car,
    Suv,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Bike,
        VehicleType::Auto,
        VehicleType::Car,
        VehicleType::Suv,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|vehicle| raw.eq_ignore_ascii_case(vehicle.name()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            VehicleType::Bike => "Bike",
            VehicleType::Auto => "Auto",
            VehicleType::Car => "Car",
            VehicleType::Suv => "SUV",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Driver availability. `OnTrip` carries the clock minute at which the
/// driver becomes available again; availability is a pure function of a
/// caller-supplied "now", no background timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Available,
    OnTrip { ready_at_min: u64 },
}

impl DriverState {
    pub fn is_available(&self, now_min: u64) -> bool {
        match *self {
            DriverState::Available => true,
            DriverState::OnTrip { ready_at_min } => ready_at_min <= now_min,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Driver {
    pub name: String,
    pub id: u32,
    pub vehicle: VehicleType,
    pub state: DriverState,
}

/// Current location node of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct Position(pub NodeId);

/// Rider identity, carried through for receipts only; matching never reads
/// it. Deliberately not related to [`Driver`] by any shared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rider {
    pub name: String,
    pub id: u32,
}

impl Rider {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}
