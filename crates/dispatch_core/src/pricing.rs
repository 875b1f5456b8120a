//! Fare and duration policy for completed route measurements.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::ecs::VehicleType;

/// Base rate charged per distance unit travelled.
pub const DEFAULT_RATE_PER_UNIT: u64 = 10;

/// Estimated minutes of travel per distance unit.
pub const DEFAULT_MINUTES_PER_UNIT: u64 = 5;

/// Pricing policy: every constant here is configuration, not physics.
/// `fare = distance * rate_per_unit * multiplier(vehicle)` and
/// `duration = distance * minutes_per_unit`.
#[derive(Debug, Clone, PartialEq, Eq, Resource, Serialize, Deserialize)]
pub struct FareSchedule {
    pub rate_per_unit: u64,
    pub minutes_per_unit: u64,
    pub bike_multiplier: u64,
    pub auto_multiplier: u64,
    pub car_multiplier: u64,
    pub suv_multiplier: u64,
    /// Applied when the vehicle type is unknown.
    pub default_multiplier: u64,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            rate_per_unit: DEFAULT_RATE_PER_UNIT,
            minutes_per_unit: DEFAULT_MINUTES_PER_UNIT,
            bike_multiplier: 1,
            auto_multiplier: 2,
            car_multiplier: 3,
            suv_multiplier: 4,
            default_multiplier: 1,
        }
    }
}

impl FareSchedule {
    pub fn multiplier(&self, vehicle: Option<VehicleType>) -> u64 {
        match vehicle {
            Some(VehicleType::Bike) => self.bike_multiplier,
            Some(VehicleType::Auto) => self.auto_multiplier,
            Some(VehicleType::Car) => self.car_multiplier,
            Some(VehicleType::Suv) => self.suv_multiplier,
            None => self.default_multiplier,
        }
    }

    pub fn duration_min(&self, distance: u64) -> u64 {
        distance * self.minutes_per_unit
    }

    pub fn fare(&self, distance: u64, vehicle: Option<VehicleType>) -> u64 {
        distance * self.rate_per_unit * self.multiplier(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_policy_table() {
        let schedule = FareSchedule::default();
        assert_eq!(schedule.fare(3, Some(VehicleType::Bike)), 30);
        assert_eq!(schedule.fare(3, Some(VehicleType::Auto)), 60);
        assert_eq!(schedule.fare(3, Some(VehicleType::Car)), 90);
        assert_eq!(schedule.fare(3, Some(VehicleType::Suv)), 120);
        assert_eq!(schedule.fare(3, None), 30);
        assert_eq!(schedule.duration_min(3), 15);
    }

    #[test]
    fn fare_is_monotone_in_distance() {
        let schedule = FareSchedule::default();
        for distance in 0..20 {
            assert!(
                schedule.fare(distance, Some(VehicleType::Car))
                    <= schedule.fare(distance + 1, Some(VehicleType::Car))
            );
        }
    }

    #[test]
    fn vehicle_classes_are_strictly_ordered_at_equal_distance() {
        let schedule = FareSchedule::default();
        let fares: Vec<u64> = [
            VehicleType::Bike,
            VehicleType::Auto,
            VehicleType::Car,
            VehicleType::Suv,
        ]
        .into_iter()
        .map(|vehicle| schedule.fare(7, Some(vehicle)))
        .collect();
        assert!(fares.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
