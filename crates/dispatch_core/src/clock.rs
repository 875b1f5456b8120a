use bevy_ecs::prelude::Resource;

/// Monotone dispatch clock in minutes. Advanced only by the caller; driver
/// availability is evaluated against `now()` at each dispatch, so no
/// background tick is needed.
#[derive(Debug, Default, Clone, Copy, Resource)]
pub struct DispatchClock {
    now_min: u64,
}

impl DispatchClock {
    pub fn now(&self) -> u64 {
        self.now_min
    }

    pub fn advance(&mut self, minutes: u64) {
        self.now_min += minutes;
    }
}
