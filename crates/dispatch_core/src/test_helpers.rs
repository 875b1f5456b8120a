//! World builders shared by tests and benches. Available to downstream
//! crates behind the `test-helpers` feature (on by default).

use bevy_ecs::prelude::World;

use crate::scenario::{build_scenario, ScenarioParams};

/// Fresh world seeded with the demo city and its seven-driver roster.
pub fn demo_world() -> World {
    world_with(ScenarioParams::default())
}

pub fn world_with(params: ScenarioParams) -> World {
    let mut world = World::new();
    build_scenario(&mut world, params);
    world
}
