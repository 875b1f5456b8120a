//! Ride-dispatch engine: a weighted road network with shortest-path
//! queries, an ECS-backed driver roster, and the matching/pricing logic
//! that turns one ride request into a dispatch decision.
//!
//! The shell (CLI, seeding, presentation) lives in `goride_cli`; this crate
//! only ever returns outcome values.

pub mod clock;
pub mod dispatch;
pub mod ecs;
pub mod matching;
pub mod network;
pub mod pricing;
pub mod roster;
pub mod scenario;
pub mod telemetry;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
