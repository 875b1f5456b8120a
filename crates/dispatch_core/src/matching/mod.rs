pub mod algorithm;
pub mod first_reachable;
pub mod nearest;

use bevy_ecs::prelude::Resource;

pub use algorithm::MatchingAlgorithm;
pub use first_reachable::FirstReachableMatching;
pub use nearest::NearestDriverMatching;

/// Resource wrapper for the matching algorithm trait object.
#[derive(Resource)]
pub struct MatchingAlgorithmResource(pub Box<dyn MatchingAlgorithm>);

impl MatchingAlgorithmResource {
    pub fn new(algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        Self(algorithm)
    }
}

impl std::ops::Deref for MatchingAlgorithmResource {
    type Target = dyn MatchingAlgorithm;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
