//! Asteroid field generation and splitting

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Asteroid, AsteroidTier};
use crate::tuning::Tuning;

/// Pieces a destroyed asteroid breaks into
pub const SPLIT_PIECES: usize = 2;

/// Fill a fresh field with large asteroids, keeping clear of `avoid`
pub fn spawn_field(rng: &mut Pcg32, tuning: &Tuning, avoid: Vec2) -> Vec<Asteroid> {
    let clearance = tuning.spawn_clearance();
    let mut asteroids = Vec::with_capacity(tuning.asteroid_num * 4);

    while asteroids.len() < tuning.asteroid_num {
        let pos = Vec2::new(
            rng.random_range(0.0..tuning.field_width),
            rng.random_range(0.0..tuning.field_height),
        );
        // Too close to the ship: resample
        if pos.distance(avoid) < clearance {
            continue;
        }
        asteroids.push(Asteroid::new(pos, AsteroidTier::Large, rng, tuning));
    }

    asteroids
}

/// What destroying one asteroid produced
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub score: u32,
    pub children: Vec<Asteroid>,
}

/// Break an asteroid into the next tier down, or nothing if already smallest
pub fn split(asteroid: &Asteroid, rng: &mut Pcg32, tuning: &Tuning) -> SplitOutcome {
    let children = match asteroid.tier().child() {
        Some(tier) => (0..SPLIT_PIECES)
            .map(|_| Asteroid::new(asteroid.pos, tier, rng, tuning))
            .collect(),
        None => Vec::new(),
    };
    log::trace!(
        "Split {:?} at ({:.1}, {:.1}) into {} pieces",
        asteroid.tier(),
        asteroid.pos.x,
        asteroid.pos.y,
        children.len()
    );
    SplitOutcome {
        score: asteroid.tier().score(tuning),
        children,
    }
}
