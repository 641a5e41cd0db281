//! Circle-circle collision detection
//!
//! Every entity is a circle for collision purposes. Pairs are walked in
//! collection order, so which asteroid a bullet hits when several overlap is
//! stable within a frame.

use glam::Vec2;

use super::state::{Asteroid, Bullet, Ship};

/// Two circles overlap iff their centers are closer than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// A bullet that struck an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletHit {
    pub bullet: usize,
    pub asteroid: usize,
}

/// Pair bullets with the asteroids they hit this frame.
///
/// Each asteroid takes at most one bullet and each bullet is spent on the
/// first asteroid it overlaps. Hits are returned in asteroid order.
pub fn bullet_asteroid_hits(bullets: &[Bullet], asteroids: &[Asteroid]) -> Vec<BulletHit> {
    let mut spent = vec![false; bullets.len()];
    let mut hits = Vec::new();

    for (asteroid_idx, asteroid) in asteroids.iter().enumerate() {
        let hit = bullets.iter().enumerate().find(|(bullet_idx, bullet)| {
            !spent[*bullet_idx]
                && circles_overlap(bullet.pos, bullet.radius, asteroid.pos, asteroid.radius())
        });
        if let Some((bullet_idx, _)) = hit {
            spent[bullet_idx] = true;
            hits.push(BulletHit {
                bullet: bullet_idx,
                asteroid: asteroid_idx,
            });
        }
    }

    hits
}

/// First asteroid touching the ship, if the ship can be hit at all
pub fn ship_asteroid_hit(ship: &Ship, asteroids: &[Asteroid]) -> Option<usize> {
    if ship.dead || ship.is_invincible() {
        return None;
    }
    asteroids
        .iter()
        .position(|a| circles_overlap(ship.pos, ship.radius, a.pos, a.radius()))
}
