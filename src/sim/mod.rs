//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - One `update()` per host frame, no real-time clock
//! - Seeded RNG only
//! - Stable iteration order (collection order) for collisions

pub mod collision;
pub mod pilot;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{BulletHit, bullet_asteroid_hits, circles_overlap, ship_asteroid_hit};
pub use pilot::autopilot;
pub use schedule::{DeferredAction, Scheduler};
pub use spawn::{SPLIT_PIECES, SplitOutcome, spawn_field, split};
pub use state::{
    Asteroid, AsteroidTier, Banner, Bullet, Controls, Outline, Session, SessionState, Ship, Turn,
};
pub use tick::{GAME_OVER_TEXT, READY_TEXT, WIN_TEXT, tick};
