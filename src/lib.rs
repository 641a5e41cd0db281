//! Asteroids - classic arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (kinematics, collisions, session state)
//! - `snapshot`: Render-facing read model of a session
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser bindings for the host frame driver

pub mod platform;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use sim::{Controls, Session, SessionState, Turn};
pub use snapshot::Snapshot;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Host refresh cadence the frame counts are tuned for
    pub const FRAME_RATE: u32 = 60;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_SIZE: f32 = 30.0; // nose-to-tail, collision radius is half
    pub const TURN_SPEED: f32 = 0.07; // radians per frame
    pub const ACCELERATION: f32 = 0.15;
    pub const FRICTION: f32 = 0.99; // velocity damping while coasting
    pub const LIVES: u8 = 3;
    pub const INVINCIBLE_TIME: u32 = 120; // frames
    pub const BLINK_TIME: u32 = 10; // frames per blink
    /// Delay between losing a ship and the respawn
    pub const RESPAWN_DELAY_SECS: f32 = 1.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 7.0;
    pub const BULLET_LIFETIME: u32 = 60; // frames
    pub const BULLET_RADIUS: f32 = 2.0;
    pub const BULLET_MAX: usize = 4;

    /// Asteroid defaults
    pub const ASTEROID_NUM: usize = 4; // starting asteroids
    pub const ASTEROID_SIZE: f32 = 60.0; // large asteroid radius
    pub const ASTEROID_MIN_SPEED: f32 = 0.5;
    pub const ASTEROID_SPEED: f32 = 1.5;
    pub const ASTEROID_VERT: u32 = 10; // average vertices per asteroid
    pub const ASTEROID_JAG: f32 = 0.4; // 0 = round, 1 = spiky

    /// Score per tier destroyed (smaller pieces are worth more)
    pub const SCORE_LARGE: u32 = 20;
    pub const SCORE_MEDIUM: u32 = 50;
    pub const SCORE_SMALL: u32 = 100;

    /// Frames for a non-terminal banner to fade out
    pub const TEXT_FADE_TIME: u32 = 60;
}

/// Wrap a single coordinate onto a torus axis of length `extent`.
///
/// An entity is allowed to hang `radius` past either edge so it slides off
/// screen before reappearing on the other side.
#[inline]
pub fn wrap_axis(value: f32, radius: f32, extent: f32) -> f32 {
    if value < -radius {
        extent + radius
    } else if value > extent + radius {
        -radius
    } else {
        value
    }
}

/// Wrap a position into the field rectangle
#[inline]
pub fn wrap_position(pos: Vec2, radius: f32, field: Vec2) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, radius, field.x),
        wrap_axis(pos.y, radius, field.y),
    )
}

/// Unit vector for a heading in radians
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
