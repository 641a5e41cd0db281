//! Game balance and field constants
//!
//! Defaults reproduce the classic arcade feel. A tuning file is plain JSON;
//! any field it leaves out keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Upper bounds accepted from tuning files
pub const MAX_FRAME_RATE: u32 = 1000;
pub const MAX_ASTEROID_NUM: usize = 256;
pub const MAX_RESPAWN_DELAY_SECS: f32 = 3600.0;

/// Failure to load or accept a tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Every constant the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub frame_rate: u32,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ship ===
    pub ship_size: f32,
    pub turn_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub lives: u8,
    pub invincible_time: u32,
    pub blink_time: u32,
    /// Wall-clock delay before a lost ship comes back
    pub respawn_delay_secs: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_lifetime: u32,
    pub bullet_radius: f32,
    pub bullet_max: usize,

    // === Asteroids ===
    pub asteroid_num: usize,
    pub asteroid_size: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_speed: f32,
    pub asteroid_vert: u32,
    pub asteroid_jag: f32,

    // === Scoring ===
    pub score_large: u32,
    pub score_medium: u32,
    pub score_small: u32,

    // === Banner ===
    pub text_fade_time: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ship_size: SHIP_SIZE,
            turn_speed: TURN_SPEED,
            acceleration: ACCELERATION,
            friction: FRICTION,
            lives: LIVES,
            invincible_time: INVINCIBLE_TIME,
            blink_time: BLINK_TIME,
            respawn_delay_secs: RESPAWN_DELAY_SECS,

            bullet_speed: BULLET_SPEED,
            bullet_lifetime: BULLET_LIFETIME,
            bullet_radius: BULLET_RADIUS,
            bullet_max: BULLET_MAX,

            asteroid_num: ASTEROID_NUM,
            asteroid_size: ASTEROID_SIZE,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_vert: ASTEROID_VERT,
            asteroid_jag: ASTEROID_JAG,

            score_large: SCORE_LARGE,
            score_medium: SCORE_MEDIUM,
            score_small: SCORE_SMALL,

            text_fade_time: TEXT_FADE_TIME,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason })
            }
        }
        fn positive(value: f32) -> bool {
            value.is_finite() && value > 0.0
        }

        check(
            self.frame_rate > 0 && self.frame_rate <= MAX_FRAME_RATE,
            "frame_rate",
            "must be in 1..=1000",
        )?;
        check(positive(self.field_width), "field_width", "must be finite and positive")?;
        check(positive(self.field_height), "field_height", "must be finite and positive")?;

        // Per-frame motion is capped at one field diagonal so velocities
        // stay finite however long thrust is held
        let diagonal = self.field_width.hypot(self.field_height);
        check(
            diagonal.is_finite(),
            "field_width",
            "field diagonal must be finite",
        )?;
        let per_frame = |value: f32| positive(value) && value <= diagonal;

        check(positive(self.ship_size), "ship_size", "must be finite and positive")?;
        check(
            positive(self.turn_speed) && self.turn_speed <= std::f32::consts::PI,
            "turn_speed",
            "must be in (0, π]",
        )?;
        check(
            per_frame(self.acceleration),
            "acceleration",
            "must be positive and at most the field diagonal",
        )?;
        check(
            self.friction.is_finite() && self.friction > 0.0 && self.friction <= 1.0,
            "friction",
            "must be in (0, 1]",
        )?;
        check(self.lives > 0, "lives", "must be at least 1")?;
        check(self.blink_time > 0, "blink_time", "must be positive")?;
        check(
            self.respawn_delay_secs.is_finite()
                && (0.0..=MAX_RESPAWN_DELAY_SECS).contains(&self.respawn_delay_secs),
            "respawn_delay_secs",
            "must be in [0, 3600]",
        )?;

        check(
            per_frame(self.bullet_speed),
            "bullet_speed",
            "must be positive and at most the field diagonal",
        )?;
        check(positive(self.bullet_radius), "bullet_radius", "must be finite and positive")?;
        check(self.bullet_max > 0, "bullet_max", "must be at least 1")?;

        check(
            self.asteroid_num > 0 && self.asteroid_num <= MAX_ASTEROID_NUM,
            "asteroid_num",
            "must be in 1..=256",
        )?;
        check(positive(self.asteroid_size), "asteroid_size", "must be finite and positive")?;
        check(
            per_frame(self.asteroid_speed),
            "asteroid_speed",
            "must be positive and at most the field diagonal",
        )?;
        check(
            self.asteroid_min_speed.is_finite()
                && self.asteroid_min_speed >= 0.0
                && self.asteroid_min_speed < self.asteroid_speed,
            "asteroid_min_speed",
            "must be in [0, asteroid_speed)",
        )?;
        // Outlines vary by two vertices either side of the average
        check(self.asteroid_vert >= 5, "asteroid_vert", "must be at least 5")?;
        check(
            self.asteroid_jag.is_finite() && (0.0..1.0).contains(&self.asteroid_jag),
            "asteroid_jag",
            "must be in [0, 1)",
        )?;

        // Asteroids spawn outside a clearance ring around the ship; the ring
        // must leave some of the field open or spawning never terminates.
        check(
            self.spawn_clearance() * 2.0 < diagonal,
            "asteroid_size",
            "spawn clearance covers the whole field",
        )?;
        Ok(())
    }

    /// Field extent as a vector
    #[inline]
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Field center (ship spawn point)
    #[inline]
    pub fn field_center(&self) -> Vec2 {
        self.field() / 2.0
    }

    /// Ship collision radius
    #[inline]
    pub fn ship_radius(&self) -> f32 {
        self.ship_size / 2.0
    }

    /// Minimum distance between the ship and a freshly spawned asteroid
    #[inline]
    pub fn spawn_clearance(&self) -> f32 {
        self.asteroid_size * 2.0 + self.ship_radius()
    }

    /// Respawn delay in frames at the tuned frame rate
    #[inline]
    pub fn respawn_delay_frames(&self) -> u32 {
        (self.respawn_delay_secs * self.frame_rate as f32).round() as u32
    }

    /// Number of blink toggles across one invincibility window
    #[inline]
    pub fn blink_count(&self) -> u32 {
        self.invincible_time.div_ceil(self.blink_time)
    }
}
