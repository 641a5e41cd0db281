//! Render-facing read model
//!
//! A [`Snapshot`] is everything the view needs to draw one frame. It owns its
//! data so it can be handed across the wasm boundary as JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{AsteroidTier, Session, SessionState};

/// Ship pose and status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
    pub thrusting: bool,
    pub alive: bool,
    pub invincible: bool,
    /// False on the "off" beats of the invincibility blink
    pub visible: bool,
    pub score: u32,
    pub lives: u8,
}

/// One asteroid with its outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub radius: f32,
    pub tier: AsteroidTier,
    /// Per-vertex radius scales, vertices evenly spaced from angle 0
    pub outline: Vec<f32>,
}

/// One frame of session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub state: SessionState,
    pub paused: bool,
    pub field: Vec2,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub bullets: Vec<Vec2>,
    pub banner_text: String,
    pub banner_alpha: f32,
}

impl Session {
    /// Capture the current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        let ship = self.ship();
        Snapshot {
            tick: self.tick_count(),
            state: self.state(),
            paused: self.is_paused(),
            field: self.tuning().field(),
            ship: ShipView {
                pos: ship.pos,
                angle: ship.angle,
                radius: ship.radius,
                thrusting: ship.thrusting,
                alive: !ship.dead,
                invincible: ship.is_invincible(),
                visible: ship.is_visible(),
                score: ship.score,
                lives: ship.lives,
            },
            asteroids: self
                .asteroids()
                .iter()
                .map(|a| AsteroidView {
                    pos: a.pos,
                    radius: a.radius(),
                    tier: a.tier(),
                    outline: a.outline.scales().to_vec(),
                })
                .collect(),
            bullets: self.bullets().iter().map(|b| b.pos).collect(),
            banner_text: self.banner().text.clone(),
            banner_alpha: self.banner().alpha,
        }
    }
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
