//! Game entities and session state
//!
//! Everything the simulation mutates lives on [`Session`]; no ambient globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::schedule::Scheduler;
use super::spawn;
use crate::tuning::{Tuning, TuningError};
use crate::{heading_vector, wrap_position};

/// Where the session is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Ship flying, asteroids remaining
    Playing,
    /// Ship lost, respawn pending
    ShipDestroyed,
    /// Out of lives
    GameOver,
    /// Field cleared
    Won,
}

impl SessionState {
    /// Terminal states only leave via a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::GameOver | SessionState::Won)
    }
}

/// Turn input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Turn {
    Left,
    #[default]
    None,
    Right,
}

impl Turn {
    /// Heading change sign (screen space, y down: right is clockwise)
    pub fn sign(&self) -> f32 {
        match self {
            Turn::Left => -1.0,
            Turn::None => 0.0,
            Turn::Right => 1.0,
        }
    }
}

/// Latched control state between two updates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    /// Thrust held (level)
    pub thrust: bool,
    /// Turn held (level)
    pub turn: Turn,
    /// Shots requested since the last update (edge)
    pub fire: u8,
    /// Pause toggle pending (edge, two toggles cancel out)
    pub pause: bool,
    /// Restart pending (edge)
    pub restart: bool,
}

impl Controls {
    /// Copy out the current controls and clear the edge-triggered ones
    pub fn take_edges(&mut self) -> Controls {
        let taken = self.clone();
        self.fire = 0;
        self.pause = false;
        self.restart = false;
        taken
    }
}

/// A bullet fired by the ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left before the bullet fizzles
    pub life: u32,
    pub radius: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: heading_vector(angle) * tuning.bullet_speed,
            life: tuning.bullet_lifetime,
            radius: tuning.bullet_radius,
        }
    }

    /// Move one frame and burn one frame of lifetime
    pub fn advance(&mut self, field: Vec2) {
        self.pos = wrap_position(self.pos + self.vel, self.radius, field);
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading (radians, -π/2 faces up)
    pub angle: f32,
    /// Heading change applied each frame
    pub turn_rate: f32,
    pub thrusting: bool,
    pub radius: f32,
    /// Frames of invincibility left
    pub invincible: u32,
    /// Blink counter; odd = drawn, even = hidden while invincible
    pub blink: u32,
    pub dead: bool,
    pub lives: u8,
    pub score: u32,
    /// Bullets in flight (never more than `bullet_max`)
    pub bullets: Vec<Bullet>,
}

impl Ship {
    pub fn new(tuning: &Tuning) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            turn_rate: 0.0,
            thrusting: false,
            radius: tuning.ship_radius(),
            invincible: 0,
            blink: 0,
            dead: false,
            lives: tuning.lives,
            score: 0,
            bullets: Vec::with_capacity(tuning.bullet_max),
        };
        ship.respawn(tuning);
        ship
    }

    /// Put the ship back at the field center; score and lives carry over
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = tuning.field_center();
        self.vel = Vec2::ZERO;
        self.angle = -std::f32::consts::FRAC_PI_2;
        self.turn_rate = 0.0;
        self.thrusting = false;
        self.invincible = tuning.invincible_time;
        self.blink = tuning.blink_count();
        self.dead = false;
    }

    /// Latch the held controls for this frame
    pub fn steer(&mut self, controls: &Controls, tuning: &Tuning) {
        self.thrusting = controls.thrust;
        self.turn_rate = controls.turn.sign() * tuning.turn_speed;
    }

    /// Integrate heading, thrust and position for one frame
    pub fn advance(&mut self, tuning: &Tuning) {
        self.angle += self.turn_rate;

        if self.thrusting {
            self.vel += heading_vector(self.angle) * tuning.acceleration;
        } else {
            self.vel *= tuning.friction;
        }

        self.pos = wrap_position(self.pos + self.vel, self.radius, tuning.field());

        if self.invincible > 0 {
            self.invincible -= 1;
            if self.invincible % tuning.blink_time == 0 {
                self.blink = self.blink.saturating_sub(1);
            }
        }
    }

    /// Tip of the ship, where bullets leave from
    pub fn nose(&self) -> Vec2 {
        self.pos + heading_vector(self.angle) * self.radius
    }

    /// Fire one bullet if under the cap. Returns whether a bullet spawned.
    pub fn try_fire(&mut self, tuning: &Tuning) -> bool {
        if self.dead || self.bullets.len() >= tuning.bullet_max {
            return false;
        }
        self.bullets.push(Bullet::new(self.nose(), self.angle, tuning));
        true
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible > 0
    }

    /// Whether the view should draw the ship this frame
    pub fn is_visible(&self) -> bool {
        !self.dead && !(self.is_invincible() && self.blink % 2 == 0)
    }
}

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidTier {
    Large,
    Medium,
    Small,
}

impl AsteroidTier {
    /// 0 for large, 1 for medium, 2 for small
    pub fn index(&self) -> u32 {
        match self {
            AsteroidTier::Large => 0,
            AsteroidTier::Medium => 1,
            AsteroidTier::Small => 2,
        }
    }

    /// Collision radius: the base size halved once per tier step
    pub fn radius(&self, tuning: &Tuning) -> f32 {
        match self {
            AsteroidTier::Large => tuning.asteroid_size,
            AsteroidTier::Medium => tuning.asteroid_size / 2.0,
            AsteroidTier::Small => tuning.asteroid_size / 4.0,
        }
    }

    /// Tier of the two pieces this one breaks into
    pub fn child(&self) -> Option<AsteroidTier> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }

    /// Points for destroying an asteroid of this tier
    pub fn score(&self, tuning: &Tuning) -> u32 {
        match self {
            AsteroidTier::Large => tuning.score_large,
            AsteroidTier::Medium => tuning.score_medium,
            AsteroidTier::Small => tuning.score_small,
        }
    }
}

/// Jagged silhouette, fixed at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Per-vertex radius multiplier, vertices evenly spaced around the center
    scales: Vec<f32>,
}

impl Outline {
    pub fn random(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let count = rng.random_range(tuning.asteroid_vert - 2..tuning.asteroid_vert + 2);
        let jag = tuning.asteroid_jag;
        let scales = (0..count)
            .map(|_| {
                if jag > 0.0 {
                    rng.random_range(1.0 - jag..1.0 + jag)
                } else {
                    1.0
                }
            })
            .collect();
        Self { scales }
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn vertex_count(&self) -> usize {
        self.scales.len()
    }

    /// World-space polygon for an asteroid at `center` with `radius`
    pub fn vertices(&self, center: Vec2, radius: f32) -> impl Iterator<Item = Vec2> + '_ {
        let step = std::f32::consts::TAU / self.scales.len() as f32;
        self.scales
            .iter()
            .enumerate()
            .map(move |(i, scale)| center + heading_vector(step * i as f32) * radius * scale)
    }
}

/// An asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    tier: AsteroidTier,
    pub outline: Outline,
    /// Cached from the tier at creation
    radius: f32,
}

impl Asteroid {
    /// New asteroid drifting in a random direction; smaller tiers drift faster
    pub fn new(pos: Vec2, tier: AsteroidTier, rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let heading = rng.random_range(0.0..std::f32::consts::TAU);
        let outline = Outline::random(rng, tuning);
        let speed = rng.random_range(tuning.asteroid_min_speed..tuning.asteroid_speed)
            / (tier.index() + 1) as f32;
        Self {
            pos,
            vel: heading_vector(heading) * speed,
            tier,
            outline,
            radius: tier.radius(tuning),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Size class; fixed for the asteroid's lifetime
    #[inline]
    pub fn tier(&self) -> AsteroidTier {
        self.tier
    }

    pub fn advance(&mut self, field: Vec2) {
        self.pos = wrap_position(self.pos + self.vel, self.radius, field);
    }
}

/// End-of-round (or respawn) message and its fade level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    /// 1 = fully opaque, 0 = hidden
    pub alpha: f32,
}

impl Banner {
    pub fn show(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.alpha = 1.0;
    }

    pub fn fade(&mut self, step: f32) {
        self.alpha = (self.alpha - step).max(0.0);
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

/// One live game: ship, asteroids, flags and pending deferred actions
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) tuning: Tuning,
    pub(crate) seed: u64,
    /// Bumped on every restart; deferred actions carry it
    pub(crate) generation: u32,
    pub(crate) rng: Pcg32,
    /// Frames advanced (paused and terminal frames excluded)
    pub(crate) tick_count: u64,
    pub(crate) state: SessionState,
    pub(crate) paused: bool,
    pub(crate) ship: Ship,
    pub(crate) asteroids: Vec<Asteroid>,
    pub(crate) banner: Banner,
    pub(crate) controls: Controls,
    pub(crate) scheduler: Scheduler,
}

impl Session {
    /// New session with the classic tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, 0, Tuning::default())
    }

    /// New session with custom tuning, rejected unless it validates
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, 0, tuning))
    }

    fn build(seed: u64, generation: u32, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ship = Ship::new(&tuning);
        let asteroids = spawn::spawn_field(&mut rng, &tuning, ship.pos);
        log::info!(
            "Session {} started (seed {}, {} asteroids)",
            generation,
            seed,
            asteroids.len()
        );
        Self {
            seed,
            generation,
            rng,
            tick_count: 0,
            state: SessionState::Playing,
            paused: false,
            ship,
            asteroids,
            banner: Banner::default(),
            controls: Controls::default(),
            scheduler: Scheduler::new(),
            tuning,
        }
    }

    /// Throw this session away and start a fresh one in its place
    pub(crate) fn restart(&mut self) {
        let seed: u64 = self.rng.random();
        let generation = self.generation.wrapping_add(1);
        let tuning = self.tuning.clone();
        *self = Self::build(seed, generation, tuning);
    }

    // === Control setters ===

    pub fn set_thrust(&mut self, on: bool) {
        self.controls.thrust = on;
    }

    pub fn set_turn(&mut self, turn: Turn) {
        self.controls.turn = turn;
    }

    /// Queue one shot (edge-triggered: call once per key press)
    pub fn request_fire(&mut self) {
        self.controls.fire = self.controls.fire.saturating_add(1);
    }

    pub fn request_pause_toggle(&mut self) {
        self.controls.pause = !self.controls.pause;
    }

    pub fn request_restart(&mut self) {
        self.controls.restart = true;
    }

    /// Replace the held controls and merge in edge requests
    pub fn apply_controls(&mut self, controls: &Controls) {
        self.set_thrust(controls.thrust);
        self.set_turn(controls.turn);
        for _ in 0..controls.fire {
            self.request_fire();
        }
        if controls.pause {
            self.request_pause_toggle();
        }
        if controls.restart {
            self.request_restart();
        }
    }

    // === State reads ===

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.ship.bullets
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether a respawn (or other deferred action) is waiting to fire
    pub fn has_pending_actions(&self) -> bool {
        !self.scheduler.is_empty()
    }
}
