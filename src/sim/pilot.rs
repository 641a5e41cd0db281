//! Demo pilot - plays the game without a human
//!
//! Used by the headless runner and whole-session tests. Deterministic: the
//! same session state always yields the same controls.

use super::state::{Controls, Session, SessionState, Turn};
use crate::normalize_angle;

/// Heading error (radians) under which the pilot opens fire
const FIRE_CONE: f32 = 0.2;
/// Frames between shots (the fire input is edge-triggered)
const FIRE_INTERVAL: u64 = 6;
/// Gap to a rock's edge the pilot is happy to close on
const APPROACH_GAP: f32 = 200.0;
/// Gap to a rock's edge that makes the pilot turn tail
const PANIC_GAP: f32 = 40.0;

/// Pick controls for the next frame
pub fn autopilot(session: &Session) -> Controls {
    let mut controls = Controls::default();

    match session.state() {
        SessionState::Playing => {}
        // Nothing to fly; a finished game is left for the host to restart
        SessionState::ShipDestroyed | SessionState::GameOver | SessionState::Won => {
            return controls;
        }
    }
    if session.is_paused() {
        return controls;
    }

    let ship = session.ship();

    // Nearest rock by edge distance
    let nearest = session
        .asteroids()
        .iter()
        .map(|a| (a, ship.pos.distance(a.pos) - a.radius()))
        .min_by(|(_, a), (_, b)| a.total_cmp(b));

    let Some((target, gap)) = nearest else {
        return controls;
    };

    let to_target = target.pos - ship.pos;
    let desired = to_target.y.atan2(to_target.x);
    let error = normalize_angle(desired - ship.angle);

    let turn_speed = session.tuning().turn_speed;
    controls.turn = if error > turn_speed / 2.0 {
        Turn::Right
    } else if error < -turn_speed / 2.0 {
        Turn::Left
    } else {
        Turn::None
    };

    let aligned = error.abs() < FIRE_CONE;
    if aligned && session.tick_count() % FIRE_INTERVAL == 0 {
        controls.fire = 1;
    }

    // Close the distance while lined up, coast otherwise; too close with no
    // shield means run (pointing away happens on its own once the rock passes)
    controls.thrust = if gap < PANIC_GAP && !ship.is_invincible() {
        error.abs() > std::f32::consts::FRAC_PI_2
    } else {
        aligned && gap > APPROACH_GAP
    };

    controls
}
