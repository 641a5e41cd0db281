//! One-frame simulation step
//!
//! Order within a frame: controls, ship, bullets, asteroids, bullet hits,
//! ship hit, win check, deferred actions, banner fade. A ship hit that ends
//! the game is resolved before the win check, so losing the last life on the
//! frame the field empties is a game over.

use super::collision::{bullet_asteroid_hits, ship_asteroid_hit};
use super::schedule::DeferredAction;
use super::spawn::split;
use super::state::{Session, SessionState};

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const WIN_TEXT: &str = "YOU WIN!";
pub const READY_TEXT: &str = "READY";

impl Session {
    /// Advance the session by one frame using the latched controls
    pub fn update(&mut self) {
        tick(self);
    }
}

/// Advance the session by one frame
pub fn tick(session: &mut Session) {
    let controls = session.controls.take_edges();

    if controls.restart {
        log::info!("Restart requested");
        session.restart();
        return;
    }

    if controls.pause {
        session.paused = !session.paused;
        log::debug!("Paused: {}", session.paused);
    }

    // Frozen: nothing advances, no catch-up later
    if session.paused || session.state.is_terminal() {
        return;
    }

    session.tick_count += 1;
    let tuning = &session.tuning;
    let field = tuning.field();

    // --- SHIP ---
    let ship = &mut session.ship;
    if !ship.dead {
        ship.steer(&controls, tuning);
        ship.advance(tuning);
        for _ in 0..controls.fire {
            ship.try_fire(tuning);
        }
    }

    // --- BULLETS ---
    for bullet in &mut ship.bullets {
        bullet.advance(field);
    }
    ship.bullets.retain(|b| !b.is_expired());

    // --- ASTEROIDS ---
    for asteroid in &mut session.asteroids {
        asteroid.advance(field);
    }

    // --- BULLET / ASTEROID ---
    let hits = bullet_asteroid_hits(&session.ship.bullets, &session.asteroids);
    if !hits.is_empty() {
        let mut spent_bullets = vec![false; session.ship.bullets.len()];
        let mut destroyed = vec![false; session.asteroids.len()];
        let mut spawned = Vec::new();

        for hit in &hits {
            let outcome = split(&session.asteroids[hit.asteroid], &mut session.rng, &session.tuning);
            session.ship.score += outcome.score;
            spawned.extend(outcome.children);
            spent_bullets[hit.bullet] = true;
            destroyed[hit.asteroid] = true;
        }

        let mut idx = 0;
        session.ship.bullets.retain(|_| {
            let keep = !spent_bullets[idx];
            idx += 1;
            keep
        });
        let mut idx = 0;
        session.asteroids.retain(|_| {
            let keep = !destroyed[idx];
            idx += 1;
            keep
        });
        // New pieces join at the end and are not hit-tested until next frame
        session.asteroids.extend(spawned);
    }

    // --- SHIP / ASTEROID ---
    if ship_asteroid_hit(&session.ship, &session.asteroids).is_some() {
        destroy_ship(session);
    }

    // --- WIN ---
    if session.asteroids.is_empty() && session.state != SessionState::GameOver {
        session.state = SessionState::Won;
        session.banner.show(WIN_TEXT);
        session.scheduler.cancel_all();
        log::info!(
            "Field cleared: score {}, {} lives left",
            session.ship.score,
            session.ship.lives
        );
        return;
    }

    // --- DEFERRED ---
    for action in session
        .scheduler
        .take_due(session.tick_count, session.generation)
    {
        match action {
            DeferredAction::Respawn => respawn_ship(session),
        }
    }

    // --- BANNER ---
    if !session.state.is_terminal() && session.banner.is_visible() {
        let step = 1.0 / session.tuning.text_fade_time.max(1) as f32;
        session.banner.fade(step);
    }
}

/// Lose a life; schedule a respawn or end the game
fn destroy_ship(session: &mut Session) {
    let ship = &mut session.ship;
    ship.lives = ship.lives.saturating_sub(1);
    ship.dead = true;
    ship.vel = glam::Vec2::ZERO;
    ship.thrusting = false;

    if ship.lives > 0 {
        session.state = SessionState::ShipDestroyed;
        session.scheduler.schedule(
            session.tick_count,
            session.tuning.respawn_delay_frames(),
            session.generation,
            DeferredAction::Respawn,
        );
        log::debug!("Ship destroyed, {} lives left", ship.lives);
    } else {
        session.state = SessionState::GameOver;
        session.banner.show(GAME_OVER_TEXT);
        log::info!("Game over: final score {}", ship.score);
    }
}

fn respawn_ship(session: &mut Session) {
    if session.state != SessionState::ShipDestroyed {
        return;
    }
    session.ship.respawn(&session.tuning);
    session.state = SessionState::Playing;
    session.banner.show(READY_TEXT);
    log::debug!("Ship respawned at tick {}", session.tick_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, AsteroidTier, Bullet, Turn};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Session with the given asteroids placed by hand (all stationary)
    fn session_with(tiers: &[(Vec2, AsteroidTier)]) -> Session {
        let mut session = Session::new(42);
        let mut rng = Pcg32::seed_from_u64(9);
        session.asteroids = tiers
            .iter()
            .map(|&(pos, tier)| {
                let mut asteroid = Asteroid::new(pos, tier, &mut rng, &session.tuning);
                asteroid.vel = Vec2::ZERO;
                asteroid
            })
            .collect();
        session
    }

    fn far_corner() -> Vec2 {
        Vec2::new(700.0, 500.0)
    }

    /// Put a stationary bullet right on top of `pos`
    fn plant_bullet(session: &mut Session, pos: Vec2) {
        let mut bullet = Bullet::new(pos, 0.0, &session.tuning);
        bullet.vel = Vec2::ZERO;
        session.ship.bullets.push(bullet);
    }

    #[test]
    fn test_fire_burst_is_capped() {
        let mut session = session_with(&[(far_corner(), AsteroidTier::Large)]);
        for _ in 0..5 {
            session.request_fire();
        }
        session.update();
        assert_eq!(session.bullets().len(), 4);

        // Same result one press per frame
        let mut session = session_with(&[(far_corner(), AsteroidTier::Large)]);
        for _ in 0..5 {
            session.request_fire();
            session.update();
        }
        assert_eq!(session.bullets().len(), 4);
    }

    #[test]
    fn test_ship_collision_costs_one_life() {
        let mut session = session_with(&[(Vec2::new(400.0, 300.0), AsteroidTier::Large)]);
        session.ship.invincible = 0;
        let lives = session.ship().lives;

        session.update();
        assert_eq!(session.ship().lives, lives - 1);
        assert!(session.ship().dead);
        assert_eq!(session.state(), SessionState::ShipDestroyed);
        assert!(session.has_pending_actions());

        // Dead ship cannot be hit again
        session.update();
        assert_eq!(session.ship().lives, lives - 1);
    }

    #[test]
    fn test_respawn_delay_scales_with_frame_rate() {
        let mut session = session_with(&[(Vec2::new(400.0, 300.0), AsteroidTier::Large)]);
        session.tuning.frame_rate = 30;
        session.ship.invincible = 0;
        session.update();
        assert!(session.ship().dead);

        session.asteroids[0].pos = far_corner();
        for _ in 0..29 {
            session.update();
            assert!(session.ship().dead);
        }
        session.update();
        assert!(!session.ship().dead);
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut session = session_with(&[(Vec2::new(400.0, 300.0), AsteroidTier::Large)]);
        session.ship.invincible = 0;
        session.update();
        assert!(session.ship().dead);

        // Move the rock away so the respawned ship is safe
        session.asteroids[0].pos = far_corner();
        let delay = session.tuning().respawn_delay_frames();
        for _ in 0..delay - 1 {
            session.update();
            assert!(session.ship().dead);
        }
        session.update();
        assert!(!session.ship().dead);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.ship().pos, session.tuning().field_center());
        assert_eq!(session.ship().vel, Vec2::ZERO);
        assert_eq!(session.ship().invincible, session.tuning().invincible_time);
        assert_eq!(session.banner().text, READY_TEXT);
    }

    #[test]
    fn test_last_life_is_game_over() {
        let mut session = session_with(&[(Vec2::new(400.0, 300.0), AsteroidTier::Large)]);
        session.ship.invincible = 0;
        session.ship.lives = 1;

        session.update();
        assert_eq!(session.ship().lives, 0);
        assert_eq!(session.state(), SessionState::GameOver);
        assert!(!session.has_pending_actions());
        assert_eq!(session.banner().text, GAME_OVER_TEXT);
        assert_eq!(session.banner().alpha, 1.0);

        // Terminal: nothing moves any more
        let ticks = session.tick_count();
        session.set_thrust(true);
        session.update();
        assert_eq!(session.tick_count(), ticks);
        assert_eq!(session.banner().alpha, 1.0);
    }

    #[test]
    fn test_split_scores_and_children() {
        let pos = Vec2::new(100.0, 100.0);
        let mut session = session_with(&[(pos, AsteroidTier::Large)]);
        plant_bullet(&mut session, pos);

        session.update();
        assert_eq!(session.ship().score, session.tuning().score_large);
        assert!(session.bullets().is_empty());
        assert_eq!(session.asteroids().len(), 2);
        for child in session.asteroids() {
            assert_eq!(child.tier(), AsteroidTier::Medium);
        }
    }

    #[test]
    fn test_score_for_each_tier() {
        let mut session = session_with(&[
            (Vec2::new(100.0, 100.0), AsteroidTier::Large),
            (Vec2::new(650.0, 100.0), AsteroidTier::Medium),
            (Vec2::new(100.0, 500.0), AsteroidTier::Small),
        ]);
        plant_bullet(&mut session, Vec2::new(100.0, 100.0));
        plant_bullet(&mut session, Vec2::new(650.0, 100.0));
        plant_bullet(&mut session, Vec2::new(100.0, 500.0));

        session.update();
        assert_eq!(session.ship().score, 20 + 50 + 100);
        // 2 medium + 2 small children
        assert_eq!(session.asteroids().len(), 4);
    }

    #[test]
    fn test_clearing_field_wins() {
        let pos = Vec2::new(100.0, 100.0);
        let mut session = session_with(&[(pos, AsteroidTier::Small)]);
        plant_bullet(&mut session, pos);

        session.update();
        assert!(session.asteroids().is_empty());
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.banner().text, WIN_TEXT);
    }

    #[test]
    fn test_win_while_ship_destroyed_cancels_respawn() {
        let mut session = session_with(&[
            (Vec2::new(400.0, 300.0), AsteroidTier::Small),
            (Vec2::new(100.0, 100.0), AsteroidTier::Small),
        ]);
        session.ship.invincible = 0;
        session.update();
        assert_eq!(session.state(), SessionState::ShipDestroyed);

        let first = session.asteroids[0].pos;
        let second = session.asteroids[1].pos;
        plant_bullet(&mut session, first);
        plant_bullet(&mut session, second);
        session.update();
        assert_eq!(session.state(), SessionState::Won);
        assert!(!session.has_pending_actions());
        assert!(session.ship().dead);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut session = Session::new(5);
        session.set_thrust(true);
        session.set_turn(Turn::Left);
        session.update();

        session.request_pause_toggle();
        session.update();
        assert!(session.is_paused());

        let ship_pos = session.ship().pos;
        let rocks: Vec<Vec2> = session.asteroids().iter().map(|a| a.pos).collect();
        let ticks = session.tick_count();
        let invincible = session.ship().invincible;
        for _ in 0..30 {
            session.request_fire();
            session.update();
        }
        assert_eq!(session.ship().pos, ship_pos);
        assert_eq!(session.tick_count(), ticks);
        assert_eq!(session.ship().invincible, invincible);
        assert!(session.bullets().is_empty());
        let rocks_now: Vec<Vec2> = session.asteroids().iter().map(|a| a.pos).collect();
        assert_eq!(rocks, rocks_now);

        session.request_pause_toggle();
        session.update();
        assert!(!session.is_paused());
        assert_eq!(session.tick_count(), ticks + 1);
    }

    #[test]
    fn test_double_pause_toggle_cancels() {
        let mut session = Session::new(5);
        session.request_pause_toggle();
        session.request_pause_toggle();
        session.update();
        assert!(!session.is_paused());
    }

    #[test]
    fn test_restart_discards_pending_respawn() {
        let mut session = session_with(&[(Vec2::new(400.0, 300.0), AsteroidTier::Large)]);
        session.ship.invincible = 0;
        session.update();
        assert_eq!(session.state(), SessionState::ShipDestroyed);
        let old_generation = session.generation();

        session.request_restart();
        session.update();
        assert_eq!(session.generation(), old_generation + 1);
        assert!(!session.has_pending_actions());
        assert_eq!(session.ship().lives, session.tuning().lives);

        // Run the new session past where the old respawn was due
        // (still inside the fresh invincibility window)
        session.ship.lives = 2;
        for _ in 0..session.tuning().respawn_delay_frames() + 10 {
            session.update();
            assert_eq!(session.ship().lives, 2);
        }
    }

    #[test]
    fn test_stale_respawn_cannot_revive() {
        let mut session = session_with(&[(far_corner(), AsteroidTier::Large)]);
        session.ship.dead = true;
        session.state = SessionState::ShipDestroyed;
        // A respawn left over from a discarded session
        session.scheduler.schedule(
            session.tick_count,
            1,
            session.generation.wrapping_sub(1),
            DeferredAction::Respawn,
        );
        for _ in 0..5 {
            session.update();
        }
        assert!(session.ship().dead);
        assert_eq!(session.state(), SessionState::ShipDestroyed);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut session = session_with(&[(Vec2::new(400.0, 300.0), AsteroidTier::Large)]);
        session.ship.invincible = 0;
        session.ship.lives = 1;
        session.update();
        assert_eq!(session.state(), SessionState::GameOver);

        session.request_restart();
        session.update();
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.ship().score, 0);
        assert_eq!(session.asteroids().len(), Tuning::default().asteroid_num);
        assert!(!session.banner().is_visible());
    }

    #[test]
    fn test_wraps_every_frame() {
        let mut session = Session::new(77);
        session.set_thrust(true);
        session.set_turn(Turn::Right);
        let field = session.tuning().field();
        for frame in 0..600 {
            if frame % 7 == 0 {
                session.request_fire();
            }
            session.update();
            let ship = session.ship();
            assert!(ship.pos.x >= -ship.radius && ship.pos.x <= field.x + ship.radius);
            assert!(ship.pos.y >= -ship.radius && ship.pos.y <= field.y + ship.radius);
            for a in session.asteroids() {
                let r = a.radius();
                assert!(a.pos.x >= -r && a.pos.x <= field.x + r);
                assert!(a.pos.y >= -r && a.pos.y <= field.y + r);
            }
            for b in session.bullets() {
                assert!(b.pos.x >= -b.radius && b.pos.x <= field.x + b.radius);
                assert!(b.pos.y >= -b.radius && b.pos.y <= field.y + b.radius);
            }
        }
    }

    #[test]
    fn test_lives_never_increase() {
        let mut session = Session::new(1234);
        session.set_thrust(true);
        let mut lives = session.ship().lives;
        for _ in 0..3000 {
            session.update();
            assert!(session.ship().lives <= lives);
            lives = session.ship().lives;
            if session.state().is_terminal() {
                break;
            }
        }
    }
}
