//! Fixed timestep simulation tick
//!
//! Headless stand-in for the host engine: integrates the player, scrolls
//! obstacles, fires the spawn timer, drops off-screen obstacles and delivers
//! begin-contacts to the controller.

use super::collision::{BodyId, Contact, player_overlaps};
use super::controller::{on_contact, on_frame, on_spawn_timer, on_tap};
use super::events::GameEvent;
use super::state::{GamePhase, GameSession};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/pointer-down this tick
    pub tap: bool,
    /// Idle/demo mode - the session taps for itself
    pub autopilot: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    on_frame(session, dt);

    let tap = input.tap || (input.autopilot && autopilot_wants_tap(session));
    if tap {
        on_tap(session);
    }

    // Player is not part of the scrolling layer and keeps falling after a crash
    session.player.integrate(session.settings.gravity, dt);
    if session.phase == GamePhase::GameOver {
        let rest = -session.player.radius;
        if session.player.pos.y < rest {
            session.player.pos.y = rest;
            session.player.vel.y = 0.0;
        }
    }

    // Scrolling layer freezes with the run
    if session.is_running() {
        let dx = session.settings.obstacle_speed() * dt;
        for obstacle in &mut session.obstacles {
            obstacle.x -= dx;
        }
        let speed = session.settings.backdrop_speed();
        let tile = session.settings.backdrop_tile_width;
        session.backdrop.advance(speed, dt, tile);
    }

    // Timer keeps its cadence in every phase; the controller gates the spawn
    let interval = session.settings.spawn_interval_secs;
    session.spawn_timer += dt;
    while session.spawn_timer >= interval {
        session.spawn_timer -= interval;
        on_spawn_timer(session);
    }

    remove_off_screen(session);

    // Deliver only overlaps that began this tick
    let touching = player_overlaps(session);
    let begun: Vec<BodyId> = touching.difference(&session.contacts).copied().collect();
    session.contacts = touching;
    for body in begun {
        on_contact(session, Contact::new(BodyId::Player, body));
    }
}

fn remove_off_screen(session: &mut GameSession) {
    let mut removed = Vec::new();
    session.obstacles.retain(|o| {
        if o.is_off_screen() {
            removed.push(o.id);
            false
        } else {
            true
        }
    });

    for id in removed {
        session.contacts.retain(|body| body.obstacle() != Some(id));
        log::debug!("Removed obstacle {:?}", id);
        session.events.push(GameEvent::ObstacleRemoved { id });
    }
}

/// Steer toward the next gap: flap when sagging below it. Restart at once after a crash.
fn autopilot_wants_tap(session: &GameSession) -> bool {
    match session.phase {
        GamePhase::GameOver => true,
        GamePhase::Running => {
            let player = &session.player;
            let target = session
                .obstacles
                .iter()
                .find(|o| o.right_edge() >= player.pos.x - player.radius)
                .map(|o| o.gap_center)
                .unwrap_or(session.settings.viewport_height / 2.0);
            let margin = session.settings.gap_height() / 4.0;
            player.pos.y < target - margin && player.vel.y <= 0.0
        }
    }
}
