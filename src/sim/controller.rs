//! Session controller: the RUNNING / GAME_OVER state machine
//!
//! Each host callback (tap, spawn timer, contact, frame) maps to one plain
//! synchronous handler here. Handlers never fail; every guard below is a
//! state check that turns a would-be double transition into a no-op.

use rand::Rng;

use super::collision::{Category, Contact, ContactKind};
use super::events::GameEvent;
use super::state::{EntityId, GamePhase, GameSession};
use crate::settings::Settings;

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Flapped,
    Restarted,
}

/// What a contact did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// No rule matched, or the phase/sensor state suppressed it
    Ignored,
    /// Score after the increment
    Scored(u32),
    Crashed,
}

/// Per-frame update hook. Gameplay does not depend on it; it only counts frames.
pub fn on_frame(session: &mut GameSession, _dt: f32) {
    session.time_ticks += 1;
}

/// Tap input: flap while running, restart after a crash
pub fn on_tap(session: &mut GameSession) -> TapOutcome {
    match session.phase {
        GamePhase::Running => {
            session.player.flap(session.settings.flap_impulse);
            session.events.push(GameEvent::Flapped);
            TapOutcome::Flapped
        }
        GamePhase::GameOver => {
            restart(session);
            TapOutcome::Restarted
        }
    }
}

/// Spawn timer firing. Spawns are suppressed, not unscheduled, after a crash.
pub fn on_spawn_timer(session: &mut GameSession) -> Option<EntityId> {
    if !session.is_running() {
        return None;
    }

    let mut rng = session.rng_state.next_rng();
    let gap_center = draw_gap_center(&session.settings, &mut rng);
    let id = session.spawn_obstacle(gap_center);

    log::debug!("Spawned obstacle {:?} with gap at {:.1}", id, gap_center);
    session.events.push(GameEvent::ObstacleSpawned { id, gap_center });
    Some(id)
}

/// Begin-contact between two bodies
pub fn on_contact(session: &mut GameSession, contact: Contact) -> ContactOutcome {
    if !session.is_running() {
        return ContactOutcome::Ignored;
    }

    match contact.kind() {
        Some(ContactKind::PassGap) => pass_gap(session, &contact),
        Some(ContactKind::Crash) => {
            crash(session);
            ContactOutcome::Crashed
        }
        None => ContactOutcome::Ignored,
    }
}

/// Gap center: screen-middle plus a uniform draw from [0, H/2) shifted down
/// by H/4, clamped so the whole gap stays on screen
pub fn draw_gap_center<R: Rng>(settings: &Settings, rng: &mut R) -> f32 {
    let height = settings.viewport_height;
    let span = height / 2.0;
    let draw = if span > 0.0 {
        rng.random_range(0.0..span)
    } else {
        0.0
    };
    let offset = draw - height / 4.0;

    let half_gap = settings.gap_height() / 2.0;
    (height / 2.0 + offset).max(half_gap).min(height - half_gap)
}

fn pass_gap(session: &mut GameSession, contact: &Contact) -> ContactOutcome {
    let Some(id) = contact
        .body_in(Category::Gap)
        .and_then(|body| body.obstacle())
    else {
        return ContactOutcome::Ignored;
    };
    let Some(obstacle) = session.obstacle_mut(id) else {
        return ContactOutcome::Ignored;
    };
    // One score per obstacle, however many times the sensor is re-entered
    if obstacle.scored {
        return ContactOutcome::Ignored;
    }
    obstacle.scored = true;

    session.score += 1;
    session.labels.set_score(session.score);
    log::debug!("Cleared obstacle {:?}, score {}", id, session.score);
    session.events.push(GameEvent::Scored {
        score: session.score,
    });
    ContactOutcome::Scored(session.score)
}

fn crash(session: &mut GameSession) {
    session.phase = GamePhase::GameOver;
    session.labels.show_game_over();

    let rank = session.high_scores.add_score(session.score, session.run);
    log::info!(
        "Run {} over with score {} (rank {:?})",
        session.run,
        session.score,
        rank
    );
    session.events.push(GameEvent::GameOver {
        score: session.score,
        rank,
    });
}

fn restart(session: &mut GameSession) {
    session.score = 0;
    session.obstacles.clear();
    session.contacts.clear();
    session.backdrop.reset();
    session.labels.reset();
    let start = session.settings.start_position();
    session.player.reset(start);
    session.run += 1;
    session.phase = GamePhase::Running;

    log::info!("Run {} started", session.run);
    session.events.push(GameEvent::Restarted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::BodyId;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> GameSession {
        GameSession::new(Settings::default(), 12345)
    }

    fn gap_contact(id: EntityId) -> Contact {
        Contact::new(BodyId::Player, BodyId::GapSensor(id))
    }

    fn crash_contact(id: EntityId) -> Contact {
        Contact::new(BodyId::UpperBarrier(id), BodyId::Player)
    }

    #[test]
    fn test_tap_flaps_without_scoring() {
        let mut session = session();
        session.player.vel = Vec2::new(0.0, -420.0);
        assert_eq!(on_tap(&mut session), TapOutcome::Flapped);
        assert_eq!(session.player.vel.y, session.settings.flap_impulse);
        assert_eq!(session.score, 0);
        assert_eq!(session.drain_events(), vec![GameEvent::Flapped]);
    }

    #[test]
    fn test_gap_contact_scores_once_per_obstacle() {
        let mut session = session();
        let id = on_spawn_timer(&mut session).unwrap();
        assert_eq!(on_contact(&mut session, gap_contact(id)), ContactOutcome::Scored(1));
        assert_eq!(on_contact(&mut session, gap_contact(id)), ContactOutcome::Ignored);
        assert_eq!(session.score, 1);
        assert_eq!(session.labels.score, "1");

        let second = on_spawn_timer(&mut session).unwrap();
        assert_eq!(
            on_contact(&mut session, gap_contact(second)),
            ContactOutcome::Scored(2)
        );
    }

    #[test]
    fn test_gap_contact_for_unknown_obstacle_is_ignored() {
        let mut session = session();
        assert_eq!(
            on_contact(&mut session, gap_contact(EntityId(77))),
            ContactOutcome::Ignored
        );
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_crash_transitions_once() {
        let mut session = session();
        let id = on_spawn_timer(&mut session).unwrap();
        assert_eq!(on_contact(&mut session, crash_contact(id)), ContactOutcome::Crashed);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(
            session.labels.game_over.as_deref(),
            Some(crate::consts::GAME_OVER_TEXT)
        );

        session.drain_events();
        assert_eq!(
            on_contact(&mut session, Contact::new(BodyId::Player, BodyId::Ground)),
            ContactOutcome::Ignored
        );
        assert_eq!(on_contact(&mut session, crash_contact(id)), ContactOutcome::Ignored);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_gap_contact_after_crash_does_not_score() {
        let mut session = session();
        let id = on_spawn_timer(&mut session).unwrap();
        on_contact(&mut session, crash_contact(id));
        assert_eq!(on_contact(&mut session, gap_contact(id)), ContactOutcome::Ignored);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_spawn_suppressed_after_crash() {
        let mut session = session();
        on_contact(&mut session, Contact::new(BodyId::Player, BodyId::Ground));
        assert_eq!(on_spawn_timer(&mut session), None);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_tap_after_crash_restarts() {
        let mut session = session();
        let id = on_spawn_timer(&mut session).unwrap();
        on_contact(&mut session, gap_contact(id));
        on_contact(&mut session, crash_contact(id));
        session.player.pos = Vec2::new(10.0, -30.0);
        session.player.vel = Vec2::new(0.0, -300.0);
        session.backdrop.offset = 55.0;

        assert_eq!(on_tap(&mut session), TapOutcome::Restarted);
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.score, 0);
        assert_eq!(session.run, 2);
        assert!(session.obstacles.is_empty());
        assert!(session.contacts.is_empty());
        assert_eq!(session.player.pos, session.settings.start_position());
        assert_eq!(session.player.vel, Vec2::ZERO);
        assert_eq!(session.backdrop.offset, 0.0);
        assert_eq!(session.labels.score, "0");
        assert!(session.labels.game_over.is_none());
        assert_eq!(session.high_scores.top_score(), Some(1));
    }

    #[test]
    fn test_gap_center_within_quarter_height() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mid = settings.viewport_height / 2.0;
        let quarter = settings.viewport_height / 4.0;
        for _ in 0..500 {
            let center = draw_gap_center(&settings, &mut rng);
            assert!((center - mid).abs() <= quarter);
        }
    }

    #[test]
    fn test_gap_center_clamped_when_gap_is_large() {
        let settings = Settings {
            gap_size_multiple: 12.0,
            ..Settings::default()
        };
        let half_gap = settings.gap_height() / 2.0;
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let center = draw_gap_center(&settings, &mut rng);
            assert!(center - half_gap >= 0.0);
            assert!(center + half_gap <= settings.viewport_height);
        }
    }

    #[test]
    fn test_frame_hook_only_counts() {
        let mut session = session();
        on_frame(&mut session, 1.0 / 60.0);
        assert_eq!(session.time_ticks, 1);
        assert_eq!(session.score, 0);
        assert!(session.events.is_empty());
    }
}
