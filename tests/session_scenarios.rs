//! End-to-end runs through the session state machine.

use gapflap::Settings;
use gapflap::consts::{GAME_OVER_TEXT, SIM_DT};
use gapflap::sim::{
    BodyId, Contact, ContactOutcome, GameEvent, GamePhase, GameSession, TapOutcome, TickInput,
    on_contact, on_spawn_timer, on_tap, tick,
};

fn run_for(session: &mut GameSession, input: &TickInput, secs: f32) {
    let steps = (secs / SIM_DT).round() as u32;
    for _ in 0..steps {
        tick(session, input, SIM_DT);
    }
}

#[test]
fn test_full_run_cycle() {
    let mut session = GameSession::new(Settings::default(), 2016);
    assert_eq!(session.score, 0);
    assert_eq!(session.phase, GamePhase::Running);

    session.player.vel.y = -250.0;
    assert_eq!(on_tap(&mut session), TapOutcome::Flapped);
    assert_eq!(session.player.vel.y, session.settings.flap_impulse);

    let id = on_spawn_timer(&mut session).expect("running session spawns");
    assert_eq!(
        on_contact(&mut session, Contact::new(BodyId::Player, BodyId::GapSensor(id))),
        ContactOutcome::Scored(1)
    );
    assert_eq!(session.score, 1);

    assert_eq!(
        on_contact(&mut session, Contact::new(BodyId::Player, BodyId::LowerBarrier(id))),
        ContactOutcome::Crashed
    );
    assert_eq!(session.phase, GamePhase::GameOver);
    assert_eq!(session.labels.game_over.as_deref(), Some(GAME_OVER_TEXT));

    assert_eq!(on_tap(&mut session), TapOutcome::Restarted);
    assert_eq!(session.score, 0);
    assert_eq!(session.phase, GamePhase::Running);
    assert!(session.obstacles.is_empty());

    let events = session.drain_events();
    assert_eq!(events.first(), Some(&GameEvent::Flapped));
    assert!(events.contains(&GameEvent::Scored { score: 1 }));
    assert!(events.contains(&GameEvent::GameOver {
        score: 1,
        rank: Some(1)
    }));
    assert_eq!(events.last(), Some(&GameEvent::Restarted));
}

#[test]
fn test_ten_spawns_stay_in_band_and_clear_out() {
    let mut settings = Settings::default();
    settings.gravity = 0.0;
    let height = settings.viewport_height;
    let mut session = GameSession::new(settings, 77);
    // Hover above every barrier so the run never ends
    session.player.pos.y = 10_000.0;

    let mut spawned = Vec::new();
    for _ in 0..10 {
        if let Some(id) = on_spawn_timer(&mut session) {
            spawned.push(id);
        }
    }
    assert!(session.obstacles.len() <= 10);
    assert_eq!(spawned.len(), 10);
    for obstacle in &session.obstacles {
        let offset = obstacle.gap_center - height / 2.0;
        assert!(offset >= -height / 4.0 && offset <= height / 4.0);
    }

    // Long enough for everything spawned above to scroll off, short of the next timer
    run_for(&mut session, &TickInput::default(), 2.95);
    for id in spawned {
        assert!(session.obstacle(id).is_none());
    }
    assert!(session.obstacles.is_empty());
}

#[test]
fn test_crash_freezes_scrolling_and_stops_spawns() {
    let mut settings = Settings::default();
    settings.gravity = 0.0;
    let mut session = GameSession::new(settings, 5);
    session.player.pos.y = 10_000.0;

    run_for(&mut session, &TickInput::default(), 3.5);
    assert_eq!(session.obstacles.len(), 1);

    on_contact(&mut session, Contact::new(BodyId::Ground, BodyId::Player));
    let frozen_x = session.obstacles[0].x;
    let frozen_backdrop = session.backdrop.offset;

    run_for(&mut session, &TickInput::default(), 9.0);
    assert_eq!(session.obstacles.len(), 1);
    assert_eq!(session.obstacles[0].x, frozen_x);
    assert_eq!(session.backdrop.offset, frozen_backdrop);
}

#[test]
fn test_autopilot_clears_gaps() {
    let mut session = GameSession::new(Settings::default(), 31337);
    let input = TickInput {
        tap: false,
        autopilot: true,
    };
    // First obstacle reaches the player about 4.9s in, then one every 3s
    run_for(&mut session, &input, 15.0);
    assert_eq!(session.run, 1, "autopilot should not crash");
    assert!(session.score >= 2);
}

#[test]
fn test_same_seed_same_run() {
    let input = TickInput {
        tap: false,
        autopilot: true,
    };
    let mut a = GameSession::new(Settings::default(), 99);
    let mut b = GameSession::new(Settings::default(), 99);
    run_for(&mut a, &input, 20.0);
    run_for(&mut b, &input, 20.0);

    assert_eq!(a.score, b.score);
    assert_eq!(a.time_ticks, b.time_ticks);
    let gaps_a: Vec<f32> = a.obstacles.iter().map(|o| o.gap_center).collect();
    let gaps_b: Vec<f32> = b.obstacles.iter().map(|o| o.gap_center).collect();
    assert_eq!(gaps_a, gaps_b);
    assert!((a.player.pos.y - b.player.pos.y).abs() < 0.0001);
}

#[test]
fn test_session_survives_json_round_trip() {
    let mut session = GameSession::new(Settings::default(), 4);
    on_spawn_timer(&mut session);
    let json = serde_json::to_string(&session).expect("serialize");
    let restored: GameSession = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored.obstacles.len(), 1);
    assert_eq!(restored.rng_state.stream, session.rng_state.stream);
    assert_eq!(restored.settings, session.settings);
}
