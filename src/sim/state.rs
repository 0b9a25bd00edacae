//! Session state and core simulation types
//!
//! Everything a run needs to replay deterministically lives in `GameSession`.

use std::collections::BTreeSet;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, BodyId};
use super::events::GameEvent;
use crate::consts::GAME_OVER_TEXT;
use crate::highscores::HighScores;
use crate::settings::Settings;

/// Stable handle for a spawned obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Obstacles scroll and spawn, taps flap
    Running,
    /// Run ended; motion frozen until the next tap
    GameOver,
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Player {
    pub fn new(start: Vec2, radius: f32) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Kill current motion, then push upward
    pub fn flap(&mut self, impulse: f32) {
        self.vel = Vec2::ZERO;
        self.vel.y += impulse;
    }

    /// Semi-implicit Euler step under constant downward acceleration
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.vel.y -= gravity * dt;
        self.pos += self.vel * dt;
    }

    pub fn reset(&mut self, start: Vec2) {
        self.pos = start;
        self.vel = Vec2::ZERO;
    }
}

/// An obstacle pair: upper barrier, lower barrier and the gap sensor between
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    /// Horizontal center of the pair
    pub x: f32,
    /// Vertical center of the gap
    pub gap_center: f32,
    pub gap_height: f32,
    pub width: f32,
    pub barrier_height: f32,
    /// Gap sensor already fired
    pub scored: bool,
}

impl Obstacle {
    fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    fn gap_top(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }

    fn gap_bottom(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    pub fn upper_barrier(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x - self.half_width(), self.gap_top()),
            Vec2::new(self.x + self.half_width(), self.gap_top() + self.barrier_height),
        )
    }

    pub fn lower_barrier(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x - self.half_width(), self.gap_bottom() - self.barrier_height),
            Vec2::new(self.x + self.half_width(), self.gap_bottom()),
        )
    }

    pub fn gap_sensor(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x - self.half_width(), self.gap_bottom()),
            Vec2::new(self.x + self.half_width(), self.gap_top()),
        )
    }

    pub fn right_edge(&self) -> f32 {
        self.x + self.half_width()
    }

    /// Fully past the left edge of the viewport
    pub fn is_off_screen(&self) -> bool {
        self.right_edge() < 0.0
    }
}

/// Repeating background scroll
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backdrop {
    /// Leftward offset in [0, tile_width)
    pub offset: f32,
}

impl Backdrop {
    pub fn advance(&mut self, speed: f32, dt: f32, tile_width: f32) {
        self.offset = (self.offset + speed * dt).rem_euclid(tile_width);
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}

/// Text the HUD shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub score: String,
    /// Present only while the run is over
    pub game_over: Option<String>,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            score: "0".to_string(),
            game_over: None,
        }
    }
}

impl Labels {
    pub fn set_score(&mut self, score: u32) {
        self.score = score.to_string();
    }

    pub fn show_game_over(&mut self) {
        self.game_over = Some(GAME_OVER_TEXT.to_string());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// RNG state wrapper for serialization. Each draw gets its own PCG stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Gaps cleared this run
    pub score: u32,
    /// 1-based number of the current run
    pub run: u32,
    pub player: Player,
    /// Active obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    pub backdrop: Backdrop,
    pub labels: Labels,
    pub high_scores: HighScores,
    pub rng_state: RngState,
    /// Frames seen by the update hook
    pub time_ticks: u64,
    /// Seconds accumulated toward the next spawn timer firing
    pub spawn_timer: f32,
    /// Bodies the player overlapped at the end of the last tick
    pub contacts: BTreeSet<BodyId>,
    /// Pending events for the renderer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Start a session. `settings` must pass `Settings::validate`; the tick
    /// loop relies on a spawn interval of at least one step.
    pub fn new(settings: Settings, seed: u64) -> Self {
        debug_assert!(
            settings.validate().is_ok(),
            "GameSession::new requires validated settings"
        );
        let player = Player::new(settings.start_position(), settings.player_radius());
        Self {
            settings,
            phase: GamePhase::Running,
            score: 0,
            run: 1,
            player,
            obstacles: Vec::new(),
            backdrop: Backdrop::default(),
            labels: Labels::default(),
            high_scores: HighScores::new(),
            rng_state: RngState::new(seed),
            time_ticks: 0,
            spawn_timer: 0.0,
            contacts: BTreeSet::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place a new obstacle pair at the spawn column
    pub fn spawn_obstacle(&mut self, gap_center: f32) -> EntityId {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            x: self.settings.spawn_x(),
            gap_center,
            gap_height: self.settings.gap_height(),
            width: self.settings.barrier_width,
            barrier_height: self.settings.barrier_height,
            scored: false,
        });
        id
    }

    pub fn obstacle(&self, id: EntityId) -> Option<&Obstacle> {
        self.obstacles
            .binary_search_by_key(&id, |o| o.id)
            .ok()
            .map(|i| &self.obstacles[i])
    }

    pub fn obstacle_mut(&mut self, id: EntityId) -> Option<&mut Obstacle> {
        self.obstacles
            .binary_search_by_key(&id, |o| o.id)
            .ok()
            .map(|i| &mut self.obstacles[i])
    }

    /// Static full-width floor strip just below y = 0
    pub fn ground(&self) -> Aabb {
        Aabb::new(
            Vec2::new(0.0, -1.0),
            Vec2::new(self.settings.viewport_width, 0.0),
        )
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
