//! Observable session events
//!
//! The session pushes one event per visible mutation; a renderer drains them
//! once per frame and updates sprites, labels and sounds accordingly.

use serde::{Deserialize, Serialize};

use super::state::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player received an upward impulse
    Flapped,
    /// A new obstacle pair entered at the right edge
    ObstacleSpawned { id: EntityId, gap_center: f32 },
    /// An obstacle left the screen and was dropped
    ObstacleRemoved { id: EntityId },
    /// Player cleared a gap; `score` is the new total
    Scored { score: u32 },
    /// Run ended; `rank` is the leaderboard position if the run qualified
    GameOver { score: u32, rank: Option<usize> },
    /// Session reset for a new run
    Restarted,
}
