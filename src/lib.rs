//! Gapflap - a tap-to-flap gap runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state machine, contacts, headless host)
//! - `settings`: Data-driven tuning, loadable from JSON
//! - `highscores`: Leaderboard of finished runs

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport defaults (points, y-up, origin bottom-left)
    pub const VIEWPORT_WIDTH: f32 = 375.0;
    pub const VIEWPORT_HEIGHT: f32 = 667.0;

    /// Player sprite size; the collision body is a circle of half this
    pub const PLAYER_SIZE: f32 = 48.0;

    /// Downward acceleration (points/s²)
    pub const GRAVITY: f32 = 750.0;
    /// Upward velocity added per tap, after zeroing vertical velocity
    pub const FLAP_IMPULSE: f32 = 350.0;

    /// Seconds between spawn timer firings
    pub const SPAWN_INTERVAL_SECS: f32 = 3.0;
    /// Seconds an obstacle needs to travel one viewport width
    pub const OBSTACLE_CROSSING_SECS: f32 = 1.875;
    /// Gap height as a multiple of the player size
    pub const GAP_SIZE_MULTIPLE: f32 = 4.0;
    pub const BARRIER_WIDTH: f32 = 52.0;

    /// Backdrop scrolls one tile width per period
    pub const BACKDROP_TILE_WIDTH: f32 = 320.0;
    pub const BACKDROP_PERIOD_SECS: f32 = 9.0;

    /// Text shown on the end-of-run label
    pub const GAME_OVER_TEXT: &str = "Game Over! Tap to play again";
}
