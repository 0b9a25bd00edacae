//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod controller;
pub mod events;
pub mod state;
pub mod tick;

pub use collision::{
    Aabb, BodyId, Category, Contact, ContactKind, circle_aabb_overlap, contact_rule,
};
pub use controller::{ContactOutcome, TapOutcome, on_contact, on_frame, on_spawn_timer, on_tap};
pub use events::GameEvent;
pub use state::{Backdrop, EntityId, GamePhase, GameSession, Labels, Obstacle, Player, RngState};
pub use tick::{TickInput, tick};
