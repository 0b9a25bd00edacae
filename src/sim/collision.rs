//! Contact categories and overlap detection
//!
//! Bodies carry one of three disjoint categories. Which pairs of categories
//! produce a contact, and what that contact means, is decided by a single
//! lookup table rather than bitmask arithmetic. The player never collides
//! physically; every rule here is detection-only.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EntityId, GameSession};

/// Contact category of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    /// Barriers and the ground
    Obstacle,
    /// Trigger volume spanning an obstacle's opening
    Gap,
}

/// What a detected contact means for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Player touched something solid; ends the run
    Crash,
    /// Player entered a gap sensor; scores
    PassGap,
}

/// Category pairs that produce contacts. Order within a pair is irrelevant.
const CONTACT_RULES: [((Category, Category), ContactKind); 2] = [
    ((Category::Player, Category::Obstacle), ContactKind::Crash),
    ((Category::Player, Category::Gap), ContactKind::PassGap),
];

/// Look up the contact rule for two categories, in either order
pub fn contact_rule(a: Category, b: Category) -> Option<ContactKind> {
    CONTACT_RULES
        .iter()
        .find(|((x, y), _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, kind)| *kind)
}

/// Every body the session can report in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyId {
    Player,
    Ground,
    UpperBarrier(EntityId),
    LowerBarrier(EntityId),
    GapSensor(EntityId),
}

impl BodyId {
    pub fn category(&self) -> Category {
        match self {
            BodyId::Player => Category::Player,
            BodyId::Ground | BodyId::UpperBarrier(_) | BodyId::LowerBarrier(_) => {
                Category::Obstacle
            }
            BodyId::GapSensor(_) => Category::Gap,
        }
    }

    /// Obstacle this body belongs to, if any
    pub fn obstacle(&self) -> Option<EntityId> {
        match self {
            BodyId::UpperBarrier(id) | BodyId::LowerBarrier(id) | BodyId::GapSensor(id) => {
                Some(*id)
            }
            BodyId::Player | BodyId::Ground => None,
        }
    }
}

/// A begin-contact between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyId,
    pub b: BodyId,
}

impl Contact {
    pub fn new(a: BodyId, b: BodyId) -> Self {
        Self { a, b }
    }

    pub fn kind(&self) -> Option<ContactKind> {
        contact_rule(self.a.category(), self.b.category())
    }

    /// The body on either side with the given category
    pub fn body_in(&self, category: Category) -> Option<BodyId> {
        if self.a.category() == category {
            Some(self.a)
        } else if self.b.category() == category {
            Some(self.b)
        } else {
            None
        }
    }
}

/// Axis-aligned box, y-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }
}

/// Circle vs box overlap (touching edges do not count)
pub fn circle_aabb_overlap(center: Vec2, radius: f32, aabb: &Aabb) -> bool {
    let closest = center.clamp(aabb.min, aabb.max);
    center.distance_squared(closest) < radius * radius
}

/// All bodies the player currently overlaps, in stable order
pub fn player_overlaps(session: &GameSession) -> BTreeSet<BodyId> {
    let player = &session.player;
    let mut touching = BTreeSet::new();

    if circle_aabb_overlap(player.pos, player.radius, &session.ground()) {
        touching.insert(BodyId::Ground);
    }

    for obstacle in &session.obstacles {
        let parts = [
            (BodyId::UpperBarrier(obstacle.id), obstacle.upper_barrier()),
            (BodyId::LowerBarrier(obstacle.id), obstacle.lower_barrier()),
            (BodyId::GapSensor(obstacle.id), obstacle.gap_sensor()),
        ];
        for (body, aabb) in parts {
            if circle_aabb_overlap(player.pos, player.radius, &aabb) {
                touching.insert(body);
            }
        }
    }

    touching
}
