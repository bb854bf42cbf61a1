//! Passive grid hazards and the policy that decides what touching them does.

use frostbite_core::{Location, ObstacleKind};
use serde::{Deserialize, Serialize};

/// Hazard anchored to a single cell of the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Obstacle {
    kind: ObstacleKind,
    location: Location,
    lit: bool,
}

impl Obstacle {
    /// Creates a hot tile at the provided location.
    #[must_use]
    pub const fn hot_tile(location: Location) -> Self {
        Self {
            kind: ObstacleKind::HotTile,
            location,
            lit: false,
        }
    }

    /// Creates a burning campfire at the provided location.
    #[must_use]
    pub const fn campfire(location: Location) -> Self {
        Self {
            kind: ObstacleKind::Campfire,
            location,
            lit: true,
        }
    }

    /// Variant of the hazard.
    #[must_use]
    pub const fn kind(&self) -> ObstacleKind {
        self.kind
    }

    /// Cell occupied by the hazard.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Flame state of a campfire; `None` for hazards that never burn.
    #[must_use]
    pub const fn lit(&self) -> Option<bool> {
        match self.kind {
            ObstacleKind::Campfire => Some(self.lit),
            ObstacleKind::HotTile => None,
        }
    }

    /// Reports whether touching the hazard currently has any effect.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        match self.kind {
            ObstacleKind::Campfire => self.lit,
            ObstacleKind::HotTile => true,
        }
    }

    /// Puts out a burning campfire.
    ///
    /// Returns `true` only when the call changed the flame state.
    pub fn extinguish(&mut self) -> bool {
        if self.kind == ObstacleKind::Campfire && self.lit {
            self.lit = false;
            true
        } else {
            false
        }
    }
}

/// Outcome applied to a player stepping onto an active hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum HazardEffect {
    /// The player dies.
    Kill,
    /// The player's level score is reduced, saturating at zero.
    Penalty {
        /// Points removed from the player's score.
        points: u32,
    },
    /// Nothing happens.
    Ignore,
}

/// Level-configurable mapping from hazard variant to contact effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardPolicy {
    /// Effect of stepping onto a hot tile.
    pub hot_tile: HazardEffect,
    /// Effect of stepping into a burning campfire.
    pub campfire: HazardEffect,
}

impl HazardPolicy {
    /// Resolves the effect of touching the provided hazard.
    #[must_use]
    pub fn effect_for(&self, obstacle: &Obstacle) -> HazardEffect {
        if !obstacle.is_active() {
            return HazardEffect::Ignore;
        }

        match obstacle.kind() {
            ObstacleKind::HotTile => self.hot_tile,
            ObstacleKind::Campfire => self.campfire,
        }
    }
}

impl Default for HazardPolicy {
    fn default() -> Self {
        Self {
            hot_tile: HazardEffect::Penalty { points: 50 },
            campfire: HazardEffect::Kill,
        }
    }
}
