//! Declarative level descriptions from which playable levels are built.

use frostbite_core::{Direction, EnemyKind, FruitKind, Location};
use serde::{Deserialize, Serialize};

use crate::{Level, LevelConfig, LevelError};

const DEFAULT_TIME_LIMIT_SECONDS: u32 = 120;
const DEFAULT_FLAVORS: [&str; 2] = ["vanilla", "chocolate"];

/// Fruit placed by a blueprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FruitSpawn {
    /// Variant of the fruit.
    pub kind: FruitKind,
    /// Starting cell of the fruit.
    pub location: Location,
}

/// Enemy placed by a blueprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Variant of the enemy.
    pub kind: EnemyKind,
    /// Starting cell of the enemy.
    pub location: Location,
    /// Initial patrol heading; the variant default applies when absent.
    pub heading: Option<Direction>,
}

/// Complete description of a level's starting state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBlueprint {
    /// One-based level number.
    pub number: u32,
    /// Number of grid columns.
    pub width: u32,
    /// Number of grid rows.
    pub height: u32,
    /// Permanent walls, including the border when present.
    pub walls: Vec<Location>,
    /// Starting cell of the first player.
    pub player_one: Location,
    /// Starting cell of the optional second player.
    pub player_two: Option<Location>,
    /// Avatar flavours ordered by player slot.
    pub flavors: [String; 2],
    /// Fruit roster in collection-index order.
    pub fruits: Vec<FruitSpawn>,
    /// Enemy roster in update order.
    pub enemies: Vec<EnemySpawn>,
    /// Hot tile hazards.
    pub hot_tiles: Vec<Location>,
    /// Campfire hazards, initially lit.
    pub campfires: Vec<Location>,
    /// Ice walls present when the level starts.
    pub ice: Vec<Location>,
    /// Countdown length in seconds.
    pub time_limit_seconds: u32,
    /// Seed for the level's deterministic randomness.
    pub seed: u64,
}

impl LevelBlueprint {
    /// Creates a blueprint for a grid whose outer ring is walled.
    #[must_use]
    pub fn bordered(number: u32, width: u32, height: u32, player_one: Location) -> Self {
        Self {
            walls: crate::Map::bordered(width, height).walls(),
            ..Self::open(number, width, height, player_one)
        }
    }

    /// Creates a blueprint for a grid without any walls.
    #[must_use]
    pub fn open(number: u32, width: u32, height: u32, player_one: Location) -> Self {
        Self {
            number,
            width,
            height,
            walls: Vec::new(),
            player_one,
            player_two: None,
            flavors: DEFAULT_FLAVORS.map(String::from),
            fruits: Vec::new(),
            enemies: Vec::new(),
            hot_tiles: Vec::new(),
            campfires: Vec::new(),
            ice: Vec::new(),
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
            seed: u64::from(number),
        }
    }

    /// Adds a cooperative second player.
    #[must_use]
    pub fn with_player_two(mut self, location: Location) -> Self {
        self.player_two = Some(location);
        self
    }

    /// Removes the second player, turning the level into a solo level.
    #[must_use]
    pub fn without_player_two(mut self) -> Self {
        self.player_two = None;
        self
    }

    /// Adds a permanent wall.
    #[must_use]
    pub fn with_wall(mut self, location: Location) -> Self {
        self.walls.push(location);
        self
    }

    /// Adds a fruit to the roster.
    #[must_use]
    pub fn with_fruit(mut self, kind: FruitKind, location: Location) -> Self {
        self.fruits.push(FruitSpawn { kind, location });
        self
    }

    /// Adds an enemy to the roster using its default heading.
    #[must_use]
    pub fn with_enemy(mut self, kind: EnemyKind, location: Location) -> Self {
        self.enemies.push(EnemySpawn {
            kind,
            location,
            heading: None,
        });
        self
    }

    /// Adds a hot tile hazard.
    #[must_use]
    pub fn with_hot_tile(mut self, location: Location) -> Self {
        self.hot_tiles.push(location);
        self
    }

    /// Adds a lit campfire hazard.
    #[must_use]
    pub fn with_campfire(mut self, location: Location) -> Self {
        self.campfires.push(location);
        self
    }

    /// Adds an ice wall present at level start.
    #[must_use]
    pub fn with_ice(mut self, location: Location) -> Self {
        self.ice.push(location);
        self
    }

    /// Overrides the countdown length.
    #[must_use]
    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    /// Overrides the randomness seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds a playable level using the default rules.
    pub fn build(&self) -> Result<Level, LevelError> {
        self.build_with(LevelConfig::default())
    }

    /// Builds a playable level using the provided rules.
    pub fn build_with(&self, config: LevelConfig) -> Result<Level, LevelError> {
        Level::from_blueprint(self.clone(), config)
    }
}
