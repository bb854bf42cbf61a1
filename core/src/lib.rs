#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Frostbite engine.
//!
//! This crate defines the vocabulary that connects the authoritative level
//! simulation, the progression systems and the presentation adapters. Grid
//! coordinates are expressed as [`Location`] values, entity variants are closed
//! tags ([`FruitKind`], [`EnemyKind`], [`ObstacleKind`]) whose fixed constants
//! live in lookup tables on the tags themselves, and presentation layers pull
//! read-only snapshots ([`PlayerInfo`], [`FruitInfo`], [`EnemyInfo`],
//! [`ObstacleInfo`]) instead of touching live state. [`GameState`] is the
//! storage-agnostic shape of a persisted game.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Frostbite.";

/// Maximum number of levels a game may hold.
pub const MAX_LEVELS: usize = 10;

/// Number of levels that count toward winning a game.
pub const PLAYABLE_LEVELS: usize = 5;

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates may be negative while a move is being validated; whether a
/// location is usable is decided by the map, not by the location itself.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Location {
    x: i32,
    y: i32,
}

impl Location {
    /// Creates a new grid location.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the location.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the location.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns a new location offset by the provided deltas.
    #[must_use]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// Returns the neighbouring location in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.translate(dx, dy)
    }

    /// Computes the Euclidean distance between two locations.
    #[must_use]
    pub fn distance_to(self, other: Location) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Computes the Manhattan distance between two locations.
    #[must_use]
    pub fn manhattan_distance(self, other: Location) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Cardinal directions available to players and enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the fixed order used for deterministic tie breaking.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Column and row deltas produced by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Resolves a unit cardinal delta into a direction.
    ///
    /// Deltas whose components are not a single cardinal step after taking
    /// their sign yield `None`.
    #[must_use]
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Identifies one of the two player avatars a level may host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// The mandatory first player.
    One,
    /// The optional cooperative second player.
    Two,
}

impl PlayerSlot {
    /// Zero-based index of the slot.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

/// Fruit variants that can be collected for points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    /// Static fruit worth 100 points.
    Banana,
    /// Static fruit worth 50 points.
    Grapes,
    /// Drifting fruit worth 150 points.
    Cherry,
    /// Drifting fruit worth 200 points.
    Pineapple,
    /// Static fruit worth 250 points that periodically grows spines.
    Cactus,
}

impl FruitKind {
    /// Every fruit variant.
    pub const ALL: [FruitKind; 5] = [
        Self::Banana,
        Self::Grapes,
        Self::Cherry,
        Self::Pineapple,
        Self::Cactus,
    ];

    /// Display name of the variant.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Banana => "Banana",
            Self::Grapes => "Grapes",
            Self::Cherry => "Cherry",
            Self::Pineapple => "Pineapple",
            Self::Cactus => "Cactus",
        }
    }

    /// Points awarded the first time the fruit is collected.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Banana => 100,
            Self::Grapes => 50,
            Self::Cherry => 150,
            Self::Pineapple => 200,
            Self::Cactus => 250,
        }
    }

    /// Number of ticks between drift steps, or `None` for static fruit.
    #[must_use]
    pub const fn drift_period(self) -> Option<u64> {
        match self {
            Self::Cherry => Some(4),
            Self::Pineapple => Some(3),
            Self::Banana | Self::Grapes | Self::Cactus => None,
        }
    }

    /// Reports whether the fruit drifts across the grid.
    #[must_use]
    pub const fn is_movable(self) -> bool {
        self.drift_period().is_some()
    }

    /// Length of each spined/unspined phase in ticks, for fruit that grow spines.
    #[must_use]
    pub const fn spine_phase(self) -> Option<u64> {
        match self {
            Self::Cactus => Some(5),
            Self::Banana | Self::Grapes | Self::Cherry | Self::Pineapple => None,
        }
    }
}

/// How an enemy variant chooses its next cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionPolicy {
    /// Random single steps, or standing still.
    Jitter,
    /// Straight-line walk that reverses at obstructions.
    Patrol,
    /// Steps toward the nearest detected player, patrolling otherwise.
    Chase,
    /// Dashes along a shared row or column toward a detected player.
    Lunge,
}

/// Enemy variants roaming a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Flowerpot that shuffles around its starting area.
    Maceta,
    /// Troll that patrols back and forth.
    Troll,
    /// Orange squid that hunts nearby players.
    CalamarNaranja,
    /// Narwhal that charges players sharing its row or column.
    Narval,
}

impl EnemyKind {
    /// Every enemy variant.
    pub const ALL: [EnemyKind; 4] = [
        Self::Maceta,
        Self::Troll,
        Self::CalamarNaranja,
        Self::Narval,
    ];

    /// Display name of the variant.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Maceta => "Maceta",
            Self::Troll => "Troll",
            Self::CalamarNaranja => "CalamarNaranja",
            Self::Narval => "Narval",
        }
    }

    /// Number of ticks between motion steps.
    #[must_use]
    pub const fn move_period(self) -> u64 {
        match self {
            Self::Maceta => 3,
            Self::Troll | Self::CalamarNaranja | Self::Narval => 2,
        }
    }

    /// Radius, in cells, within which the enemy notices a player.
    #[must_use]
    pub const fn detection_radius(self) -> f64 {
        match self {
            Self::Maceta => 2.0,
            Self::Troll => 3.0,
            Self::CalamarNaranja => 5.0,
            Self::Narval => 6.0,
        }
    }

    /// Motion policy applied on each of the enemy's move ticks.
    #[must_use]
    pub const fn motion(self) -> MotionPolicy {
        match self {
            Self::Maceta => MotionPolicy::Jitter,
            Self::Troll => MotionPolicy::Patrol,
            Self::CalamarNaranja => MotionPolicy::Chase,
            Self::Narval => MotionPolicy::Lunge,
        }
    }

    /// Heading assumed when a blueprint does not provide one.
    #[must_use]
    pub const fn default_heading(self) -> Direction {
        match self {
            Self::Narval => Direction::Down,
            Self::Maceta | Self::Troll | Self::CalamarNaranja => Direction::Right,
        }
    }
}

/// Passive hazards placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Heated floor on which ice cannot form.
    HotTile,
    /// Fire that burns until ice extinguishes it.
    Campfire,
}

impl ObstacleKind {
    /// Display name of the variant.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HotTile => "HotTile",
            Self::Campfire => "Campfire",
        }
    }
}

/// Classification of a single grid cell for presentation purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Open floor.
    Empty,
    /// Permanent wall.
    Wall,
    /// Player-made ice wall.
    Ice,
    /// Hot tile hazard.
    HotTile,
    /// Campfire hazard, lit or extinguished.
    Campfire,
}

impl CellKind {
    /// Stable numeric code handed to presentation layers.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Wall => 1,
            Self::Ice => 2,
            Self::HotTile => 3,
            Self::Campfire => 4,
        }
    }
}

/// Immutable representation of a player avatar used for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerInfo {
    /// Column currently occupied by the player.
    pub x: i32,
    /// Row currently occupied by the player.
    pub y: i32,
    /// Indicates whether the player is still alive.
    pub alive: bool,
    /// Flavour of the ice cream, also used as a skin selector.
    pub color: String,
    /// Facing derived from the most recent movement or ice action.
    pub facing: (i32, i32),
}

/// Immutable representation of a fruit used for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FruitInfo {
    /// Variant name of the fruit.
    pub type_name: &'static str,
    /// Column currently occupied by the fruit.
    pub x: i32,
    /// Row currently occupied by the fruit.
    pub y: i32,
    /// Indicates whether the fruit has been collected.
    pub collected: bool,
    /// Points awarded when collected.
    pub points: u32,
    /// Indicates whether the fruit currently bears spines.
    pub spined: bool,
}

/// Immutable representation of an enemy used for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyInfo {
    /// Variant name of the enemy.
    pub type_name: &'static str,
    /// Column currently occupied by the enemy.
    pub x: i32,
    /// Row currently occupied by the enemy.
    pub y: i32,
}

/// Immutable representation of a hazard used for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObstacleInfo {
    /// Variant of the hazard.
    pub kind: ObstacleKind,
    /// Column of the hazard.
    pub x: i32,
    /// Row of the hazard.
    pub y: i32,
    /// Whether a campfire is burning; `None` for hazards without a flame.
    pub lit: Option<bool>,
}

/// Persisted state of a single player avatar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Points earned by the player in the level.
    pub score: u32,
    /// Cell occupied by the player.
    pub location: Location,
    /// Whether the player is alive.
    pub alive: bool,
    /// Last motion deltas of the player.
    pub facing: (i32, i32),
}

/// Persisted state of a single enemy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyState {
    /// Cell occupied by the enemy.
    pub location: Location,
    /// Heading used by patrolling motion.
    pub heading: Direction,
}

/// Storage-agnostic snapshot sufficient to resume a level exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Number of the level being played.
    pub level_number: u32,
    /// Score accumulated across previously finished levels.
    pub total_score: u32,
    /// Player states ordered by slot.
    pub players: Vec<PlayerState>,
    /// Roster indices of collected fruit, ascending.
    pub collected_fruits: Vec<usize>,
    /// Fruit locations ordered by roster index.
    pub fruit_locations: Vec<Location>,
    /// Enemy states ordered by roster index.
    pub enemies: Vec<EnemyState>,
    /// Remaining time in milliseconds.
    pub remaining_millis: u64,
    /// Number of ticks simulated so far.
    pub ticks: u64,
    /// Ice walls present on the map, sorted.
    pub ice_walls: Vec<Location>,
    /// Campfires that were extinguished, sorted.
    pub extinguished_campfires: Vec<Location>,
}

impl GameState {
    /// Remaining time rounded up to whole seconds.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u64 {
        self.remaining_millis.div_ceil(1000)
    }
}
