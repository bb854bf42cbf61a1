#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text level layouts and the built-in Frostbite level set.
//!
//! A layout is a rectangle of glyphs, one per cell:
//!
//! | Glyph | Meaning | Glyph | Meaning |
//! |---|---|---|---|
//! | `#` | wall | `m` | maceta |
//! | `.` | floor | `t` | troll |
//! | `1` | player one start | `s` | calamar naranja |
//! | `2` | player two start | `n` | narval |
//! | `B` | banana | `h` | hot tile |
//! | `G` | grapes | `f` | campfire |
//! | `C` | cherry | `i` | ice |
//! | `P` | pineapple | | |
//! | `X` | cactus | | |
//!
//! Leading and trailing whitespace on each line is ignored, as are blank
//! lines, so layouts can be indented inside string literals.

use frostbite_core::{EnemyKind, FruitKind, Location, PLAYABLE_LEVELS};
use frostbite_world::LevelBlueprint;
use tracing::debug;

const STANDARD_LAYOUTS: [(&str, u32); PLAYABLE_LEVELS] = [
    (include_str!("../levels/level1.txt"), 120),
    (include_str!("../levels/level2.txt"), 110),
    (include_str!("../levels/level3.txt"), 100),
    (include_str!("../levels/level4.txt"), 90),
    (include_str!("../levels/level5.txt"), 90),
];

/// Reasons a text layout cannot be turned into a blueprint.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The layout contained no rows.
    #[error("layout is empty")]
    Empty,
    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A glyph outside the legend was found.
    #[error("unknown glyph '{glyph}' at ({x}, {y})")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Column of the glyph.
        x: usize,
        /// Row of the glyph.
        y: usize,
    },
    /// No `1` glyph was found.
    #[error("layout has no start for player one")]
    MissingPlayerOne,
    /// A player start glyph appeared more than once.
    #[error("player {player} start appears more than once")]
    DuplicateStart {
        /// Player number whose start is duplicated.
        player: u8,
    },
    /// The layout exceeds the addressable grid size.
    #[error("layout is too large")]
    TooLarge,
}

/// Parses a text layout into a blueprint for level `number`.
///
/// The blueprint uses the default time limit, flavours and seed; callers
/// adjust them with the blueprint builders.
pub fn parse_layout(number: u32, layout: &str) -> Result<LevelBlueprint, LayoutError> {
    let rows: Vec<&str> = layout
        .lines()
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .collect();
    let width = rows.first().map(|row| row.chars().count()).ok_or(LayoutError::Empty)?;

    let mut walls = Vec::new();
    let mut starts: [Option<Location>; 2] = [None, None];
    let mut fruits = Vec::new();
    let mut enemies = Vec::new();
    let mut hot_tiles = Vec::new();
    let mut campfires = Vec::new();
    let mut ice = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(LayoutError::RaggedRow {
                row: y,
                expected: width,
                found,
            });
        }

        for (x, glyph) in row.chars().enumerate() {
            let location = Location::new(coordinate(x)?, coordinate(y)?);
            match glyph {
                '.' => {}
                '#' => walls.push(location),
                '1' | '2' => {
                    let player: u8 = if glyph == '1' { 1 } else { 2 };
                    let start = &mut starts[usize::from(player - 1)];
                    if start.replace(location).is_some() {
                        return Err(LayoutError::DuplicateStart { player });
                    }
                }
                'h' => hot_tiles.push(location),
                'f' => campfires.push(location),
                'i' => ice.push(location),
                other => {
                    if let Some(kind) = fruit_glyph(other) {
                        fruits.push((kind, location));
                    } else if let Some(kind) = enemy_glyph(other) {
                        enemies.push((kind, location));
                    } else {
                        return Err(LayoutError::UnknownGlyph { glyph: other, x, y });
                    }
                }
            }
        }
    }

    let [player_one, player_two] = starts;
    let player_one = player_one.ok_or(LayoutError::MissingPlayerOne)?;
    let width = u32::try_from(width).map_err(|_| LayoutError::TooLarge)?;
    let height = u32::try_from(rows.len()).map_err(|_| LayoutError::TooLarge)?;

    let mut blueprint = LevelBlueprint::open(number, width, height, player_one);
    blueprint.walls = walls;
    blueprint.player_two = player_two;
    blueprint.hot_tiles = hot_tiles;
    blueprint.campfires = campfires;
    blueprint.ice = ice;
    let blueprint = fruits
        .into_iter()
        .fold(blueprint, |blueprint, (kind, location)| {
            blueprint.with_fruit(kind, location)
        });
    let blueprint = enemies
        .into_iter()
        .fold(blueprint, |blueprint, (kind, location)| {
            blueprint.with_enemy(kind, location)
        });

    debug!(
        number,
        width,
        height,
        fruits = blueprint.fruits.len(),
        enemies = blueprint.enemies.len(),
        "layout parsed"
    );
    Ok(blueprint)
}

/// Blueprints of the built-in levels, easiest first.
///
/// Every built-in level offers a start for player two; solo play drops it
/// with [`LevelBlueprint::without_player_two`].
pub fn standard_levels() -> Result<Vec<LevelBlueprint>, LayoutError> {
    STANDARD_LAYOUTS
        .iter()
        .zip(1..)
        .map(|((layout, seconds), number)| {
            parse_layout(number, layout).map(|blueprint| blueprint.with_time_limit(*seconds))
        })
        .collect()
}

/// Glyph used for a fruit variant.
#[must_use]
pub const fn fruit_symbol(kind: FruitKind) -> char {
    match kind {
        FruitKind::Banana => 'B',
        FruitKind::Grapes => 'G',
        FruitKind::Cherry => 'C',
        FruitKind::Pineapple => 'P',
        FruitKind::Cactus => 'X',
    }
}

/// Glyph used for an enemy variant.
#[must_use]
pub const fn enemy_symbol(kind: EnemyKind) -> char {
    match kind {
        EnemyKind::Maceta => 'm',
        EnemyKind::Troll => 't',
        EnemyKind::CalamarNaranja => 's',
        EnemyKind::Narval => 'n',
    }
}

fn fruit_glyph(glyph: char) -> Option<FruitKind> {
    FruitKind::ALL
        .into_iter()
        .find(|kind| fruit_symbol(*kind) == glyph)
}

fn enemy_glyph(glyph: char) -> Option<EnemyKind> {
    EnemyKind::ALL
        .into_iter()
        .find(|kind| enemy_symbol(*kind) == glyph)
}

fn coordinate(index: usize) -> Result<i32, LayoutError> {
    i32::try_from(index).map_err(|_| LayoutError::TooLarge)
}
