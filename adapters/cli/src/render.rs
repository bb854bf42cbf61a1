use std::fmt::Write as _;

use frostbite_core::{CellKind, Location, PlayerSlot};
use frostbite_system_catalog::{enemy_symbol, fruit_symbol};
use frostbite_world::{Level, LevelStatus};

const DEAD_PLAYER: char = '*';
const SPINED_CACTUS: char = '%';
const DOUSED_CAMPFIRE: char = ',';

/// Draws the level as text, one row per line, followed by a status line.
///
/// Glyphs follow the layout legend; dead players show as `*`, spined cacti
/// as `%` and extinguished campfires as `,`.
pub(crate) fn render_level(level: &Level) -> String {
    let map = level.map();
    let mut out = String::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            out.push(glyph_at(level, Location::new(x, y)));
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{}", status_line(level));
    out
}

/// Summarises level number, state, countdown and scores.
pub(crate) fn status_line(level: &Level) -> String {
    let status = match level.status() {
        LevelStatus::Playing => "playing",
        LevelStatus::Paused => "paused",
        LevelStatus::Completed => "completed",
        LevelStatus::GameOver => "game over",
    };
    let mut line = format!(
        "level {} | {status} | {}s left | fruit {}/{} | p1 {}",
        level.number(),
        level.remaining_seconds(),
        level.count_collected_fruits(),
        level.fruits().len(),
        level.score(PlayerSlot::One),
    );
    if level.has_two_players() {
        let _ = write!(line, " | p2 {}", level.score(PlayerSlot::Two));
    }
    line
}

fn glyph_at(level: &Level, location: Location) -> char {
    for (slot, player) in [PlayerSlot::One, PlayerSlot::Two]
        .into_iter()
        .filter_map(|slot| level.player(slot).map(|player| (slot, player)))
    {
        if player.location() == location {
            return match (player.is_alive(), slot) {
                (false, _) => DEAD_PLAYER,
                (true, PlayerSlot::One) => '1',
                (true, PlayerSlot::Two) => '2',
            };
        }
    }
    if let Some(enemy) = level
        .enemies()
        .iter()
        .find(|enemy| enemy.location() == location)
    {
        return enemy_symbol(enemy.kind());
    }
    if let Some(fruit) = level
        .fruits()
        .iter()
        .find(|fruit| !fruit.is_collected() && fruit.location() == location)
    {
        if fruit.is_spined() {
            return SPINED_CACTUS;
        }
        return fruit_symbol(fruit.kind());
    }

    match level.map().cell_kind(location) {
        CellKind::Empty => '.',
        CellKind::Wall => '#',
        CellKind::Ice => 'i',
        CellKind::HotTile => 'h',
        CellKind::Campfire => {
            let lit = level
                .map()
                .obstacle_at(location)
                .and_then(|obstacle| obstacle.lit())
                .unwrap_or(true);
            if lit {
                'f'
            } else {
                DOUSED_CAMPFIRE
            }
        }
    }
}
