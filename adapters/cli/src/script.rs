//! Headless input scripts.
//!
//! Upper-case `U D L R` move player one, `I` lays ice along the player's
//! facing and `K` breaks it; the lower-case letters do the same for player
//! two. `.` advances one tick and `p`/`P` toggles pause. Whitespace is
//! ignored.

use anyhow::{bail, Result};
use frostbite_core::{Direction, PlayerSlot};

/// One scripted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Moves a player one cell.
    Move(PlayerSlot, Direction),
    /// Lays an ice line along the player's facing.
    Ice(PlayerSlot),
    /// Breaks the ice line along the player's facing.
    Break(PlayerSlot),
    /// Advances the level by one tick.
    Tick,
    /// Flips the pause flag.
    TogglePause,
}

/// Parses a script into its actions.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Action>> {
    script
        .chars()
        .enumerate()
        .filter(|(_, glyph)| !glyph.is_whitespace())
        .map(|(position, glyph)| match action_for(glyph) {
            Some(action) => Ok(action),
            None => bail!("unknown script command '{glyph}' at position {position}"),
        })
        .collect()
}

fn action_for(glyph: char) -> Option<Action> {
    let slot = if glyph.is_ascii_lowercase() {
        PlayerSlot::Two
    } else {
        PlayerSlot::One
    };
    let action = match glyph {
        '.' => Action::Tick,
        'p' | 'P' => Action::TogglePause,
        'U' | 'u' => Action::Move(slot, Direction::Up),
        'D' | 'd' => Action::Move(slot, Direction::Down),
        'L' | 'l' => Action::Move(slot, Direction::Left),
        'R' | 'r' => Action::Move(slot, Direction::Right),
        'I' | 'i' => Action::Ice(slot),
        'K' | 'k' => Action::Break(slot),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_selects_the_player() {
        let actions = parse_script("Ur i K").expect("script parses");
        assert_eq!(
            actions,
            vec![
                Action::Move(PlayerSlot::One, Direction::Up),
                Action::Move(PlayerSlot::Two, Direction::Right),
                Action::Ice(PlayerSlot::Two),
                Action::Break(PlayerSlot::One),
            ]
        );
    }

    #[test]
    fn ticks_and_pause_are_shared() {
        let actions = parse_script("..pP").expect("script parses");
        assert_eq!(
            actions,
            vec![
                Action::Tick,
                Action::Tick,
                Action::TogglePause,
                Action::TogglePause,
            ]
        );
    }

    #[test]
    fn unknown_commands_report_their_position() {
        let error = parse_script("UU?").expect_err("unknown command");
        assert!(error.to_string().contains("'?' at position 2"));
    }
}
