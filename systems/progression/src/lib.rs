#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Top-level Frostbite controller: level sequencing, scoring and saves.
//!
//! [`Game`] owns the loaded levels and a cursor into them. The cursor is unset
//! until [`Game::start_game`] runs; level-scoped operations called without a
//! current level report [`GameError::NoActiveLevel`], while [`Game::update`]
//! quietly does nothing.

use frostbite_core::{
    EnemyInfo, FruitInfo, GameState, ObstacleInfo, PlayerInfo, PlayerSlot, MAX_LEVELS,
    PLAYABLE_LEVELS,
};
use frostbite_system_persistence::{MemorySaveRepository, PersistenceError, SaveRepository};
use frostbite_world::{query, Level, LevelError, LevelStatus};
use tracing::{debug, info};

/// Faults reported by the controller.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The game was started before any level was added.
    #[error("cannot start a game without levels")]
    NoLevels,
    /// A level-scoped operation ran while no level is current.
    #[error("no level is currently active")]
    NoActiveLevel,
    /// Adding the level would exceed the storage ceiling.
    #[error("cannot hold more than {limit} levels")]
    TooManyLevels {
        /// Maximum number of levels the controller stores.
        limit: usize,
    },
    /// A saved game refers to a level that is not loaded.
    #[error("level {0} is not loaded")]
    UnknownLevel(u32),
    /// The level rejected the requested state.
    #[error(transparent)]
    Level(#[from] LevelError),
    /// The save repository rejected the write.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Level sequencer and score keeper backed by a save repository.
#[derive(Debug)]
pub struct Game<R: SaveRepository = MemorySaveRepository> {
    levels: Vec<Level>,
    current: Option<usize>,
    total_score: u32,
    game_won: bool,
    repository: R,
}

impl Game<MemorySaveRepository> {
    /// Creates an empty game whose saves live in memory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_repository(MemorySaveRepository::new())
    }
}

impl Default for Game<MemorySaveRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SaveRepository> Game<R> {
    /// Creates an empty game that persists saves through `repository`.
    #[must_use]
    pub const fn with_repository(repository: R) -> Self {
        Self {
            levels: Vec::new(),
            current: None,
            total_score: 0,
            game_won: false,
            repository,
        }
    }

    /// Save repository used by the game.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Appends a level. The cursor is never moved by this call.
    pub fn add_level(&mut self, level: Level) -> Result<(), GameError> {
        if self.levels.len() >= MAX_LEVELS {
            return Err(GameError::TooManyLevels { limit: MAX_LEVELS });
        }
        debug!(number = level.number(), "level added");
        self.levels.push(level);
        Ok(())
    }

    /// Loaded levels in play order.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Restarts the first level, points the cursor at it and clears the win
    /// flag.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        let Some(first) = self.levels.first_mut() else {
            return Err(GameError::NoLevels);
        };
        first.restart();
        self.current = Some(0);
        self.game_won = false;
        info!(levels = self.levels.len(), "game started");
        Ok(())
    }

    /// Reports whether a level is current.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.current.is_some()
    }

    /// Zero-based index of the current level.
    #[must_use]
    pub const fn current_level_index(&self) -> Option<usize> {
        self.current
    }

    /// Level currently being played.
    #[must_use]
    pub fn current_level(&self) -> Option<&Level> {
        self.current.and_then(|index| self.levels.get(index))
    }

    fn level(&self) -> Result<&Level, GameError> {
        self.current_level().ok_or(GameError::NoActiveLevel)
    }

    fn level_mut(&mut self) -> Result<&mut Level, GameError> {
        self.current
            .and_then(|index| self.levels.get_mut(index))
            .ok_or(GameError::NoActiveLevel)
    }

    /// Banks the current level's scores and moves to the next playable level,
    /// which starts afresh from its blueprint.
    ///
    /// Returns `false` and marks the game as won when the current level is the
    /// last one that counts toward a win. Does nothing once the game is won.
    pub fn next_level(&mut self) -> bool {
        let Some(index) = self.current else {
            return false;
        };
        if self.game_won {
            return false;
        }

        if let Some(level) = self.levels.get(index) {
            self.total_score = self.total_score.saturating_add(level.level_score());
        }

        let playable = self.levels.len().min(PLAYABLE_LEVELS);
        if index + 1 < playable {
            self.levels[index + 1].restart();
            self.current = Some(index + 1);
            info!(
                level = index + 2,
                total_score = self.total_score,
                "advanced to next level"
            );
            true
        } else {
            self.game_won = true;
            info!(total_score = self.total_score, "game won");
            false
        }
    }

    /// Restarts the one-based level `number`, clamped to the loaded levels.
    ///
    /// The cumulative score is kept and the win flag is cleared.
    pub fn reset_to_level(&mut self, number: u32) -> Result<(), GameError> {
        if self.levels.is_empty() {
            return Err(GameError::NoLevels);
        }
        let requested = usize::try_from(number).unwrap_or(usize::MAX);
        let index = requested.clamp(1, self.levels.len()) - 1;
        self.levels[index].restart();
        self.current = Some(index);
        self.game_won = false;
        info!(level = index + 1, "level reset");
        Ok(())
    }

    /// Drops every level and score, returning to the unstarted state.
    pub fn reset_game(&mut self) {
        self.levels.clear();
        self.current = None;
        self.total_score = 0;
        self.game_won = false;
        info!("game reset");
    }

    /// Reports whether the last playable level was finished.
    #[must_use]
    pub const fn is_game_won(&self) -> bool {
        self.game_won
    }

    /// Moves player one by the provided deltas.
    pub fn move_player1(&mut self, dx: i32, dy: i32) -> Result<bool, GameError> {
        self.move_player(PlayerSlot::One, dx, dy)
    }

    /// Moves player two by the provided deltas.
    pub fn move_player2(&mut self, dx: i32, dy: i32) -> Result<bool, GameError> {
        self.move_player(PlayerSlot::Two, dx, dy)
    }

    /// Moves the player in `slot` by the provided deltas.
    ///
    /// `Ok(false)` means the move was rejected by the level rules.
    pub fn move_player(&mut self, slot: PlayerSlot, dx: i32, dy: i32) -> Result<bool, GameError> {
        Ok(self.level_mut()?.move_player(slot, dx, dy))
    }

    /// Lays an ice line for player one, returning the number of walls placed.
    pub fn create_ice_line_player1(&mut self, dx: i32, dy: i32) -> Result<usize, GameError> {
        self.create_ice_line(PlayerSlot::One, dx, dy)
    }

    /// Lays an ice line for player two, returning the number of walls placed.
    pub fn create_ice_line_player2(&mut self, dx: i32, dy: i32) -> Result<usize, GameError> {
        self.create_ice_line(PlayerSlot::Two, dx, dy)
    }

    /// Lays an ice line for the player in `slot`.
    pub fn create_ice_line(
        &mut self,
        slot: PlayerSlot,
        dx: i32,
        dy: i32,
    ) -> Result<usize, GameError> {
        Ok(self.level_mut()?.create_ice_line(slot, dx, dy))
    }

    /// Breaks an ice line for player one, returning the number of walls removed.
    pub fn break_ice_line_player1(&mut self, dx: i32, dy: i32) -> Result<usize, GameError> {
        self.break_ice_line(PlayerSlot::One, dx, dy)
    }

    /// Breaks an ice line for player two, returning the number of walls removed.
    pub fn break_ice_line_player2(&mut self, dx: i32, dy: i32) -> Result<usize, GameError> {
        self.break_ice_line(PlayerSlot::Two, dx, dy)
    }

    /// Breaks an ice line for the player in `slot`.
    pub fn break_ice_line(
        &mut self,
        slot: PlayerSlot,
        dx: i32,
        dy: i32,
    ) -> Result<usize, GameError> {
        Ok(self.level_mut()?.break_ice_line(slot, dx, dy))
    }

    /// Advances the current level by one tick. Does nothing without a level.
    pub fn update(&mut self) {
        if let Ok(level) = self.level_mut() {
            level.advance();
        }
    }

    /// Pauses the current level.
    pub fn pause(&mut self) -> Result<(), GameError> {
        self.level_mut()?.pause();
        Ok(())
    }

    /// Resumes the current level.
    pub fn resume(&mut self) -> Result<(), GameError> {
        self.level_mut()?.resume();
        Ok(())
    }

    /// Flips the current level's pause flag.
    pub fn toggle_pause(&mut self) -> Result<(), GameError> {
        self.level_mut()?.toggle_pause();
        Ok(())
    }

    /// Derived lifecycle state of the current level.
    pub fn status(&self) -> Result<LevelStatus, GameError> {
        Ok(self.level()?.status())
    }

    /// Reports whether the current level's countdown ran out.
    pub fn is_time_expired(&self) -> Result<bool, GameError> {
        Ok(self.level()?.is_time_expired())
    }

    /// Seconds left on the current level's countdown, rounded up.
    pub fn remaining_seconds(&self) -> Result<u64, GameError> {
        Ok(self.level()?.remaining_seconds())
    }

    /// Number of fruit collected in the current level.
    pub fn count_collected_fruits(&self) -> Result<usize, GameError> {
        Ok(self.level()?.count_collected_fruits())
    }

    /// Score banked from previously finished levels.
    #[must_use]
    pub const fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Adds `delta` to the banked score, saturating at the maximum.
    pub fn add_to_total_score(&mut self, delta: u32) {
        self.total_score = self.total_score.saturating_add(delta);
    }

    /// Overwrites the banked score.
    pub fn set_total_score(&mut self, score: u32) {
        self.total_score = score;
    }

    /// Banked score plus the current level's in-progress score.
    #[must_use]
    pub fn combined_score(&self) -> u32 {
        let level = self.current_level().map_or(0, Level::level_score);
        self.total_score.saturating_add(level)
    }

    /// In-progress score of one player in the current level.
    pub fn player_score(&self, slot: PlayerSlot) -> Result<u32, GameError> {
        Ok(self.level()?.score(slot))
    }

    /// Snapshot of the avatar in `slot`, if the current level hosts one.
    pub fn player_info(&self, slot: PlayerSlot) -> Result<Option<PlayerInfo>, GameError> {
        Ok(query::player_info(self.level()?, slot))
    }

    /// Snapshots of every avatar in the current level.
    pub fn player_infos(&self) -> Result<Vec<PlayerInfo>, GameError> {
        Ok(query::player_infos(self.level()?))
    }

    /// Snapshots of the current level's fruit roster.
    pub fn fruit_infos(&self) -> Result<Vec<FruitInfo>, GameError> {
        Ok(query::fruit_infos(self.level()?))
    }

    /// Snapshots of the current level's enemy roster.
    pub fn enemy_infos(&self) -> Result<Vec<EnemyInfo>, GameError> {
        Ok(query::enemy_infos(self.level()?))
    }

    /// Snapshots of the current level's hazards.
    pub fn obstacle_infos(&self) -> Result<Vec<ObstacleInfo>, GameError> {
        Ok(query::obstacle_infos(self.level()?))
    }

    /// Cell codes of the current level, indexed `[y][x]`.
    pub fn grid(&self) -> Result<Vec<Vec<u8>>, GameError> {
        Ok(query::grid_codes(self.level()?))
    }

    /// Names of every stored save. Never fails.
    #[must_use]
    pub fn list_saved_games(&self) -> Vec<String> {
        self.repository.list()
    }

    /// Loads the save stored under `name`, or `None` when there is none.
    #[must_use]
    pub fn load_game(&self, name: &str) -> Option<GameState> {
        self.repository.load(name)
    }

    /// Captures the current level together with the banked score.
    pub fn capture(&self) -> Result<GameState, GameError> {
        let mut state = self.level()?.capture();
        state.total_score = self.total_score;
        Ok(state)
    }

    /// Stores the current state under `name`.
    pub fn save_game(&mut self, name: &str) -> Result<(), GameError> {
        let state = self.capture()?;
        self.repository.store(name, &state)?;
        info!(
            name,
            level = state.level_number,
            total_score = state.total_score,
            "game saved"
        );
        Ok(())
    }

    /// Makes the saved level current and restores it exactly.
    ///
    /// The banked score is taken from the save and the win flag is cleared.
    pub fn resume_game(&mut self, state: &GameState) -> Result<(), GameError> {
        let index = self
            .levels
            .iter()
            .position(|level| level.number() == state.level_number)
            .ok_or(GameError::UnknownLevel(state.level_number))?;
        self.levels[index].restore(state)?;
        self.current = Some(index);
        self.total_score = state.total_score;
        self.game_won = false;
        info!(
            level = state.level_number,
            ticks = state.ticks,
            "game resumed"
        );
        Ok(())
    }
}
