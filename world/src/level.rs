//! A single playthrough unit: movement, ice lines, ticking and derived status.

use std::{iter, time::Duration};

use frostbite_core::{
    Direction, EnemyState, GameState, Location, ObstacleKind, PlayerSlot, PlayerState,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    Enemy, Fruit, HazardEffect, HazardPolicy, IceCream, LevelBlueprint, LevelConfig, Map,
    Obstacle,
};

const TICK_SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;
const ENEMY_STREAM: u64 = 1;
const FRUIT_STREAM: u64 = 2;

/// Derived lifecycle state of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelStatus {
    /// Accepting input and ticking.
    Playing,
    /// Playing, but frozen until resumed.
    Paused,
    /// Every fruit was collected with all players alive.
    Completed,
    /// A player died, or time ran out before completion.
    GameOver,
}

/// Reasons a level cannot be built or restored.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    /// An entity starts, or is restored, on a cell that is walled, iced or
    /// out of bounds.
    #[error("{entity} cannot be placed on blocked cell {location:?}")]
    BlockedSpawn {
        /// Kind of entity being placed.
        entity: &'static str,
        /// Offending start cell.
        location: Location,
    },
    /// Two mutually exclusive entities are placed on the same cell.
    #[error("{entity} cell {location:?} is already taken")]
    OverlappingSpawn {
        /// Kind of entity being placed.
        entity: &'static str,
        /// Offending start cell.
        location: Location,
    },
    /// A saved game belongs to a different level.
    #[error("saved game belongs to level {found}, not level {expected}")]
    LevelMismatch {
        /// Number of the level being restored.
        expected: u32,
        /// Level number recorded in the save.
        found: u32,
    },
    /// A saved roster does not match the level's roster size.
    #[error("saved {roster} roster has {found} entries but the level has {expected}")]
    RosterMismatch {
        /// Name of the mismatched roster.
        roster: &'static str,
        /// Roster size of the level.
        expected: usize,
        /// Roster size recorded in the save.
        found: usize,
    },
    /// A saved game marks a fruit index the level does not have.
    #[error("saved game collects unknown fruit #{0}")]
    UnknownFruit(usize),
}

/// Authoritative state of one level being played.
#[derive(Clone, Debug)]
pub struct Level {
    blueprint: LevelBlueprint,
    config: LevelConfig,
    map: Map,
    player_one: IceCream,
    player_two: Option<IceCream>,
    scores: [u32; 2],
    fruits: Vec<Fruit>,
    enemies: Vec<Enemy>,
    remaining: Duration,
    ticks: u64,
    paused: bool,
}

impl Level {
    /// Builds a level from a blueprint, rejecting inconsistent placements.
    pub fn from_blueprint(
        blueprint: LevelBlueprint,
        config: LevelConfig,
    ) -> Result<Self, LevelError> {
        let level = Self::assemble(blueprint, config);
        level.validate()?;
        Ok(level)
    }

    fn assemble(blueprint: LevelBlueprint, config: LevelConfig) -> Self {
        let mut map = Map::new(blueprint.width, blueprint.height);
        for wall in &blueprint.walls {
            let _ = map.add_wall(*wall);
        }
        for tile in &blueprint.hot_tiles {
            let _ = map.add_hot_tile(*tile);
        }
        for campfire in &blueprint.campfires {
            let _ = map.add_campfire(*campfire);
        }
        for ice in &blueprint.ice {
            let _ = map.add_ice_wall(*ice);
        }

        let [first_flavor, second_flavor] = &blueprint.flavors;
        let player_one = IceCream::new("Player 1", first_flavor.clone(), blueprint.player_one);
        let player_two = blueprint
            .player_two
            .map(|location| IceCream::new("Player 2", second_flavor.clone(), location));
        let fruits = blueprint
            .fruits
            .iter()
            .map(|spawn| Fruit::new(spawn.kind, spawn.location))
            .collect();
        let enemies = blueprint
            .enemies
            .iter()
            .map(|spawn| {
                let heading = spawn.heading.unwrap_or(spawn.kind.default_heading());
                Enemy::with_heading(spawn.kind, spawn.location, heading)
            })
            .collect();
        let remaining = Duration::from_secs(u64::from(blueprint.time_limit_seconds));

        Self {
            blueprint,
            config,
            map,
            player_one,
            player_two,
            scores: [0; 2],
            fruits,
            enemies,
            remaining,
            ticks: 0,
            paused: false,
        }
    }

    fn validate(&self) -> Result<(), LevelError> {
        let terrain = [
            ("wall", &self.blueprint.walls),
            ("hot tile", &self.blueprint.hot_tiles),
            ("campfire", &self.blueprint.campfires),
        ];
        for (entity, cells) in terrain {
            for cell in cells {
                ensure_in_bounds(&self.map, entity, *cell)?;
            }
        }
        for cell in &self.blueprint.ice {
            if !self.map.has_ice_wall(*cell) {
                return Err(LevelError::BlockedSpawn {
                    entity: "ice",
                    location: *cell,
                });
            }
        }

        let mut players: Vec<Location> = Vec::new();
        for player in self.players() {
            let location = player.location();
            ensure_open(&self.map, "player", location)?;
            ensure_unique(&players, "player", location)?;
            players.push(location);
        }

        let mut fruits: Vec<Location> = Vec::new();
        for fruit in &self.fruits {
            let location = fruit.location();
            ensure_open(&self.map, "fruit", location)?;
            ensure_unique(&fruits, "fruit", location)?;
            fruits.push(location);
        }

        let mut enemies: Vec<Location> = Vec::new();
        for enemy in &self.enemies {
            let location = enemy.location();
            ensure_open(&self.map, "enemy", location)?;
            ensure_unique(&enemies, "enemy", location)?;
            ensure_unique(&players, "enemy", location)?;
            enemies.push(location);
        }

        Ok(())
    }

    /// Checks a restored state against the occupancy rules play maintains.
    ///
    /// Live players, uncollected fruit and enemies must stand on open cells
    /// and never share them with their own kind. Live players never share a
    /// cell with uncollected fruit or an enemy. Dead players and collected
    /// fruit only need to lie within the grid.
    fn validate_restored(&self) -> Result<(), LevelError> {
        let mut players: Vec<Location> = Vec::new();
        for player in self.players() {
            let location = player.location();
            if !player.is_alive() {
                ensure_in_bounds(&self.map, "player", location)?;
                continue;
            }
            ensure_open(&self.map, "player", location)?;
            ensure_unique(&players, "player", location)?;
            players.push(location);
        }

        let mut fruits: Vec<Location> = Vec::new();
        for fruit in &self.fruits {
            let location = fruit.location();
            if fruit.is_collected() {
                ensure_in_bounds(&self.map, "fruit", location)?;
                continue;
            }
            ensure_open(&self.map, "fruit", location)?;
            ensure_unique(&fruits, "fruit", location)?;
            ensure_unique(&players, "fruit", location)?;
            fruits.push(location);
        }

        let mut enemies: Vec<Location> = Vec::new();
        for enemy in &self.enemies {
            let location = enemy.location();
            ensure_open(&self.map, "enemy", location)?;
            ensure_unique(&enemies, "enemy", location)?;
            ensure_unique(&players, "enemy", location)?;
            enemies.push(location);
        }

        Ok(())
    }

    /// Rebuilds the level from its blueprint, keeping the current rules.
    pub fn restart(&mut self) {
        *self = Self::assemble(self.blueprint.clone(), self.config.clone());
    }

    /// One-based level number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.blueprint.number
    }

    /// Blueprint the level was built from.
    #[must_use]
    pub const fn blueprint(&self) -> &LevelBlueprint {
        &self.blueprint
    }

    /// Rules applied by the level.
    #[must_use]
    pub const fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Replaces the effects applied when players touch hazards.
    pub fn set_hazard_policy(&mut self, policy: HazardPolicy) {
        self.config.hazards = policy;
    }

    /// Read-only access to the grid.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Avatar assigned to the provided slot, if the level hosts one.
    #[must_use]
    pub fn player(&self, slot: PlayerSlot) -> Option<&IceCream> {
        match slot {
            PlayerSlot::One => Some(&self.player_one),
            PlayerSlot::Two => self.player_two.as_ref(),
        }
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> Option<&mut IceCream> {
        match slot {
            PlayerSlot::One => Some(&mut self.player_one),
            PlayerSlot::Two => self.player_two.as_mut(),
        }
    }

    /// Iterator over the hosted avatars in slot order.
    pub fn players(&self) -> impl Iterator<Item = &IceCream> {
        iter::once(&self.player_one).chain(self.player_two.as_ref())
    }

    /// Reports whether a second player takes part.
    #[must_use]
    pub const fn has_two_players(&self) -> bool {
        self.player_two.is_some()
    }

    /// Points earned in this level by the player in the provided slot.
    #[must_use]
    pub const fn score(&self, slot: PlayerSlot) -> u32 {
        self.scores[slot.index()]
    }

    /// Combined points earned in this level by every player.
    #[must_use]
    pub const fn level_score(&self) -> u32 {
        self.scores[0].saturating_add(self.scores[1])
    }

    /// Fruit roster in collection-index order.
    #[must_use]
    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    /// Number of fruit collected so far.
    #[must_use]
    pub fn count_collected_fruits(&self) -> usize {
        self.fruits.iter().filter(|fruit| fruit.is_collected()).count()
    }

    /// Enemy roster in update order.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Number of ticks simulated since the level started.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Countdown time left.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Countdown time left, rounded up to whole seconds.
    #[must_use]
    pub fn remaining_seconds(&self) -> u64 {
        u64::try_from(self.remaining.as_millis().div_ceil(1_000)).unwrap_or(u64::MAX)
    }

    /// Reports whether the countdown reached zero.
    #[must_use]
    pub const fn is_time_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Reports whether the level is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freezes ticking and movement.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Unfreezes ticking and movement.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flips the pause flag.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Reports whether every fruit is collected and every player is alive.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.all_fruit_collected() && self.players().all(IceCream::is_alive)
    }

    /// Reports whether a player died or time ran out before completion.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.players().any(|player| !player.is_alive())
            || (self.is_time_expired() && !self.all_fruit_collected())
    }

    /// Derived lifecycle state.
    #[must_use]
    pub fn status(&self) -> LevelStatus {
        if self.is_completed() {
            LevelStatus::Completed
        } else if self.is_game_over() {
            LevelStatus::GameOver
        } else if self.paused {
            LevelStatus::Paused
        } else {
            LevelStatus::Playing
        }
    }

    fn all_fruit_collected(&self) -> bool {
        self.fruits.iter().all(Fruit::is_collected)
    }

    fn accepts_actions(&self) -> bool {
        !self.paused && !self.is_completed() && !self.is_game_over()
    }

    /// Moves a player by the provided deltas and resolves what it lands on.
    ///
    /// Returns `false` without side effects when the player is missing or
    /// dead, the level is paused or finished, the destination is not an
    /// open cell, or the other player stands there. Returns `true` whenever
    /// the move happened, even if it killed the player.
    pub fn move_player(&mut self, slot: PlayerSlot, dx: i32, dy: i32) -> bool {
        if !self.accepts_actions() {
            return false;
        }
        let Some(player) = self.player(slot).filter(|player| player.is_alive()) else {
            return false;
        };

        let destination = player.location().translate(dx, dy);
        if !self.map.is_valid_position(destination) || self.other_player_at(slot, destination) {
            return false;
        }

        if let Some(player) = self.player_mut(slot) {
            player.move_by(dx, dy);
        }
        self.resolve_arrival(slot, destination);
        true
    }

    fn other_player_at(&self, slot: PlayerSlot, location: Location) -> bool {
        let other = match slot {
            PlayerSlot::One => self.player_two.as_ref(),
            PlayerSlot::Two => Some(&self.player_one),
        };
        other.is_some_and(|player| player.is_alive() && player.location() == location)
    }

    fn resolve_arrival(&mut self, slot: PlayerSlot, destination: Location) {
        if let Some(fruit) = self
            .fruits
            .iter_mut()
            .find(|fruit| !fruit.is_collected() && fruit.location() == destination)
        {
            if fruit.is_spined() {
                self.kill(slot, "cactus spines");
                return;
            }

            let points = fruit.collect();
            let name = fruit.name();
            let score = &mut self.scores[slot.index()];
            *score = score.saturating_add(points);
            debug!(?slot, fruit = name, points, "fruit collected");
        }

        if self
            .enemies
            .iter()
            .any(|enemy| enemy.collides_with_player(destination))
        {
            self.kill(slot, "enemy contact");
            return;
        }

        let effect = self
            .map
            .obstacle_at(destination)
            .map(|obstacle| self.config.hazards.effect_for(obstacle));
        if let Some(effect) = effect {
            self.apply_hazard(slot, effect);
        }
    }

    fn apply_hazard(&mut self, slot: PlayerSlot, effect: HazardEffect) {
        match effect {
            HazardEffect::Kill => self.kill(slot, "hazard"),
            HazardEffect::Penalty { points } => {
                let score = &mut self.scores[slot.index()];
                *score = score.saturating_sub(points);
                debug!(?slot, points, "hazard penalty applied");
            }
            HazardEffect::Ignore => {}
        }
    }

    fn kill(&mut self, slot: PlayerSlot, cause: &'static str) {
        if let Some(player) = self.player_mut(slot) {
            if player.is_alive() {
                player.die();
                debug!(?slot, cause, "player died");
            }
        }
    }

    fn is_occupied(&self, cell: Location) -> bool {
        self.fruits
            .iter()
            .any(|fruit| !fruit.is_collected() && fruit.location() == cell)
            || self.enemies.iter().any(|enemy| enemy.location() == cell)
            || self
                .players()
                .any(|player| player.is_alive() && player.location() == cell)
    }

    /// Resolves the acting player's origin and direction, turning the player.
    ///
    /// A zero delta reuses the player's facing; diagonal deltas are rejected.
    fn aim(&mut self, slot: PlayerSlot, dx: i32, dy: i32) -> Option<(Location, Direction)> {
        if !self.accepts_actions() {
            return None;
        }
        let player = self.player_mut(slot).filter(|player| player.is_alive())?;
        let (dx, dy) = if dx == 0 && dy == 0 {
            player.facing()
        } else {
            (dx, dy)
        };
        let direction = Direction::from_delta(dx, dy)?;
        player.face(direction);
        Some((player.location(), direction))
    }

    /// Lays ice walls in a straight line from the cell next to the player.
    ///
    /// The line stops at the first cell that is blocked, out of bounds, a hot
    /// tile, or occupied by uncollected fruit, an enemy or a live player, and
    /// after the configured maximum length. Ice laid on a lit campfire puts it
    /// out. Returns the number of ice walls placed.
    pub fn create_ice_line(&mut self, slot: PlayerSlot, dx: i32, dy: i32) -> usize {
        let Some((origin, direction)) = self.aim(slot, dx, dy) else {
            return 0;
        };

        let limit = usize::try_from(self.config.max_ice_line).unwrap_or(usize::MAX);
        let mut placed = 0;
        let mut cursor = origin;
        while placed < limit {
            cursor = cursor.step(direction);
            if !self.map.is_valid_position(cursor) || self.is_occupied(cursor) {
                break;
            }
            let on_hot_tile = self
                .map
                .obstacle_at(cursor)
                .is_some_and(|obstacle| obstacle.kind() == ObstacleKind::HotTile);
            if on_hot_tile || !self.map.add_ice_wall(cursor) {
                break;
            }
            if let Some(campfire) = self.map.obstacle_at_mut(cursor) {
                if campfire.extinguish() {
                    debug!(x = cursor.x(), y = cursor.y(), "campfire extinguished");
                }
            }
            placed += 1;
        }

        debug!(?slot, ?direction, placed, "ice line created");
        placed
    }

    /// Removes consecutive ice walls starting next to the player.
    ///
    /// Returns the number of ice walls removed.
    pub fn break_ice_line(&mut self, slot: PlayerSlot, dx: i32, dy: i32) -> usize {
        let Some((origin, direction)) = self.aim(slot, dx, dy) else {
            return 0;
        };

        let mut removed = 0;
        let mut cursor = origin.step(direction);
        while self.map.remove_ice_wall(cursor) {
            removed += 1;
            cursor = cursor.step(direction);
        }

        debug!(?slot, ?direction, removed, "ice line broken");
        removed
    }

    /// Simulates one tick.
    ///
    /// Consumes one tick of countdown, steps every due enemy, drifts movable
    /// fruit, refreshes cactus spines and finally kills any player sharing a
    /// cell with an enemy. Paused or finished levels are left untouched.
    pub fn advance(&mut self) {
        if !self.accepts_actions() {
            return;
        }

        self.ticks = self.ticks.saturating_add(1);
        self.remaining = self.remaining.saturating_sub(self.config.tick());
        self.step_enemies();
        self.drift_fruits();
        let ticks = self.ticks;
        for fruit in &mut self.fruits {
            fruit.refresh_spines(ticks);
        }
        self.resolve_enemy_contacts();

        match self.status() {
            LevelStatus::Completed => debug!(level = self.number(), "level completed"),
            LevelStatus::GameOver => debug!(level = self.number(), "level lost"),
            LevelStatus::Playing | LevelStatus::Paused => {}
        }
    }

    fn live_player_locations(&self) -> Vec<Location> {
        self.players()
            .filter(|player| player.is_alive())
            .map(IceCream::location)
            .collect()
    }

    fn tick_rng(&self, stream: u64) -> ChaCha8Rng {
        let seed = self.blueprint.seed ^ self.ticks.wrapping_mul(TICK_SEED_STRIDE);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        rng
    }

    fn step_enemies(&mut self) {
        let players = self.live_player_locations();
        let mut rng = self.tick_rng(ENEMY_STREAM);
        let mut positions: Vec<Location> = self.enemies.iter().map(Enemy::location).collect();
        let tick = self.ticks;
        let map = &self.map;

        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            if !enemy.is_due(tick) {
                continue;
            }
            let occupied = &positions;
            let next = enemy.plan_step(
                &players,
                |cell| {
                    map.is_valid_position(cell)
                        && !occupied
                            .iter()
                            .enumerate()
                            .any(|(other, position)| other != index && *position == cell)
                },
                &mut rng,
            );
            if let Some(next) = next {
                enemy.set_location(next);
                positions[index] = next;
            }
        }
    }

    fn drift_fruits(&mut self) {
        let tick = self.ticks;
        if !self.fruits.iter().any(|fruit| fruit.is_drift_due(tick)) {
            return;
        }

        let players = self.live_player_locations();
        let mut rng = self.tick_rng(FRUIT_STREAM);
        for index in 0..self.fruits.len() {
            if !self.fruits[index].is_drift_due(tick) {
                continue;
            }
            let Some(direction) = Direction::ALL
                .get(rng.gen_range(0..Direction::ALL.len()))
                .copied()
            else {
                continue;
            };
            let target = self.fruits[index].location().step(direction);
            let blocked = !self.map.is_valid_position(target)
                || players.contains(&target)
                || self
                    .fruits
                    .iter()
                    .any(|fruit| !fruit.is_collected() && fruit.location() == target);
            if !blocked {
                self.fruits[index].set_location(target);
            }
        }
    }

    fn resolve_enemy_contacts(&mut self) {
        for slot in [PlayerSlot::One, PlayerSlot::Two] {
            let Some(location) = self
                .player(slot)
                .filter(|player| player.is_alive())
                .map(IceCream::location)
            else {
                continue;
            };
            if self
                .enemies
                .iter()
                .any(|enemy| enemy.collides_with_player(location))
            {
                self.kill(slot, "enemy contact");
            }
        }
    }

    /// Captures everything needed to resume the level exactly.
    ///
    /// The returned state carries a zero `total_score`; callers tracking
    /// cross-level totals fill it in.
    #[must_use]
    pub fn capture(&self) -> GameState {
        GameState {
            level_number: self.number(),
            total_score: 0,
            players: self
                .players()
                .zip(self.scores)
                .map(|(player, score)| PlayerState {
                    score,
                    location: player.location(),
                    alive: player.is_alive(),
                    facing: player.facing(),
                })
                .collect(),
            collected_fruits: self
                .fruits
                .iter()
                .enumerate()
                .filter(|(_, fruit)| fruit.is_collected())
                .map(|(index, _)| index)
                .collect(),
            fruit_locations: self.fruits.iter().map(Fruit::location).collect(),
            enemies: self
                .enemies
                .iter()
                .map(|enemy| EnemyState {
                    location: enemy.location(),
                    heading: enemy.heading(),
                })
                .collect(),
            remaining_millis: u64::try_from(self.remaining.as_millis()).unwrap_or(u64::MAX),
            ticks: self.ticks,
            ice_walls: self.map.ice_walls(),
            extinguished_campfires: self
                .map
                .obstacles()
                .filter(|obstacle| obstacle.lit() == Some(false))
                .map(Obstacle::location)
                .collect(),
        }
    }

    /// Restarts the level and applies a previously captured state.
    ///
    /// The state is checked against the level before anything changes: a
    /// save that places entities on blocked or shared cells, or ice on walls
    /// or outside the grid, is rejected and the level is left untouched.
    pub fn restore(&mut self, state: &GameState) -> Result<(), LevelError> {
        if state.level_number != self.number() {
            return Err(LevelError::LevelMismatch {
                expected: self.number(),
                found: state.level_number,
            });
        }
        ensure_roster("player", self.players().count(), state.players.len())?;
        ensure_roster("fruit", self.fruits.len(), state.fruit_locations.len())?;
        ensure_roster("enemy", self.enemies.len(), state.enemies.len())?;
        if let Some(index) = state
            .collected_fruits
            .iter()
            .copied()
            .find(|index| *index >= self.fruits.len())
        {
            return Err(LevelError::UnknownFruit(index));
        }

        let mut restored = Self::assemble(self.blueprint.clone(), self.config.clone());
        for (slot, saved) in [PlayerSlot::One, PlayerSlot::Two]
            .into_iter()
            .zip(&state.players)
        {
            if let Some(player) = restored.player_mut(slot) {
                player.restore(saved.location, saved.alive, saved.facing);
            }
            restored.scores[slot.index()] = saved.score;
        }
        for (fruit, location) in restored.fruits.iter_mut().zip(&state.fruit_locations) {
            fruit.set_location(*location);
        }
        for index in &state.collected_fruits {
            if let Some(fruit) = restored.fruits.get_mut(*index) {
                fruit.mark_collected();
            }
        }
        for (enemy, saved) in restored.enemies.iter_mut().zip(&state.enemies) {
            enemy.restore(saved.location, saved.heading);
        }

        restored.map.clear_ice_walls();
        for cell in &state.ice_walls {
            if !restored.map.add_ice_wall(*cell) && !restored.map.has_ice_wall(*cell) {
                return Err(LevelError::BlockedSpawn {
                    entity: "ice",
                    location: *cell,
                });
            }
        }
        for cell in &state.extinguished_campfires {
            if let Some(campfire) = restored.map.obstacle_at_mut(*cell) {
                let _ = campfire.extinguish();
            }
        }

        restored.remaining = Duration::from_millis(state.remaining_millis);
        restored.ticks = state.ticks;
        let ticks = restored.ticks;
        for fruit in &mut restored.fruits {
            fruit.refresh_spines(ticks);
        }

        restored.validate_restored()?;
        *self = restored;
        Ok(())
    }
}

fn ensure_open(map: &Map, entity: &'static str, location: Location) -> Result<(), LevelError> {
    if map.is_valid_position(location) {
        Ok(())
    } else {
        Err(LevelError::BlockedSpawn { entity, location })
    }
}

fn ensure_in_bounds(
    map: &Map,
    entity: &'static str,
    location: Location,
) -> Result<(), LevelError> {
    if map.in_bounds(location) {
        Ok(())
    } else {
        Err(LevelError::BlockedSpawn { entity, location })
    }
}

fn ensure_unique(
    taken: &[Location],
    entity: &'static str,
    location: Location,
) -> Result<(), LevelError> {
    if taken.contains(&location) {
        Err(LevelError::OverlappingSpawn { entity, location })
    } else {
        Ok(())
    }
}

fn ensure_roster(roster: &'static str, expected: usize, found: usize) -> Result<(), LevelError> {
    if expected == found {
        Ok(())
    } else {
        Err(LevelError::RosterMismatch {
            roster,
            expected,
            found,
        })
    }
}
