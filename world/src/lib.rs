#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for Frostbite.
//!
//! A [`Level`] binds a [`Map`] to one or two [`IceCream`] avatars, a fruit
//! roster and an enemy roster, and owns the countdown. Presentation layers
//! mutate it through movement, ice and tick operations and read it back
//! through the projections in [`query`].

mod blueprint;
mod config;
mod enemy;
mod fruit;
mod level;
mod map;
mod obstacle;
mod player;

pub use blueprint::{EnemySpawn, FruitSpawn, LevelBlueprint};
pub use config::LevelConfig;
pub use enemy::Enemy;
pub use fruit::Fruit;
pub use level::{Level, LevelError, LevelStatus};
pub use map::Map;
pub use obstacle::{HazardEffect, HazardPolicy, Obstacle};
pub use player::IceCream;

/// Query functions that project live level state into presentation snapshots.
///
/// Snapshots are produced on demand and never stored, so they cannot drift
/// from the level they were taken from.
pub mod query {
    use frostbite_core::{CellKind, EnemyInfo, FruitInfo, ObstacleInfo, PlayerInfo, PlayerSlot};

    use super::{IceCream, Level};

    /// Captures the avatar in the provided slot, if the level hosts one.
    #[must_use]
    pub fn player_info(level: &Level, slot: PlayerSlot) -> Option<PlayerInfo> {
        level.player(slot).map(player_snapshot)
    }

    /// Captures every hosted avatar in slot order.
    #[must_use]
    pub fn player_infos(level: &Level) -> Vec<PlayerInfo> {
        level.players().map(player_snapshot).collect()
    }

    fn player_snapshot(player: &IceCream) -> PlayerInfo {
        let location = player.location();
        PlayerInfo {
            x: location.x(),
            y: location.y(),
            alive: player.is_alive(),
            color: player.flavor().to_owned(),
            facing: player.facing(),
        }
    }

    /// Captures the fruit roster in collection-index order.
    #[must_use]
    pub fn fruit_infos(level: &Level) -> Vec<FruitInfo> {
        level
            .fruits()
            .iter()
            .map(|fruit| FruitInfo {
                type_name: fruit.name(),
                x: fruit.location().x(),
                y: fruit.location().y(),
                collected: fruit.is_collected(),
                points: fruit.point_value(),
                spined: fruit.is_spined(),
            })
            .collect()
    }

    /// Captures the enemy roster in update order.
    #[must_use]
    pub fn enemy_infos(level: &Level) -> Vec<EnemyInfo> {
        level
            .enemies()
            .iter()
            .map(|enemy| EnemyInfo {
                type_name: enemy.type_name(),
                x: enemy.location().x(),
                y: enemy.location().y(),
            })
            .collect()
    }

    /// Captures every hazard in ascending location order.
    #[must_use]
    pub fn obstacle_infos(level: &Level) -> Vec<ObstacleInfo> {
        level
            .map()
            .obstacles()
            .map(|obstacle| ObstacleInfo {
                kind: obstacle.kind(),
                x: obstacle.location().x(),
                y: obstacle.location().y(),
                lit: obstacle.lit(),
            })
            .collect()
    }

    /// Row-major grid of cell classifications, indexed `[y][x]`.
    #[must_use]
    pub fn grid(level: &Level) -> Vec<Vec<CellKind>> {
        level.map().grid()
    }

    /// Row-major grid of numeric cell codes, indexed `[y][x]`.
    #[must_use]
    pub fn grid_codes(level: &Level) -> Vec<Vec<u8>> {
        level
            .map()
            .grid()
            .into_iter()
            .map(|row| row.into_iter().map(CellKind::code).collect())
            .collect()
    }
}
