use frostbite_core::{CellKind, EnemyKind, FruitKind, Location, PlayerSlot};
use frostbite_world::{
    query, HazardEffect, HazardPolicy, IceCream, Level, LevelBlueprint, LevelConfig, LevelError,
    LevelStatus,
};

fn player_location(level: &Level, slot: PlayerSlot) -> Location {
    level
        .player(slot)
        .map(IceCream::location)
        .expect("player present")
}

fn is_alive(level: &Level, slot: PlayerSlot) -> bool {
    level.player(slot).is_some_and(IceCream::is_alive)
}

/// Bordered arena whose player sits in a sealed two-cell pocket at the top
/// left, so enemies can roam indefinitely without ending the level.
fn sealed_pocket_arena() -> LevelBlueprint {
    LevelBlueprint::bordered(1, 12, 12, Location::new(1, 1))
        .with_fruit(FruitKind::Banana, Location::new(2, 1))
        .with_wall(Location::new(3, 1))
        .with_wall(Location::new(1, 2))
        .with_wall(Location::new(2, 2))
        .with_fruit(FruitKind::Cherry, Location::new(8, 8))
        .with_fruit(FruitKind::Pineapple, Location::new(4, 9))
        .with_enemy(EnemyKind::Troll, Location::new(5, 5))
        .with_enemy(EnemyKind::Troll, Location::new(5, 7))
        .with_enemy(EnemyKind::Maceta, Location::new(6, 6))
        .with_enemy(EnemyKind::CalamarNaranja, Location::new(8, 3))
        .with_enemy(EnemyKind::Narval, Location::new(9, 9))
        .with_ice(Location::new(7, 5))
        .with_time_limit(1_000)
}

#[test]
fn player_moves_north_on_bordered_level() {
    let mut level = LevelBlueprint::bordered(1, 15, 15, Location::new(7, 7))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .build()
        .expect("level builds");

    assert!(level.move_player(PlayerSlot::One, 0, -1));

    let info = query::player_info(&level, PlayerSlot::One).expect("player info");
    assert_eq!((info.x, info.y), (7, 6));
    assert!(info.alive);
    assert_eq!(info.color, "vanilla");
    assert_eq!(info.facing, (0, -1));
}

#[test]
fn walls_reject_movement() {
    let mut level = LevelBlueprint::bordered(1, 5, 5, Location::new(1, 1))
        .with_fruit(FruitKind::Banana, Location::new(3, 3))
        .build()
        .expect("level builds");

    assert!(!level.move_player(PlayerSlot::One, -1, 0));
    assert!(!level.move_player(PlayerSlot::One, 0, -1));
    assert_eq!(player_location(&level, PlayerSlot::One), Location::new(1, 1));
}

#[test]
fn collecting_banana_awards_points_once() {
    let mut level = LevelBlueprint::bordered(1, 8, 8, Location::new(2, 4))
        .with_fruit(FruitKind::Banana, Location::new(2, 2))
        .with_fruit(FruitKind::Grapes, Location::new(5, 5))
        .build()
        .expect("level builds");

    assert!(level.move_player(PlayerSlot::One, 0, -1));
    assert!(level.move_player(PlayerSlot::One, 0, -1));

    assert_eq!(level.count_collected_fruits(), 1);
    assert_eq!(level.score(PlayerSlot::One), FruitKind::Banana.points());

    assert!(level.move_player(PlayerSlot::One, 0, 1));
    assert!(level.move_player(PlayerSlot::One, 0, -1));
    assert_eq!(
        level.score(PlayerSlot::One),
        FruitKind::Banana.points(),
        "revisiting a collected fruit must not pay out again"
    );
}

#[test]
fn collecting_every_fruit_completes_the_level() {
    let mut level = LevelBlueprint::bordered(1, 6, 6, Location::new(1, 1))
        .with_fruit(FruitKind::Grapes, Location::new(2, 1))
        .build()
        .expect("level builds");

    assert!(level.move_player(PlayerSlot::One, 1, 0));
    assert!(level.is_completed());
    assert!(!level.is_game_over());
    assert_eq!(level.status(), LevelStatus::Completed);

    let ticks = level.ticks();
    level.advance();
    assert_eq!(level.ticks(), ticks, "finished levels stop ticking");
    assert!(!level.move_player(PlayerSlot::One, 1, 0));
}

#[test]
fn ice_line_then_break_leaves_cell_free() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(2, 4))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .build()
        .expect("level builds");

    let placed = level.create_ice_line(PlayerSlot::One, 1, 0);
    assert_eq!(placed, 6, "line runs to the border");
    assert!(level.map().has_ice_wall(Location::new(3, 4)));

    let removed = level.break_ice_line(PlayerSlot::One, 1, 0);
    assert_eq!(removed, placed);
    assert!(!level.map().has_ice_wall(Location::new(3, 4)));
    assert!(level.map().ice_walls().is_empty());
}

#[test]
fn ice_blocks_movement() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(2, 4))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .build()
        .expect("level builds");

    let _ = level.create_ice_line(PlayerSlot::One, 1, 0);
    assert!(!level.move_player(PlayerSlot::One, 1, 0));
    assert_eq!(player_location(&level, PlayerSlot::One), Location::new(2, 4));
}

#[test]
fn ice_line_stops_at_first_fruit() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(2, 4))
        .with_fruit(FruitKind::Banana, Location::new(5, 4))
        .build()
        .expect("level builds");

    assert_eq!(level.create_ice_line(PlayerSlot::One, 1, 0), 2);
    assert_eq!(
        level.map().ice_walls(),
        vec![Location::new(3, 4), Location::new(4, 4)]
    );
    assert!(
        !level.map().has_ice_wall(Location::new(6, 4)),
        "cells past the fruit stay free"
    );
}

#[test]
fn ice_line_stops_at_first_enemy() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(2, 2))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .with_enemy(EnemyKind::Maceta, Location::new(2, 5))
        .build()
        .expect("level builds");

    assert_eq!(level.create_ice_line(PlayerSlot::One, 0, 1), 2);
    assert!(!level.map().has_ice_wall(Location::new(2, 5)));
    assert!(!level.map().has_ice_wall(Location::new(2, 6)));
}

#[test]
fn ice_extinguishes_campfires_and_melts_on_hot_tiles() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(2, 2))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .with_campfire(Location::new(4, 2))
        .with_hot_tile(Location::new(2, 5))
        .build()
        .expect("level builds");

    assert_eq!(level.create_ice_line(PlayerSlot::One, 1, 0), 6);
    let campfire = level
        .map()
        .obstacle_at(Location::new(4, 2))
        .expect("campfire present");
    assert_eq!(campfire.lit(), Some(false));

    assert_eq!(level.create_ice_line(PlayerSlot::One, 0, 1), 2);
    assert!(!level.map().has_ice_wall(Location::new(2, 5)));
    assert_eq!(level.map().cell_kind(Location::new(2, 5)), CellKind::HotTile);
}

#[test]
fn lit_campfire_kills_by_default() {
    let mut level = LevelBlueprint::bordered(1, 8, 8, Location::new(2, 2))
        .with_fruit(FruitKind::Banana, Location::new(5, 5))
        .with_campfire(Location::new(3, 2))
        .build()
        .expect("level builds");

    assert!(level.move_player(PlayerSlot::One, 1, 0));
    assert!(!is_alive(&level, PlayerSlot::One));
    assert!(level.is_game_over());
}

#[test]
fn hot_tile_penalty_saturates() {
    let mut level = LevelBlueprint::bordered(1, 8, 8, Location::new(1, 2))
        .with_fruit(FruitKind::Banana, Location::new(3, 2))
        .with_fruit(FruitKind::Grapes, Location::new(6, 6))
        .with_hot_tile(Location::new(2, 2))
        .with_hot_tile(Location::new(4, 2))
        .build()
        .expect("level builds");

    assert!(level.move_player(PlayerSlot::One, 1, 0));
    assert_eq!(level.score(PlayerSlot::One), 0);
    assert!(level.move_player(PlayerSlot::One, 1, 0));
    assert_eq!(level.score(PlayerSlot::One), 100);
    assert!(level.move_player(PlayerSlot::One, 1, 0));
    assert_eq!(level.score(PlayerSlot::One), 50);
    assert!(is_alive(&level, PlayerSlot::One));
}

#[test]
fn hazard_policy_is_pluggable() {
    let mut level = LevelBlueprint::bordered(1, 8, 8, Location::new(2, 2))
        .with_fruit(FruitKind::Banana, Location::new(5, 5))
        .with_campfire(Location::new(3, 2))
        .with_hot_tile(Location::new(4, 2))
        .build()
        .expect("level builds");
    level.set_hazard_policy(HazardPolicy {
        hot_tile: HazardEffect::Kill,
        campfire: HazardEffect::Ignore,
    });

    assert!(level.move_player(PlayerSlot::One, 1, 0));
    assert!(is_alive(&level, PlayerSlot::One), "campfire ignored");
    assert!(level.move_player(PlayerSlot::One, 1, 0));
    assert!(!is_alive(&level, PlayerSlot::One), "hot tile kills");
}

#[test]
fn spined_cactus_kills_and_stays_uncollected() {
    let mut level = LevelBlueprint::bordered(1, 8, 8, Location::new(3, 3))
        .with_fruit(FruitKind::Cactus, Location::new(3, 4))
        .build()
        .expect("level builds");

    for _ in 0..5 {
        level.advance();
    }
    assert!(level.fruits()[0].is_spined());

    assert!(level.move_player(PlayerSlot::One, 0, 1));
    assert!(!is_alive(&level, PlayerSlot::One));
    assert!(!level.fruits()[0].is_collected());
    assert_eq!(level.score(PlayerSlot::One), 0);
}

#[test]
fn bare_cactus_is_collectable() {
    let mut level = LevelBlueprint::bordered(1, 8, 8, Location::new(3, 3))
        .with_fruit(FruitKind::Cactus, Location::new(3, 4))
        .build()
        .expect("level builds");

    assert!(level.move_player(PlayerSlot::One, 0, 1));
    assert!(is_alive(&level, PlayerSlot::One));
    assert_eq!(level.score(PlayerSlot::One), FruitKind::Cactus.points());
}

#[test]
fn stepping_onto_enemy_ends_the_game() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(5, 5))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .with_enemy(EnemyKind::Maceta, Location::new(6, 5))
        .build()
        .expect("level builds");

    assert!(
        level.move_player(PlayerSlot::One, 1, 0),
        "the move applies even though it is fatal"
    );
    assert!(!is_alive(&level, PlayerSlot::One));
    assert!(level.is_game_over());
    assert_eq!(level.status(), LevelStatus::GameOver);
}

#[test]
fn patrolling_enemy_kills_idle_player() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(5, 5))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .with_enemy(EnemyKind::Troll, Location::new(3, 5))
        .build()
        .expect("level builds");

    for _ in 0..4 {
        level.advance();
    }

    assert!(!is_alive(&level, PlayerSlot::One));
    assert!(level.is_game_over());
}

#[test]
fn dead_player_cannot_move() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(5, 5))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .with_enemy(EnemyKind::Maceta, Location::new(6, 5))
        .build()
        .expect("level builds");
    assert!(level.move_player(PlayerSlot::One, 1, 0));
    let location = player_location(&level, PlayerSlot::One);

    for (dx, dy) in [(0, 1), (0, -1), (-1, 0), (1, 0)] {
        assert!(!level.move_player(PlayerSlot::One, dx, dy));
        assert_eq!(player_location(&level, PlayerSlot::One), location);
    }
    assert_eq!(level.create_ice_line(PlayerSlot::One, -1, 0), 0);
}

#[test]
fn pause_freezes_movement_and_time() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(5, 5))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .with_enemy(EnemyKind::Troll, Location::new(2, 8))
        .build()
        .expect("level builds");

    level.pause();
    assert_eq!(level.status(), LevelStatus::Paused);
    let remaining = level.remaining();
    let enemies = query::enemy_infos(&level);

    assert!(!level.move_player(PlayerSlot::One, 1, 0));
    assert_eq!(level.create_ice_line(PlayerSlot::One, 1, 0), 0);
    level.advance();
    assert_eq!(level.remaining(), remaining);
    assert_eq!(level.ticks(), 0);
    assert_eq!(query::enemy_infos(&level), enemies);

    level.resume();
    assert!(level.move_player(PlayerSlot::One, 1, 0));
    level.advance();
    assert!(level.remaining() < remaining);
}

#[test]
fn running_out_of_time_ends_the_game() {
    let mut level = LevelBlueprint::bordered(1, 8, 8, Location::new(3, 3))
        .with_fruit(FruitKind::Banana, Location::new(1, 1))
        .with_time_limit(3)
        .build()
        .expect("level builds");

    for _ in 0..3 {
        assert!(!level.is_time_expired());
        level.advance();
    }

    assert!(level.is_time_expired());
    assert_eq!(level.remaining_seconds(), 0);
    assert!(level.is_game_over());
    assert!(!level.is_completed());

    level.advance();
    assert_eq!(level.ticks(), 3);
}

#[test]
fn enemies_never_overlap_or_enter_blocked_cells() {
    let mut level = sealed_pocket_arena().build().expect("level builds");

    for _ in 0..200 {
        level.advance();
        let locations: Vec<Location> = level.enemies().iter().map(|e| e.location()).collect();
        for (index, location) in locations.iter().enumerate() {
            assert!(
                level.map().is_valid_position(*location),
                "enemy {index} entered blocked cell {location:?}"
            );
            assert!(
                !locations[index + 1..].contains(location),
                "enemies share cell {location:?}"
            );
        }
    }

    assert_eq!(level.status(), LevelStatus::Playing);
}

#[test]
fn capture_and_restore_replay_identically() {
    let blueprint = sealed_pocket_arena();
    let mut original = blueprint.build().expect("level builds");
    for _ in 0..7 {
        original.advance();
    }
    let state = original.capture();

    let mut resumed = blueprint.build().expect("level builds");
    resumed.restore(&state).expect("state restores");
    assert_eq!(resumed.capture(), state);

    for _ in 0..25 {
        original.advance();
        resumed.advance();
    }

    assert_eq!(query::enemy_infos(&resumed), query::enemy_infos(&original));
    assert_eq!(query::fruit_infos(&resumed), query::fruit_infos(&original));
    assert_eq!(query::player_infos(&resumed), query::player_infos(&original));
    assert_eq!(resumed.remaining(), original.remaining());
}

#[test]
fn restore_rejects_foreign_saves() {
    let mut level = sealed_pocket_arena().build().expect("level builds");
    let mut state = level.capture();
    state.level_number = 4;
    assert_eq!(
        level.restore(&state),
        Err(LevelError::LevelMismatch {
            expected: 1,
            found: 4
        })
    );

    let mut state = level.capture();
    let _ = state.enemies.pop();
    assert!(matches!(
        level.restore(&state),
        Err(LevelError::RosterMismatch { roster: "enemy", .. })
    ));

    let mut state = level.capture();
    state.collected_fruits.push(99);
    assert_eq!(level.restore(&state), Err(LevelError::UnknownFruit(99)));
}

#[test]
fn restore_rejects_saves_that_break_occupancy() {
    let mut level = sealed_pocket_arena().build().expect("level builds");
    let pristine = level.capture();

    let mut state = pristine.clone();
    state.players[0].location = Location::new(0, 0);
    assert_eq!(
        level.restore(&state),
        Err(LevelError::BlockedSpawn {
            entity: "player",
            location: Location::new(0, 0)
        })
    );

    let mut state = pristine.clone();
    state.ice_walls.push(Location::new(1, 1));
    assert_eq!(
        level.restore(&state),
        Err(LevelError::BlockedSpawn {
            entity: "player",
            location: Location::new(1, 1)
        })
    );

    let mut state = pristine.clone();
    state.ice_walls.push(Location::new(3, 1));
    assert_eq!(
        level.restore(&state),
        Err(LevelError::BlockedSpawn {
            entity: "ice",
            location: Location::new(3, 1)
        })
    );

    let mut state = pristine.clone();
    state.enemies[1].location = state.enemies[0].location;
    assert_eq!(
        level.restore(&state),
        Err(LevelError::OverlappingSpawn {
            entity: "enemy",
            location: Location::new(5, 5)
        })
    );

    let mut state = pristine.clone();
    state.fruit_locations[1] = Location::new(20, 20);
    assert_eq!(
        level.restore(&state),
        Err(LevelError::BlockedSpawn {
            entity: "fruit",
            location: Location::new(20, 20)
        })
    );

    assert_eq!(level.capture(), pristine);
    assert_eq!(level.status(), LevelStatus::Playing);
}

#[test]
fn restore_accepts_an_enemy_standing_over_a_dead_player() {
    let mut level = sealed_pocket_arena().build().expect("level builds");
    let mut state = level.capture();
    state.players[0].alive = false;
    state.enemies[0].location = Location::new(1, 1);

    level.restore(&state).expect("state restores");
    assert!(!is_alive(&level, PlayerSlot::One));
    assert_eq!(level.status(), LevelStatus::GameOver);
}

#[test]
fn blueprint_terrain_outside_the_grid_is_rejected() {
    let wall = LevelBlueprint::bordered(1, 6, 6, Location::new(1, 1))
        .with_fruit(FruitKind::Banana, Location::new(2, 2))
        .with_wall(Location::new(6, 2))
        .build();
    assert!(matches!(
        wall,
        Err(LevelError::BlockedSpawn { entity: "wall", .. })
    ));

    let ice_on_wall = LevelBlueprint::bordered(1, 6, 6, Location::new(1, 1))
        .with_fruit(FruitKind::Banana, Location::new(2, 2))
        .with_ice(Location::new(0, 3))
        .build();
    assert_eq!(
        ice_on_wall.err(),
        Some(LevelError::BlockedSpawn {
            entity: "ice",
            location: Location::new(0, 3)
        })
    );

    let campfire = LevelBlueprint::bordered(1, 6, 6, Location::new(1, 1))
        .with_fruit(FruitKind::Banana, Location::new(2, 2))
        .with_campfire(Location::new(-1, 0))
        .build();
    assert!(matches!(
        campfire,
        Err(LevelError::BlockedSpawn { entity: "campfire", .. })
    ));
}

#[test]
fn zero_length_ticks_still_run_the_clock_down() {
    let mut level = LevelBlueprint::bordered(1, 6, 6, Location::new(1, 1))
        .with_fruit(FruitKind::Banana, Location::new(4, 4))
        .with_time_limit(1)
        .build_with(LevelConfig {
            tick_millis: 0,
            ..LevelConfig::default()
        })
        .expect("level builds");
    for _ in 0..1_000 {
        level.advance();
    }
    assert!(level.is_time_expired());
    assert_eq!(level.status(), LevelStatus::GameOver);
}

#[test]
fn two_players_share_the_level_but_not_cells() {
    let mut level = LevelBlueprint::bordered(1, 10, 10, Location::new(2, 2))
        .with_player_two(Location::new(3, 2))
        .with_fruit(FruitKind::Banana, Location::new(3, 5))
        .with_enemy(EnemyKind::Maceta, Location::new(7, 7))
        .build()
        .expect("level builds");
    assert!(level.has_two_players());

    assert!(!level.move_player(PlayerSlot::One, 1, 0), "cell held by player two");
    assert!(level.move_player(PlayerSlot::Two, 0, 1));
    assert!(level.move_player(PlayerSlot::Two, 0, 1));
    assert!(level.move_player(PlayerSlot::Two, 0, 1));
    assert_eq!(level.score(PlayerSlot::Two), FruitKind::Banana.points());
    assert_eq!(level.score(PlayerSlot::One), 0);
    assert_eq!(level.level_score(), FruitKind::Banana.points());

    let infos = query::player_infos(&level);
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[1].color, "chocolate");
}

#[test]
fn solo_level_ignores_player_two() {
    let mut level = LevelBlueprint::bordered(1, 6, 6, Location::new(2, 2))
        .with_fruit(FruitKind::Banana, Location::new(4, 4))
        .build()
        .expect("level builds");

    assert!(!level.has_two_players());
    assert!(!level.move_player(PlayerSlot::Two, 1, 0));
    assert!(query::player_info(&level, PlayerSlot::Two).is_none());
}

#[test]
fn grid_projection_is_height_by_width() {
    let level = LevelBlueprint::bordered(1, 7, 5, Location::new(1, 1))
        .with_fruit(FruitKind::Banana, Location::new(2, 2))
        .with_ice(Location::new(3, 3))
        .with_campfire(Location::new(4, 3))
        .build()
        .expect("level builds");

    let codes = query::grid_codes(&level);
    assert_eq!(codes.len(), 5);
    assert!(codes.iter().all(|row| row.len() == 7));
    assert_eq!(codes[0][0], CellKind::Wall.code());
    assert_eq!(codes[3][3], CellKind::Ice.code());
    assert_eq!(codes[3][4], CellKind::Campfire.code());
    assert_eq!(codes[2][2], CellKind::Empty.code());

    let obstacles = query::obstacle_infos(&level);
    assert_eq!(obstacles.len(), 1);
    assert_eq!(obstacles[0].lit, Some(true));
}
