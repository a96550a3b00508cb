mod common;

use common::seeded_rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tile_runner::config::{Config, LevelConfig};
use tile_runner::entities::*;
use tile_runner::level::{build, columns_for, generate};

fn no_spawns() -> LevelConfig {
    LevelConfig {
        pipe_chance: 0.0,
        enemy_chance: 0.0,
        mushroom_chance: 0.0,
        star_chance: 0.0,
        ..LevelConfig::default()
    }
}

// ── columns_for ───────────────────────────────────────────────────────────────

#[test]
fn later_levels_are_wider() {
    let level = LevelConfig::default();
    assert_eq!(columns_for(1, &level), 35);
    assert_eq!(columns_for(2, &level), 40);
    assert!(columns_for(7, &level) > columns_for(6, &level));
}

// ── generate ──────────────────────────────────────────────────────────────────

#[test]
fn bottom_row_is_floor_except_flag_column() {
    let grid = generate(20, 12, &LevelConfig::default(), &mut seeded_rng());
    for col in 0..19 {
        assert_eq!(grid.get(col, 11), Some(Cell::Wall), "col {col}");
    }
    assert_eq!(grid.get(19, 11), Some(Cell::Flag));
}

#[test]
fn flag_occupies_last_column_of_bottom_rows() {
    let grid = generate(20, 12, &LevelConfig::default(), &mut seeded_rng());
    for row in 9..12 {
        assert_eq!(grid.get(19, row), Some(Cell::Flag));
    }
    assert_eq!(grid.count(Cell::Flag), 3);
}

#[test]
fn zero_chances_leave_only_floor_and_flag() {
    let grid = generate(10, 5, &no_spawns(), &mut seeded_rng());
    assert_eq!(grid.count(Cell::Wall), 9);
    assert_eq!(grid.count(Cell::Flag), 3);
    assert_eq!(grid.count(Cell::Empty), 10 * 5 - 12);
}

#[test]
fn pipe_roll_comes_first() {
    let level = LevelConfig {
        pipe_chance: 1.0,
        enemy_chance: 1.0,
        ..LevelConfig::default()
    };
    let grid = generate(6, 3, &level, &mut seeded_rng());
    assert_eq!(grid.count(Cell::EnemySpawn), 0);
    // 2 rows of pipes, minus the flag cells in the last column
    assert_eq!(grid.count(Cell::Pipe), 6 * 2 - 2);
}

#[test]
fn same_seed_same_grid() {
    let level = LevelConfig::default();
    let a = generate(35, 12, &level, &mut StdRng::seed_from_u64(7));
    let b = generate(35, 12, &level, &mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
}

#[test]
fn different_seeds_usually_differ() {
    let level = LevelConfig::default();
    let a = generate(60, 12, &level, &mut StdRng::seed_from_u64(1));
    let b = generate(60, 12, &level, &mut StdRng::seed_from_u64(2));
    assert_ne!(a, b);
}

#[test]
fn flag_rows_taller_than_grid_are_clamped() {
    let level = LevelConfig {
        flag_rows: 10,
        ..no_spawns()
    };
    let grid = generate(4, 2, &level, &mut seeded_rng());
    assert_eq!(grid.count(Cell::Flag), 2);
}

// ── build ─────────────────────────────────────────────────────────────────────

#[test]
fn build_places_entities_on_tile_coordinates() {
    let config = Config::default();
    let grid = TileGrid::from_rows(&["E M S", "  P  ", "WWWWF"]).unwrap();
    let built = build(&grid, &config);

    assert_eq!(built.enemies.len(), 1);
    assert_eq!(built.enemies[0].body, {
        let mut b = Body::at(0.0, 0.0, 50.0, 50.0);
        b.vx = -config.physics.enemy_speed;
        b
    });

    assert_eq!(built.items.len(), 2);
    assert_eq!(built.items[0].kind, ItemKind::Mushroom);
    assert_eq!((built.items[0].body.x, built.items[0].body.y), (100.0, 0.0));
    assert_eq!(built.items[1].kind, ItemKind::Star);
    assert_eq!(built.items[1].body.x, 200.0);

    // Row-major: the pipe on row 1 comes before the floor on row 2
    assert_eq!(built.platforms.len(), 6);
    assert_eq!(built.platforms[0].kind, PlatformKind::Pipe);
    assert_eq!((built.platforms[0].body.x, built.platforms[0].body.y), (100.0, 50.0));
    assert_eq!(built.platforms[5].kind, PlatformKind::Flag);
    assert_eq!(built.platforms[5].body.x, 200.0);
    assert!(built
        .platforms
        .iter()
        .all(|p| p.body.vx == 0.0 && p.body.vy == 0.0));
}

#[test]
fn build_uses_configured_tile_size() {
    let mut config = Config::default();
    config.level.tile_size = 16.0;
    let grid = TileGrid::from_rows(&[" M", "WW"]).unwrap();
    let built = build(&grid, &config);
    assert_eq!(built.items[0].body, Body::at(16.0, 0.0, 16.0, 16.0));
    assert_eq!(built.platforms[1].body.x, 16.0);
}

#[test]
#[should_panic(expected = "no platforms")]
fn build_rejects_level_without_platforms() {
    let grid = TileGrid::from_rows(&["  ", " E"]).unwrap();
    let _ = build(&grid, &Config::default());
}
