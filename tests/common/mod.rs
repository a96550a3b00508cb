#![allow(dead_code)]

use tile_runner::config::Config;
use tile_runner::entities::{
    Body, Camera, Enemy, GameState, Item, ItemKind, SessionState, TileGrid,
};
use tile_runner::{enemy, level, player};

use rand::rngs::StdRng;
use rand::SeedableRng;

pub const TILE: f32 = 50.0;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Three empty rows over a floor: the floor top is at y = 150.
pub fn flat_rows(cols: usize) -> Vec<String> {
    let mut rows = vec![" ".repeat(cols); 3];
    rows.push("W".repeat(cols));
    rows
}

/// A playing session built from a hand-authored grid, with a small player
/// standing on the floor at x = 100.
pub fn make_state(rows: &[String], config: &Config) -> GameState {
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let grid = TileGrid::from_rows(&refs).expect("valid grid");
    let built = level::build(&grid, config);
    let level_width = grid.width() as f32 * TILE;

    let mut p = player::spawn(config);
    p.body.x = 100.0;
    p.body.y = floor_top(grid.height()) - p.body.h;

    GameState {
        player: p,
        platforms: built.platforms,
        enemies: built.enemies,
        items: built.items,
        camera: Camera::new(level_width, config.session.view_width),
        level_number: 1,
        level_width,
        status: SessionState::Playing,
        frame: 0,
        events: Vec::new(),
    }
}

pub fn flat_state(cols: usize) -> GameState {
    make_state(&flat_rows(cols), &Config::default())
}

pub fn floor_top(rows: usize) -> f32 {
    (rows - 1) as f32 * TILE
}

pub fn item_at(x: f32, y: f32, kind: ItemKind) -> Item {
    Item {
        body: Body::at(x, y, TILE, TILE),
        kind,
    }
}

pub fn enemy_at(x: f32, y: f32) -> Enemy {
    enemy::spawn(x, y, &Config::default())
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
