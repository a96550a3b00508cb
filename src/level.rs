//! Procedural level generation and the grid-to-entity build step.
//!
//! Generation consumes the RNG in a fixed row-major scan, so the same seed
//! always yields the same grid.

use rand::Rng;

use crate::config::{Config, LevelConfig};
use crate::enemy;
use crate::entities::{Body, Cell, Enemy, Item, ItemKind, Platform, PlatformKind, TileGrid};

/// Everything a level build produces from a grid.
#[derive(Clone, Debug, Default)]
pub struct LevelEntities {
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
}

/// Grid width for a level; later levels are longer.
pub fn columns_for(level_number: u32, level: &LevelConfig) -> usize {
    level.base_width + level_number as usize * level.width_step
}

/// Generate a `width` x `height` grid.
///
/// The bottom row is floor. Every other cell draws, in order, a pipe, an enemy
/// spawn, a mushroom and a star, each with a fresh roll; the first success
/// wins and a cell with no success stays empty. Finally the last column of the
/// bottom `flag_rows` rows becomes the flag.
pub fn generate(width: usize, height: usize, level: &LevelConfig, rng: &mut impl Rng) -> TileGrid {
    assert!(width > 0 && height > 0, "level grid must be non-empty");

    let mut grid = TileGrid::empty(width, height);
    for row in 0..height {
        for col in 0..width {
            let cell = if row == height - 1 {
                Cell::Wall
            } else {
                roll_cell(level, rng)
            };
            grid.set(col, row, cell);
        }
    }

    for row in height.saturating_sub(level.flag_rows)..height {
        grid.set(width - 1, row, Cell::Flag);
    }
    grid
}

fn roll_cell(level: &LevelConfig, rng: &mut impl Rng) -> Cell {
    let table = [
        (level.pipe_chance, Cell::Pipe),
        (level.enemy_chance, Cell::EnemySpawn),
        (level.mushroom_chance, Cell::MushroomSpawn),
        (level.star_chance, Cell::StarSpawn),
    ];
    table
        .into_iter()
        .find(|&(chance, _)| rng.gen::<f64>() < chance)
        .map(|(_, cell)| cell)
        .unwrap_or(Cell::Empty)
}

/// Instantiate one entity per non-empty cell at `(col * tile, row * tile)`.
pub fn build(grid: &TileGrid, config: &Config) -> LevelEntities {
    let tile = config.level.tile_size;
    let mut out = LevelEntities::default();

    for (col, row, cell) in grid.iter() {
        let x = col as f32 * tile;
        let y = row as f32 * tile;
        let platform = |kind| Platform {
            body: Body::at(x, y, tile, tile),
            kind,
        };
        let item = |kind| Item {
            body: Body::at(x, y, tile, tile),
            kind,
        };
        match cell {
            Cell::Empty => {}
            Cell::Wall => out.platforms.push(platform(PlatformKind::Brick)),
            Cell::Pipe => out.platforms.push(platform(PlatformKind::Pipe)),
            Cell::Flag => out.platforms.push(platform(PlatformKind::Flag)),
            Cell::EnemySpawn => out.enemies.push(enemy::spawn(x, y, config)),
            Cell::MushroomSpawn => out.items.push(item(ItemKind::Mushroom)),
            Cell::StarSpawn => out.items.push(item(ItemKind::Star)),
        }
    }

    assert!(!out.platforms.is_empty(), "level has no platforms");
    out
}
