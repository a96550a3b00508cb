//! All game entity types. Pure data plus a few geometry accessors; the
//! simulation logic lives in the sibling modules.

use crate::error::GridError;

// ── Tile grid ─────────────────────────────────────────────────────────────────

/// One cell of a generated level map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Wall,
    Pipe,
    EnemySpawn,
    MushroomSpawn,
    StarSpawn,
    Flag,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => 'W',
            Cell::Pipe => 'P',
            Cell::EnemySpawn => 'E',
            Cell::MushroomSpawn => 'M',
            Cell::StarSpawn => 'S',
            Cell::Flag => 'F',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Cell> {
        let cell = match symbol {
            ' ' | '.' => Cell::Empty,
            'W' => Cell::Wall,
            'P' => Cell::Pipe,
            'E' => Cell::EnemySpawn,
            'M' => Cell::MushroomSpawn,
            'S' => Cell::StarSpawn,
            'F' => Cell::Flag,
            _ => return None,
        };
        Some(cell)
    }
}

/// Rectangular map of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// A grid of `width` x `height` empty cells.
    pub fn empty(width: usize, height: usize) -> TileGrid {
        TileGrid {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Parse a hand-authored grid, one string per row (top row first).
    ///
    /// `' '` and `'.'` both mean an empty cell so test layouts stay readable.
    pub fn from_rows(rows: &[&str]) -> Result<TileGrid, GridError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell =
                    Cell::from_symbol(symbol).ok_or(GridError::UnknownSymbol { symbol, row, col })?;
                cells.push(cell);
            }
        }

        Ok(TileGrid {
            width,
            height: rows.len(),
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        assert!(col < self.width && row < self.height, "cell ({col}, {row}) outside grid");
        self.cells[row * self.width + col] = cell;
    }

    /// Cells with their `(col, row)` coordinates in row-major scan order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % self.width, i / self.width, cell))
    }

    /// Render the grid back to one symbol string per row.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box plus velocity. Shared by every entity kind.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Body {
    /// A body at rest.
    pub fn at(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body {
            x,
            y,
            w,
            h,
            vx: 0.0,
            vy: 0.0,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap: boxes that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

// ── Static & dynamic entities ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    Brick,
    Pipe,
    Flag,
}

/// Immovable collision target. Velocity stays zero for the level's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub body: Body,
    pub kind: PlatformKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Mushroom,
    Star,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub body: Body,
    pub kind: ItemKind,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeState {
    Small,
    Big,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub body: Body,
    pub is_jumping: bool,
    pub size: SizeState,
    /// Frames of invincibility left. Zero means vulnerable.
    pub invincible_timer: u32,
    pub score: u32,
}

impl PlayerState {
    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0
    }

    pub fn is_big(&self) -> bool {
        self.size == SizeState::Big
    }
}

// ── Camera ────────────────────────────────────────────────────────────────────

/// Viewport offset. Added to world coordinates to get screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub level_width: f32,
    pub view_width: f32,
}

// ── Frame input & output ─────────────────────────────────────────────────────

/// Held-key snapshot, sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Discrete things that happened during a frame. Consumed by the audio and
/// UI layers; the simulation never waits on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Jump,
    Stomp,
    PowerUp(ItemKind),
    Hit,
    LevelCleared,
    GameOver,
}

/// What the renderer should draw for a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Brick,
    Pipe,
    Flag,
    Enemy,
    Mushroom,
    Star,
    PlayerSmall,
    PlayerBig,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Playing,
    LevelCleared,
    GameOver,
}

/// One play session. Cloneable so the per-frame step can return a new copy
/// without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: PlayerState,
    /// Row-major in grid order; collision resolution iterates in this order.
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub camera: Camera,
    pub level_number: u32,
    pub level_width: f32,
    pub status: SessionState,
    pub frame: u64,
    /// Events emitted by the most recent frame only.
    pub events: Vec<GameEvent>,
}
