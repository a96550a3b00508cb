//! Session orchestration.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the config and, where a level is generated, an RNG) and
//! returns a brand-new `GameState`. Randomness only enters through the
//! injected RNG, so a seeded RNG replays a session exactly.

use rand::Rng;

use crate::config::{CarryOver, Config};
use crate::entities::{
    Body, Camera, GameEvent, GameState, InputSnapshot, ItemKind, PlatformKind, PlayerState,
    SessionState, SizeState, Sprite,
};
use crate::player::Damage;
use crate::{enemy, level, player};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A new session sitting at the menu, with level 1 already built.
pub fn new_session(config: &Config, rng: &mut impl Rng) -> GameState {
    let mut state = build_level(1, player::spawn(config), config, rng);
    state.status = SessionState::Menu;
    state
}

/// Leave the menu and start playing.
pub fn start(state: &GameState) -> GameState {
    match state.status {
        SessionState::Menu => GameState {
            status: SessionState::Playing,
            events: Vec::new(),
            ..state.clone()
        },
        _ => state.clone(),
    }
}

fn build_level(
    level_number: u32,
    mut player: PlayerState,
    config: &Config,
    rng: &mut impl Rng,
) -> GameState {
    let columns = level::columns_for(level_number, &config.level);
    let grid = level::generate(columns, config.level.rows, &config.level, rng);
    let entities = level::build(&grid, config);
    let level_width = columns as f32 * config.level.tile_size;

    tracing::info!(
        level = level_number,
        columns,
        platforms = entities.platforms.len(),
        enemies = entities.enemies.len(),
        items = entities.items.len(),
        "level built"
    );
    tracing::trace!(grid = ?grid.rows(), "level layout");

    player.body.x = config.player.spawn_x;
    player.body.y = config.player.spawn_y;
    player.body.vx = 0.0;
    player.body.vy = 0.0;

    let mut camera = Camera::new(level_width, config.session.view_width);
    camera.update(&player.body);

    GameState {
        player,
        platforms: entities.platforms,
        enemies: entities.enemies,
        items: entities.items,
        camera,
        level_number,
        level_width,
        status: SessionState::Playing,
        frame: 0,
        events: Vec::new(),
    }
}

// ── Level transitions ────────────────────────────────────────────────────────

/// Build the next, wider level after a clear.
///
/// The player returns to the spawn point at rest. Whether score, size and
/// invincibility come along depends on `session.carry_over`.
pub fn advance_level(state: &GameState, config: &Config, rng: &mut impl Rng) -> GameState {
    if state.status != SessionState::LevelCleared {
        return state.clone();
    }

    let player = match config.session.carry_over {
        CarryOver::Persist => state.player.clone(),
        CarryOver::Reset => player::spawn(config),
    };
    let next = build_level(state.level_number + 1, player, config, rng);
    GameState {
        frame: state.frame,
        ..next
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame. Only a `Playing` session moves; any
/// other state comes back unchanged apart from the event list being cleared.
pub fn tick(state: &GameState, input: &InputSnapshot, config: &Config) -> GameState {
    let mut next = GameState {
        events: Vec::new(),
        ..state.clone()
    };
    if state.status != SessionState::Playing {
        return next;
    }
    next.frame += 1;

    // ── 1. Player input & motion ─────────────────────────────────────────────
    if player::apply_input(&mut next.player, input, config) {
        next.events.push(GameEvent::Jump);
    }
    player::step(&mut next.player, &next.platforms, next.level_width, config);
    next.camera.update(&next.player.body);

    // ── 2. Enemies ───────────────────────────────────────────────────────────
    for e in &mut next.enemies {
        enemy::step(e, &next.platforms, config.physics.gravity);
    }

    // ── 3. Item pickups ──────────────────────────────────────────────────────
    let player_box = next.player.body;
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut next.items)
        .into_iter()
        .partition(|item| player_box.overlaps(&item.body));
    next.items = kept;
    for item in taken {
        player::apply_power_up(&mut next.player, item.kind, config);
        next.events.push(GameEvent::PowerUp(item.kind));
    }

    // ── 4. Enemy contacts ────────────────────────────────────────────────────
    resolve_enemy_contacts(&mut next, config);
    if next.status == SessionState::GameOver {
        return next;
    }

    // ── 5. Finish zone ───────────────────────────────────────────────────────
    if next.player.body.x > next.level_width - config.session.finish_zone {
        tracing::info!(
            level = next.level_number,
            score = next.player.score,
            "level cleared"
        );
        next.status = SessionState::LevelCleared;
        next.events.push(GameEvent::LevelCleared);
    }

    next
}

/// Stomp or get hurt by every enemy the player touches.
///
/// Whether the player counts as falling is decided once, before any bounce, so
/// landing across two enemies stomps both.
fn resolve_enemy_contacts(state: &mut GameState, config: &Config) {
    let falling_body = state.player.body;
    let tolerance = config.physics.stomp_tolerance;
    let mut survivors = Vec::with_capacity(state.enemies.len());

    for e in std::mem::take(&mut state.enemies) {
        if state.status == SessionState::GameOver || !state.player.body.overlaps(&e.body) {
            survivors.push(e);
            continue;
        }

        if enemy::is_stomp(&falling_body, &e.body, tolerance) {
            state.player.body.vy = config.physics.stomp_bounce;
            state.player.score = state.player.score.saturating_add(config.player.stomp_score);
            state.events.push(GameEvent::Stomp);
            tracing::debug!(score = state.player.score, "enemy stomped");
            continue;
        }

        match player::take_damage(&mut state.player, config) {
            Damage::Ignored => {}
            Damage::Shrunk => state.events.push(GameEvent::Hit),
            Damage::Fatal => {
                tracing::info!(
                    level = state.level_number,
                    score = state.player.score,
                    "game over"
                );
                state.status = SessionState::GameOver;
                state.events.push(GameEvent::Hit);
                state.events.push(GameEvent::GameOver);
            }
        }
        survivors.push(e);
    }

    state.enemies = survivors;
}

// ── Rendering view ───────────────────────────────────────────────────────────

/// Every body the renderer should draw, back to front, with its sprite.
pub fn drawables(state: &GameState) -> Vec<(Body, Sprite)> {
    let platforms = state.platforms.iter().map(|p| {
        let sprite = match p.kind {
            PlatformKind::Brick => Sprite::Brick,
            PlatformKind::Pipe => Sprite::Pipe,
            PlatformKind::Flag => Sprite::Flag,
        };
        (p.body, sprite)
    });
    let items = state.items.iter().map(|i| {
        let sprite = match i.kind {
            ItemKind::Mushroom => Sprite::Mushroom,
            ItemKind::Star => Sprite::Star,
        };
        (i.body, sprite)
    });
    let enemies = state.enemies.iter().map(|e| (e.body, Sprite::Enemy));
    let player_sprite = match state.player.size {
        SizeState::Small => Sprite::PlayerSmall,
        SizeState::Big => Sprite::PlayerBig,
    };

    platforms
        .chain(items)
        .chain(enemies)
        .chain(std::iter::once((state.player.body, player_sprite)))
        .collect()
}
