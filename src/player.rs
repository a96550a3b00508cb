//! Player input, motion and the size/invincibility state machine.

use crate::config::Config;
use crate::entities::{Body, InputSnapshot, ItemKind, Platform, PlayerState, SizeState};
use crate::physics;

/// Outcome of an enemy hit that was not a stomp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Damage {
    /// Already invincible; nothing happened.
    Ignored,
    /// Shrank from big to small and gained mercy invincibility.
    Shrunk,
    /// Small and vulnerable: the run is over.
    Fatal,
}

/// A small, vulnerable player with no score at the configured spawn point.
pub fn spawn(config: &Config) -> PlayerState {
    let p = &config.player;
    PlayerState {
        body: Body::at(p.spawn_x, p.spawn_y, p.width, p.small_height),
        is_jumping: false,
        size: SizeState::Small,
        invincible_timer: 0,
        score: 0,
    }
}

/// Turn held keys into velocity. Returns `true` if a jump started.
pub fn apply_input(player: &mut PlayerState, input: &InputSnapshot, config: &Config) -> bool {
    let speed = config.physics.player_speed;
    player.body.vx = 0.0;
    if input.left {
        player.body.vx = -speed;
    }
    if input.right {
        player.body.vx = speed;
    }

    if input.jump && !player.is_jumping {
        player.body.vy = config.physics.jump_force;
        player.is_jumping = true;
        return true;
    }
    false
}

/// Run both collision phases, keep the player inside the level horizontally,
/// then count down invincibility.
pub fn step(player: &mut PlayerState, platforms: &[Platform], level_width: f32, config: &Config) {
    let contact = physics::vertical_phase(&mut player.body, config.physics.gravity, platforms);
    if contact.landed {
        player.is_jumping = false;
    }

    physics::horizontal_phase(&mut player.body, platforms);
    let max_x = (level_width - player.body.w).max(0.0);
    player.body.x = player.body.x.clamp(0.0, max_x);

    tick_invincibility(player);
}

/// One frame of invincibility countdown. Reaching zero ends it immediately.
pub fn tick_invincibility(player: &mut PlayerState) {
    player.invincible_timer = player.invincible_timer.saturating_sub(1);
}

pub fn apply_power_up(player: &mut PlayerState, kind: ItemKind, config: &Config) {
    match kind {
        ItemKind::Mushroom => {
            resize(player, SizeState::Big, config);
            player.score = player.score.saturating_add(config.player.mushroom_score);
        }
        ItemKind::Star => {
            player.invincible_timer = config.star_frames();
            player.score = player.score.saturating_add(config.player.star_score);
        }
    }
    tracing::debug!(?kind, score = player.score, "power-up collected");
}

/// Side or bottom contact with an enemy.
pub fn take_damage(player: &mut PlayerState, config: &Config) -> Damage {
    if player.is_invincible() {
        return Damage::Ignored;
    }
    match player.size {
        SizeState::Big => {
            resize(player, SizeState::Small, config);
            player.invincible_timer = config.mercy_frames();
            tracing::debug!("player shrank");
            Damage::Shrunk
        }
        SizeState::Small => Damage::Fatal,
    }
}

/// Change size keeping the bottom edge where it is.
pub fn resize(player: &mut PlayerState, size: SizeState, config: &Config) {
    let height = match size {
        SizeState::Small => config.player.small_height,
        SizeState::Big => config.player.big_height,
    };
    let bottom = player.body.bottom();
    player.body.h = height;
    player.body.y = bottom - height;
    player.size = size;
}
