//! Enemy patrol: walk at a constant speed, turn around at walls.

use crate::config::Config;
use crate::entities::{Body, Enemy, Platform};
use crate::physics;

/// A new enemy occupying one tile, initially walking left.
pub fn spawn(x: f32, y: f32, config: &Config) -> Enemy {
    let tile = config.level.tile_size;
    let mut body = Body::at(x, y, tile, tile);
    body.vx = -config.physics.enemy_speed;
    Enemy { body }
}

pub fn step(enemy: &mut Enemy, platforms: &[Platform], gravity: f32) {
    physics::vertical_phase(&mut enemy.body, gravity, platforms);
    if physics::horizontal_phase(&mut enemy.body, platforms) {
        enemy.body.vx = -enemy.body.vx;
    }
}

/// A contact is a stomp when the player is falling and its feet are above the
/// enemy's centre, give or take `tolerance`.
pub fn is_stomp(player: &Body, enemy: &Body, tolerance: f32) -> bool {
    player.vy > 0.0 && player.bottom() < enemy.center_y() + tolerance
}
