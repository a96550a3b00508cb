//! Axis-separated collision resolution against static platforms.
//!
//! The vertical axis is resolved completely before the horizontal one. Each
//! overlapping platform is handled independently in enumeration order, so the
//! last platform to correct a position wins.

use crate::entities::{Body, Platform};

/// What the vertical phase ran into this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerticalContact {
    /// Fell onto a platform top.
    pub landed: bool,
    /// Rose into a platform bottom.
    pub bumped: bool,
}

/// Apply gravity, move along y, and push the body out of any platform it now
/// overlaps. `vy` is zeroed on contact.
pub fn vertical_phase(body: &mut Body, gravity: f32, platforms: &[Platform]) -> VerticalContact {
    body.vy += gravity;
    body.y += body.vy;

    let mut contact = VerticalContact::default();
    for plat in platforms {
        if !body.overlaps(&plat.body) {
            continue;
        }
        if body.vy > 0.0 {
            body.y = plat.body.y - body.h;
            body.vy = 0.0;
            contact.landed = true;
        } else if body.vy < 0.0 {
            body.y = plat.body.bottom();
            body.vy = 0.0;
            contact.bumped = true;
        }
    }
    contact
}

/// Move along x and push the body out sideways. Velocity is left untouched;
/// returns whether any platform was hit so callers can react (enemies turn
/// around, the player just stops).
pub fn horizontal_phase(body: &mut Body, platforms: &[Platform]) -> bool {
    body.x += body.vx;

    let mut hit = false;
    for plat in platforms {
        if !body.overlaps(&plat.body) {
            continue;
        }
        if body.vx > 0.0 {
            body.x = plat.body.x - body.w;
            hit = true;
        } else if body.vx < 0.0 {
            body.x = plat.body.right();
            hit = true;
        }
    }
    hit
}
