//! Horizontal scrolling camera, clamped to the level bounds.

use crate::entities::{Body, Camera};

impl Camera {
    pub fn new(level_width: f32, view_width: f32) -> Camera {
        Camera {
            x: 0.0,
            y: 0.0,
            level_width,
            view_width,
        }
    }

    /// Centre on `target`, never showing anything before x = 0 or past the
    /// level end.
    pub fn update(&mut self, target: &Body) {
        self.x = follow(target.x, self.level_width, self.view_width);
        self.y = 0.0;
    }

    /// Screen position of a world-space body.
    pub fn apply(&self, body: &Body) -> (f32, f32) {
        (body.x + self.x, body.y + self.y)
    }
}

/// Offset that centres `target_x`, clamped to `[-(level_width - view_width), 0]`.
/// A level narrower than the view pins the camera at 0.
pub fn follow(target_x: f32, level_width: f32, view_width: f32) -> f32 {
    let lowest = (view_width - level_width).min(0.0);
    (-target_x + view_width / 2.0).clamp(lowest, 0.0)
}
