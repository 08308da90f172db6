//! Collision predicates for the per-tick sweep
//!
//! All checks are next-position tests: they look at where the ball would be
//! after this tick's movement and reflect velocity before the move happens.

use glam::Vec2;

use crate::consts::*;

/// Would the ball's next x position leave [radius, FIELD_WIDTH - radius]?
#[inline]
pub fn hits_side_wall(ball_pos: Vec2, ball_vel: Vec2, radius: f32) -> bool {
    let next_x = ball_pos.x + ball_vel.x;
    next_x > FIELD_WIDTH - radius || next_x < radius
}

/// Would the ball's next y position cross the ceiling?
#[inline]
pub fn hits_ceiling(ball_pos: Vec2, ball_vel: Vec2, radius: f32) -> bool {
    ball_pos.y + ball_vel.y < radius
}

/// Would the ball's next y position enter the paddle/floor band at the
/// bottom of the field? Whether this is a deflection or a miss depends on
/// the paddle span, decided by the caller.
#[inline]
pub fn reaches_floor_band(ball_pos: Vec2, ball_vel: Vec2, radius: f32) -> bool {
    ball_pos.y + ball_vel.y > FIELD_HEIGHT - radius - PADDLE_GAP
}
