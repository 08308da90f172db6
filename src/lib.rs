//! Brick Breaker - a classic single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state)
//! - `highscores`: Persisted high score (LocalStorage on web)
//! - `audio`: Fire-and-forget sound cues via Web Audio

pub mod audio;
pub mod highscores;
pub mod sim;

pub use highscores::HighScore;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels, matches canvas size)
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Per-axis speed at level 0; actual speed is BASE + level * SPEED_PER_LEVEL
    pub const BALL_BASE_SPEED: f32 = 3.0;
    pub const BALL_SPEED_PER_LEVEL: f32 = 0.3;
    /// Vertical offset from the field bottom where the ball respawns
    pub const BALL_RESET_DROP: f32 = 50.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Horizontal distance covered per tick while a direction is held
    pub const PADDLE_STEP: f32 = 7.0;
    /// Gap between the field bottom and the paddle deflection line
    pub const PADDLE_GAP: f32 = 20.0;

    /// Brick geometry
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;

    /// Grid growth caps
    pub const MAX_BRICK_COLUMNS: u32 = 11;
    pub const MAX_BRICK_ROWS: u32 = 7;

    /// Chance per cell of a reinforced (two-hit) brick, scaled by level
    pub const REINFORCED_CHANCE_PER_LEVEL: f32 = 0.15;

    /// Session defaults
    pub const STARTING_LIVES: i32 = 3;

    /// Scoring
    pub const SCORE_BRICK_DESTROYED: u32 = 10;
    pub const SCORE_BRICK_CHIPPED: u32 = 5;
}

/// Axis-aligned rectangle used for brick bounds and hit testing
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Strict interior test (points on the edge do not count)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.pos.x
            && p.x < self.pos.x + self.size.x
            && p.y > self.pos.y
            && p.y < self.pos.y + self.size.y
    }
}
