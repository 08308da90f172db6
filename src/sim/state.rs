//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::BrickField;
use crate::consts::*;

/// Current phase of gameplay. Exactly one is active; transitions are
/// synchronous and happen inside `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused (simulation frozen, rendering continues)
    Paused,
    /// Run ended; terminal, a restart requires full reinitialization
    GameOver,
}

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueKind {
    /// Ball bounced off a wall, the paddle or a brick
    Hit,
    /// A life was lost or the run ended
    Lose,
}

/// Notifications produced by the simulation and drained by the glue each
/// frame. These replace blocking dialogs: the frame loop never stalls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fire-and-forget audio trigger
    Cue(CueKind),
    /// Prime the audio output channels (emitted once, on confirm)
    WarmUpAudio,
    /// A life was lost but the run continues
    LifeLost { remaining: i32 },
    /// A new level begins (carries the +1 life bonus implicitly)
    LevelStart { level: u32 },
    /// Final score beat the stored high score
    NewHighScore { score: u32 },
    /// The run ended
    GameOver { score: u32 },
}

/// The ball: created once per session, reset and reused, never destroyed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new() -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        };
        ball.reset(1);
        ball
    }

    /// Re-center the ball and recompute its per-axis speed for `level`.
    /// Sign pattern is always (+x, -y): up and to the right.
    pub fn reset(&mut self, level: u32) {
        let speed = BALL_BASE_SPEED + level as f32 * BALL_SPEED_PER_LEVEL;
        self.pos = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - BALL_RESET_DROP);
        self.vel = Vec2::new(speed, -speed);
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge, clamped to [0, FIELD_WIDTH - width]
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (FIELD_WIDTH - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Paddle {
    /// Re-center horizontally
    pub fn reset(&mut self) {
        self.x = (FIELD_WIDTH - self.width) / 2.0;
    }

    /// Step by `dx`, rejecting any step that would leave the field
    pub fn step(&mut self, dx: f32) {
        let next = self.x + dx;
        if next >= 0.0 && next <= FIELD_WIDTH - self.width {
            self.x = next;
        }
    }

    /// Whether `x` falls within the paddle's horizontal span (strict)
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }
}

/// Complete session state. Presentation reads this as a snapshot each frame
/// and never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed (field layouts derive from seed + level)
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// 1-based, bumps on every field clear
    pub level: u32,
    /// Goes to -1 exactly once, as the game-over trigger
    pub lives: i32,
    /// Loaded at startup, updated in place when beaten at game over
    pub high_score: u32,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickField,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending notifications, drained by the glue after each tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session in the Start phase
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            level: 1,
            lives: STARTING_LIVES,
            high_score,
            ball: Ball::new(),
            paddle: Paddle::default(),
            bricks: BrickField::generate(seed, 1),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Canonical reset applied on level-up and life loss (not on game over)
    pub fn reset_ball_and_paddle(&mut self) {
        self.ball.reset(self.level);
        self.paddle.reset();
    }

    /// Take the notifications accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
