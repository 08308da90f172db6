//! Per-frame simulation step
//!
//! One call to `tick` advances the game by exactly one frame. The collision
//! order inside a Playing tick is fixed and load-bearing: brick sweep,
//! level-clear check, side walls, ceiling, then the floor/paddle band.

use super::collision::{hits_ceiling, hits_side_wall, reaches_floor_band};
use super::field::BrickField;
use super::state::{CueKind, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
///
/// `left`/`right` are held state maintained by edge-triggered press/release
/// events upstream. `confirm` and `pause` are one-shot flags the glue clears
/// after each tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Start the game (valid only in the Start phase)
    pub confirm: bool,
    /// Toggle pause (valid only in Playing/Paused)
    pub pause: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase == GamePhase::Start && input.confirm {
        state.phase = GamePhase::Playing;
        // Prime the output channels once so later cues survive autoplay gating
        state.events.push(GameEvent::WarmUpAudio);
        return;
    }

    // Simulation only runs while Playing; GameOver is terminal
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // 1. Brick sweep: every live brick is tested against the ball center,
    // no early exit. Each overlap reflects vertically and scores on its own.
    let center = state.ball.pos;
    for brick in state.bricks.iter_mut() {
        if brick.is_alive() && brick.bounds.contains(center) {
            state.ball.vel.y = -state.ball.vel.y;
            brick.status -= 1;
            state.score += if brick.status == 0 {
                SCORE_BRICK_DESTROYED
            } else {
                SCORE_BRICK_CHIPPED
            };
        }
    }

    // 2. Level-clear check, after the sweep. Supersedes the rest of the tick.
    if state.bricks.active_count() == 0 {
        on_level_cleared(state);
        return;
    }

    // 3. Side walls
    if hits_side_wall(state.ball.pos, state.ball.vel, state.ball.radius) {
        state.ball.vel.x = -state.ball.vel.x;
        state.events.push(GameEvent::Cue(CueKind::Hit));
    }

    // 4. Ceiling, else 5. floor band (deflection or miss)
    if hits_ceiling(state.ball.pos, state.ball.vel, state.ball.radius) {
        state.ball.vel.y = -state.ball.vel.y;
        state.events.push(GameEvent::Cue(CueKind::Hit));
    } else if reaches_floor_band(state.ball.pos, state.ball.vel, state.ball.radius) {
        if state.paddle.spans(state.ball.pos.x) {
            state.ball.vel.y = -state.ball.vel.y;
            state.events.push(GameEvent::Cue(CueKind::Hit));
        } else {
            state.lives -= 1;
            if state.lives < 0 {
                on_game_over(state);
                return;
            }
            state.events.push(GameEvent::Cue(CueKind::Lose));
            state.events.push(GameEvent::LifeLost {
                remaining: state.lives,
            });
            state.reset_ball_and_paddle();
        }
    }

    // Paddle movement: independent clamped updates, so holding both
    // directions in the open field nets to zero
    if input.right {
        state.paddle.step(PADDLE_STEP);
    }
    if input.left {
        state.paddle.step(-PADDLE_STEP);
    }

    // Ball movement: unconditional, after this tick's reflections
    state.ball.pos += state.ball.vel;
}

/// Field cleared: bonus life, next level, fresh bricks
fn on_level_cleared(state: &mut GameState) {
    state.lives += 1;
    state.level += 1;
    state.events.push(GameEvent::LevelStart { level: state.level });
    state.reset_ball_and_paddle();
    state.bricks = BrickField::generate(state.seed, state.level);
}

/// Terminal: no further ticks advance the simulation
fn on_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::Cue(CueKind::Lose));
    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore { score: state.score });
    }
    state.events.push(GameEvent::GameOver { score: state.score });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::sim::field::Brick;
    use glam::Vec2;
    use proptest::prelude::*;

    /// A session that has already confirmed into Playing, ball parked in
    /// open space below the brick grid
    fn playing_state() -> GameState {
        let mut state = GameState::new(1234, 0);
        state.phase = GamePhase::Playing;
        state.ball.pos = Vec2::new(FIELD_WIDTH / 2.0, 400.0);
        state
    }

    /// Leave exactly one brick alive, with a known status
    fn keep_single_brick(state: &mut GameState, status: u8) -> Rect {
        for brick in state.bricks.iter_mut() {
            brick.status = 0;
        }
        let brick = &mut state.bricks.grid[0][0];
        brick.status = status;
        brick.bounds
    }

    #[test]
    fn test_confirm_starts_playing_and_warms_audio() {
        let mut state = GameState::new(1, 0);
        assert_eq!(state.phase, GamePhase::Start);

        // Directional input alone does nothing in Start
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        let paddle_x = state.paddle.x;
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.paddle.x, paddle_x);

        let input = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::WarmUpAudio]);
    }

    #[test]
    fn test_pause_toggle_only_while_in_play() {
        let mut state = GameState::new(1, 0);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        // No-op in Start
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Start);

        let mut state = playing_state();
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_paused_tick_freezes_simulation() {
        let mut state = playing_state();
        state.phase = GamePhase::Paused;
        let ball = state.ball;
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, ball.pos);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_free_flight_is_exact() {
        let mut state = playing_state();
        let expected = state.ball.pos + state.ball.vel;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, expected);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_brick_hit_reflects_and_scores_ten() {
        let mut state = playing_state();
        state.bricks.grid[2][1].status = 1;
        let bounds = state.bricks.grid[2][1].bounds;
        state.ball.pos = bounds.pos + bounds.size / 2.0;
        state.ball.vel = Vec2::new(3.3, -3.3);
        let score = state.score;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.bricks.grid[2][1].status, 0);
        assert_eq!(state.score, score + SCORE_BRICK_DESTROYED);
        // Vertical reflection applied before the move
        assert!(state.ball.vel.y > 0.0);
    }

    #[test]
    fn test_reinforced_brick_takes_two_hits() {
        let mut state = playing_state();
        let bounds = keep_single_brick(&mut state, 2);
        // Park a second live brick far away so chipping doesn't clear the level
        state.bricks.grid[1][0].status = 1;
        state.ball.pos = bounds.pos + bounds.size / 2.0;
        state.ball.vel = Vec2::new(0.0, -3.3);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bricks.grid[0][0].status, 1);
        assert_eq!(state.score, SCORE_BRICK_CHIPPED);

        // Second pass through the same brick
        state.ball.pos = bounds.pos + bounds.size / 2.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bricks.grid[0][0].status, 0);
        assert_eq!(state.score, SCORE_BRICK_CHIPPED + SCORE_BRICK_DESTROYED);
    }

    #[test]
    fn test_overlapping_bricks_resolve_independently() {
        let mut state = playing_state();
        for brick in state.bricks.iter_mut() {
            brick.status = 0;
        }
        // Two bricks sharing the same bounds, plus a bystander so the
        // level doesn't clear
        let overlap = Rect::new(400.0, 300.0, BRICK_WIDTH, BRICK_HEIGHT);
        state.bricks.grid[0][0] = Brick {
            status: 1,
            bounds: overlap,
        };
        state.bricks.grid[0][1] = Brick {
            status: 1,
            bounds: overlap,
        };
        state.bricks.grid[5][0].status = 1;

        state.ball.pos = overlap.pos + overlap.size / 2.0;
        state.ball.vel = Vec2::new(3.3, -3.3);
        let dy = state.ball.vel.y;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.bricks.grid[0][0].status, 0);
        assert_eq!(state.bricks.grid[0][1].status, 0);
        assert_eq!(state.score, 2 * SCORE_BRICK_DESTROYED);
        // Two independent reflections cancel out
        assert_eq!(state.ball.vel.y, dy);
    }

    #[test]
    fn test_clearing_last_brick_advances_level() {
        let mut state = playing_state();
        state.level = 3;
        state.lives = 2;
        let bounds = keep_single_brick(&mut state, 1);
        state.ball.pos = bounds.pos + bounds.size / 2.0;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.level, 4);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        // Field regenerated for the new level
        assert_eq!(state.bricks.columns, 11);
        assert_eq!(state.bricks.rows, 6);
        assert_eq!(state.bricks.active_count(), 11 * 6);
        // Ball back at the canonical spot with level-4 speed
        assert_eq!(
            state.ball.pos,
            Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - BALL_RESET_DROP)
        );
        assert!((state.ball.vel.x - 4.2).abs() < 1e-5);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LevelStart { level: 4 })
        );
    }

    #[test]
    fn test_side_wall_reflects_dx_with_cue() {
        let mut state = playing_state();
        state.ball.pos = Vec2::new(FIELD_WIDTH - state.ball.radius - 1.0, 400.0);
        state.ball.vel = Vec2::new(3.3, 1.0);

        tick(&mut state, &TickInput::default());

        assert!(state.ball.vel.x < 0.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Cue(CueKind::Hit)]
        );
    }

    #[test]
    fn test_ceiling_reflects_dy() {
        let mut state = playing_state();
        state.ball.pos = Vec2::new(500.0, state.ball.radius + 1.0);
        state.ball.vel = Vec2::new(1.0, -3.3);

        tick(&mut state, &TickInput::default());

        assert!(state.ball.vel.y > 0.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Cue(CueKind::Hit)]
        );
    }

    #[test]
    fn test_paddle_deflects_ball() {
        let mut state = playing_state();
        let band_y = FIELD_HEIGHT - state.ball.radius - PADDLE_GAP;
        state.ball.pos = Vec2::new(state.paddle.x + 50.0, band_y - 1.0);
        state.ball.vel = Vec2::new(1.0, 3.3);

        tick(&mut state, &TickInput::default());

        assert!(state.ball.vel.y < 0.0);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_floor_miss_costs_a_life_and_resets() {
        let mut state = playing_state();
        let band_y = FIELD_HEIGHT - state.ball.radius - PADDLE_GAP;
        // Well away from the paddle span
        state.ball.pos = Vec2::new(30.0, band_y - 1.0);
        state.ball.vel = Vec2::new(-1.0, 3.3);
        state.paddle.x = 800.0;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 2);
        assert_eq!(state.level, 1);
        // Speed back to the level-1 magnitude, sign pattern (+x, -y),
        // then one unconditional movement step from the reset spot
        assert!((state.ball.vel.x - 3.3).abs() < 1e-5);
        assert!((state.ball.vel.y + 3.3).abs() < 1e-5);
        let reset_pos = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - BALL_RESET_DROP);
        assert_eq!(state.ball.pos, reset_pos + state.ball.vel);
        assert_eq!(state.paddle.x, (FIELD_WIDTH - state.paddle.width) / 2.0);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Cue(CueKind::Lose)));
        assert!(events.contains(&GameEvent::LifeLost { remaining: 2 }));
    }

    #[test]
    fn test_game_over_when_lives_run_out() {
        let mut state = playing_state();
        state.lives = 0;
        state.score = 95;
        state.high_score = 80;
        let band_y = FIELD_HEIGHT - state.ball.radius - PADDLE_GAP;
        state.ball.pos = Vec2::new(30.0, band_y - 1.0);
        state.ball.vel = Vec2::new(-1.0, 3.3);
        state.paddle.x = 800.0;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, -1);
        assert_eq!(state.high_score, 95);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Cue(CueKind::Lose)));
        assert!(events.contains(&GameEvent::NewHighScore { score: 95 }));
        assert!(events.contains(&GameEvent::GameOver { score: 95 }));

        // Terminal: further ticks change nothing
        let snapshot = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, snapshot);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_high_score_untouched_when_not_beaten() {
        let mut state = playing_state();
        state.lives = 0;
        state.score = 50;
        state.high_score = 80;
        let band_y = FIELD_HEIGHT - state.ball.radius - PADDLE_GAP;
        state.ball.pos = Vec2::new(30.0, band_y - 1.0);
        state.ball.vel = Vec2::new(-1.0, 3.3);
        state.paddle.x = 800.0;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.high_score, 80);
        let events = state.drain_events();
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_both_directions_held_nets_zero() {
        let mut state = playing_state();
        let x = state.paddle.x;
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, x);
    }

    #[test]
    fn test_brick_status_never_increases() {
        let mut state = playing_state();
        let before: Vec<u8> = state.bricks.iter().map(|b| b.status).collect();
        for _ in 0..500 {
            tick(&mut state, &TickInput::default());
            if state.phase != GamePhase::Playing {
                break;
            }
            for (brick, prev) in state.bricks.iter().zip(&before) {
                assert!(brick.status <= *prev);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_paddle_never_leaves_field(moves in proptest::collection::vec(0u8..3, 1..200)) {
            let mut state = playing_state();
            for m in moves {
                let input = TickInput {
                    left: m == 0,
                    right: m == 1,
                    ..Default::default()
                };
                tick(&mut state, &input);
                prop_assert!(state.paddle.x >= 0.0);
                prop_assert!(state.paddle.x <= FIELD_WIDTH - state.paddle.width);
                if state.phase != GamePhase::Playing {
                    break;
                }
            }
        }
    }
}
