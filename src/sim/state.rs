//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`], which is passed
//! by exclusive reference into the tick and input functions.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::input::{Controls, Key};
use crate::variant::{BoundsCheck, Capabilities};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball and paddles frozen, help text shown, ambient sound playing
    #[default]
    Idle,
    /// Ball moving, paddles respond to input
    Playing,
}

/// Which player / side of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Paddle movement direction (screen space, up = decreasing y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// Something the state machine did that the outside world reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Idle -> Playing by toggle
    Started,
    /// Playing -> Idle by toggle
    Paused,
    /// Ball reflected off a paddle
    PaddleHit(Side),
    /// The paddle on the other side missed; round is over
    Point { scorer: Side },
}

/// A player's paddle. Only `y` changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub up_key: Key,
    pub down_key: Key,
}

impl Paddle {
    pub fn new(side: Side, controls: &Controls) -> Self {
        let (up_key, down_key) = controls.paddle_keys(side);
        let x = match side {
            Side::Left => LEFT_PADDLE_X,
            Side::Right => RIGHT_PADDLE_X,
        };
        Self {
            side,
            x,
            y: PADDLE_CENTER_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            up_key,
            down_key,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Highest `y` that keeps the paddle on screen
    #[inline]
    pub fn max_y(&self) -> i32 {
        SCREEN_HEIGHT - self.height
    }

    /// Jump one step in `dir`, honouring the bounds policy
    pub fn step(&mut self, dir: Direction, bounds: BoundsCheck) {
        let delta = match dir {
            Direction::Up => -MOVE_DELTA,
            Direction::Down => MOVE_DELTA,
        };
        match bounds {
            BoundsCheck::Clamped => {
                self.y = (self.y + delta).clamp(0, self.max_y());
            }
            BoundsCheck::PreMove => {
                let allowed = match dir {
                    Direction::Up => self.y >= 0,
                    Direction::Down => self.y <= self.max_y(),
                };
                if allowed {
                    self.y += delta;
                }
            }
        }
    }

    pub fn recenter(&mut self) {
        self.y = PADDLE_CENTER_Y;
    }
}

/// The ball. `pos` is the centre of its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    pub width: i32,
    pub height: i32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Self::START_POS,
            vel: Self::START_VEL,
            width: BALL_WIDTH,
            height: BALL_HEIGHT,
        }
    }
}

impl Ball {
    pub const START_POS: DVec2 = DVec2::new(BALL_CENTER_X, BALL_CENTER_Y);
    pub const START_VEL: DVec2 = DVec2::new(BALL_SPEED_X, BALL_SPEED_Y);

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.width, self.height)
    }

    /// Back to the centre with the starting velocity
    pub fn reset(&mut self) {
        self.pos = Self::START_POS;
        self.vel = Self::START_VEL;
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// Points per side. Only ever increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: Score,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub caps: Capabilities,
}

impl GameState {
    pub fn new(caps: Capabilities) -> Self {
        let controls = Controls::default();
        Self {
            phase: GamePhase::Idle,
            score: Score::default(),
            left: Paddle::new(Side::Left, &controls),
            right: Paddle::new(Side::Right, &controls),
            ball: Ball::default(),
            caps,
        }
    }

    /// Point both paddles at the keys in `controls`
    pub fn bind_controls(&mut self, controls: &Controls) {
        for paddle in [&mut self.left, &mut self.right] {
            (paddle.up_key, paddle.down_key) = controls.paddle_keys(paddle.side);
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Centre the ball and both paddles for a new rally
    pub fn reset_positions(&mut self) {
        self.ball.reset();
        self.left.recenter();
        self.right.recenter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(Capabilities::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.left.rect(), Rect::new(20, 268, 15, 65));
        assert_eq!(state.right.rect(), Rect::new(765, 268, 15, 65));
        assert_eq!(state.ball.pos, DVec2::new(395.0, 295.0));
        assert_eq!(state.ball.vel, DVec2::new(5.0, 2.0));
        assert_eq!(state.left.up_key, Key::Q);
        assert_eq!(state.right.down_key, Key::L);
    }

    #[test]
    fn test_bind_controls() {
        let mut state = GameState::new(Capabilities::default());
        let controls = Controls {
            right_up: Key::L,
            right_down: Key::P,
            ..Controls::default()
        };
        state.bind_controls(&controls);
        assert_eq!((state.right.up_key, state.right.down_key), (Key::L, Key::P));
        assert_eq!((state.left.up_key, state.left.down_key), (Key::Q, Key::A));
    }

    #[test]
    fn test_clamped_step_stays_on_screen() {
        let mut paddle = Paddle::new(Side::Left, &Controls::default());
        for _ in 0..20 {
            paddle.step(Direction::Up, BoundsCheck::Clamped);
        }
        assert_eq!(paddle.y, 0);
        for _ in 0..40 {
            paddle.step(Direction::Down, BoundsCheck::Clamped);
        }
        assert_eq!(paddle.y, SCREEN_HEIGHT - PADDLE_HEIGHT);
    }

    #[test]
    fn test_pre_move_step_overshoots_once() {
        let mut paddle = Paddle::new(Side::Right, &Controls::default());
        // 268 -> 238 -> ... -> 28 -> -2, then stuck
        for _ in 0..20 {
            paddle.step(Direction::Up, BoundsCheck::PreMove);
        }
        assert_eq!(paddle.y, -2);

        for _ in 0..40 {
            paddle.step(Direction::Down, BoundsCheck::PreMove);
        }
        // Last allowed step starts at 538 - 30 = 508 <= 535
        assert_eq!(paddle.y, 538);
        assert!(paddle.y > paddle.max_y());
    }

    #[test]
    fn test_score_award() {
        let mut score = Score::default();
        score.award(Side::Left);
        score.award(Side::Left);
        score.award(Side::Right);
        assert_eq!(score.get(Side::Left), 2);
        assert_eq!(score.get(Side::Right), 1);
    }

    #[test]
    fn test_ball_reset() {
        let mut ball = Ball::default();
        ball.pos = DVec2::new(10.0, 10.0);
        ball.vel = DVec2::new(-5.0, -2.0);
        ball.reset();
        assert_eq!(ball, Ball::default());
    }
}
