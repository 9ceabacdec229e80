//! Axis-aligned rectangles and the gate collision tests
//!
//! Paddle collisions use a thin vertical "gate": the ball is tested against a
//! single horizontal threshold per paddle (its inner edge) and then against
//! the paddle's vertical band using the ball's centre. There is no rectangle
//! overlap test and no swept test: a ball whose edge clips a paddle corner
//! while its centre is outside the band is a miss.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::Side;

/// An integer pixel rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`x`h` centred on `center`, rounded to pixels
    pub fn centered(center: DVec2, w: i32, h: i32) -> Self {
        Self {
            x: (center.x - f64::from(w / 2)).round() as i32,
            y: (center.y - f64::from(h / 2)).round() as i32,
            w,
            h,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

/// Outcome of testing the ball against one paddle gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateResult {
    /// Ball has not reached the gate
    Clear,
    /// Ball reached the gate inside the paddle band
    Hit,
    /// Ball reached the gate outside the paddle band
    Miss,
}

/// Has the ball reached the inner edge of the paddle on `side`?
///
/// Right paddle: `ball.x >= paddle.x`. Left paddle: `ball.x <= paddle.x + width`.
#[inline]
pub fn gate_crossed(side: Side, ball: DVec2, paddle: &Rect) -> bool {
    match side {
        Side::Right => ball.x >= f64::from(paddle.x),
        Side::Left => ball.x <= f64::from(paddle.right()),
    }
}

/// Is `y` within the paddle's vertical band `[paddle.y, paddle.y + h]`?
#[inline]
pub fn within_band(y: f64, paddle: &Rect) -> bool {
    y >= f64::from(paddle.y) && y <= f64::from(paddle.bottom())
}

/// Full gate test for one paddle
pub fn gate_test(side: Side, ball: DVec2, paddle: &Rect) -> GateResult {
    if !gate_crossed(side, ball, paddle) {
        GateResult::Clear
    } else if within_band(ball.y, paddle) {
        GateResult::Hit
    } else {
        GateResult::Miss
    }
}

/// Did the ball touch the top or bottom wall?
#[inline]
pub fn touches_wall(y: f64, screen_height: i32) -> bool {
    y <= 0.0 || y >= f64::from(screen_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right_paddle() -> Rect {
        Rect::new(765, 268, 15, 65)
    }

    fn left_paddle() -> Rect {
        Rect::new(20, 268, 15, 65)
    }

    #[test]
    fn test_centered_rect_rounds() {
        let rect = Rect::centered(DVec2::new(400.4, 300.6), 10, 10);
        assert_eq!(rect, Rect::new(395, 296, 10, 10));
    }

    #[test]
    fn test_right_gate_threshold() {
        let paddle = right_paddle();
        assert!(!gate_crossed(Side::Right, DVec2::new(764.9, 300.0), &paddle));
        assert!(gate_crossed(Side::Right, DVec2::new(765.0, 300.0), &paddle));
    }

    #[test]
    fn test_left_gate_threshold() {
        let paddle = left_paddle();
        assert!(gate_crossed(Side::Left, DVec2::new(35.0, 300.0), &paddle));
        assert!(!gate_crossed(Side::Left, DVec2::new(35.1, 300.0), &paddle));
    }

    #[test]
    fn test_band_is_inclusive() {
        let paddle = right_paddle();
        assert!(within_band(268.0, &paddle));
        assert!(within_band(333.0, &paddle));
        assert!(!within_band(267.9, &paddle));
        assert!(!within_band(333.1, &paddle));
    }

    #[test]
    fn test_gate_results() {
        let paddle = right_paddle();
        assert_eq!(
            gate_test(Side::Right, DVec2::new(700.0, 300.0), &paddle),
            GateResult::Clear
        );
        assert_eq!(
            gate_test(Side::Right, DVec2::new(766.0, 300.0), &paddle),
            GateResult::Hit
        );
        assert_eq!(
            gate_test(Side::Right, DVec2::new(766.0, 100.0), &paddle),
            GateResult::Miss
        );
    }

    #[test]
    fn test_gate_ignores_depth() {
        // Far past the paddle but inside its band still counts as a hit
        let paddle = right_paddle();
        assert_eq!(
            gate_test(Side::Right, DVec2::new(900.0, 300.0), &paddle),
            GateResult::Hit
        );
    }

    #[test]
    fn test_walls() {
        assert!(touches_wall(0.0, 600));
        assert!(touches_wall(-3.0, 600));
        assert!(touches_wall(600.0, 600));
        assert!(!touches_wall(1.0, 600));
        assert!(!touches_wall(599.0, 600));
    }
}
