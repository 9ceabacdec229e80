//! HUD text and the render pass

use crate::consts::{HUD_TEXT_SIZE, HUD_TEXT_X, HUD_TEXT_Y};
use crate::input::Controls;
use crate::platform::{Canvas, Color, TextStyle};
use crate::sim::{GamePhase, GameState, Score};

/// Paddles and ball
pub const FOREGROUND: Color = Color::rgb(240, 240, 240);
pub const BACKGROUND: Color = Color::BLACK;

pub const HUD_STYLE: TextStyle = TextStyle {
    size: HUD_TEXT_SIZE,
    fg: Color::WHITE,
    bg: Color::BLACK,
};

/// "Score L:R"
pub fn score_line(score: &Score) -> String {
    format!("Score {}:{}", score.left, score.right)
}

/// "Press SPACE to play. Q, A - left, P, L - right."
pub fn help_line(state: &GameState, controls: &Controls) -> String {
    format!(
        "Press {} to play. {}, {} - left, {}, {} - right.",
        controls.toggle,
        state.left.up_key,
        state.left.down_key,
        state.right.up_key,
        state.right.down_key
    )
}

/// The HUD line for the current phase, if the variant shows one
pub fn hud_text(state: &GameState, controls: &Controls) -> Option<String> {
    if !state.caps.text {
        return None;
    }

    let score = state.caps.scoring.then(|| score_line(&state.score));
    match (state.phase, score) {
        (GamePhase::Playing, score) => score,
        (GamePhase::Idle, Some(score)) => Some(format!("{}. {}", score, help_line(state, controls))),
        (GamePhase::Idle, None) => Some(help_line(state, controls)),
    }
}

/// Clear the frame and draw both paddles and the ball
pub fn draw_field<C: Canvas>(canvas: &mut C, state: &GameState) {
    canvas.clear(BACKGROUND);
    canvas.fill_rect(state.left.rect(), FOREGROUND);
    canvas.fill_rect(state.right.rect(), FOREGROUND);
    canvas.fill_rect(state.ball.rect(), FOREGROUND);
}

/// Draw the HUD line. A missing font only costs the text.
pub fn draw_hud<C: Canvas>(canvas: &mut C, state: &GameState, controls: &Controls) {
    let Some(text) = hud_text(state, controls) else {
        return;
    };
    if let Err(err) = canvas.draw_text(&text, HUD_TEXT_X, HUD_TEXT_Y, HUD_STYLE) {
        log::debug!("HUD text skipped: {}", err);
    }
}
