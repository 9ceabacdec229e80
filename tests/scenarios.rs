use glam::DVec2;

use ping::audio::wav::{SampleEncoding, WavFormat};
use ping::audio::{AudioTrigger, Sample, SampleBank, WavClip};
use ping::input::{InputEvent, Key};
use ping::platform::headless::{EventQueue, InstantPacer, ManualOutput, MemoryCanvas};
use ping::sim::{self, Action, GameEvent, GamePhase, GameState, Side};
use ping::{Capabilities, Flow, FrameDriver};

type Driver = FrameDriver<MemoryCanvas, EventQueue, ManualOutput, InstantPacer>;

fn clip(len: usize) -> WavClip {
    WavClip {
        format: WavFormat {
            encoding: SampleEncoding::Signed16,
            channels: 1,
            sample_rate: 8_000,
        },
        data: vec![0u8; len].into(),
    }
}

fn driver() -> Driver {
    let mut bank = SampleBank::new();
    bank.insert(Sample::Ambient, clip(4096));
    bank.insert(Sample::Bounce, clip(32));
    FrameDriver::new(
        GameState::new(Capabilities::default()),
        MemoryCanvas::new(),
        EventQueue::new(),
        AudioTrigger::new(ManualOutput::new(), bank),
        InstantPacer::default(),
    )
}

fn playing_state() -> GameState {
    let mut state = GameState::new(Capabilities::default());
    sim::apply(&mut state, Action::Toggle);
    state
}

#[test]
fn scenario_a_one_tick_integration() {
    let mut state = playing_state();
    state.ball.pos = DVec2::new(400.0, 300.0);
    state.ball.vel = DVec2::new(5.0, 2.0);

    sim::tick(&mut state);
    assert_eq!(state.ball.pos, DVec2::new(405.0, 302.0));
}

#[test]
fn scenario_b_wall_reflection_without_clamp() {
    let mut state = playing_state();
    // Lands on y = -3 this tick
    state.ball.pos = DVec2::new(400.0, -5.0);
    state.ball.vel = DVec2::new(5.0, 2.0);

    sim::tick(&mut state);
    assert_eq!(state.ball.pos.y, -3.0);
    assert_eq!(state.ball.vel, DVec2::new(5.0, -2.0));

    sim::tick(&mut state);
    assert_eq!(state.ball.pos.y, -5.0);
}

#[test]
fn scenario_c_right_paddle_hit() {
    let mut driver = driver();
    driver.events_mut().push(InputEvent::KeyDown(Key::Space));
    driver.step();

    // Right paddle band is 268..=333; land at y = 300
    driver.state_mut().ball.pos = DVec2::new(764.0, 298.0);
    driver.step();

    let state = driver.state();
    assert_eq!(state.ball.vel.x, -5.0);
    assert_eq!(state.score.left, 0);
    assert_eq!(state.score.right, 0);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(driver.audio().active(), Some(Sample::Bounce));
}

#[test]
fn scenario_d_right_paddle_miss() {
    let mut driver = driver();
    driver.events_mut().push(InputEvent::KeyDown(Key::Space));
    driver.step();
    driver.events_mut().push(InputEvent::KeyDown(Key::P));
    driver.step();

    driver.state_mut().ball.pos = DVec2::new(764.0, 400.0);
    driver.step();

    let state = driver.state();
    assert_eq!(state.score.left, 1);
    assert_eq!(state.score.right, 0);
    assert_eq!(state.phase, GamePhase::Idle);
    assert_eq!(state.ball.pos, DVec2::new(395.0, 295.0));
    assert_eq!(state.ball.vel, DVec2::new(5.0, 2.0));
    assert_eq!(state.left.y, 268);
    assert_eq!(state.right.y, 268);
    assert_eq!(driver.audio().active(), Some(Sample::Ambient));
}

#[test]
fn scenario_e_start_cancels_ambient() {
    let mut driver = driver();
    driver.startup();
    assert_eq!(driver.audio().active(), Some(Sample::Ambient));

    driver.events_mut().push(InputEvent::KeyDown(Key::Space));
    assert_eq!(driver.step(), Flow::Continue);
    assert_eq!(driver.state().phase, GamePhase::Playing);
    assert_eq!(driver.audio().active(), None);
    assert_eq!(driver.audio().output().closes(), 1);
}

#[test]
fn bounce_during_bounce_is_dropped() {
    let mut driver = driver();
    driver.events_mut().push(InputEvent::KeyDown(Key::Space));
    driver.step();

    driver.state_mut().ball.pos = DVec2::new(764.0, 298.0);
    driver.step();
    driver.audio_mut().output_mut().pull(8);

    // Left paddle hit while the bounce sample still has bytes left
    driver.state_mut().ball.pos = DVec2::new(36.0, 300.0);
    driver.step();
    assert_eq!(driver.state().ball.vel.x, 5.0);

    let audio = driver.audio().state();
    assert_eq!(audio.active, Some(Sample::Bounce));
    assert_eq!(audio.cursor, 8);
    assert_eq!(driver.audio().output().opens(), 1);
}

#[test]
fn long_rally_between_centered_paddles() {
    // Keep both paddles on the ball; every gate crossing should be a hit
    let mut state = playing_state();
    let mut hits = 0;
    for _ in 0..2_000 {
        let y = state.ball.pos.y.round() as i32;
        state.left.y = y - 30;
        state.right.y = y - 30;
        for event in sim::tick(&mut state) {
            match event {
                GameEvent::PaddleHit(_) => hits += 1,
                other => panic!("unexpected {:?}", other),
            }
        }
    }
    assert!(hits > 10);
    assert_eq!(state.score.left, 0);
    assert_eq!(state.score.right, 0);
}

#[test]
fn left_miss_scores_right() {
    let mut state = playing_state();
    state.ball.pos = DVec2::new(40.0, 500.0);
    state.ball.vel = DVec2::new(-5.0, 2.0);

    let events = sim::tick(&mut state);
    assert_eq!(events, vec![GameEvent::Point { scorer: Side::Right }]);
    assert_eq!(state.score.right, 1);
}
