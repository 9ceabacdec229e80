//! SDL2 host backend
//!
//! Window canvas, SDL_ttf text, the SDL event pump and an exclusive
//! callback-driven playback device. The device callback runs on SDL's audio
//! thread and pulls from the shared [`StreamFeed`].

use std::marker::PhantomData;
use std::path::PathBuf;

use sdl2::AudioSubsystem;
use sdl2::EventPump;
use sdl2::audio::{AudioCallback, AudioDevice, AudioFormatNum, AudioSpecDesired};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect as SdlRect;
use sdl2::render::WindowCanvas;
use sdl2::ttf::{FontStyle, Sdl2TtfContext};

use super::{Canvas, Color, EventSource, SleepPacer, StartupError, TextError, TextStyle};
use crate::audio::{
    AudioOutput, AudioTrigger, DeviceError, SampleBank, SampleEncoding, StreamFeed, WavFormat,
};
use crate::consts::{FONT_PATH, SCREEN_HEIGHT, SCREEN_WIDTH, WINDOW_TITLE};
use crate::driver::FrameDriver;
use crate::input::{InputEvent, Key};
use crate::sim::{GameState, Rect};
use crate::variant::Capabilities;

fn sdl_color(color: Color) -> SdlColor {
    SdlColor::RGB(color.r, color.g, color.b)
}

/// Accelerated window canvas with per-call font loading
pub struct SdlCanvas {
    canvas: WindowCanvas,
    ttf: Sdl2TtfContext,
    font_path: PathBuf,
    font_warned: bool,
}

impl SdlCanvas {
    pub fn new(canvas: WindowCanvas, ttf: Sdl2TtfContext, font_path: impl Into<PathBuf>) -> Self {
        Self {
            canvas,
            ttf,
            font_path: font_path.into(),
            font_warned: false,
        }
    }
}

impl Canvas for SdlCanvas {
    fn clear(&mut self, color: Color) {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        self.canvas.set_draw_color(sdl_color(color));
        let target = SdlRect::new(rect.x, rect.y, rect.w as u32, rect.h as u32);
        if let Err(err) = self.canvas.fill_rect(target) {
            log::debug!("fill_rect failed: {}", err);
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) -> Result<(), TextError> {
        let mut font = match self.ttf.load_font(&self.font_path, style.size) {
            Ok(font) => font,
            Err(err) => {
                if !self.font_warned {
                    log::warn!(
                        "TTF_OpenFont() failed for {}: {}",
                        self.font_path.display(),
                        err
                    );
                    self.font_warned = true;
                }
                return Err(TextError::FontUnavailable(err));
            }
        };
        font.set_style(FontStyle::BOLD);

        let surface = font
            .render(text)
            .shaded(sdl_color(style.fg), sdl_color(style.bg))
            .map_err(|e| TextError::Render(e.to_string()))?;
        let creator = self.canvas.texture_creator();
        let texture = creator
            .create_texture_from_surface(&surface)
            .map_err(|e| TextError::Render(e.to_string()))?;
        let target = SdlRect::new(x, y, surface.width(), surface.height());
        self.canvas
            .copy(&texture, None, target)
            .map_err(TextError::Render)
    }

    fn present(&mut self) {
        self.canvas.present();
    }
}

/// SDL event pump filtered down to the events the game cares about
pub struct SdlEvents {
    pump: EventPump,
}

impl SdlEvents {
    pub fn new(pump: EventPump) -> Self {
        Self { pump }
    }
}

impl EventSource for SdlEvents {
    fn poll_event(&mut self) -> Option<InputEvent> {
        loop {
            let event = self.pump.poll_event()?;
            if let Some(event) = translate_event(event) {
                return Some(event);
            }
        }
    }
}

fn translate_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(code),
            ..
        } => Some(InputEvent::KeyDown(translate_key(code))),
        Event::Window {
            win_event: WindowEvent::Close,
            ..
        } => Some(InputEvent::WindowClose),
        _ => None,
    }
}

fn translate_key(code: Keycode) -> Key {
    match code {
        Keycode::Q => Key::Q,
        Keycode::A => Key::A,
        Keycode::P => Key::P,
        Keycode::L => Key::L,
        Keycode::Space => Key::Space,
        Keycode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

/// Device callback: copy sample bytes, pad with silence
struct Feeder<T> {
    feed: StreamFeed,
    silence: u8,
    _channel: PhantomData<T>,
}

impl<T> AudioCallback for Feeder<T>
where
    T: AudioFormatNum + bytemuck::Pod + Send + 'static,
{
    type Channel = T;

    fn callback(&mut self, out: &mut [T]) {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(out);
        let written = self.feed.fill(bytes);
        bytes[written..].fill(self.silence);
    }
}

/// Open device, held only so that dropping it stops playback
enum Device {
    U8 { _device: AudioDevice<Feeder<u8>> },
    S16 { _device: AudioDevice<Feeder<i16>> },
    S32 { _device: AudioDevice<Feeder<i32>> },
    F32 { _device: AudioDevice<Feeder<f32>> },
}

/// Exclusive SDL playback device, reopened for each sample
pub struct SdlAudio {
    subsystem: Option<AudioSubsystem>,
    device: Option<Device>,
}

impl SdlAudio {
    pub fn new(subsystem: Option<AudioSubsystem>) -> Self {
        Self {
            subsystem,
            device: None,
        }
    }
}

fn open_device<T>(
    subsystem: &AudioSubsystem,
    desired: &AudioSpecDesired,
    feed: StreamFeed,
    silence: u8,
) -> Result<AudioDevice<Feeder<T>>, DeviceError>
where
    T: AudioFormatNum + bytemuck::Pod + Send + 'static,
{
    let device = subsystem
        .open_playback(None, desired, |_spec| Feeder {
            feed,
            silence,
            _channel: PhantomData,
        })
        .map_err(DeviceError)?;
    device.resume();
    Ok(device)
}

impl AudioOutput for SdlAudio {
    fn open(&mut self, format: &WavFormat, feed: StreamFeed) -> Result<(), DeviceError> {
        let subsystem = self
            .subsystem
            .as_ref()
            .ok_or_else(|| DeviceError("audio subsystem unavailable".into()))?;

        let channels = u8::try_from(format.channels)
            .map_err(|_| DeviceError(format!("{} channels not supported", format.channels)))?;
        let freq = i32::try_from(format.sample_rate)
            .map_err(|_| DeviceError(format!("{} Hz not supported", format.sample_rate)))?;
        let desired = AudioSpecDesired {
            freq: Some(freq),
            channels: Some(channels),
            samples: None,
        };
        let silence = format.encoding.silence();

        let device = match format.encoding {
            SampleEncoding::Unsigned8 => Device::U8 {
                _device: open_device(subsystem, &desired, feed, silence)?,
            },
            SampleEncoding::Signed16 => Device::S16 {
                _device: open_device(subsystem, &desired, feed, silence)?,
            },
            SampleEncoding::Signed32 => Device::S32 {
                _device: open_device(subsystem, &desired, feed, silence)?,
            },
            SampleEncoding::Float32 => Device::F32 {
                _device: open_device(subsystem, &desired, feed, silence)?,
            },
        };
        self.device = Some(device);
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the device stops the callback and closes it
        self.device = None;
    }
}

/// Bring up SDL, run the game until quit, tear down.
/// Video, window and text failures are fatal; audio failures are not.
pub fn run(caps: Capabilities) -> Result<(), StartupError> {
    let sdl = sdl2::init().map_err(StartupError::Video)?;
    let video = sdl.video().map_err(StartupError::Video)?;

    let window = video
        .window(WINDOW_TITLE, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
        .position_centered()
        .borderless()
        .build()
        .map_err(|e| StartupError::Window(e.to_string()))?;
    let canvas = window
        .into_canvas()
        .build()
        .map_err(|e| StartupError::Window(e.to_string()))?;

    let ttf = sdl2::ttf::init().map_err(|e| StartupError::Text(e.to_string()))?;
    let pump = sdl.event_pump().map_err(StartupError::Video)?;

    let audio = if caps.sound {
        match sdl.audio() {
            Ok(subsystem) => Some(subsystem),
            Err(err) => {
                log::warn!("Audio unavailable: {}", err);
                None
            }
        }
    } else {
        None
    };
    let bank = if caps.sound {
        SampleBank::load_defaults()
    } else {
        SampleBank::new()
    };

    let mut driver = FrameDriver::new(
        GameState::new(caps),
        SdlCanvas::new(canvas, ttf, FONT_PATH),
        SdlEvents::new(pump),
        AudioTrigger::new(SdlAudio::new(audio), bank),
        SleepPacer,
    );
    driver.run();
    Ok(())
}
