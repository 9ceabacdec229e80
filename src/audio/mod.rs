//! Sample playback with a single voice
//!
//! Samples are loaded once at startup. At most one plays at a time: the
//! output device is opened exclusively for the active sample and released
//! when it finishes or is cancelled.

pub mod stream;
pub mod wav;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use stream::{AudioState, PlaybackState, StreamFeed};
pub use wav::{SampleEncoding, WavClip, WavError, WavFormat};

use crate::consts::{AMBIENT_SAMPLE_PATH, BOUNCE_SAMPLE_PATH};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sample {
    /// Background loop while the game is idle
    Ambient,
    /// Ball hits paddle
    Bounce,
}

impl Sample {
    pub const ALL: [Sample; 2] = [Sample::Ambient, Sample::Bounce];

    pub fn path(&self) -> &'static str {
        match self {
            Sample::Ambient => AMBIENT_SAMPLE_PATH,
            Sample::Bounce => BOUNCE_SAMPLE_PATH,
        }
    }
}

/// Loaded sample data, keyed by sample id
#[derive(Debug, Clone, Default)]
pub struct SampleBank {
    clips: HashMap<Sample, WavClip>,
}

impl SampleBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every sample from its asset path. Failures are logged and leave
    /// that sample unavailable.
    pub fn load_defaults() -> Self {
        let mut bank = Self::new();
        for sample in Sample::ALL {
            match WavClip::load(sample.path()) {
                Ok(clip) => {
                    log::info!(
                        "Loaded {} ({} bytes, {:.2}s, {:?})",
                        sample.path(),
                        clip.len(),
                        clip.duration().as_secs_f64(),
                        clip.format
                    );
                    bank.insert(sample, clip);
                }
                Err(err) => log::warn!("Couldn't load {} wav file: {}", sample.path(), err),
            }
        }
        bank
    }

    pub fn insert(&mut self, sample: Sample, clip: WavClip) {
        self.clips.insert(sample, clip);
    }

    pub fn get(&self, sample: Sample) -> Option<&WavClip> {
        self.clips.get(&sample)
    }
}

/// Device-level failure reported by an [`AudioOutput`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceError(pub String);

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for DeviceError {}

/// Exclusive audio output device supplied by the host
pub trait AudioOutput {
    /// Open the device for `format` and start pulling from `feed`
    fn open(&mut self, format: &WavFormat, feed: StreamFeed) -> Result<(), DeviceError>;
    /// Stop pulling and release the device. No-op when closed.
    fn close(&mut self);
}

/// Why `play` did not start a sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    /// Another sample holds the device
    AlreadyPlaying(Sample),
    /// The sample failed to load at startup
    Unavailable(Sample),
    /// The device refused to open
    Device(DeviceError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::AlreadyPlaying(sample) => write!(f, "already playing {}", sample.path()),
            PlayError::Unavailable(sample) => write!(f, "{} is not loaded", sample.path()),
            PlayError::Device(err) => write!(f, "couldn't open audio: {}", err),
        }
    }
}

impl std::error::Error for PlayError {}

/// Single-voice sample player
pub struct AudioTrigger<O> {
    output: O,
    bank: SampleBank,
    feed: StreamFeed,
}

impl<O: AudioOutput> AudioTrigger<O> {
    pub fn new(output: O, bank: SampleBank) -> Self {
        Self {
            output,
            bank,
            feed: StreamFeed::new(),
        }
    }

    /// Start `sample` unless one is already active
    pub fn play(&mut self, sample: Sample) -> Result<(), PlayError> {
        if let Some(active) = self.active() {
            log::debug!("Already playing {}", active.path());
            return Err(PlayError::AlreadyPlaying(active));
        }

        let clip = self
            .bank
            .get(sample)
            .ok_or(PlayError::Unavailable(sample))?;

        let data = clip.data.clone();
        self.feed.with(|state| state.start(sample, data));

        if let Err(err) = self.output.open(&clip.format, self.feed.clone()) {
            self.feed.with(PlaybackState::clear);
            log::warn!("Couldn't open audio: {}", err);
            return Err(PlayError::Device(err));
        }

        log::info!("Playing sound {} len {}", sample.path(), clip.len());
        Ok(())
    }

    /// Stop the active sample now. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active() {
            self.output.close();
            self.feed.with(PlaybackState::clear);
            log::info!("Cancel playing sound {}", active.path());
        }
    }

    /// Release the device once the active sample has been fully consumed.
    /// Returns the sample that finished, if any.
    pub fn poll_completion(&mut self) -> Option<Sample> {
        let snapshot = self.feed.snapshot();
        if !snapshot.is_drained() {
            return None;
        }

        self.output.close();
        self.feed.with(PlaybackState::clear);
        let finished = snapshot.active;
        if let Some(sample) = finished {
            log::info!("Stop playing sound {}", sample.path());
        }
        finished
    }

    /// Currently active sample
    pub fn active(&self) -> Option<Sample> {
        self.feed.snapshot().active
    }

    pub fn state(&self) -> AudioState {
        self.feed.snapshot()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::ManualOutput;

    fn clip(encoding: SampleEncoding, data: Vec<u8>) -> WavClip {
        WavClip {
            format: WavFormat {
                encoding,
                channels: 1,
                sample_rate: 8_000,
            },
            data: data.into(),
        }
    }

    fn bank() -> SampleBank {
        let mut bank = SampleBank::new();
        bank.insert(Sample::Ambient, clip(SampleEncoding::Signed16, vec![1; 64]));
        bank.insert(Sample::Bounce, clip(SampleEncoding::Unsigned8, vec![2; 8]));
        bank
    }

    #[test]
    fn test_play_marks_active() {
        let mut audio = AudioTrigger::new(ManualOutput::new(), bank());
        audio.play(Sample::Bounce).expect("play");
        assert_eq!(
            audio.state(),
            AudioState {
                active: Some(Sample::Bounce),
                cursor: 0,
                remaining: 8,
            }
        );
        assert!(audio.output().is_open());
    }

    #[test]
    fn test_second_play_does_not_clobber() {
        let mut audio = AudioTrigger::new(ManualOutput::new(), bank());
        audio.play(Sample::Ambient).expect("play");
        audio.output_mut().pull(10);

        assert_eq!(
            audio.play(Sample::Bounce),
            Err(PlayError::AlreadyPlaying(Sample::Ambient))
        );
        let state = audio.state();
        assert_eq!(state.active, Some(Sample::Ambient));
        assert_eq!(state.cursor, 10);
        assert_eq!(audio.output().opens(), 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut audio = AudioTrigger::new(ManualOutput::new(), bank());
        audio.play(Sample::Ambient).expect("play");

        audio.cancel();
        let once = audio.state();
        audio.cancel();
        assert_eq!(audio.state(), once);
        assert_eq!(once, AudioState::default());
        assert_eq!(audio.output().closes(), 1);
        assert!(!audio.output().is_open());
    }

    #[test]
    fn test_completion_releases_device() {
        let mut audio = AudioTrigger::new(ManualOutput::new(), bank());
        audio.play(Sample::Bounce).expect("play");

        assert_eq!(audio.poll_completion(), None);
        let out = audio.output_mut().pull(16);
        // 8 bytes of sample, then silence from the host
        assert_eq!(&out[..8], &[2; 8]);
        assert_eq!(&out[8..], &[0x80; 8]);

        assert_eq!(audio.poll_completion(), Some(Sample::Bounce));
        assert_eq!(audio.active(), None);
        assert!(!audio.output().is_open());

        // Free again
        audio.play(Sample::Ambient).expect("play after completion");
    }

    #[test]
    fn test_missing_sample_keeps_failing() {
        let mut audio = AudioTrigger::new(ManualOutput::new(), SampleBank::new());
        for _ in 0..3 {
            assert_eq!(
                audio.play(Sample::Ambient),
                Err(PlayError::Unavailable(Sample::Ambient))
            );
        }
        assert_eq!(audio.active(), None);
        assert_eq!(audio.output().opens(), 0);
    }

    #[test]
    fn test_device_failure_leaves_idle() {
        let mut output = ManualOutput::new();
        output.fail_next_open("no device");
        let mut audio = AudioTrigger::new(output, bank());

        assert_eq!(
            audio.play(Sample::Bounce),
            Err(PlayError::Device(DeviceError("no device".into())))
        );
        assert_eq!(audio.state(), AudioState::default());
        audio.play(Sample::Bounce).expect("second attempt");
    }
}
