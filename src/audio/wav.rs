//! WAV loading
//!
//! `hound` does the RIFF decoding; this module flattens the decoded samples
//! back into little-endian bytes in an encoding a device can be opened with.
//! No resampling: the device runs at the rate and channel count of the file.

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use hound::{SampleFormat, WavReader};
use serde::{Deserialize, Serialize};

/// Little-endian sample encodings we can hand to a device unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleEncoding {
    Unsigned8,
    Signed16,
    Signed32,
    Float32,
}

impl SampleEncoding {
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            SampleEncoding::Unsigned8 => 1,
            SampleEncoding::Signed16 => 2,
            SampleEncoding::Signed32 | SampleEncoding::Float32 => 4,
        }
    }

    /// Byte value of a silent sample
    pub fn silence(&self) -> u8 {
        match self {
            SampleEncoding::Unsigned8 => 0x80,
            _ => 0,
        }
    }
}

/// PCM layout declared by the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavFormat {
    pub encoding: SampleEncoding,
    pub channels: u16,
    pub sample_rate: u32,
}

impl WavFormat {
    /// Bytes per frame (one sample for every channel)
    pub fn block_align(&self) -> usize {
        self.encoding.bytes_per_sample() * usize::from(self.channels)
    }
}

/// A decoded sample: format plus shared raw bytes
#[derive(Debug, Clone)]
pub struct WavClip {
    pub format: WavFormat,
    pub data: Arc<[u8]>,
}

impl WavClip {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WavError> {
        Self::decode(WavReader::open(path)?)
    }

    /// Decode a complete WAV file held in memory
    pub fn parse(bytes: &[u8]) -> Result<Self, WavError> {
        Self::decode(WavReader::new(io::Cursor::new(bytes))?)
    }

    fn decode<R: io::Read>(mut reader: WavReader<R>) -> Result<Self, WavError> {
        let spec = reader.spec();
        let encoding = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 8) => SampleEncoding::Unsigned8,
            (SampleFormat::Int, 16) => SampleEncoding::Signed16,
            // 24-bit is widened to the top of a 32-bit sample
            (SampleFormat::Int, 24 | 32) => SampleEncoding::Signed32,
            (SampleFormat::Float, 32) => SampleEncoding::Float32,
            (format, bits) => return Err(WavError::Unsupported { format, bits }),
        };

        let mut data = Vec::with_capacity(reader.len() as usize * encoding.bytes_per_sample());
        match encoding {
            SampleEncoding::Unsigned8 => {
                // hound hands 8-bit samples back signed
                for sample in reader.samples::<i8>() {
                    data.push((sample? as u8) ^ 0x80);
                }
            }
            SampleEncoding::Signed16 => {
                for sample in reader.samples::<i16>() {
                    data.extend_from_slice(&sample?.to_le_bytes());
                }
            }
            SampleEncoding::Signed32 => {
                let shift = 32 - u32::from(spec.bits_per_sample);
                for sample in reader.samples::<i32>() {
                    data.extend_from_slice(&(sample? << shift).to_le_bytes());
                }
            }
            SampleEncoding::Float32 => {
                for sample in reader.samples::<f32>() {
                    data.extend_from_slice(&sample?.to_le_bytes());
                }
            }
        }

        Ok(Self {
            format: WavFormat {
                encoding,
                channels: spec.channels,
                sample_rate: spec.sample_rate,
            },
            data: data.into(),
        })
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Playback length at the declared rate
    pub fn duration(&self) -> Duration {
        let frame_bytes = self.format.block_align();
        if frame_bytes == 0 || self.format.sample_rate == 0 {
            return Duration::ZERO;
        }
        let frames = (self.data.len() / frame_bytes) as f64;
        Duration::from_secs_f64(frames / f64::from(self.format.sample_rate))
    }
}

/// Why a sample file could not be used
#[derive(Debug)]
pub enum WavError {
    /// Unreadable or malformed file
    Decode(hound::Error),
    /// Decoded fine, but no device encoding matches
    Unsupported { format: SampleFormat, bits: u16 },
}

impl fmt::Display for WavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavError::Decode(err) => write!(f, "{}", err),
            WavError::Unsupported { format, bits } => {
                write!(f, "unsupported encoding ({:?}, {} bits)", format, bits)
            }
        }
    }
}

impl std::error::Error for WavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WavError::Decode(err) => Some(err),
            WavError::Unsupported { .. } => None,
        }
    }
}

impl From<hound::Error> for WavError {
    fn from(err: hound::Error) -> Self {
        WavError::Decode(err)
    }
}

#[cfg(test)]
mod tests {
    use hound::{WavSpec, WavWriter};

    use super::*;

    fn spec(channels: u16, sample_rate: u32, bits: u16, format: SampleFormat) -> WavSpec {
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample: bits,
            sample_format: format,
        }
    }

    fn encode<S: hound::Sample + Copy>(spec: WavSpec, samples: &[S]) -> Vec<u8> {
        let mut cursor = io::Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).expect("writer");
        for &sample in samples {
            writer.write_sample(sample).expect("sample");
        }
        writer.finalize().expect("finalize");
        cursor.into_inner()
    }

    #[test]
    fn test_parse_pcm16_stereo() {
        let bytes = encode(spec(2, 22_050, 16, SampleFormat::Int), &[0x0102i16; 200]);
        let clip = WavClip::parse(&bytes).expect("valid wav");
        assert_eq!(
            clip.format,
            WavFormat {
                encoding: SampleEncoding::Signed16,
                channels: 2,
                sample_rate: 22_050,
            }
        );
        assert_eq!(clip.len(), 400);
        assert_eq!(&clip.data[..2], &[0x02, 0x01]);
        assert_eq!(clip.format.block_align(), 4);
        // 100 frames at 22.05 kHz
        assert!((clip.duration().as_secs_f64() - 100.0 / 22_050.0).abs() < 1e-9);
    }

    #[test]
    fn test_u8_keeps_unsigned_bytes() {
        let bytes = encode(spec(1, 8_000, 8, SampleFormat::Int), &[0i8, 127, -128]);
        let clip = WavClip::parse(&bytes).expect("u8 wav");
        assert_eq!(clip.format.encoding, SampleEncoding::Unsigned8);
        assert_eq!(&clip.data[..], &[0x80, 0xFF, 0x00]);
        assert_eq!(clip.format.encoding.silence(), 0x80);
    }

    #[test]
    fn test_float_and_24_bit() {
        let bytes = encode(spec(1, 48_000, 32, SampleFormat::Float), &[0.5f32, -1.0]);
        let clip = WavClip::parse(&bytes).expect("float wav");
        assert_eq!(clip.format.encoding, SampleEncoding::Float32);
        assert_eq!(&clip.data[..4], &0.5f32.to_le_bytes());

        let bytes = encode(spec(1, 44_100, 24, SampleFormat::Int), &[1i32, -1]);
        let clip = WavClip::parse(&bytes).expect("24-bit wav");
        assert_eq!(clip.format.encoding, SampleEncoding::Signed32);
        assert_eq!(&clip.data[..4], &256i32.to_le_bytes());
        assert_eq!(&clip.data[4..], &(-256i32).to_le_bytes());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(WavClip::parse(b"nope"), Err(WavError::Decode(_))));
        assert!(matches!(
            WavClip::parse(b"RIFF\0\0\0\0AVI LIST"),
            Err(WavError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = WavClip::load("definitely/not/here.wav").unwrap_err();
        assert!(matches!(err, WavError::Decode(hound::Error::IoError(_))));
    }
}
