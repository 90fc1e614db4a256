#![no_std]
extern crate alloc;

mod adpcm;
mod constants;
mod wav;

use alloc::string::String;
use core::{fmt, result};

#[derive(Debug, Eq, PartialEq)]
pub enum AicaError {
    ParseError(String),
    RangeError { start: usize, length: usize, available: usize },
    InvalidSampleRate(u32),
    InvalidBitDepth(u32),
}

impl fmt::Display for AicaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(e) => write!(f, "parse error: {}", e),
            Self::RangeError { start, length, available } => write!(
                f,
                "data range {:#x}+{:#x} is larger than the input ({:#x} bytes)",
                start, length, available
            ),
            Self::InvalidSampleRate(rate) => write!(
                f,
                "frequency {} is out of range, it should be between {} and {}",
                rate,
                constants::MIN_SAMPLE_RATE,
                constants::MAX_SAMPLE_RATE
            ),
            Self::InvalidBitDepth(bits) => write!(f, "unsupported bit depth {}", bits),
        }
    }
}

impl From<AicaError> for anyhow::Error {
    fn from(e: AicaError) -> Self {
        anyhow::anyhow!("{}", e)
    }
}

pub type Result<T> = result::Result<T, AicaError>;

pub use self::{
    adpcm::{decode, decode_adpcm, samples_to_bytes},
    constants::{BitDepth, Channel, WaveFormat, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE},
    wav::{expand_16_to_32, validate_sample_rate, wrap_wav, DataSize, WavHeader, WavOptions, WAV_HEADER_SIZE},
};
