use alloc::{format, vec::Vec};

use nom_derive::{NomLE, Parse};

use crate::{
    constants::{BitDepth, Channel, WaveFormat, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE},
    AicaError, Result,
};

pub const WAV_HEADER_SIZE: usize = 44;

const FMT_CHUNK_SIZE: u32 = 16;

/// What goes into the `data` chunk size field at offset 40.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub enum DataSize {
    /// Length of the pcm payload.
    #[default]
    Payload,
    /// Length of the whole file, header included. Older converters wrote this.
    LegacyFileLength,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WavOptions {
    pub sample_rate: u32,
    pub bit_depth: BitDepth,
    pub data_size: DataSize,
}

impl Default for WavOptions {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: BitDepth::Bit16,
            data_size: DataSize::Payload,
        }
    }
}

impl WavOptions {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }
}

pub fn validate_sample_rate(sample_rate: u32) -> Result<u32> {
    if (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        Ok(sample_rate)
    } else {
        Err(AicaError::InvalidSampleRate(sample_rate))
    }
}

/// Prepends a mono pcm RIFF/WAVE header to `pcm`.
pub fn wrap_wav(pcm: &[u8], options: &WavOptions) -> Vec<u8> {
    let total = WAV_HEADER_SIZE + pcm.len();
    let channels = Channel::Mono as u16;
    let block_align = options.bit_depth.bytes_per_sample() * channels;
    let byte_rate = options.sample_rate * block_align as u32;
    let data_size = match options.data_size {
        DataSize::Payload => pcm.len(),
        DataSize::LegacyFileLength => total,
    };

    log::debug!("wrapping {} pcm bytes at {}hz, {:?}", pcm.len(), options.sample_rate, options.bit_depth);

    let mut result = Vec::with_capacity(total);
    result.extend_from_slice(b"RIFF");
    result.extend_from_slice(&((total - 8) as u32).to_le_bytes());
    result.extend_from_slice(b"WAVE");

    result.extend_from_slice(b"fmt ");
    result.extend_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
    result.extend_from_slice(&(WaveFormat::Pcm as u16).to_le_bytes());
    result.extend_from_slice(&channels.to_le_bytes());
    result.extend_from_slice(&options.sample_rate.to_le_bytes());
    result.extend_from_slice(&byte_rate.to_le_bytes());
    result.extend_from_slice(&block_align.to_le_bytes());
    result.extend_from_slice(&options.bit_depth.bits().to_le_bytes());

    result.extend_from_slice(b"data");
    result.extend_from_slice(&(data_size as u32).to_le_bytes());
    result.extend_from_slice(pcm);

    result
}

// 0x9876 becomes 0x98769876, same amplitude at twice the width
pub fn expand_16_to_32(pcm: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(pcm.len() * 2);
    for sample in pcm.chunks_exact(2) {
        result.extend_from_slice(sample);
        result.extend_from_slice(sample);
    }

    result
}

#[derive(NomLE)]
#[nom(Complete)]
pub struct WavHeader<'a> {
    #[nom(Tag(b"RIFF"))]
    pub riff: &'a [u8],
    pub riff_size: u32,
    #[nom(Tag(b"WAVE"))]
    pub wave: &'a [u8],
    #[nom(Tag(b"fmt "))]
    pub fmt: &'a [u8],
    pub fmt_size: u32,
    pub format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    #[nom(Tag(b"data"))]
    pub data: &'a [u8],
    pub data_size: u32,
}

impl<'a> WavHeader<'a> {
    /// Parses the 44-byte header, returning it with the bytes that follow.
    pub fn parse_header(file: &'a [u8]) -> Result<(Self, &'a [u8])> {
        let (payload, header) = <Self as Parse<&'a [u8]>>::parse(file).map_err(|e| AicaError::ParseError(format!("{}", e)))?;

        Ok((header, payload))
    }
}
