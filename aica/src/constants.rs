use crate::AicaError;

pub const MIN_SAMPLE_RATE: u32 = 8000;
pub const MAX_SAMPLE_RATE: u32 = 48000;
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

#[repr(u16)]
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WaveFormat {
    Pcm = 1,
}

#[repr(u16)]
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Channel {
    Mono = 1,
}

#[repr(u16)]
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub enum BitDepth {
    #[default]
    Bit16 = 16,
    Bit32 = 32,
}

impl BitDepth {
    pub fn bits(self) -> u16 {
        self as u16
    }

    pub fn bytes_per_sample(self) -> u16 {
        self.bits() >> 3
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = AicaError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            16 => Ok(Self::Bit16),
            32 => Ok(Self::Bit32),
            _ => Err(AicaError::InvalidBitDepth(value)),
        }
    }
}
