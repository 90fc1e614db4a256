use std::path::PathBuf;

use anyhow::{anyhow, Result};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, char, digit1, hex_digit1},
    combinator::{all_consuming, map_res},
    sequence::{preceded, separated_pair},
    IResult,
};

use aica::{validate_sample_rate, BitDepth, DataSize, DEFAULT_SAMPLE_RATE};

pub const USAGE: &str = "\
Usage: aica2wav inputFile outputFile [-start=] [-length=] [-freq=]
Outputs 22050hz WAV by default. If outputFile extension is .pcm you get raw PCM instead.

The following arguments are optional:
  -start=###   specify a start offset
  -length=###  specify a length to convert
  -freq=###    override the default frequency for WAV output (8000-48000)
  -bits=###    16 (default) or 32, 32 repeats every sample to double its width
  -legacy=###  non-zero writes the whole file length into the data chunk size";

#[derive(Debug, Eq, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub start: u32,
    pub length: u32, // 0 = until end of input
    pub frequency: u32,
    pub bit_depth: BitDepth,
    pub data_size: DataSize,
}

fn number(input: &str) -> IResult<&str, u32> {
    alt((
        map_res(preceded(tag("0x"), hex_digit1), |x: &str| u32::from_str_radix(x, 16)),
        map_res(digit1, |x: &str| x.parse::<u32>()),
    ))(input)
}

fn option(input: &str) -> IResult<&str, (&str, u32)> {
    preceded(char('-'), separated_pair(alpha1, char('='), number))(input)
}

impl Args {
    /// Returns `None` when the input and output paths are missing.
    pub fn parse<I>(args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let (Some(input), Some(output)) = (args.next(), args.next()) else {
            return Ok(None);
        };

        let mut result = Self {
            input: input.into(),
            output: output.into(),
            start: 0,
            length: 0,
            frequency: DEFAULT_SAMPLE_RATE,
            bit_depth: BitDepth::Bit16,
            data_size: DataSize::Payload,
        };

        for arg in args {
            let not_understood = || anyhow!("Argument {} is not understood", arg);
            let (_, (name, value)) = all_consuming(option)(arg.as_str()).map_err(|_| not_understood())?;

            match name {
                "start" => result.start = value,
                "length" => result.length = value,
                "freq" => result.frequency = value,
                "bits" => result.bit_depth = BitDepth::try_from(value).map_err(|_| not_understood())?,
                "legacy" => {
                    result.data_size = if value != 0 { DataSize::LegacyFileLength } else { DataSize::Payload };
                }
                _ => return Err(not_understood()),
            }
        }

        validate_sample_rate(result.frequency)?;

        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Args>> {
        Args::parse(args.iter().map(|x| x.to_string()))
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let args = parse(&["in.bin", "out.wav"])?.unwrap();

        assert_eq!(args.input, PathBuf::from("in.bin"));
        assert_eq!(args.output, PathBuf::from("out.wav"));
        assert_eq!(args.start, 0);
        assert_eq!(args.length, 0);
        assert_eq!(args.frequency, 22050);
        assert_eq!(args.bit_depth, BitDepth::Bit16);
        assert_eq!(args.data_size, DataSize::Payload);

        Ok(())
    }

    #[test]
    fn test_missing_paths() -> Result<()> {
        assert!(parse(&[])?.is_none());
        assert!(parse(&["in.bin"])?.is_none());

        Ok(())
    }

    #[test]
    fn test_decimal_and_hex() -> Result<()> {
        let args = parse(&["in", "out", "-start=0x1F0", "-length=256", "-freq=0xac44", "-bits=32", "-legacy=1"])?.unwrap();

        assert_eq!(args.start, 0x1f0);
        assert_eq!(args.length, 256);
        assert_eq!(args.frequency, 44100);
        assert_eq!(args.bit_depth, BitDepth::Bit32);
        assert_eq!(args.data_size, DataSize::LegacyFileLength);

        let args = parse(&["in", "out", "-start=0", "-legacy=0"])?.unwrap();
        assert_eq!(args.start, 0);
        assert_eq!(args.data_size, DataSize::Payload);

        Ok(())
    }

    #[test]
    fn test_not_understood() {
        for arg in ["-start=-1", "-start=", "-start", "start=1", "-start=0xZZ", "-start=12ab", "-offset=1", "-bits=24", "-length=4294967296"] {
            let err = parse(&["in", "out", arg]).unwrap_err();
            assert_eq!(format!("{}", err), format!("Argument {} is not understood", arg));
        }
    }

    #[test]
    fn test_frequency_bounds() -> Result<()> {
        assert!(parse(&["in", "out", "-freq=7999"]).is_err());
        assert!(parse(&["in", "out", "-freq=48001"]).is_err());
        assert_eq!(parse(&["in", "out", "-freq=44100"])?.unwrap().frequency, 44100);
        assert_eq!(parse(&["in", "out", "-freq=8000"])?.unwrap().frequency, 8000);
        assert_eq!(parse(&["in", "out", "-freq=48000"])?.unwrap().frequency, 48000);

        Ok(())
    }
}
