mod args;

use std::{env, fs, path::Path};

use anyhow::{bail, Context, Result};
use log::info;

use aica::{decode, expand_16_to_32, wrap_wav, AicaError, BitDepth, WavOptions};

use self::args::{Args, USAGE};

fn main() -> Result<()> {
    init_logger()?;

    let Some(args) = Args::parse(env::args().skip(1))? else {
        println!("{}", USAGE);
        return Ok(());
    };

    convert(&args)?;
    info!("Done!");

    Ok(())
}

fn init_logger() -> Result<()> {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::ConfigBuilder::new().add_filter_allow("aica".to_owned()).build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

// length 0 selects everything from start to the end of the input
fn select_range(available: usize, start: u32, length: u32) -> Result<(usize, usize)> {
    let (start, length) = (start as usize, length as usize);

    if start > available || (length > 0 && start.saturating_add(length) > available) {
        return Err(AicaError::RangeError { start, length, available }.into());
    }

    Ok((start, if length == 0 { available - start } else { length }))
}

fn is_raw_pcm(path: &Path) -> bool {
    path.extension().is_some_and(|x| x == "pcm")
}

fn convert(args: &Args) -> Result<()> {
    if !args.input.is_file() {
        bail!("Input file {} not found", args.input.display());
    }
    let data = fs::read(&args.input).with_context(|| format!("Reading {}", args.input.display()))?;

    let (start, length) = select_range(data.len(), args.start, args.length)?;
    info!("Decoding {:#x} bytes at {:#x} from {}", length, start, args.input.display());

    let mut pcm = decode(&data, start, length)?;
    if args.bit_depth == BitDepth::Bit32 {
        pcm = expand_16_to_32(&pcm);
    }

    let output = if is_raw_pcm(&args.output) {
        pcm
    } else {
        let options = WavOptions {
            sample_rate: args.frequency,
            bit_depth: args.bit_depth,
            data_size: args.data_size,
        };
        wrap_wav(&pcm, &options)
    };

    fs::write(&args.output, &output).with_context(|| format!("Writing {}", args.output.display()))?;
    info!("Wrote {} bytes to {}", output.len(), args.output.display());

    Ok(())
}
