// decode yamaha aica adpcm
// 4-bit codes, low nibble first, one 16-bit sample per code

use alloc::vec::Vec;

use crate::{AicaError, Result};

static DIFF_TABLE: [i32; 16] = [1, 3, 5, 7, 9, 11, 13, 15, -1, -3, -5, -7, -9, -11, -13, -15];
static SCALE_TABLE: [i32; 8] = [0x0e6, 0x0e6, 0x0e6, 0x0e6, 0x133, 0x199, 0x200, 0x266];

const MIN_STEP: i32 = 0x7f;
const MAX_STEP: i32 = 0x6000;

struct DecodeContext {
    step_size: i32,
    history: i32,
}

impl DecodeContext {
    fn new() -> Self {
        Self {
            step_size: MIN_STEP,
            history: 0,
        }
    }
}

fn aica_step(code: u8, context: &mut DecodeContext) -> i16 {
    let code = (code & 0xf) as usize;

    let x = context.step_size * DIFF_TABLE[code];
    // logical shift of the 32-bit value: adds 7 to negative x so >> 3 rounds toward zero
    let x = context.history + ((x + ((x as u32) >> 29) as i32) >> 3);
    context.history = i32::clamp(x, -32768, 32767);

    let nstep = (context.step_size * SCALE_TABLE[code & 7]) >> 8;
    context.step_size = i32::clamp(nstep, MIN_STEP, MAX_STEP);

    context.history as i16
}

fn decode_into(data: &[u8], context: &mut DecodeContext, result: &mut Vec<i16>) {
    for &byte in data {
        result.push(aica_step(byte, context));
        result.push(aica_step(byte >> 4, context));
    }
}

pub fn decode_adpcm(data: &[u8]) -> Vec<i16> {
    let mut result = Vec::with_capacity(data.len() * 2);
    let mut context = DecodeContext::new();

    decode_into(data, &mut context, &mut result);

    result
}

pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|x| x.to_le_bytes()).collect()
}

/// Decodes `length` bytes of adpcm starting at `start` into little-endian 16-bit pcm.
///
/// The output is always `4 * length` bytes long.
pub fn decode(input: &[u8], start: usize, length: usize) -> Result<Vec<u8>> {
    let range_error = || AicaError::RangeError {
        start,
        length,
        available: input.len(),
    };

    let end = start.checked_add(length).ok_or_else(range_error)?;
    let data = input.get(start..end).ok_or_else(range_error)?;

    log::debug!("decoding {} adpcm bytes at {:#x}", data.len(), start);

    Ok(samples_to_bytes(&decode_adpcm(data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_stays_bounded() {
        let mut context = DecodeContext::new();
        let mut result = Vec::new();

        for _ in 0..64 {
            for byte in 0..=255u8 {
                decode_into(&[byte], &mut context, &mut result);
                assert!((MIN_STEP..=MAX_STEP).contains(&context.step_size));
                assert!((-32768..=32767).contains(&context.history));
            }
        }
    }

    #[test]
    fn test_step_saturates() {
        let mut context = DecodeContext::new();

        for _ in 0..32 {
            aica_step(0x7, &mut context);
        }
        assert_eq!(context.step_size, MAX_STEP);
        assert_eq!(context.history, 32767);

        for _ in 0..64 {
            aica_step(0x0, &mut context);
        }
        assert_eq!(context.step_size, MIN_STEP);
    }

    #[test]
    fn test_sign_bit_does_not_change_step() {
        let mut positive = DecodeContext::new();
        let mut negative = DecodeContext::new();

        for code in 0..8u8 {
            aica_step(code, &mut positive);
            aica_step(code | 8, &mut negative);
            assert_eq!(positive.step_size, negative.step_size);
        }
    }
}
