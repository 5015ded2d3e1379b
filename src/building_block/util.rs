use crate::error::{Result, RodLogicError};
use rand::Rng;

pub fn gen_random_binary_val<R: Rng>(rng: &mut R) -> bool {
  rng.gen::<bool>()
}

/// Converts raw 0/1 bits coming from a host into booleans.
pub fn bits_to_bools(bits: &[u8]) -> Result<Vec<bool>> {
  bits.iter()
    .enumerate()
    .map(|(i, bit)| match bit {
      0 => Ok(false),
      1 => Ok(true),
      other => Err(RodLogicError::InvalidGateInput(
        format!("bit {} has value {}, expected 0 or 1", i, other),
      )),
    })
    .collect()
}

pub fn format_bits(values: &[bool]) -> String {
  values.iter().map(|v| if *v { '1' } else { '0' }).collect()
}

/// Parses a string of `0`/`1` characters.
pub fn parse_bits(s: &str) -> Result<Vec<bool>> {
  s.chars()
    .enumerate()
    .map(|(i, c)| match c {
      '0' => Ok(false),
      '1' => Ok(true),
      other => Err(RodLogicError::InvalidGateInput(
        format!("character {} is {:?}, expected '0' or '1'", i, other),
      )),
    })
    .collect()
}
