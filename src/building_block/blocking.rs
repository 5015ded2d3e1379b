//! The one mechanical rule shared by gate rods and block matrices: a rod
//! stops as soon as anything along it is in the way.

use crate::error::{Result, RodLogicError};

pub fn blocked<I>(obstructions: I) -> bool
where
  I: IntoIterator<Item = bool>,
{
  obstructions.into_iter().any(|o| o)
}

/// A row of blocks stops its rod when a crossing rod carrying 1 meets a
/// block.
pub fn blocked_by_row(inputs: &[bool], block_row: &[bool]) -> Result<bool> {
  if inputs.len() != block_row.len() {
    return Err(RodLogicError::InvalidLength {
      expected: block_row.len(),
      actual: inputs.len(),
    });
  }
  Ok(blocked(
    inputs.iter()
      .zip(block_row.iter())
      .map(|(input, block)| *input && *block),
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_nothing_in_the_way() {
    assert!(!blocked(Vec::<bool>::new()));
    assert!(!blocked([false, false]));
    assert!(blocked([false, true]));
  }

  #[test]
  fn test_row_blocks_only_on_raised_inputs() {
    let row = [true, false, true];
    assert_eq!(blocked_by_row(&[false, true, false], &row), Ok(false));
    assert_eq!(blocked_by_row(&[false, false, true], &row), Ok(true));
    assert_eq!(blocked_by_row(&[true, false, false], &row), Ok(true));
  }

  #[test]
  fn test_row_width_mismatch() {
    assert_eq!(
      blocked_by_row(&[true], &[true, false]),
      Err(RodLogicError::InvalidLength { expected: 2, actual: 1 }),
    );
  }
}
