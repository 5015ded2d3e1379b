use crate::{
  building_block::{
    blocking::blocked,
    gate::Gate,
    util::bits_to_bools,
  },
  error::{Result, RodLogicError},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sliding rod carrying one gate per crossing input rod.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rod {
  gates: Vec<Gate>,
}

impl Rod {
  pub fn new(gates: Vec<Gate>) -> Self {
    Rod { gates }
  }

  /// Builds a rod from gate specifiers such as `"I"` or `"DONT_CARE"`,
  /// failing on the first unknown one.
  pub fn from_specifiers<I, S>(specifiers: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let gates = specifiers.into_iter()
      .map(|s| s.as_ref().parse::<Gate>())
      .collect::<Result<Vec<Gate>>>()?;
    Ok(Rod { gates })
  }

  /// Builds a rod from one gate letter per position, e.g. `"IPD"`.
  pub fn parse(symbols: &str) -> Result<Self> {
    let gates = symbols.chars()
      .filter(|c| !c.is_whitespace())
      .map(Gate::try_from)
      .collect::<Result<Vec<Gate>>>()?;
    Ok(Rod { gates })
  }

  /// A block obstructs a crossing rod that carries 1, which is exactly what
  /// an `Invert` gate does; an empty position never obstructs.
  pub fn from_block_row(block_row: &[bool]) -> Self {
    let gates = block_row.iter()
      .map(|block| if *block { Gate::Invert } else { Gate::DontCare })
      .collect();
    Rod { gates }
  }

  pub fn gates(&self) -> &[Gate] {
    &self.gates
  }

  pub fn width(&self) -> usize {
    self.gates.len()
  }

  pub fn evaluate(&self, inputs: &[bool]) -> Result<bool> {
    self.check_width(inputs.len())?;
    self.pass(inputs.iter().map(|d| Some(*d)))
  }

  /// Evaluates with some crossing rods absent (`None`). Only positions
  /// holding `DontCare` or `Zero` may be absent.
  pub fn evaluate_partial(&self, inputs: &[Option<bool>]) -> Result<bool> {
    self.check_width(inputs.len())?;
    self.pass(inputs.iter().copied())
  }

  fn check_width(&self, actual: usize) -> Result<()> {
    if actual != self.gates.len() {
      return Err(RodLogicError::InvalidLength {
        expected: self.gates.len(),
        actual,
      });
    }
    Ok(())
  }

  fn pass<I>(&self, inputs: I) -> Result<bool>
  where
    I: Iterator<Item = Option<bool>>,
  {
    let obstructions = self.gates.iter()
      .zip(inputs)
      .map(|(gate, input)| gate.apply(input).map(|open| !open))
      .collect::<Result<Vec<bool>>>()?;
    Ok(!blocked(obstructions))
  }

  pub fn evaluate_bits(&self, bits: &[u8]) -> Result<bool> {
    self.evaluate(&bits_to_bools(bits)?)
  }
}

impl fmt::Display for Rod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for gate in &self.gates {
      write!(f, "{}", gate.symbol())?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn all_inputs(width: usize) -> Vec<Vec<bool>> {
    (0..1u32 << width)
      .map(|n| (0..width).rev().map(|i| n >> i & 1 == 1).collect())
      .collect()
  }

  #[test]
  fn test_all_dont_care_always_passes() {
    for width in 0..5 {
      let rod = Rod::new(vec![Gate::DontCare; width]);
      for inputs in all_inputs(width) {
        assert_eq!(rod.evaluate(&inputs), Ok(true));
      }
    }
  }

  #[test]
  fn test_single_zero_always_blocks() {
    for width in 1..5 {
      for zero_at in 0..width {
        let mut gates = vec![Gate::Pass; width];
        gates[zero_at] = Gate::Zero;
        let rod = Rod::new(gates);
        for inputs in all_inputs(width) {
          assert_eq!(rod.evaluate(&inputs), Ok(false));
        }
      }
    }
  }

  #[test]
  fn test_rod_f() {
    // F = !E && D, W ignored
    let rod = Rod::parse("IPD").unwrap();
    assert_eq!(rod.evaluate(&[false, true, false]), Ok(true));
    assert_eq!(rod.evaluate(&[false, true, true]), Ok(true));
    assert_eq!(rod.evaluate(&[true, true, true]), Ok(false));
    assert_eq!(rod.evaluate(&[false, false, true]), Ok(false));
  }

  #[test]
  fn test_length_mismatch() {
    let rod = Rod::parse("PP").unwrap();
    assert_eq!(
      rod.evaluate(&[true]),
      Err(RodLogicError::InvalidLength { expected: 2, actual: 1 }),
    );
  }

  #[test]
  fn test_partial_inputs() {
    assert_eq!(Rod::parse("DZ").unwrap().evaluate_partial(&[None, None]), Ok(false));
    assert_eq!(Rod::parse("DP").unwrap().evaluate_partial(&[None, Some(true)]), Ok(true));
    assert_eq!(Rod::parse("DI").unwrap().evaluate_partial(&[None, Some(true)]), Ok(false));
    assert!(matches!(
      Rod::parse("PD").unwrap().evaluate_partial(&[None, Some(false)]),
      Err(RodLogicError::InvalidGateInput(_)),
    ));
    assert_eq!(
      Rod::parse("PD").unwrap().evaluate_partial(&[None]),
      Err(RodLogicError::InvalidLength { expected: 2, actual: 1 }),
    );
  }

  #[test]
  fn test_invalid_specifier_fails_at_construction() {
    assert_eq!(
      Rod::from_specifiers(["PASS", "NAND"]),
      Err(RodLogicError::InvalidGateKind("NAND".to_string())),
    );
    assert!(Rod::parse("PQ").is_err());
  }

  #[test]
  fn test_evaluate_bits() {
    let rod = Rod::from_specifiers(["PASS", "INVERT"]).unwrap();
    assert_eq!(rod.evaluate_bits(&[1, 0]), Ok(true));
    assert_eq!(rod.evaluate_bits(&[1, 1]), Ok(false));
    assert!(matches!(
      rod.evaluate_bits(&[1, 7]),
      Err(RodLogicError::InvalidGateInput(_)),
    ));
  }

  #[test]
  fn test_block_row_maps_to_invert_and_dont_care() {
    let rod = Rod::from_block_row(&[true, false, true]);
    assert_eq!(rod.to_string(), "IDI");
    assert_eq!(rod.evaluate(&[false, true, false]), Ok(true));
    assert_eq!(rod.evaluate(&[false, true, true]), Ok(false));
  }
}
