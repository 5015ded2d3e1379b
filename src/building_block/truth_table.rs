use crate::{
  building_block::stack::Stack,
  error::{Result, RodLogicError},
};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;

const MAX_INPUTS: usize = 63;

/// One assignment of the named inputs and the stack's response to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TruthRow {
  pub inputs: Vec<bool>,
  pub outputs: Vec<bool>,
}

/// Lazy enumeration of a stack's truth table in binary counting order.
///
/// Calling `Stack::rows` again restarts the enumeration.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
  stack: &'a Stack,
  names: Vec<String>,
  next: u64,
  end: u64,
}

impl<'a> Rows<'a> {
  pub(crate) fn new(stack: &'a Stack, names: Vec<String>) -> Result<Self> {
    if names.len() > MAX_INPUTS {
      return Err(RodLogicError::TooManyInputs(names.len()));
    }
    Ok(Rows {
      stack,
      end: 1u64 << names.len(),
      names,
      next: 0,
    })
  }

  pub fn names(&self) -> &[String] {
    &self.names
  }

  fn assignment(&self, n: u64) -> Vec<bool> {
    let width = self.names.len();
    (0..width)
      .map(|i| n >> (width - 1 - i) & 1 == 1)
      .collect()
  }
}

impl<'a> Iterator for Rows<'a> {
  type Item = Result<TruthRow>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.next >= self.end {
      return None;
    }
    let inputs = self.assignment(self.next);
    self.next += 1;
    Some(
      self.stack.evaluate(&inputs)
        .map(|outputs| TruthRow { inputs, outputs })
    )
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = usize::try_from(self.end - self.next).ok();
    (remaining.unwrap_or(usize::MAX), remaining)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TruthTable {
  names: Vec<String>,
  rows: Vec<TruthRow>,
}

impl TruthTable {
  pub fn new(names: Vec<String>, rows: Vec<TruthRow>) -> Self {
    TruthTable { names, rows }
  }

  pub fn names(&self) -> &[String] {
    &self.names
  }

  pub fn rows(&self) -> &[TruthRow] {
    &self.rows
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Value of the named input in row `row`.
  pub fn input(&self, row: usize, name: &str) -> Option<bool> {
    let column = self.names.iter().position(|n| n == name)?;
    self.rows.get(row)?.inputs.get(column).copied()
  }

  pub fn outputs(&self) -> impl Iterator<Item = &[bool]> + '_ {
    self.rows.iter().map(|row| row.outputs.as_slice())
  }

  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    bincode::serialize(self)
      .map_err(|e| RodLogicError::Encoding(e.to_string()))
  }

  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    bincode::deserialize(bytes)
      .map_err(|e| RodLogicError::Encoding(e.to_string()))
  }

  /// Hex SHA3-256 of the encoded table. Stacks computing the same
  /// function over the same input names share a digest.
  pub fn digest(&self) -> Result<String> {
    let mut hasher = Sha3_256::new();
    hasher.update(self.to_bytes()?);
    Ok(hex::encode(hasher.finalize()))
  }
}

impl fmt::Display for TruthTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fn bit(b: bool) -> char {
      if b { '1' } else { '0' }
    }

    for name in &self.names {
      write!(f, "{} ", name)?;
    }
    writeln!(f, "| outputs")?;
    for row in &self.rows {
      for (name, value) in self.names.iter().zip(row.inputs.iter()) {
        write!(f, "{:<width$} ", bit(*value), width = name.chars().count())?;
      }
      let outputs: Vec<String> = row.outputs.iter()
        .map(|b| bit(*b).to_string())
        .collect();
      writeln!(f, "| {}", outputs.join(" "))?;
    }
    Ok(())
  }
}
