use crate::{
  building_block::util::{gen_random_binary_val, parse_bits, format_bits},
  error::{Result, RodLogicError},
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Block placement of a layer: one row per rod, one column per crossing
/// input rod. `true` means a block sits at that crossing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockMatrix {
  rows: Vec<Vec<bool>>,
  width: usize,
}

impl BlockMatrix {
  pub fn new(rows: Vec<Vec<bool>>) -> Result<Self> {
    let width = rows.first().map_or(0, |row| row.len());
    if let Some((rod, row)) = rows.iter()
      .enumerate()
      .find(|(_, row)| row.len() != width)
    {
      return Err(RodLogicError::RaggedLayer {
        rod,
        expected: width,
        actual: row.len(),
      });
    }
    Ok(BlockMatrix { rows, width })
  }

  /// A layer of `rods` rods without any block, each crossing `width`
  /// input rods.
  pub fn empty(rods: usize, width: usize) -> Self {
    BlockMatrix {
      rows: vec![vec![false; width]; rods],
      width,
    }
  }

  /// Parses rows written as `0`/`1` strings, e.g. `["1100", "1000"]`.
  pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
    let rows = rows.iter()
      .map(|row| parse_bits(row.as_ref()))
      .collect::<Result<Vec<_>>>()?;
    Self::new(rows)
  }

  pub fn random<R: Rng>(rng: &mut R, rods: usize, width: usize) -> Self {
    let rows = (0..rods)
      .map(|_| (0..width).map(|_| gen_random_binary_val(rng)).collect())
      .collect();
    BlockMatrix { rows, width }
  }

  pub fn rows(&self) -> &[Vec<bool>] {
    &self.rows
  }

  pub fn row(&self, rod: usize) -> Option<&[bool]> {
    self.rows.get(rod).map(|row| row.as_slice())
  }

  pub fn rod_count(&self) -> usize {
    self.rows.len()
  }

  /// Number of input rods each rod crosses.
  pub fn width(&self) -> usize {
    self.width
  }

  pub fn has_block(&self, rod: usize, input: usize) -> bool {
    self.rows.get(rod)
      .and_then(|row| row.get(input))
      .copied()
      .unwrap_or(false)
  }

  pub fn to_strings(&self) -> Vec<String> {
    self.rows.iter().map(|row| format_bits(row)).collect()
  }
}
