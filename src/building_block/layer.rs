use crate::{
  building_block::{
    block_matrix::BlockMatrix,
    rod::Rod,
    util::bits_to_bools,
  },
  error::{Result, RodLogicError},
};
use serde::{Deserialize, Serialize};

/// A bank of rods all crossing the same input rods.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layer {
  rods: Vec<Rod>,
}

impl Layer {
  pub fn new(rods: Vec<Rod>) -> Result<Self> {
    if let Some(first) = rods.first() {
      let expected = first.width();
      if let Some((rod, r)) = rods.iter()
        .enumerate()
        .find(|(_, r)| r.width() != expected)
      {
        return Err(RodLogicError::RaggedLayer {
          rod,
          expected,
          actual: r.width(),
        });
      }
    }
    Ok(Layer { rods })
  }

  /// Parses one rod per string, e.g. `&["IPD", "PDP"]`.
  pub fn parse<S: AsRef<str>>(rods: &[S]) -> Result<Self> {
    let rods = rods.iter()
      .map(|rod| Rod::parse(rod.as_ref()))
      .collect::<Result<Vec<Rod>>>()?;
    Layer::new(rods)
  }

  /// Layer with one gate rod per row of the matrix.
  pub fn from_block_matrix(blocks: &BlockMatrix) -> Self {
    let rods = blocks.rows()
      .iter()
      .map(|row| Rod::from_block_row(row))
      .collect();
    Layer { rods }
  }

  pub fn rods(&self) -> &[Rod] {
    &self.rods
  }

  pub fn rod_count(&self) -> usize {
    self.rods.len()
  }

  /// Width every rod expects, `None` for a layer without rods.
  pub fn input_width(&self) -> Option<usize> {
    self.rods.first().map(|rod| rod.width())
  }

  pub fn evaluate(&self, inputs: &[bool]) -> Result<Vec<bool>> {
    self.rods.iter()
      .map(|rod| rod.evaluate(inputs))
      .collect()
  }

  pub fn evaluate_bits(&self, bits: &[u8]) -> Result<Vec<bool>> {
    self.evaluate(&bits_to_bools(bits)?)
  }
}
