use crate::{
  building_block::{
    block_matrix::BlockMatrix,
    blocking::blocked_by_row,
    layer::Layer,
  },
  error::{Result, RodLogicError},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
  Horizontal,
  Vertical,
}

impl Orientation {
  pub fn crossed(&self) -> Self {
    match self {
      Orientation::Horizontal => Orientation::Vertical,
      Orientation::Vertical => Orientation::Horizontal,
    }
  }
}

/// Whether a layer shows its blocks or acts as the gate rods of the next
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
  Blocks,
  Gates,
}

/// What a renderer needs to draw one rod.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RodState {
  pub value: bool,
  pub pct: f64,
  /// How far the rod has slid, 0 at rest and 1 fully moved.
  pub offset: f64,
  pub flyout: f64,
  pub display: DisplayMode,
}

/// A layer of the computer together with its animation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveLayer {
  blocks: BlockMatrix,
  values: Vec<bool>,
  pct: f64,
  flyout: f64,
  display: DisplayMode,
  orientation: Orientation,
  color: String,
}

impl LiveLayer {
  pub fn new(
    blocks: BlockMatrix,
    orientation: Orientation,
    color: impl Into<String>,
  ) -> Self {
    let rods = blocks.rod_count();
    LiveLayer {
      blocks,
      values: vec![false; rods],
      pct: 0.0,
      flyout: 0.0,
      display: DisplayMode::Blocks,
      orientation,
      color: color.into(),
    }
  }

  /// The input layer: `rods` rods without blocks, shown as gates.
  pub fn input(
    rods: usize,
    orientation: Orientation,
    color: impl Into<String>,
  ) -> Self {
    let mut layer = Self::new(BlockMatrix::empty(rods, 0), orientation, color);
    layer.display = DisplayMode::Gates;
    layer
  }

  pub fn blocks(&self) -> &BlockMatrix {
    &self.blocks
  }

  pub fn rod_count(&self) -> usize {
    self.blocks.rod_count()
  }

  pub fn orientation(&self) -> Orientation {
    self.orientation
  }

  pub fn color(&self) -> &str {
    &self.color
  }

  /// Rod `i` is 0 iff some raised input meets one of its blocks.
  pub fn compute_values(&self, inputs: &[bool]) -> Result<Vec<bool>> {
    // A layer without rods accepts any input, like an empty `Layer`.
    if self.rod_count() == 0 {
      return Ok(vec![]);
    }
    if inputs.len() != self.blocks.width() {
      return Err(RodLogicError::InvalidLength {
        expected: self.blocks.width(),
        actual: inputs.len(),
      });
    }
    self.blocks.rows()
      .iter()
      .map(|row| blocked_by_row(inputs, row).map(|b| !b))
      .collect()
  }

  /// Equivalent evaluation layer built from gate rods.
  pub fn to_layer(&self) -> Layer {
    Layer::from_block_matrix(&self.blocks)
  }

  pub fn values(&self) -> &[bool] {
    &self.values
  }

  pub fn set_values(&mut self, values: Vec<bool>) -> Result<()> {
    if values.len() != self.rod_count() {
      return Err(RodLogicError::InvalidLength {
        expected: self.rod_count(),
        actual: values.len(),
      });
    }
    self.values = values;
    Ok(())
  }

  pub fn pct(&self) -> f64 {
    self.pct
  }

  pub fn set_pct(&mut self, pct: f64) {
    self.pct = pct.clamp(0.0, 1.0);
  }

  pub fn flyout(&self) -> f64 {
    self.flyout
  }

  pub fn set_flyout(&mut self, flyout: f64) {
    self.flyout = flyout.clamp(0.0, 1.0);
  }

  pub fn display(&self) -> DisplayMode {
    self.display
  }

  pub fn set_display(&mut self, display: DisplayMode) {
    self.display = display;
  }

  pub fn rod_state(&self, rod: usize) -> Option<RodState> {
    let value = *self.values.get(rod)?;
    Some(RodState {
      value,
      pct: self.pct,
      offset: if value { self.pct } else { 0.0 },
      flyout: self.flyout,
      display: self.display,
    })
  }
}
