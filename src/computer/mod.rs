//! A rod-logic computer: an input layer followed by layers of blocked
//! rods, each crossing the one before it.

pub mod live_layer;
pub mod sequence;

use crate::{
  building_block::{
    block_matrix::BlockMatrix,
    stack::Stack,
  },
  computer::live_layer::{LiveLayer, Orientation, RodState},
  error::{Result, RodLogicError},
  sequencer::step::Step,
};
use tracing::debug;

pub const PALETTE: [&str; 4] = [
  "#ccffcc",
  "#ccccff",
  "#ffcccc",
  "#ffffcc",
];

/// Layers below this index are on screen when a sequence starts.
pub const VISIBLE_AT_START: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Computer {
  layers: Vec<LiveLayer>,
}

impl Computer {
  /// Builds the input layer plus one live layer per block matrix. Every
  /// matrix must cross exactly the rods of the layer before it.
  pub fn new(input_width: usize, specs: Vec<BlockMatrix>) -> Result<Self> {
    let mut orientation = Orientation::Horizontal;
    let mut layers = vec![LiveLayer::input(input_width, orientation, PALETTE[0])];

    for (i, blocks) in specs.into_iter().enumerate() {
      let layer = i + 1;
      let previous = layers[i].rod_count();
      if blocks.width() != previous {
        return Err(RodLogicError::ArityMismatch {
          layer,
          expected: blocks.width(),
          actual: previous,
        });
      }
      orientation = orientation.crossed();
      let mut live = LiveLayer::new(
        blocks,
        orientation,
        PALETTE[layer % PALETTE.len()],
      );
      if layer >= VISIBLE_AT_START {
        live.set_flyout(1.0);
      }
      layers.push(live);
    }

    debug!(layers = layers.len(), input_width, "built computer");
    Ok(Computer { layers })
  }

  pub fn layers(&self) -> &[LiveLayer] {
    &self.layers
  }

  pub fn layer(&self, index: usize) -> Result<&LiveLayer> {
    self.layers.get(index).ok_or(RodLogicError::NoSuchLayer(index))
  }

  pub fn layer_mut(&mut self, index: usize) -> Result<&mut LiveLayer> {
    self.layers.get_mut(index).ok_or(RodLogicError::NoSuchLayer(index))
  }

  pub fn input_width(&self) -> usize {
    self.layers[0].rod_count()
  }

  pub fn output_width(&self) -> usize {
    self.layers.last().map_or(0, |layer| layer.rod_count())
  }

  /// The gate-rod evaluation chain computing the same function as the
  /// block layers.
  pub fn stack(&self) -> Stack {
    Stack::new(self.layers[1..].iter().map(|l| l.to_layer()).collect())
  }

  /// Sets the input rods without animating.
  pub fn set_inputs(&mut self, inputs: Vec<bool>) -> Result<()> {
    self.layers[0].set_values(inputs)
  }

  /// Recomputes layer `index` from the current values of the layer before
  /// it and stores the result.
  pub fn compute_layer(&mut self, index: usize) -> Result<Vec<bool>> {
    if index == 0 {
      return Err(RodLogicError::NoSuchLayer(index));
    }
    let inputs = self.layer(index - 1)?.values().to_vec();
    let values = self.layer(index)?.compute_values(&inputs)?;
    debug!(layer = index, ?inputs, ?values, "computed layer");
    self.layer_mut(index)?.set_values(values.clone())?;
    Ok(values)
  }

  pub fn outputs(&self) -> &[bool] {
    self.layers.last().map(|layer| layer.values()).unwrap_or(&[])
  }

  pub fn rod_state(&self, layer: usize, rod: usize) -> Option<RodState> {
    self.layers.get(layer)?.rod_state(rod)
  }

  /// Step tree playing the evaluation of `inputs` layer by layer.
  pub fn sequence(&self, inputs: Vec<bool>) -> Result<Step<Computer>> {
    sequence::build(self, inputs)
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::building_block::util::parse_bits;

  pub(crate) fn two_layer_computer() -> Computer {
    Computer::new(4, vec![
      BlockMatrix::parse(&["1100", "1000", "0001", "1011"]).unwrap(),
      BlockMatrix::parse(&["0110", "1001"]).unwrap(),
    ]).unwrap()
  }

  #[test]
  fn test_layout_metadata() {
    let computer = two_layer_computer();
    let layers = computer.layers();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[0].orientation(), Orientation::Horizontal);
    assert_eq!(layers[1].orientation(), Orientation::Vertical);
    assert_eq!(layers[2].orientation(), Orientation::Horizontal);
    assert_eq!(layers[1].color(), "#ccccff");
    assert_eq!(layers[1].flyout(), 0.0);
    assert_eq!(layers[2].flyout(), 1.0);
    assert_eq!(computer.input_width(), 4);
    assert_eq!(computer.output_width(), 2);
  }

  #[test]
  fn test_arity_is_checked() {
    let res = Computer::new(4, vec![
      BlockMatrix::parse(&["110"]).unwrap(),
    ]);
    assert_eq!(
      res,
      Err(RodLogicError::ArityMismatch { layer: 1, expected: 3, actual: 4 }),
    );
  }

  #[test]
  fn test_rodless_matrix_must_still_cross_previous_layer() {
    let res = Computer::new(4, vec![BlockMatrix::new(vec![]).unwrap()]);
    assert_eq!(
      res,
      Err(RodLogicError::ArityMismatch { layer: 1, expected: 0, actual: 4 }),
    );

    let mut computer = Computer::new(4, vec![BlockMatrix::empty(0, 4)]).unwrap();
    let inputs = parse_bits("1010").unwrap();
    computer.set_inputs(inputs.clone()).unwrap();
    assert_eq!(computer.compute_layer(1), Ok(vec![]));
    assert_eq!(computer.stack().evaluate(&inputs), Ok(vec![]));
  }

  #[test]
  fn test_compute_layers_matches_stack() {
    let mut computer = two_layer_computer();
    let stack = computer.stack();
    for n in 0..16u32 {
      let inputs: Vec<bool> = (0..4).rev().map(|i| n >> i & 1 == 1).collect();
      computer.set_inputs(inputs.clone()).unwrap();
      computer.compute_layer(1).unwrap();
      computer.compute_layer(2).unwrap();
      assert_eq!(Ok(computer.outputs().to_vec()), stack.evaluate(&inputs));
    }
  }

  #[test]
  fn test_compute_first_layer() {
    let mut computer = two_layer_computer();
    computer.set_inputs(parse_bits("0100").unwrap()).unwrap();
    assert_eq!(
      computer.compute_layer(1),
      Ok(vec![false, true, true, true]),
    );
    assert_eq!(computer.compute_layer(0), Err(RodLogicError::NoSuchLayer(0)));
    assert_eq!(computer.compute_layer(3), Err(RodLogicError::NoSuchLayer(3)));
    assert!(computer.set_inputs(vec![true]).is_err());
  }

  #[test]
  fn test_rod_state_query() {
    let mut computer = two_layer_computer();
    computer.set_inputs(parse_bits("0100").unwrap()).unwrap();
    computer.layer_mut(0).unwrap().set_pct(0.5);
    let rod = computer.rod_state(0, 1).unwrap();
    assert!(rod.value);
    assert_eq!(rod.offset, 0.5);
    assert!(computer.rod_state(7, 0).is_none());
  }
}
