use crate::{
  building_block::{
    layer::Layer,
    truth_table::{Rows, TruthTable},
    util::bits_to_bools,
  },
  error::{Result, RodLogicError},
};
use serde::{Deserialize, Serialize};

/// Layers chained into a pipeline: each layer reads the previous one's
/// outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stack {
  layers: Vec<Layer>,
}

impl Stack {
  pub fn new(layers: Vec<Layer>) -> Self {
    Stack { layers }
  }

  /// Parses one list of rod strings per layer, e.g.
  /// `&[vec!["IPD", "PDP"], vec!["II"], vec!["I"]]`.
  pub fn parse<L, S>(layers: &[L]) -> Result<Self>
  where
    L: AsRef<[S]>,
    S: AsRef<str>,
  {
    let layers = layers.iter()
      .map(|rods| Layer::parse(rods.as_ref()))
      .collect::<Result<Vec<Layer>>>()?;
    Ok(Stack { layers })
  }

  pub fn layers(&self) -> &[Layer] {
    &self.layers
  }

  pub fn len(&self) -> usize {
    self.layers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.layers.is_empty()
  }

  pub fn push(&mut self, layer: Layer) {
    self.layers.push(layer);
  }

  pub fn evaluate(&self, inputs: &[bool]) -> Result<Vec<bool>> {
    self.layers.iter()
      .enumerate()
      .try_fold(inputs.to_vec(), |data, (i, layer)| {
        if let Some(expected) = layer.input_width() {
          if expected != data.len() {
            return Err(RodLogicError::ArityMismatch {
              layer: i,
              expected,
              actual: data.len(),
            });
          }
        }
        layer.evaluate(&data)
      })
  }

  pub fn evaluate_bits(&self, bits: &[u8]) -> Result<Vec<bool>> {
    self.evaluate(&bits_to_bools(bits)?)
  }

  /// Checks that bits of the given width flow through every layer, and
  /// returns the output width.
  pub fn check_arity(&self, input_width: usize) -> Result<usize> {
    self.layers.iter()
      .enumerate()
      .try_fold(input_width, |width, (i, layer)| {
        match layer.input_width() {
          Some(expected) if expected != width => {
            Err(RodLogicError::ArityMismatch {
              layer: i,
              expected,
              actual: width,
            })
          },
          _ => Ok(layer.rod_count()),
        }
      })
  }

  /// Splits into the first `at` layers and the rest.
  pub fn split_at(&self, at: usize) -> (Stack, Stack) {
    let at = at.min(self.layers.len());
    let (head, tail) = self.layers.split_at(at);
    (Stack::new(head.to_vec()), Stack::new(tail.to_vec()))
  }

  /// Feeds this stack's outputs into `next`.
  pub fn then(mut self, next: Stack) -> Stack {
    self.layers.extend(next.layers);
    self
  }

  /// Lazily enumerates every assignment of the named inputs, first name
  /// most significant.
  pub fn rows<S: AsRef<str>>(&self, input_names: &[S]) -> Result<Rows<'_>> {
    let names = input_names.iter()
      .map(|name| name.as_ref().to_string())
      .collect::<Vec<_>>();
    self.check_arity(names.len())?;
    Rows::new(self, names)
  }

  pub fn truth_table<S: AsRef<str>>(
    &self,
    input_names: &[S],
  ) -> Result<TruthTable> {
    let rows = self.rows(input_names)?;
    let names = rows.names().to_vec();
    let rows = rows.collect::<Result<Vec<_>>>()?;
    Ok(TruthTable::new(names, rows))
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::building_block::rod::Rod;

  /// out = E ? W : D
  pub(crate) fn data_register() -> Stack {
    let rod_f = Rod::parse("IPD").unwrap();
    let rod_g = Rod::parse("PDP").unwrap();
    let layer_1 = Layer::new(vec![rod_f, rod_g]).unwrap();
    let rod_h = Rod::parse("II").unwrap();
    let layer_2 = Layer::new(vec![rod_h]).unwrap();
    let rod_j = Rod::parse("I").unwrap();
    let output = Layer::new(vec![rod_j]).unwrap();
    Stack::new(vec![layer_1, layer_2, output])
  }

  #[test]
  fn test_parse_matches_built_stack() {
    let parsed = Stack::parse(&[vec!["IPD", "PDP"], vec!["II"], vec!["I"]]).unwrap();
    assert_eq!(parsed, data_register());
    assert!(Stack::parse(&[vec!["IPD", "P"]]).is_err());
    assert_eq!(Stack::parse::<Vec<&str>, &str>(&[]), Ok(Stack::default()));
  }

  fn all_inputs(width: usize) -> Vec<Vec<bool>> {
    (0..1u32 << width)
      .map(|n| (0..width).rev().map(|i| n >> i & 1 == 1).collect())
      .collect()
  }

  #[test]
  fn test_data_register() {
    let stack = data_register();
    for inputs in all_inputs(3) {
      let (e, d, w) = (inputs[0], inputs[1], inputs[2]);
      let expected = if e { w } else { d };
      assert_eq!(stack.evaluate(&inputs), Ok(vec![expected]));
    }
  }

  #[test]
  fn test_split_and_chain_agree_with_whole() {
    let stack = data_register();
    for at in 0..=stack.len() {
      let (head, tail) = stack.split_at(at);
      for inputs in all_inputs(3) {
        let chained = head.evaluate(&inputs)
          .and_then(|mid| tail.evaluate(&mid));
        assert_eq!(chained, stack.evaluate(&inputs));
      }
      assert_eq!(head.then(tail), stack);
    }
  }

  #[test]
  fn test_arity_mismatch() {
    let stack = data_register();
    assert_eq!(
      stack.evaluate(&[true, false]),
      Err(RodLogicError::ArityMismatch { layer: 0, expected: 3, actual: 2 }),
    );

    let mut broken = data_register();
    broken.push(Layer::new(vec![Rod::parse("PP").unwrap()]).unwrap());
    assert_eq!(
      broken.evaluate(&[true, false, true]),
      Err(RodLogicError::ArityMismatch { layer: 3, expected: 2, actual: 1 }),
    );
    assert_eq!(
      broken.check_arity(3),
      Err(RodLogicError::ArityMismatch { layer: 3, expected: 2, actual: 1 }),
    );
  }

  #[test]
  fn test_empty_stack_is_identity() {
    let stack = Stack::default();
    assert_eq!(stack.evaluate(&[true, false]), Ok(vec![true, false]));
    assert_eq!(stack.check_arity(2), Ok(2));
  }

  #[test]
  fn test_evaluate_bits() {
    let stack = data_register();
    assert_eq!(stack.evaluate_bits(&[1, 0, 1]), Ok(vec![true]));
    assert!(stack.evaluate_bits(&[1, 0, 3]).is_err());
  }
}
