use crate::{
  building_block::util::format_bits,
  computer::{
    live_layer::DisplayMode,
    Computer,
    VISIBLE_AT_START,
  },
  error::{Result, RodLogicError},
  sequencer::step::{Leaf, Step},
};

// Root
// ├─ Set inputs
// ├─ Layer 1: compute 1, shed 0, flip 1
// ├─ Layer 2: fly in 2, compute 2, shed 1, flip 2
// ...
// └─ Layer n: fly in n, compute n
pub fn build(computer: &Computer, inputs: Vec<bool>) -> Result<Step<Computer>> {
  if inputs.len() != computer.input_width() {
    return Err(RodLogicError::InvalidLength {
      expected: computer.input_width(),
      actual: inputs.len(),
    });
  }

  let last = computer.layers().len() - 1;
  let mut steps = vec![set_inputs(inputs)];

  for layer in 1..=last {
    let mut children = vec![];
    if layer >= VISIBLE_AT_START {
      children.push(fly_in(layer));
    }
    children.push(compute(layer));
    if layer < last {
      children.push(shed(layer - 1));
      children.push(flip_to_gates(layer));
    }
    steps.push(Step::composite(format!("Layer {}", layer), children));
  }

  Ok(Step::composite("Evaluate", steps))
}

fn set_inputs(inputs: Vec<bool>) -> Step<Computer> {
  Leaf::new(format!("Set inputs to {}", format_bits(&inputs)), 1.0)
    .with_setup(move |computer: &mut Computer| {
      let input = computer.layer_mut(0)?;
      input.set_values(inputs.clone())?;
      input.set_pct(0.0);
      Ok(())
    })
    .with_update(|computer: &mut Computer, pct| {
      computer.layer_mut(0)?.set_pct(pct);
      Ok(())
    })
    .into()
}

fn fly_in(layer: usize) -> Step<Computer> {
  Leaf::new(format!("Fly in layer {}", layer), 1.0)
    .with_update(move |computer: &mut Computer, pct| {
      computer.layer_mut(layer)?.set_flyout(1.0 - pct);
      Ok(())
    })
    .into()
}

fn compute(layer: usize) -> Step<Computer> {
  Leaf::new(format!("Compute layer {}", layer), 1.0)
    .with_setup(move |computer: &mut Computer| {
      computer.compute_layer(layer)?;
      computer.layer_mut(layer)?.set_pct(0.0);
      Ok(())
    })
    .with_update(move |computer: &mut Computer, pct| {
      computer.layer_mut(layer)?.set_pct(pct);
      Ok(())
    })
    .into()
}

fn shed(layer: usize) -> Step<Computer> {
  Leaf::new(format!("Shed layer {}", layer), 1.0)
    .with_update(move |computer: &mut Computer, pct| {
      computer.layer_mut(layer)?.set_flyout(pct);
      Ok(())
    })
    .into()
}

fn flip_to_gates(layer: usize) -> Step<Computer> {
  Leaf::new(format!("Show layer {} as gates", layer), 0.0)
    .with_setup(move |computer: &mut Computer| {
      computer.layer_mut(layer)?.set_display(DisplayMode::Gates);
      Ok(())
    })
    .into()
}
