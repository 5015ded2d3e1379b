use crate::sequencer::step::{Leaf, Step};
use serde::{Deserialize, Serialize};

/// Position and description of the current leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
  pub path: Vec<usize>,
  pub description: String,
}

#[derive(Debug)]
pub struct CurrentStep<'a, S> {
  pub path: Vec<usize>,
  pub leaf: &'a Leaf<S>,
}

impl<'a, S> CurrentStep<'a, S> {
  pub fn description(&self) -> &'a str {
    self.leaf.description()
  }

  pub fn duration_scale(&self) -> f64 {
    self.leaf.duration_scale()
  }

  pub fn info(&self) -> StepInfo {
    StepInfo {
      path: self.path.clone(),
      description: self.leaf.description().to_string(),
    }
  }
}

/// Depth-first cursor over a step tree.
///
/// A composite's `index` always points at its first child that still has
/// a step to run, or past the end once all of them are exhausted.
#[derive(Debug)]
pub enum Stepper<S> {
  Leaf {
    leaf: Leaf<S>,
    exhausted: bool,
  },
  Composite {
    children: Vec<Stepper<S>>,
    index: usize,
  },
}

impl<S> Stepper<S> {
  pub fn new(step: Step<S>) -> Self {
    match step {
      Step::Leaf(leaf) => Stepper::Leaf {
        leaf,
        exhausted: false,
      },
      Step::Composite(composite) => {
        let mut stepper = Stepper::Composite {
          children: composite.children
            .into_iter()
            .map(Stepper::new)
            .collect(),
          index: 0,
        };
        stepper.skip_exhausted();
        stepper
      },
    }
  }

  pub fn is_exhausted(&self) -> bool {
    match self {
      Stepper::Leaf { exhausted, .. } => *exhausted,
      Stepper::Composite { children, index } => *index >= children.len(),
    }
  }

  pub fn current(&self) -> Option<CurrentStep<'_, S>> {
    self.current_at(Vec::new())
  }

  fn current_at(&self, mut path: Vec<usize>) -> Option<CurrentStep<'_, S>> {
    match self {
      Stepper::Leaf { exhausted: true, .. } => None,
      Stepper::Leaf { leaf, exhausted: false } => Some(CurrentStep { path, leaf }),
      Stepper::Composite { children, index } => {
        let child = children.get(*index)?;
        path.push(*index);
        child.current_at(path)
      },
    }
  }

  /// Moves past the current leaf. Returns whether another leaf remains.
  pub fn advance(&mut self) -> bool {
    match self {
      Stepper::Leaf { exhausted, .. } => {
        *exhausted = true;
        false
      },
      Stepper::Composite { children, index } => {
        let Some(child) = children.get_mut(*index) else {
          return false;
        };
        if !child.advance() {
          *index += 1;
          self.skip_exhausted();
        }
        !self.is_exhausted()
      },
    }
  }

  fn skip_exhausted(&mut self) {
    if let Stepper::Composite { children, index } = self {
      while children.get(*index).is_some_and(|child| child.is_exhausted()) {
        *index += 1;
      }
    }
  }
}

impl<S> From<Step<S>> for Stepper<S> {
  fn from(step: Step<S>) -> Self {
    Stepper::new(step)
  }
}
