use crate::error::ActionError;
use std::fmt;

pub type SetupAction<S> =
  Box<dyn Fn(&mut S) -> Result<(), ActionError> + Send + Sync>;
pub type UpdateAction<S> =
  Box<dyn Fn(&mut S, f64) -> Result<(), ActionError> + Send + Sync>;

/// A single timed action: `setup` runs once, then `update` is driven with
/// progress from 0 to 1 over `duration_scale` base durations.
pub struct Leaf<S> {
  description: String,
  setup: Option<SetupAction<S>>,
  update: Option<UpdateAction<S>>,
  duration_scale: f64,
}

impl<S> Leaf<S> {
  /// Negative or non-finite scales are treated as instantaneous.
  pub fn new(description: impl Into<String>, duration_scale: f64) -> Self {
    let duration_scale = if duration_scale.is_finite() && duration_scale > 0.0 {
      duration_scale
    } else {
      0.0
    };
    Leaf {
      description: description.into(),
      setup: None,
      update: None,
      duration_scale,
    }
  }

  pub fn with_setup<F>(mut self, setup: F) -> Self
  where
    F: Fn(&mut S) -> Result<(), ActionError> + Send + Sync + 'static,
  {
    self.setup = Some(Box::new(setup));
    self
  }

  pub fn with_update<F>(mut self, update: F) -> Self
  where
    F: Fn(&mut S, f64) -> Result<(), ActionError> + Send + Sync + 'static,
  {
    self.update = Some(Box::new(update));
    self
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn duration_scale(&self) -> f64 {
    self.duration_scale
  }

  pub fn setup(&self, state: &mut S) -> Result<(), ActionError> {
    match &self.setup {
      Some(setup) => setup(state),
      None => Ok(()),
    }
  }

  pub fn update(&self, state: &mut S, progress: f64) -> Result<(), ActionError> {
    match &self.update {
      Some(update) => update(state, progress),
      None => Ok(()),
    }
  }
}

impl<S> fmt::Debug for Leaf<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Leaf")
      .field("description", &self.description)
      .field("has_setup", &self.setup.is_some())
      .field("has_update", &self.update.is_some())
      .field("duration_scale", &self.duration_scale)
      .finish()
  }
}

/// Children run one after another, each to completion.
#[derive(Debug)]
pub struct Composite<S> {
  pub description: String,
  pub children: Vec<Step<S>>,
}

#[derive(Debug)]
pub enum Step<S> {
  Leaf(Leaf<S>),
  Composite(Composite<S>),
}

impl<S> Step<S> {
  pub fn leaf(leaf: Leaf<S>) -> Self {
    Step::Leaf(leaf)
  }

  pub fn composite(
    description: impl Into<String>,
    children: Vec<Step<S>>,
  ) -> Self {
    Step::Composite(Composite {
      description: description.into(),
      children,
    })
  }

  pub fn description(&self) -> &str {
    match self {
      Step::Leaf(leaf) => leaf.description(),
      Step::Composite(composite) => &composite.description,
    }
  }

  pub fn leaf_count(&self) -> usize {
    match self {
      Step::Leaf(_) => 1,
      Step::Composite(composite) => composite.children
        .iter()
        .map(|child| child.leaf_count())
        .sum(),
    }
  }
}

impl<S> From<Leaf<S>> for Step<S> {
  fn from(leaf: Leaf<S>) -> Self {
    Step::Leaf(leaf)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_scale_is_clamped() {
    assert_eq!(Leaf::<()>::new("a", -1.0).duration_scale(), 0.0);
    assert_eq!(Leaf::<()>::new("b", f64::NAN).duration_scale(), 0.0);
    assert_eq!(Leaf::<()>::new("c", 1.5).duration_scale(), 1.5);
  }

  #[test]
  fn test_actions_are_optional() {
    let mut state = 0u32;
    let bare = Leaf::<u32>::new("bare", 1.0);
    assert!(bare.setup(&mut state).is_ok());
    assert!(bare.update(&mut state, 0.5).is_ok());
    assert_eq!(state, 0);

    let leaf = Leaf::<u32>::new("count", 1.0)
      .with_setup(|s| {
        *s += 1;
        Ok(())
      })
      .with_update(|s, p| {
        *s += (p * 10.0) as u32;
        Ok(())
      });
    leaf.setup(&mut state).unwrap();
    leaf.update(&mut state, 0.5).unwrap();
    assert_eq!(state, 6);
  }

  #[test]
  fn test_leaf_count() {
    let tree: Step<()> = Step::composite("root", vec![
      Leaf::new("a", 1.0).into(),
      Step::composite("empty", vec![]),
      Step::composite("pair", vec![
        Leaf::new("b", 1.0).into(),
        Leaf::new("c", 0.0).into(),
      ]),
    ]);
    assert_eq!(tree.leaf_count(), 3);
    assert_eq!(tree.description(), "root");
  }
}
