use thiserror::Error;

pub type Result<T> = std::result::Result<T, RodLogicError>;

/// Errors raised while building or evaluating rod-logic circuits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RodLogicError {
  #[error("invalid gate kind: {0:?}")]
  InvalidGateKind(String),

  #[error("invalid gate input: {0}")]
  InvalidGateInput(String),

  #[error("rod expects {expected} input bits but received {actual}")]
  InvalidLength {
    expected: usize,
    actual: usize,
  },

  #[error("layer {layer} expects {expected} input bits but received {actual}")]
  ArityMismatch {
    layer: usize,
    expected: usize,
    actual: usize,
  },

  #[error("rod {rod} has width {actual}, other rods of the layer have width {expected}")]
  RaggedLayer {
    rod: usize,
    expected: usize,
    actual: usize,
  },

  #[error("cannot enumerate a truth table over {0} inputs")]
  TooManyInputs(usize),

  #[error("no layer at index {0}")]
  NoSuchLayer(usize),

  #[error("truth table encoding failed: {0}")]
  Encoding(String),
}

/// Boxed error returned by step actions.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the sequence runner.
#[derive(Debug, Error)]
pub enum SequenceError {
  #[error("step() called while a previous step is still running")]
  ReentrantStep,

  #[error("step {path:?} ({description}) was cancelled")]
  Cancelled {
    path: Vec<usize>,
    description: String,
  },

  #[error("step {path:?} ({description}) failed: {source}")]
  Action {
    path: Vec<usize>,
    description: String,
    #[source]
    source: ActionError,
  },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
  #[error("invalid runner configuration: {0}")]
  Invalid(String),

  #[error("environment variable {var} has unparsable value {value:?}")]
  Env {
    var: String,
    value: String,
  },
}
