//! Rod logic: boolean circuits made of sliding rods blocked by crossing
//! rods, and a step sequencer to play their evaluation frame by frame.

pub mod building_block;
pub mod computer;
pub mod config;
pub mod error;
pub mod sequencer;

pub use building_block::{
  block_matrix::BlockMatrix,
  gate::Gate,
  layer::Layer,
  rod::Rod,
  stack::Stack,
  truth_table::{TruthRow, TruthTable},
};
pub use computer::Computer;
pub use config::RunnerConfig;
pub use error::{ConfigError, RodLogicError, SequenceError};
pub use sequencer::{
  runner::SequenceRunner,
  step::{Leaf, Step},
  stepper::{StepInfo, Stepper},
};
