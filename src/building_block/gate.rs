use crate::error::{Result, RodLogicError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A gate sitting on a rod at one input position.
///
/// Its output says whether the rod may pass (`true`) or is blocked
/// (`false`) at that position, given the bit carried by the crossing rod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
  DontCare,
  Zero,
  Pass,
  Invert,
}

impl Gate {
  pub const ALL: [Gate; 4] = [
    Gate::DontCare,
    Gate::Zero,
    Gate::Pass,
    Gate::Invert,
  ];

  pub fn func(&self) -> fn(bool) -> bool {
    match self {
      Gate::DontCare => |_| true,
      Gate::Zero => |_| false,
      Gate::Pass => |d| d,
      Gate::Invert => |d| !d,
    }
  }

  pub fn eval(&self, input: bool) -> bool {
    (self.func())(input)
  }

  /// Applies the gate to a possibly missing bit. Only `DontCare` and
  /// `Zero` are defined without an input.
  pub fn apply(&self, input: Option<bool>) -> Result<bool> {
    match (self, input) {
      (Gate::DontCare, _) => Ok(true),
      (Gate::Zero, _) => Ok(false),
      (gate, Some(d)) => Ok(gate.eval(d)),
      (gate, None) => Err(RodLogicError::InvalidGateInput(
        format!("{} gate needs an input bit", gate),
      )),
    }
  }

  pub fn symbol(&self) -> char {
    match self {
      Gate::DontCare => 'D',
      Gate::Zero => 'Z',
      Gate::Pass => 'P',
      Gate::Invert => 'I',
    }
  }
}

impl fmt::Display for Gate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Gate::DontCare => "DONT_CARE",
      Gate::Zero => "ZERO",
      Gate::Pass => "PASS",
      Gate::Invert => "INVERT",
    };
    f.write_str(name)
  }
}

impl TryFrom<char> for Gate {
  type Error = RodLogicError;

  fn try_from(c: char) -> Result<Self> {
    match c.to_ascii_uppercase() {
      'D' => Ok(Gate::DontCare),
      'Z' => Ok(Gate::Zero),
      'P' => Ok(Gate::Pass),
      'I' => Ok(Gate::Invert),
      _ => Err(RodLogicError::InvalidGateKind(c.to_string())),
    }
  }
}

impl FromStr for Gate {
  type Err = RodLogicError;

  fn from_str(s: &str) -> Result<Self> {
    let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
    match normalized.as_str() {
      "D" | "DONT_CARE" | "DONTCARE" => Ok(Gate::DontCare),
      "Z" | "ZERO" => Ok(Gate::Zero),
      "P" | "PASS" => Ok(Gate::Pass),
      "I" | "INVERT" => Ok(Gate::Invert),
      _ => Err(RodLogicError::InvalidGateKind(s.to_string())),
    }
  }
}
