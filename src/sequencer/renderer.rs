/// Host callback painting the sequenced state. Calls may be redundant and
/// must be safe to repeat.
pub trait Renderer<S>: Send {
  fn render(&mut self, state: &S);
}

impl<S, F> Renderer<S> for F
where
  F: FnMut(&S) + Send,
{
  fn render(&mut self, state: &S) {
    self(state)
  }
}
