use crate::{
  config::RunnerConfig,
  error::{ActionError, ConfigError, SequenceError},
  sequencer::{
    renderer::Renderer,
    step::Step,
    stepper::{StepInfo, Stepper},
  },
};
use futures::{
  future::{self, Either},
  pin_mut,
};
use std::{
  future::Future,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  time::Duration,
};
use tokio::{
  runtime::Handle,
  sync::{watch, Mutex},
  time::{sleep, Instant},
};
use tracing::{debug, trace, warn};

struct RunnerCore<S, R> {
  stepper: Stepper<S>,
  state: S,
  renderer: R,
  current: watch::Sender<Option<StepInfo>>,
}

impl<S, R> RunnerCore<S, R>
where
  R: Renderer<S>,
{
  fn render(&mut self) {
    self.renderer.render(&self.state);
  }

  /// Runs the current leaf to progress 1 without advancing. Returns
  /// false when there is nothing left to run.
  async fn run_current(
    &mut self,
    config: &RunnerConfig,
  ) -> Result<bool, SequenceError> {
    let RunnerCore { stepper, state, renderer, .. } = self;
    let Some(current) = stepper.current() else {
      return Ok(false);
    };
    let fail = |source: ActionError| SequenceError::Action {
      path: current.path.clone(),
      description: current.description().to_string(),
      source,
    };

    debug!(
      path = ?current.path,
      description = current.description(),
      "starting step"
    );
    current.leaf.setup(state).map_err(fail)?;

    let total = Duration::try_from_secs_f64(
      config.base_duration().as_secs_f64() * current.duration_scale(),
    ).unwrap_or(Duration::MAX);

    if total.is_zero() {
      current.leaf.update(state, 1.0).map_err(fail)?;
      renderer.render(state);
      return Ok(true);
    }

    // First frame is always at 0, later ones follow the clock.
    let start = Instant::now();
    let mut progress = 0.0;
    loop {
      trace!(progress, "step frame");
      current.leaf.update(state, progress).map_err(fail)?;
      renderer.render(state);
      if progress >= 1.0 {
        break;
      }
      sleep(config.frame_interval()).await;
      progress = (start.elapsed().as_secs_f64() / total.as_secs_f64()).min(1.0);
    }
    Ok(true)
  }

  /// Returns true when the sequence is complete.
  fn advance(&mut self) -> bool {
    let more = self.stepper.advance();
    let next = self.stepper.current().map(|c| c.info());
    debug!(next = ?next, "advanced");
    self.current.send_replace(next);
    !more
  }
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
  fn acquire(flag: &'a AtomicBool) -> Result<Self, SequenceError> {
    if flag.swap(true, Ordering::AcqRel) {
      return Err(SequenceError::ReentrantStep);
    }
    Ok(InFlight(flag))
  }
}

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

/// Plays a step tree against an owned state, one leaf per `step()`.
///
/// Cloning yields another handle on the same run, so a host can trigger
/// steps and refreshes from independent tasks. Only one `step()` may be in
/// flight at a time.
pub struct SequenceRunner<S, R> {
  core: Arc<Mutex<RunnerCore<S, R>>>,
  current: watch::Receiver<Option<StepInfo>>,
  in_flight: Arc<AtomicBool>,
  refresh_pending: Arc<AtomicBool>,
  config: RunnerConfig,
}

impl<S, R> Clone for SequenceRunner<S, R> {
  fn clone(&self) -> Self {
    SequenceRunner {
      core: Arc::clone(&self.core),
      current: self.current.clone(),
      in_flight: Arc::clone(&self.in_flight),
      refresh_pending: Arc::clone(&self.refresh_pending),
      config: self.config,
    }
  }
}

impl<S, R> SequenceRunner<S, R>
where
  S: Send + 'static,
  R: Renderer<S> + 'static,
{
  pub fn new(
    root: Step<S>,
    state: S,
    renderer: R,
    config: RunnerConfig,
  ) -> Result<Self, ConfigError> {
    config.validate()?;
    let stepper = Stepper::new(root);
    let (tx, rx) = watch::channel(stepper.current().map(|c| c.info()));
    let core = RunnerCore {
      stepper,
      state,
      renderer,
      current: tx,
    };
    Ok(SequenceRunner {
      core: Arc::new(Mutex::new(core)),
      current: rx,
      in_flight: Arc::new(AtomicBool::new(false)),
      refresh_pending: Arc::new(AtomicBool::new(false)),
      config,
    })
  }

  pub fn config(&self) -> &RunnerConfig {
    &self.config
  }

  /// The leaf the next `step()` will run. Stays readable while a step is
  /// running.
  pub fn current_step(&self) -> Option<StepInfo> {
    self.current.borrow().clone()
  }

  pub fn is_complete(&self) -> bool {
    self.current.borrow().is_none()
  }

  /// Runs the current leaf and advances. Returns true once the whole
  /// sequence has been played.
  pub async fn step(&self) -> Result<bool, SequenceError> {
    self.step_until(future::pending::<()>()).await
  }

  /// Like `step()`, but gives up when `cancel` completes first. A
  /// cancelled leaf stays current and runs again, setup included, on the
  /// next step.
  pub async fn step_until<C>(&self, cancel: C) -> Result<bool, SequenceError>
  where
    C: Future<Output = ()>,
  {
    let _flight = InFlight::acquire(&self.in_flight)?;
    let mut core = self.core.lock().await;

    let outcome = {
      let run = core.run_current(&self.config);
      pin_mut!(run);
      pin_mut!(cancel);
      match future::select(run, cancel).await {
        Either::Left((outcome, _)) => Some(outcome),
        Either::Right(((), _)) => None,
      }
    };

    match outcome {
      Some(Ok(true)) => Ok(core.advance()),
      Some(Ok(false)) => Ok(true),
      Some(Err(e)) => {
        warn!(error = %e, "step failed");
        Err(e)
      },
      None => {
        let info = core.stepper
          .current()
          .map(|c| c.info())
          .unwrap_or_default();
        warn!(path = ?info.path, description = %info.description, "step cancelled");
        Err(SequenceError::Cancelled {
          path: info.path,
          description: info.description,
        })
      },
    }
  }

  /// Schedules one render on the current tokio runtime. Returns false
  /// when a render is already pending, in which case this request is
  /// folded into it, or when called outside a runtime.
  pub fn refresh(&self) -> bool {
    if self.refresh_pending.swap(true, Ordering::AcqRel) {
      trace!("refresh coalesced");
      return false;
    }
    let Ok(handle) = Handle::try_current() else {
      self.refresh_pending.store(false, Ordering::Release);
      warn!("refresh requested outside a tokio runtime");
      return false;
    };
    let core = Arc::clone(&self.core);
    let pending = Arc::clone(&self.refresh_pending);
    handle.spawn(async move {
      let mut core = core.lock().await;
      pending.store(false, Ordering::Release);
      core.render();
    });
    true
  }

  /// Read access to the sequenced state, e.g. for a renderer pulling rod
  /// positions. Waits for a running step to finish.
  pub async fn inspect<T, F>(&self, f: F) -> T
  where
    F: FnOnce(&S) -> T,
  {
    let core = self.core.lock().await;
    f(&core.state)
  }
}
