pub mod renderer;
pub mod runner;
pub mod step;
pub mod stepper;
