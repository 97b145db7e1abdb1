pub mod config;
mod main;

pub use config::{DefaultExperiment, ModelInfo};
pub use main::{Component, TIME_VARIABLE};

use crate::FmuError;

/// The host model advanced by [`Component::do_step`].
pub trait StepModel {
    /// Advances the model state from `time` by `step_size`.
    fn do_step(&mut self, time: f64, step_size: f64) -> Result<(), FmuError>;
}

impl<F> StepModel for F
where
    F: FnMut(f64, f64) -> Result<(), FmuError>,
{
    fn do_step(&mut self, time: f64, step_size: f64) -> Result<(), FmuError> {
        self(time, step_size)
    }
}
