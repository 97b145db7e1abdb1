// crates/fmu-rs/src/component/config.rs

use alloc::string::{String, ToString};

/// Identification of a model, written to the root element of its
/// model description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub model_name: String,
    /// Prefix of the shared library and of its exported symbols.
    pub model_identifier: String,
    pub guid: String,
    pub description: String,
    pub generation_tool: String,
    /// `"flat"` or `"structured"`.
    pub variable_naming_convention: String,
    pub number_of_event_indicators: u32,
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            model_name: String::new(),
            model_identifier: String::new(),
            guid: String::new(),
            description: String::new(),
            generation_tool: "fmu-rs".to_string(),
            variable_naming_convention: "structured".to_string(),
            number_of_event_indicators: 0,
        }
    }
}

/// Suggested experiment settings. `step_size` and `tolerance` are only
/// meaningful when positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultExperiment {
    pub start_time: f64,
    pub stop_time: f64,
    pub step_size: f64,
    pub tolerance: f64,
}

impl Default for DefaultExperiment {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            stop_time: 1.0,
            step_size: 1e-3,
            tolerance: 0.0,
        }
    }
}
