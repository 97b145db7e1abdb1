//! Internal `serde` data structures that map directly to the FMI 2.0
//! model description schema (`fmi2ModelDescription.xsd`).
//!
//! Numeric attributes are kept as text so the builder controls their exact
//! formatting and the parser can report which attribute was malformed.

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub mod units;
pub mod variables;

pub use units::{BaseUnit, Unit, UnitDefinitions};
pub use variables::{ModelVariables, ScalarVariable, TypeElement};

/// The root element, `<fmiModelDescription>`.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename = "fmiModelDescription")]
pub struct FmiModelDescription {
    #[serde(rename = "@fmiVersion", default)]
    pub fmi_version: String,

    #[serde(rename = "@modelName", default)]
    pub model_name: String,

    #[serde(rename = "@guid", default)]
    pub guid: String,

    #[serde(rename = "@description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "@generationTool", default, skip_serializing_if = "Option::is_none")]
    pub generation_tool: Option<String>,

    #[serde(
        rename = "@variableNamingConvention",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub variable_naming_convention: Option<String>,

    #[serde(
        rename = "@numberOfEventIndicators",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_event_indicators: Option<String>,

    #[serde(rename = "CoSimulation", default, skip_serializing_if = "Option::is_none")]
    pub co_simulation: Option<CoSimulation>,

    #[serde(rename = "UnitDefinitions", default, skip_serializing_if = "Option::is_none")]
    pub unit_definitions: Option<UnitDefinitions>,

    #[serde(rename = "LogCategories", default, skip_serializing_if = "Option::is_none")]
    pub log_categories: Option<LogCategories>,

    #[serde(rename = "DefaultExperiment", default, skip_serializing_if = "Option::is_none")]
    pub default_experiment: Option<DefaultExperiment>,

    #[serde(rename = "ModelVariables", default)]
    pub model_variables: ModelVariables,

    #[serde(rename = "ModelStructure", default)]
    pub model_structure: ModelStructure,
}

/// `<CoSimulation>`: capability flags of the slave.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CoSimulation {
    #[serde(rename = "@modelIdentifier", default)]
    pub model_identifier: String,

    #[serde(rename = "@canHandleVariableCommunicationStepSize", default)]
    pub can_handle_variable_communication_step_size: bool,

    #[serde(rename = "@canInterpolateInputs", default)]
    pub can_interpolate_inputs: bool,

    #[serde(rename = "@maxOutputDerivativeOrder", default)]
    pub max_output_derivative_order: u32,

    #[serde(rename = "@canGetAndSetFMUstate", default)]
    pub can_get_and_set_fmu_state: bool,

    #[serde(rename = "@canSerializeFMUstate", default)]
    pub can_serialize_fmu_state: bool,

    #[serde(rename = "@providesDirectionalDerivative", default)]
    pub provides_directional_derivative: bool,
}

/// `<LogCategories>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LogCategories {
    #[serde(rename = "Category", default)]
    pub category: Vec<Category>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Category {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `<DefaultExperiment>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DefaultExperiment {
    #[serde(rename = "@startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(rename = "@stopTime", default, skip_serializing_if = "Option::is_none")]
    pub stop_time: Option<String>,

    #[serde(rename = "@stepSize", default, skip_serializing_if = "Option::is_none")]
    pub step_size: Option<String>,

    #[serde(rename = "@tolerance", default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<String>,
}

/// `<ModelStructure>`. Only the output list is modelled.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ModelStructure {
    #[serde(rename = "Outputs", default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Outputs>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Outputs {
    #[serde(rename = "Unknown", default)]
    pub unknown: Vec<Unknown>,
}

/// One dependency entry; `index` is the 1-based position in `<ModelVariables>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Unknown {
    #[serde(rename = "@index")]
    pub index: String,
}
