// crates/fmu-rs-md/src/types.rs

//! Public, ergonomic representation of a model description, shared by the
//! builder and the parser.

use crate::tree::VariableTree;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use fmu_rs::{Causality, Component, DefaultExperiment, ModelInfo, UnitDefinition, VariableDescriptor};

/// The FMI version written to and expected in model descriptions.
pub const FMI_VERSION: &str = fmu_rs::types::FMI_VERSION;

/// Capability flags of a co-simulation slave (`<CoSimulation>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoSimulationCapabilities {
    pub model_identifier: String,
    pub can_handle_variable_communication_step_size: bool,
    pub can_interpolate_inputs: bool,
    pub max_output_derivative_order: u32,
    pub can_get_and_set_fmu_state: bool,
    pub can_serialize_fmu_state: bool,
    pub provides_directional_derivative: bool,
}

impl Default for CoSimulationCapabilities {
    fn default() -> Self {
        Self {
            model_identifier: String::new(),
            can_handle_variable_communication_step_size: true,
            can_interpolate_inputs: true,
            max_output_derivative_order: 1,
            can_get_and_set_fmu_state: false,
            can_serialize_fmu_state: false,
            provides_directional_derivative: false,
        }
    }
}

/// A declared log category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCategory {
    pub name: String,
    pub description: String,
}

/// The contents of a `modelDescription.xml`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelDescription {
    pub fmi_version: String,
    pub info: ModelInfo,
    pub co_simulation: Option<CoSimulationCapabilities>,
    pub units: Vec<UnitDefinition>,
    pub log_categories: Vec<LogCategory>,
    pub default_experiment: Option<DefaultExperiment>,
    /// Variables in document order.
    pub variables: Vec<VariableDescriptor>,
    /// 1-based positions in `variables` of the model's outputs.
    pub outputs: Vec<usize>,
}

impl ModelDescription {
    /// Snapshots the metadata of a live component.
    pub fn from_component(component: &Component) -> Self {
        let info = component.info().clone();
        let variables: Vec<VariableDescriptor> = component.registry().descriptors().cloned().collect();
        let outputs = variables
            .iter()
            .enumerate()
            .filter(|(_, v)| v.causality() == Causality::Output)
            .map(|(i, _)| i + 1)
            .collect();

        Self {
            fmi_version: FMI_VERSION.to_string(),
            co_simulation: Some(CoSimulationCapabilities {
                model_identifier: info.model_identifier.clone(),
                ..Default::default()
            }),
            info,
            units: component.registry().units().to_vec(),
            log_categories: component
                .log_categories()
                .iter()
                .map(|(name, description)| LogCategory {
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .collect(),
            default_experiment: Some(*component.default_experiment()),
            variables,
            outputs,
        }
    }

    pub fn find_variable(&self, name: &str) -> Option<&VariableDescriptor> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn unit(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.iter().find(|u| u.name == name)
    }
}

/// A parsed model description together with its variable namespace tree.
#[derive(Debug, Clone)]
pub struct ImportedModel {
    pub description: ModelDescription,
    pub tree: VariableTree,
}
