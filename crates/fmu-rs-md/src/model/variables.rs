// crates/fmu-rs-md/src/model/variables.rs

//! Contains model structs related to `<ModelVariables>`.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ModelVariables {
    #[serde(rename = "ScalarVariable", default)]
    pub scalar_variable: Vec<ScalarVariable>,
}

/// A `<ScalarVariable>`. `name` and `valueReference` are mandatory in the
/// schema but optional here so the parser can name the missing attribute.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ScalarVariable {
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "@valueReference", default, skip_serializing_if = "Option::is_none")]
    pub value_reference: Option<String>,

    #[serde(rename = "@description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "@causality", default, skip_serializing_if = "Option::is_none")]
    pub causality: Option<String>,

    #[serde(rename = "@variability", default, skip_serializing_if = "Option::is_none")]
    pub variability: Option<String>,

    #[serde(rename = "@initial", default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,

    // Exactly one of the type elements is present in a valid document.
    #[serde(rename = "Real", default, skip_serializing_if = "Option::is_none")]
    pub real: Option<TypeElement>,

    #[serde(rename = "Integer", default, skip_serializing_if = "Option::is_none")]
    pub integer: Option<TypeElement>,

    #[serde(rename = "Boolean", default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<TypeElement>,

    #[serde(rename = "String", default, skip_serializing_if = "Option::is_none")]
    pub string: Option<TypeElement>,
}

/// The nested `<Real|Integer|Boolean|String>` element.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TypeElement {
    #[serde(rename = "@declaredType", default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,

    #[serde(rename = "@unit", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(rename = "@start", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}
