// src/lib.rs

#![no_std]
#![doc = "Reads and writes FMI 2.0 `modelDescription.xml` documents."]
#![doc = ""]
#![doc = "This `no_std + alloc` library converts between the XML schema and the"]
#![doc = "variable descriptors of `fmu-rs`."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `save_model_description_to_string`: Serializing a component snapshot."]
#![doc = "- `load_model_description_from_str`: Parsing a document into descriptors and a namespace tree."]

extern crate alloc;

// --- Crate Modules ---

mod builder;
mod error;
mod model;
mod parser;
mod tree;
mod types;

// --- Public API Re-exports ---

pub use builder::save_model_description_to_string;
pub use error::MdError;
pub use parser::load_model_description_from_str;
pub use tree::{MAX_NAME_DEPTH, VariableTree, VariableTreeNode};
pub use types::{CoSimulationCapabilities, FMI_VERSION, ImportedModel, LogCategory, ModelDescription};
