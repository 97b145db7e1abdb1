// crates/fmu-rs-md/src/model/units.rs

//! Contains model structs related to `<UnitDefinitions>`.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UnitDefinitions {
    #[serde(rename = "Unit", default)]
    pub unit: Vec<Unit>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Unit {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "BaseUnit", default, skip_serializing_if = "Option::is_none")]
    pub base_unit: Option<BaseUnit>,
}

/// Exponents of the SI base units. Zero exponents are omitted.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct BaseUnit {
    #[serde(rename = "@kg", default, skip_serializing_if = "Option::is_none")]
    pub kg: Option<i32>,
    #[serde(rename = "@m", default, skip_serializing_if = "Option::is_none")]
    pub m: Option<i32>,
    #[serde(rename = "@s", default, skip_serializing_if = "Option::is_none")]
    pub s: Option<i32>,
    #[serde(rename = "@A", default, skip_serializing_if = "Option::is_none")]
    pub a: Option<i32>,
    #[serde(rename = "@K", default, skip_serializing_if = "Option::is_none")]
    pub k: Option<i32>,
    #[serde(rename = "@mol", default, skip_serializing_if = "Option::is_none")]
    pub mol: Option<i32>,
    #[serde(rename = "@cd", default, skip_serializing_if = "Option::is_none")]
    pub cd: Option<i32>,
    #[serde(rename = "@rad", default, skip_serializing_if = "Option::is_none")]
    pub rad: Option<i32>,
}
