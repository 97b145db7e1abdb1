// crates/fmu-rs/src/units.rs

//! Unit definitions (FMI 2.0.2, Section 2.2.2).
//!
//! A unit is identified by its name alone. Its exponents over the SI base
//! units (plus radian) are carried for export only.

use crate::FmuError;
use crate::types::DEFAULT_UNIT;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use log::debug;

/// A named unit with its base-unit exponents.
#[derive(Debug, Clone, Default)]
pub struct UnitDefinition {
    pub name: String,
    pub kg: i32,
    pub m: i32,
    pub s: i32,
    pub a: i32,
    pub k: i32,
    pub mol: i32,
    pub cd: i32,
    pub rad: i32,
}

impl UnitDefinition {
    /// A dimensionless unit with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn kg(mut self, exp: i32) -> Self {
        self.kg = exp;
        self
    }

    pub fn m(mut self, exp: i32) -> Self {
        self.m = exp;
        self
    }

    pub fn s(mut self, exp: i32) -> Self {
        self.s = exp;
        self
    }

    pub fn a(mut self, exp: i32) -> Self {
        self.a = exp;
        self
    }

    pub fn k(mut self, exp: i32) -> Self {
        self.k = exp;
        self
    }

    pub fn mol(mut self, exp: i32) -> Self {
        self.mol = exp;
        self
    }

    pub fn cd(mut self, exp: i32) -> Self {
        self.cd = exp;
        self
    }

    pub fn rad(mut self, exp: i32) -> Self {
        self.rad = exp;
        self
    }

    /// Exponents in the order kg, m, s, A, K, mol, cd, rad.
    pub fn exponents(&self) -> [i32; 8] {
        [
            self.kg, self.m, self.s, self.a, self.k, self.mol, self.cd, self.rad,
        ]
    }
}

impl PartialEq for UnitDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for UnitDefinition {}

impl Hash for UnitDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for UnitDefinition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UnitDefinition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// An immutable lookup table of well-known units, consulted when a variable
/// names a unit that has not been defined explicitly.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: BTreeMap<String, UnitDefinition>,
}

impl UnitCatalog {
    /// An empty catalog: every unit must be defined explicitly.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of definitions. Later duplicates win.
    pub fn from_units(units: impl IntoIterator<Item = UnitDefinition>) -> Self {
        Self {
            units: units.into_iter().map(|u| (u.name.clone(), u)).collect(),
        }
    }

    /// The SI base units, radian, and the derived units common in mechanics
    /// and electrical models.
    pub fn common() -> Self {
        let u = UnitDefinition::new;
        Self::from_units([
            u(DEFAULT_UNIT),
            // base
            u("kg").kg(1),
            u("m").m(1),
            u("s").s(1),
            u("A").a(1),
            u("K").k(1),
            u("mol").mol(1),
            u("cd").cd(1),
            u("rad").rad(1),
            // kinematics
            u("m/s").m(1).s(-1),
            u("m/s2").m(1).s(-2),
            u("rad/s").rad(1).s(-1),
            u("rad/s2").rad(1).s(-2),
            u("Hz").s(-1),
            // dynamics
            u("N").kg(1).m(1).s(-2),
            u("Nm").kg(1).m(2).s(-2),
            u("N/m").kg(1).s(-2),
            u("N.s/m").kg(1).s(-1),
            u("Nm/rad").kg(1).m(2).s(-2).rad(-1),
            u("Nms/rad").kg(1).m(2).s(-1).rad(-1),
            u("kg.m2").kg(1).m(2),
            u("kg/m3").kg(1).m(-3),
            u("Pa").kg(1).m(-1).s(-2),
            u("J").kg(1).m(2).s(-2),
            u("W").kg(1).m(2).s(-3),
            // electrical
            u("V").kg(1).m(2).s(-3).a(-1),
            u("Ohm").kg(1).m(2).s(-3).a(-2),
            u("F").kg(-1).m(-2).s(4).a(2),
            u("H").kg(1).m(2).s(-2).a(-2),
            u("C").s(1).a(1),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.get(name)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// The units defined for one model. Always contains the unit `"1"`.
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: BTreeMap<String, UnitDefinition>,
}

impl Default for UnitTable {
    fn default() -> Self {
        let mut units = BTreeMap::new();
        units.insert(DEFAULT_UNIT.to_string(), UnitDefinition::new(DEFAULT_UNIT));
        Self { units }
    }
}

impl UnitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit, replacing any existing unit with the same name.
    pub fn define(&mut self, unit: UnitDefinition) {
        self.units.insert(unit.name.clone(), unit);
    }

    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Returns the unit, importing it from `catalog` if it is not yet defined.
    pub fn resolve(
        &mut self,
        name: &str,
        catalog: &UnitCatalog,
    ) -> Result<&UnitDefinition, FmuError> {
        if !self.units.contains_key(name) {
            let unit = catalog
                .get(name)
                .ok_or_else(|| FmuError::UnknownUnit(name.to_string()))?;
            debug!("Importing unit '{}' from the unit catalog", name);
            self.define(unit.clone());
        }
        self.units
            .get(name)
            .ok_or_else(|| FmuError::UnknownUnit(name.to_string()))
    }

    /// Iterates the units ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Collects the units into a vector, ordered by name.
    pub fn to_vec(&self) -> Vec<UnitDefinition> {
        self.units.values().cloned().collect()
    }
}
