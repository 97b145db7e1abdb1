// crates/fmu-rs/src/registry.rs

use crate::FmuError;
use crate::types::{DEFAULT_UNIT, ValueReference, ValueType};
use crate::units::{UnitCatalog, UnitTable};
use crate::variable::{Causality, Initial, Variability, VariableBinding, VariableDescriptor};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::fmt;
use log::{debug, warn};

/// Identifies a registered variable: value references are only unique
/// within a value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableKey {
    pub value_type: ValueType,
    pub value_reference: ValueReference,
}

/// Everything the host states about a variable when registering it.
/// The value type is taken from the binding.
#[derive(Debug, Clone, Default)]
pub struct VariableDefinition {
    pub name: String,
    /// `None` means the dimensionless unit `"1"`.
    pub unit: Option<String>,
    pub description: String,
    pub causality: Causality,
    pub variability: Variability,
    pub initial: Initial,
}

impl VariableDefinition {
    pub fn new(name: impl Into<String>, causality: Causality, variability: Variability) -> Self {
        Self {
            name: name.into(),
            causality,
            variability,
            ..Default::default()
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn initial(mut self, initial: Initial) -> Self {
        self.initial = initial;
        self
    }
}

/// A descriptor together with the storage it is bound to.
#[derive(Debug)]
pub struct RegisteredVariable {
    descriptor: VariableDescriptor,
    binding: VariableBinding,
}

impl RegisteredVariable {
    pub fn descriptor(&self) -> &VariableDescriptor {
        &self.descriptor
    }

    pub fn binding(&self) -> &VariableBinding {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut VariableBinding {
        &mut self.binding
    }
}

/// The ordered collection of all variables exposed by a component.
///
/// Iteration is sorted by `(value type, value reference)`, which is the
/// order of the exported model description.
pub struct VariableRegistry {
    variables: BTreeMap<VariableKey, RegisteredVariable>,
    names: BTreeMap<String, VariableKey>,
    counters: BTreeMap<ValueType, ValueReference>,
    units: UnitTable,
    catalog: UnitCatalog,
}

impl fmt::Debug for VariableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableRegistry")
            .field("variables", &self.variables)
            .field("units", &self.units)
            .field("catalog", &format_args!("<{} units>", self.catalog.len()))
            .finish()
    }
}

impl Default for VariableRegistry {
    fn default() -> Self {
        Self::new(UnitCatalog::common())
    }
}

impl VariableRegistry {
    /// Creates an empty registry that draws undefined units from `catalog`.
    pub fn new(catalog: UnitCatalog) -> Self {
        Self {
            variables: BTreeMap::new(),
            names: BTreeMap::new(),
            counters: BTreeMap::new(),
            units: UnitTable::new(),
            catalog,
        }
    }

    /// Registers a variable and returns its stored descriptor.
    ///
    /// Assigns the next value reference of the binding's value type
    /// (starting at 1) and, if the attributes require a start value, takes
    /// it from the binding's current value. Only `Real` variables may name a
    /// unit other than `"1"`.
    pub fn register(
        &mut self,
        definition: VariableDefinition,
        binding: VariableBinding,
    ) -> Result<&VariableDescriptor, FmuError> {
        if self.names.contains_key(&definition.name) {
            warn!("Rejecting duplicate variable name '{}'", definition.name);
            return Err(FmuError::DuplicateName(definition.name));
        }

        let value_type = binding.value_type();
        let unit = definition.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string());
        if value_type != ValueType::Real && unit != DEFAULT_UNIT {
            return Err(FmuError::InvalidAttributes {
                name: definition.name,
                reason: "only Real variables carry a unit",
            });
        }

        let mut descriptor = VariableDescriptor::new(
            definition.name,
            value_type,
            definition.causality,
            definition.variability,
            definition.initial,
        )?
        .with_description(definition.description);

        // Only a variable that passed validation may add to the unit table.
        self.units.resolve(&unit, &self.catalog)?;
        descriptor = descriptor.with_unit(unit);

        binding.expose_current_value_as_start(&mut descriptor)?;

        let counter = self.counters.entry(value_type).or_insert(0);
        *counter += 1;
        descriptor.set_value_reference(*counter);

        let key = VariableKey {
            value_type,
            value_reference: *counter,
        };
        debug!(
            "Registered {} variable '{}' (vr={}, causality={}, variability={}, initial={})",
            value_type,
            descriptor.name(),
            key.value_reference,
            descriptor.causality(),
            descriptor.variability(),
            descriptor.initial()
        );

        self.names.insert(descriptor.name().to_string(), key);
        let entry = self
            .variables
            .entry(key)
            .or_insert(RegisteredVariable { descriptor, binding });
        Ok(&entry.descriptor)
    }

    /// Replaces the binding of the variable called `name`.
    ///
    /// Returns `false` if no such variable exists or if the new binding has
    /// a different value type.
    pub fn rebind(&mut self, binding: VariableBinding, name: &str) -> bool {
        let Some(key) = self.names.get(name) else {
            return false;
        };
        let Some(entry) = self.variables.get_mut(key) else {
            return false;
        };
        if entry.binding.value_type() != binding.value_type() {
            warn!(
                "Cannot rebind {} variable '{}' to a {} binding",
                entry.descriptor.value_type(),
                name,
                binding.value_type()
            );
            return false;
        }
        entry.binding = binding;
        true
    }

    pub fn find_by_reference(
        &self,
        value_reference: ValueReference,
        value_type: ValueType,
    ) -> Option<&RegisteredVariable> {
        self.variables.get(&VariableKey {
            value_type,
            value_reference,
        })
    }

    pub fn find_by_reference_mut(
        &mut self,
        value_reference: ValueReference,
        value_type: ValueType,
    ) -> Option<&mut RegisteredVariable> {
        self.variables.get_mut(&VariableKey {
            value_type,
            value_reference,
        })
    }

    pub fn find_by_name(&self, name: &str) -> Option<&RegisteredVariable> {
        self.names.get(name).and_then(|key| self.variables.get(key))
    }

    /// Iterates the variables ordered by `(value type, value reference)`.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredVariable> {
        self.variables.values()
    }

    /// Iterates the descriptors in export order.
    pub fn descriptors(&self) -> impl Iterator<Item = &VariableDescriptor> {
        self.variables.values().map(|v| &v.descriptor)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    /// Mutable access to the unit table, e.g. to add model-specific units.
    pub fn units_mut(&mut self) -> &mut UnitTable {
        &mut self.units
    }
}
