// crates/fmu-rs/src/log.rs

//! Context-prefixed logging and the FMI log-category table.

use crate::FmuError;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};

/// Trait for structs that provide metadata for logging
pub trait LogMetadata {
    fn meta(&self) -> String;
}

/// Identifies one component instance in log output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceContext {
    pub model_identifier: String,
    pub instance_name: String,
}

impl LogMetadata for InstanceContext {
    fn meta(&self) -> String {
        format!("{}:{}", self.model_identifier, self.instance_name)
    }
}

// =============================================
// Logging Macros (namespaced under crate::log)
// =============================================

macro_rules! log_with_context {
    ($level:expr, $ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::log!($level, concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

macro_rules! my_info {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::log::log_with_context!(::log::Level::Info, $ctx, $($rest)+)
    };
}

macro_rules! my_warn {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::log::log_with_context!(::log::Level::Warn, $ctx, $($rest)+)
    };
}

macro_rules! my_error {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::log::log_with_context!(::log::Level::Error, $ctx, $($rest)+)
    };
}

macro_rules! my_debug {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::log::log_with_context!(::log::Level::Debug, $ctx, $($rest)+)
    };
}

macro_rules! my_trace {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::log::log_with_context!(::log::Level::Trace, $ctx, $($rest)+)
    };
}

pub(crate) use log_with_context;
pub(crate) use my_debug;
pub(crate) use my_error;
pub(crate) use my_info;
pub(crate) use my_trace;
pub(crate) use my_warn;

/// Host-side sink for FMI log messages:
/// `(instance_name, status, category, message)`.
pub type LoggerCallback = Box<dyn FnMut(&str, crate::types::Status, &str, &str)>;

/// The log categories every component declares by default
/// (FMI 2.0.2, Section 2.2.4).
pub const DEFAULT_LOG_CATEGORIES: [(&str, &str); 10] = [
    ("logEvents", "Log all events"),
    ("logSingularLinearSystems", "Log singular linear systems"),
    ("logNonlinearSystems", "Log nonlinear systems"),
    ("logDynamicStateSelection", "Log dynamic state selection"),
    ("logStatusWarning", "Log messages with status fmi2Warning"),
    ("logStatusDiscard", "Log messages with status fmi2Discard"),
    ("logStatusError", "Log messages with status fmi2Error"),
    ("logStatusFatal", "Log messages with status fmi2Fatal"),
    ("logStatusPending", "Log messages with status fmi2Pending"),
    ("logAll", "Log all messages"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryEntry {
    description: String,
    enabled: bool,
}

/// Named log categories with an enabled flag each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCategories {
    categories: BTreeMap<String, CategoryEntry>,
}

impl Default for LogCategories {
    fn default() -> Self {
        let mut categories = Self::empty();
        for (name, description) in DEFAULT_LOG_CATEGORIES {
            categories.add(name, description);
        }
        categories
    }
}

impl LogCategories {
    pub fn empty() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    /// Declares a category, disabled. Redeclaring replaces the description.
    pub fn add(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let entry = self.categories.entry(name.into()).or_insert(CategoryEntry {
            description: String::new(),
            enabled: false,
        });
        entry.description = description.into();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.categories.get(name).is_some_and(|c| c.enabled)
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.categories.get(name).map(|c| c.description.as_str())
    }

    /// Enables or disables the given categories; an empty list applies to all.
    ///
    /// Fails on the first undeclared name without changing any category.
    pub fn set_enabled(&mut self, names: &[&str], enabled: bool) -> Result<(), FmuError> {
        if names.is_empty() {
            self.categories.values_mut().for_each(|c| c.enabled = enabled);
            return Ok(());
        }
        if let Some(unknown) = names.iter().find(|n| !self.categories.contains_key(**n)) {
            return Err(FmuError::UnknownLogCategory(unknown.to_string()));
        }
        for name in names {
            if let Some(entry) = self.categories.get_mut(*name) {
                entry.enabled = enabled;
            }
        }
        Ok(())
    }

    /// Iterates `(name, description)` ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories
            .iter()
            .map(|(name, c)| (name.as_str(), c.description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
