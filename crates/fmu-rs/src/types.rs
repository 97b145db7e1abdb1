use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

// --- Primitive Types (Based on FMI 2.0.2 Section 2.1.2) ---
// These aliases mirror the C types of the FMI2 platform headers.

/// Alias for fmi2Real.
pub type Fmi2Real = f64;
/// Alias for fmi2Integer.
pub type Fmi2Integer = i32;
/// Alias for fmi2Boolean. Stored as a Rust `bool` on this side of the ABI.
pub type Fmi2Boolean = bool;

/// Identifies a variable within one value-type namespace.
///
/// Value references are *not* globally unique: a Real and an Integer variable
/// may both carry reference 3. Reference 0 is never handed out by the registry.
pub type ValueReference = u32;

/// The FMI version string written into every model description.
pub const FMI_VERSION: &str = "2.0";

/// Unit name of dimensionless quantities. Always defined.
pub const DEFAULT_UNIT: &str = "1";

/// The four scalar value types of FMI 2.0.
///
/// The declaration order is significant: it is the primary sort key of the
/// registry and therefore the order of `<ScalarVariable>` elements on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    Real,
    Integer,
    Boolean,
    String,
}

impl ValueType {
    /// All value types, in registry order.
    pub const ALL: [ValueType; 4] = [
        ValueType::Real,
        ValueType::Integer,
        ValueType::Boolean,
        ValueType::String,
    ];

    /// The XML element name of the nested type element (e.g. `<Real/>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Real => "Real",
            ValueType::Integer => "Integer",
            ValueType::Boolean => "Boolean",
            ValueType::String => "String",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a textual value cannot be converted into a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseValueError {
    pub value_type: ValueType,
    pub text: String,
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {} value", self.text, self.value_type)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseValueError {}

/// A single scalar of any FMI value type. Used for start values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Real(Fmi2Real),
    Integer(Fmi2Integer),
    Boolean(Fmi2Boolean),
    String(String),
}

impl Value {
    /// Returns the value type of the contained scalar.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Real(_) => ValueType::Real,
            Value::Integer(_) => ValueType::Integer,
            Value::Boolean(_) => ValueType::Boolean,
            Value::String(_) => ValueType::String,
        }
    }

    /// Formats the value the way it appears in a `start` attribute.
    ///
    /// Reals use the `xs:double` lexical forms: `INF`, `-INF` and `NaN` for
    /// non-finite values, exponent notation outside `[1e-5, 1e16)`. Rust's
    /// float formatting never consults the process locale, so the decimal
    /// separator is always `.`.
    pub fn to_xml_string(&self) -> String {
        match self {
            Value::Real(v) => format_real(*v),
            Value::Integer(v) => v.to_string(),
            Value::Boolean(v) => if *v { "true" } else { "false" }.to_string(),
            Value::String(v) => v.clone(),
        }
    }

    /// Parses the text of a `start` attribute for the given value type.
    ///
    /// Booleans accept `true`/`false` as well as the XML Schema forms `1`/`0`.
    pub fn parse(value_type: ValueType, text: &str) -> Result<Value, ParseValueError> {
        let err = || ParseValueError {
            value_type,
            text: text.to_string(),
        };
        match value_type {
            ValueType::Real => match text.trim() {
                "INF" => Ok(Value::Real(f64::INFINITY)),
                "-INF" => Ok(Value::Real(f64::NEG_INFINITY)),
                "NaN" => Ok(Value::Real(f64::NAN)),
                t => f64::from_str(t).map(Value::Real).map_err(|_| err()),
            },
            ValueType::Integer => i32::from_str(text.trim())
                .map(Value::Integer)
                .map_err(|_| err()),
            ValueType::Boolean => match text.trim() {
                "true" | "1" => Ok(Value::Boolean(true)),
                "false" | "0" => Ok(Value::Boolean(false)),
                _ => Err(err()),
            },
            ValueType::String => Ok(Value::String(text.to_string())),
        }
    }
}

fn format_real(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let magnitude = v.abs();
    if v != 0.0 && !(1e-5..1e16).contains(&magnitude) {
        format!("{:e}", v)
    } else {
        format!("{}", v)
    }
}

/// FMI status codes returned by the component entry points (fmi2Status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    Warning = 1,
    Discard = 2,
    Error = 3,
    Fatal = 4,
    Pending = 5,
}

impl Status {
    /// Name of the default log category that reports this status.
    pub fn log_category(&self) -> &'static str {
        match self {
            Status::Ok => "logEvents",
            Status::Warning => "logStatusWarning",
            Status::Discard => "logStatusDiscard",
            Status::Error => "logStatusError",
            Status::Fatal => "logStatusFatal",
            Status::Pending => "logStatusPending",
        }
    }
}

/// The interface type a component is instantiated as (fmi2Type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FmuType {
    ModelExchange,
    #[default]
    CoSimulation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_order_matches_export_order() {
        let mut types = [
            ValueType::String,
            ValueType::Boolean,
            ValueType::Real,
            ValueType::Integer,
        ];
        types.sort();
        assert_eq!(types, ValueType::ALL);
    }

    #[test]
    fn test_real_formatting_is_plain_decimal() {
        assert_eq!(Value::Real(0.5).to_xml_string(), "0.5");
        assert_eq!(Value::Real(-2.0).to_xml_string(), "-2");
        assert_eq!(Value::Integer(-17).to_xml_string(), "-17");
        assert_eq!(Value::Boolean(true).to_xml_string(), "true");
        assert_eq!(Value::String("a b".into()).to_xml_string(), "a b");
    }

    #[test]
    fn test_real_special_and_extreme_values() {
        assert_eq!(Value::Real(f64::INFINITY).to_xml_string(), "INF");
        assert_eq!(Value::Real(f64::NEG_INFINITY).to_xml_string(), "-INF");
        assert_eq!(Value::Real(f64::NAN).to_xml_string(), "NaN");
        assert_eq!(Value::Real(1e-300).to_xml_string(), "1e-300");
        assert_eq!(Value::Real(-2.5e20).to_xml_string(), "-2.5e20");
        assert_eq!(Value::Real(0.0).to_xml_string(), "0");
        assert_eq!(Value::Real(0.001).to_xml_string(), "0.001");

        assert_eq!(Value::parse(ValueType::Real, "INF"), Ok(Value::Real(f64::INFINITY)));
        assert_eq!(Value::parse(ValueType::Real, "-INF"), Ok(Value::Real(f64::NEG_INFINITY)));
        assert_eq!(Value::parse(ValueType::Real, "1e-300"), Ok(Value::Real(1e-300)));
        match Value::parse(ValueType::Real, "NaN") {
            Ok(Value::Real(v)) => assert!(v.is_nan()),
            other => panic!("expected NaN, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(Value::parse(ValueType::Real, "9.81"), Ok(Value::Real(9.81)));
        assert_eq!(Value::parse(ValueType::Real, "1e-3"), Ok(Value::Real(0.001)));
        assert_eq!(Value::parse(ValueType::Integer, " 42 "), Ok(Value::Integer(42)));
        assert_eq!(Value::parse(ValueType::Boolean, "1"), Ok(Value::Boolean(true)));
        assert_eq!(Value::parse(ValueType::Boolean, "false"), Ok(Value::Boolean(false)));
        assert!(Value::parse(ValueType::Boolean, "yes").is_err());
        assert!(Value::parse(ValueType::Integer, "1.5").is_err());
    }

    #[test]
    fn test_status_categories() {
        assert_eq!(Status::Error.log_category(), "logStatusError");
        assert_eq!(Status::Ok.log_category(), "logEvents");
    }
}
