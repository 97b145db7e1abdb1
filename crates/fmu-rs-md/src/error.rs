// crates/fmu-rs-md/src/error.rs

use alloc::fmt;
use alloc::string::String;
use fmu_rs::FmuError;
use quick_xml::errors::serialize::DeError;
use quick_xml::errors::serialize::SeError;

/// Errors that can occur while reading or writing a model description.
///
/// Any error returned while loading rejects the whole document.
#[derive(Debug)]
pub enum MdError {
    /// An error from the underlying `quick-xml` deserializer.
    XmlParsing(DeError),

    /// An error from the underlying `quick-xml` serializer.
    XmlSerializing(SeError),

    /// An error occurred while writing the XML header.
    FmtError(fmt::Error),

    /// A required attribute was missing (e.g., @valueReference).
    MissingAttribute { attribute: &'static str },

    /// An attribute (e.g., @causality) had an invalid value.
    InvalidAttributeFormat { attribute: &'static str },

    /// A variable's attributes violate the FMI rules.
    Attribute(FmuError),

    /// A variable name has more `.`-separated segments than the tree allows.
    NameTooDeep { name: String, depth: usize },

    /// Two variables in one document share a name.
    DuplicateName { name: String },
}

impl From<DeError> for MdError {
    fn from(e: DeError) -> Self {
        MdError::XmlParsing(e)
    }
}

impl From<SeError> for MdError {
    fn from(e: SeError) -> Self {
        MdError::XmlSerializing(e)
    }
}

impl From<fmt::Error> for MdError {
    fn from(e: fmt::Error) -> Self {
        MdError::FmtError(e)
    }
}

impl From<FmuError> for MdError {
    fn from(e: FmuError) -> Self {
        MdError::Attribute(e)
    }
}

impl fmt::Display for MdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MdError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            MdError::XmlSerializing(e) => write!(f, "XML serializing error: {}", e),
            MdError::FmtError(e) => write!(f, "Formatting error: {}", e),
            MdError::MissingAttribute { attribute } => {
                write!(f, "Missing required attribute: {}", attribute)
            }
            MdError::InvalidAttributeFormat { attribute } => {
                write!(f, "Invalid format for attribute: {}", attribute)
            }
            MdError::Attribute(e) => write!(f, "Invalid variable: {}", e),
            MdError::DuplicateName { name } => {
                write!(f, "Variable name '{}' is declared more than once", name)
            }
            MdError::NameTooDeep { name, depth } => write!(
                f,
                "Variable name '{}' has more than {} segments",
                name, depth
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MdError;
    use alloc::string::ToString;
    use fmu_rs::FmuError;

    #[test]
    fn test_from_de_error() {
        let xml_err = quick_xml::de::from_str::<crate::model::FmiModelDescription>("this is not xml").unwrap_err();
        let md_err: MdError = xml_err.into();
        assert!(matches!(md_err, MdError::XmlParsing(_)));
    }

    #[test]
    fn test_from_se_error() {
        let xml_err = quick_xml::errors::serialize::SeError::Custom("test error".to_string());
        let md_err: MdError = xml_err.into();
        assert!(matches!(md_err, MdError::XmlSerializing(_)));
    }

    #[test]
    fn test_from_fmt_error() {
        let md_err: MdError = core::fmt::Error.into();
        assert!(matches!(md_err, MdError::FmtError(_)));
    }

    #[test]
    fn test_from_fmu_error() {
        let md_err: MdError = FmuError::DuplicateName("x".to_string()).into();
        assert_eq!(
            md_err.to_string(),
            "Invalid variable: A variable named 'x' is already registered"
        );
    }
}
