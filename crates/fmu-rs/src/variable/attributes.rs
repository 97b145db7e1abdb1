use core::fmt;

/// The role of a variable (FMI 2.0.2, Section 2.2.7, `causality`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Causality {
    /// Independent parameter, constant during simulation.
    Parameter,
    /// Computed from other parameters, constant during simulation.
    CalculatedParameter,
    /// Value provided from outside the component.
    Input,
    /// Value exposed to the environment.
    Output,
    /// Internal variable, exposed for inspection only.
    #[default]
    Local,
    /// The independent variable (usually time).
    Independent,
}

/// The time dependency of a variable (`variability`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variability {
    Constant,
    Fixed,
    Tunable,
    Discrete,
    #[default]
    Continuous,
}

/// How the initial value of a variable is determined (`initial`).
///
/// `None` stands for an absent attribute; descriptors replace it with the
/// FMI default wherever the standard defines one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Initial {
    #[default]
    None,
    Exact,
    Approx,
    Calculated,
}

macro_rules! xml_enum {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// The attribute value used in the model description.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parses an attribute value, returning `None` for unknown text.
            pub fn from_xml(text: &str) -> Option<Self> {
                match text {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

xml_enum!(Causality {
    Parameter => "parameter",
    CalculatedParameter => "calculatedParameter",
    Input => "input",
    Output => "output",
    Local => "local",
    Independent => "independent",
});

xml_enum!(Variability {
    Constant => "constant",
    Fixed => "fixed",
    Tunable => "tunable",
    Discrete => "discrete",
    Continuous => "continuous",
});

xml_enum!(Initial {
    None => "none",
    Exact => "exact",
    Approx => "approx",
    Calculated => "calculated",
});

impl Causality {
    pub const ALL: [Causality; 6] = [
        Causality::Parameter,
        Causality::CalculatedParameter,
        Causality::Input,
        Causality::Output,
        Causality::Local,
        Causality::Independent,
    ];
}

impl Variability {
    pub const ALL: [Variability; 5] = [
        Variability::Constant,
        Variability::Fixed,
        Variability::Tunable,
        Variability::Discrete,
        Variability::Continuous,
    ];
}

impl Initial {
    pub const ALL: [Initial; 4] = [
        Initial::None,
        Initial::Exact,
        Initial::Approx,
        Initial::Calculated,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_names_round_trip() {
        for c in Causality::ALL {
            assert_eq!(Causality::from_xml(c.as_str()), Some(c));
        }
        for v in Variability::ALL {
            assert_eq!(Variability::from_xml(v.as_str()), Some(v));
        }
        for i in Initial::ALL {
            assert_eq!(Initial::from_xml(i.as_str()), Some(i));
        }
        assert_eq!(Causality::from_xml("Input"), None);
    }

    #[test]
    fn test_defaults_match_fmi() {
        assert_eq!(Causality::default(), Causality::Local);
        assert_eq!(Variability::default(), Variability::Continuous);
        assert_eq!(Initial::default(), Initial::None);
    }
}
