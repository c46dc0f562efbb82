//! Enumerated domains the color tables are keyed by.
//!
//! Each enum exposes `ALL` (the full domain, used for coverage validation)
//! and `label()` (the exact string the collaborator uses as a statistics
//! column name).

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Generate `label()`, `ALL`, `Display` and `FromStr` for a label-keyed enum.
macro_rules! labelled_enum {
    ($(#[$attr:meta])* $vis:vis enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            /// Every value of the domain, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The collaborator's label for this value.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(CoreError::Parse(format!(
                        "unknown {} `{other}`", stringify!($name)
                    ))),
                }
            }
        }
    };
}

labelled_enum! {
    /// Coarse epidemiological state of a person.
    pub enum Status {
        Susceptible     => "Susceptible",
        Infected        => "Infected",
        RecoveredImmune => "Recovered_Immune",
        Death           => "Death",
    }
}

labelled_enum! {
    /// Refinement of [`Status::Infected`].
    pub enum InfectionSeverity {
        Exposed         => "Exposed",
        Asymptomatic    => "Asymptomatic",
        Hospitalization => "Hospitalization",
        Severe          => "Severe",
    }
}

labelled_enum! {
    /// Wealth-ranked population bucket, `Q1` poorest to `Q5` richest.
    pub enum Quintile {
        Q1 => "Q1",
        Q2 => "Q2",
        Q3 => "Q3",
        Q4 => "Q4",
        Q5 => "Q5",
    }
}

labelled_enum! {
    /// Which statistics snapshot a record belongs to.
    pub enum StatKind {
        Info => "info",
        Ecom => "ecom",
    }
}

impl Default for InfectionSeverity {
    fn default() -> Self {
        InfectionSeverity::Exposed
    }
}
