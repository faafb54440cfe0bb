//! String-backed identifier newtypes shared by users, recipes and their parts.
//!
//! Identifiers are opaque: the only rules are that they are non-empty and
//! carry no surrounding whitespace. Freshly generated identifiers take the
//! form `<prefix>-<uuid>`.

use std::fmt;

use uuid::Uuid;

/// Validation errors returned when constructing an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierValidationError {
    /// The identifier was empty.
    Empty,
    /// The identifier had leading or trailing whitespace.
    SurroundingWhitespace,
}

impl fmt::Display for IdentifierValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "identifier must not contain surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for IdentifierValidationError {}

pub(crate) fn validate_identifier(raw: &str) -> Result<(), IdentifierValidationError> {
    if raw.is_empty() {
        return Err(IdentifierValidationError::Empty);
    }
    if raw.trim() != raw {
        return Err(IdentifierValidationError::SurroundingWhitespace);
    }
    Ok(())
}

pub(crate) fn generate_identifier(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

macro_rules! define_identifier {
    (
        $(#[$outer:meta])*
        pub struct $name:ident;
        prefix = $prefix:literal;
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier from borrowed input.
            pub fn new(
                id: impl AsRef<str>,
            ) -> Result<Self, $crate::domain::identifier::IdentifierValidationError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            /// Generate a fresh, unique identifier.
            pub fn random() -> Self {
                Self($crate::domain::identifier::generate_identifier($prefix))
            }

            fn from_owned(
                id: String,
            ) -> Result<Self, $crate::domain::identifier::IdentifierValidationError> {
                $crate::domain::identifier::validate_identifier(&id)?;
                Ok(Self(id))
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::identifier::IdentifierValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::identifier::IdentifierValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_identifier;
