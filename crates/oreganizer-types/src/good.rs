//! Named goods.
//!
//! A good has no identity beyond its name, so [`Good`] is a thin newtype
//! around [`String`] that keeps goods from being mixed up with other
//! strings at compile time. It serializes as a bare string.

use serde::{Deserialize, Serialize};

/// A named item in the planning domain: a raw resource, a material, or an
/// intermediate product.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Good(String);

impl Good {
    /// Create a good from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Return the good's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned name.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for Good {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Good {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Good {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl core::borrow::Borrow<str> for Good {
    fn borrow(&self) -> &str {
        &self.0
    }
}
