use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a host construct whose availability depends on the running
/// host version (a node kind, a socket type, an attribute).
///
/// A capability has no structure beyond its identity. The only defined
/// operation is membership testing against a live host; enumeration of the
/// host's capability set is deliberately not assumed to be possible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityId(pub String);

impl CapabilityId {
    /// Create a new capability identifier.
    pub fn new(ident: impl Into<String>) -> Self {
        Self(ident.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CapabilityId {
    fn from(ident: String) -> Self {
        Self(ident)
    }
}

impl From<&str> for CapabilityId {
    fn from(ident: &str) -> Self {
        Self(ident.to_string())
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
