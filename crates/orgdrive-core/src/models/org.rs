use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Opaque organization code that namespaces every stored object.
///
/// The code is issued by the identity layer and treated as immutable for the
/// lifetime of a request. It carries no structure beyond being non-empty;
/// emptiness is rejected at key-construction time so that no operation can
/// run without a resolved organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    pub fn new(code: impl Into<String>) -> Self {
        OrgId(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrgId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OrgId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrgId {
    fn from(code: String) -> Self {
        OrgId(code)
    }
}

impl From<&str> for OrgId {
    fn from(code: &str) -> Self {
        OrgId(code.to_string())
    }
}
