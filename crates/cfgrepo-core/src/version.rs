//! Named versions

use crate::Result;

/// An immutable named pointer to a repository snapshot.
///
/// A version comes into existence when a write session tags its current
/// state; the name can never be reused afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    name: String,
}

impl Version {
    /// Create a version handle for the given name.
    ///
    /// The name is checked against naming rules at the point of use
    /// (tagging, resolving), not at construction.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the name against the identifier rules.
    ///
    /// Version names become git refs and directory names, so the same
    /// single-segment restrictions apply as for repository names.
    pub fn validate(&self) -> Result<()> {
        cfgrepo_fs::validate_identifier(&self.name)?;
        Ok(())
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Version {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
