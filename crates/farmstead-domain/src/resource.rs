//! Owned resource kinds.

use std::fmt;

/// The kinds of records an account owns.
///
/// Each kind maps to one REST collection and one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Field,
    Equipment,
    Inventory,
    Staff,
}

impl ResourceKind {
    /// Human-readable singular label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Equipment => "equipment",
            Self::Inventory => "inventory item",
            Self::Staff => "staff member",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
