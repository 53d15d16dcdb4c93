//! Enumeration types for the Oreganizer planner.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Demand kinds
// ---------------------------------------------------------------------------

/// How a demanded good is used by whatever demanded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandKind {
    /// The good must be held in sufficient quantity. It is not destroyed by
    /// use and can be reused once acquired (tools, workstations).
    Require,
    /// The good is destroyed by use and must be replenished every time.
    Consume,
}

impl DemandKind {
    /// Lowercase label used in logs and reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::Consume => "consume",
        }
    }
}

impl core::fmt::Display for DemandKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&DemandKind::Consume).ok();
        assert_eq!(json.as_deref(), Some("\"consume\""));
        let back: Option<DemandKind> = serde_json::from_str("\"require\"").ok();
        assert_eq!(back, Some(DemandKind::Require));
    }
}
