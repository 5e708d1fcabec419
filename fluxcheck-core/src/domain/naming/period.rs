// fluxcheck-core/src/domain/naming/period.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Reporting period marker of a flux file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "M")]
    Monthly,
    #[serde(rename = "Q")]
    Quarterly,
}

impl Period {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Self::Monthly),
            "Q" => Some(Self::Quarterly),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Monthly => "M",
            Self::Quarterly => "Q",
        }
    }

    /// Looser detection used when the grammar did not match (`_Q_` / `_M_` anywhere).
    pub fn sniff(filename: &str) -> Option<Self> {
        if filename.contains("_Q_") {
            Some(Self::Quarterly)
        } else if filename.contains("_M_") {
            Some(Self::Monthly)
        } else {
            None
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn re_entity_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^ENT-(\d+)").unwrap_or_else(|_| {
            // Hardcoded pattern: cannot fail.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Reporting organisational unit (`ENT-12_...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// `ENT-<n>` prefix of a filename, whatever follows it.
    pub fn from_prefix(filename: &str) -> Option<Self> {
        re_entity_prefix()
            .captures(filename)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .map(EntityId)
    }

    /// Subfolder name under a period root.
    pub fn folder_name(&self) -> String {
        format!("ENT{}", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ENT-{}", self.0)
    }
}
