// fluxcheck-core/src/domain/naming/segment.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Segments of the naming grammar, in left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarSegment {
    Entity,
    Mode,
    ProviderBatch,
    FluxName,
    Period,
    FirstDate,
    AdditionalDates,
    Extension,
    /// The date segment matched but holds an impossible calendar date.
    Dates,
}

impl GrammarSegment {
    /// Order in which the diagnostic checks the filename.
    pub const ORDER: [GrammarSegment; 8] = [
        Self::Entity,
        Self::Mode,
        Self::ProviderBatch,
        Self::FluxName,
        Self::Period,
        Self::FirstDate,
        Self::AdditionalDates,
        Self::Extension,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Self::Entity => "ENT number (optional)",
            Self::Mode => "MOD1 prefix (optional)",
            Self::ProviderBatch => "Provider with batch number",
            Self::FluxName => "Flux name",
            Self::Period => "Period (_Q or _M)",
            Self::FirstDate => "First date (YYYYMMDD or YYYYMMDDYYYYMMDD)",
            Self::AdditionalDates => "Additional dates (_YYYYMMDD, optional)",
            Self::Extension => "File extension",
            Self::Dates => "Calendar dates (YYYYMMDD)",
        }
    }
}

impl fmt::Display for GrammarSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
