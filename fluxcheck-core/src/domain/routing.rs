// fluxcheck-core/src/domain/routing.rs

use std::path::{Path, PathBuf};

use crate::domain::naming::{EntityId, Period};
use crate::domain::record::{FileRecord, FileStatus};

pub const NO_ENTITY_FOLDER: &str = "NO_ENT";
pub const OTHER_PERIOD_FOLDER: &str = "Other";

/// Destination roots of a run. Routing is a pure function of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPlan {
    pub monthly_root: PathBuf,
    pub quarterly_root: PathBuf,
    pub rejected_root: PathBuf,
}

impl RoutingPlan {
    /// Directory the record's file belongs in.
    pub fn destination_dir(&self, record: &FileRecord) -> PathBuf {
        match record.status {
            FileStatus::Accepted => self.accepted_dir(record.period, record.entity),
            FileStatus::Rejected | FileStatus::Pending => {
                self.rejected_dir(record.routing_flux(), record.period)
            }
        }
    }

    pub fn destination(&self, record: &FileRecord) -> PathBuf {
        self.destination_dir(record).join(&record.filename)
    }

    pub fn accepted_dir(&self, period: Option<Period>, entity: Option<EntityId>) -> PathBuf {
        let root = match period {
            Some(Period::Quarterly) => &self.quarterly_root,
            Some(Period::Monthly) => &self.monthly_root,
            None => return self.rejected_root.clone(),
        };
        let folder = entity
            .map(|e| e.folder_name())
            .unwrap_or_else(|| NO_ENTITY_FOLDER.to_string());
        root.join(folder)
    }

    pub fn rejected_dir(&self, flux: Option<&str>, period: Option<Period>) -> PathBuf {
        match flux {
            Some(flux) => self.rejected_root.join(flux).join(
                period
                    .map(|p| p.code())
                    .unwrap_or(OTHER_PERIOD_FOLDER),
            ),
            None => self.rejected_root.clone(),
        }
    }

    /// Accepted roots, in the order they are audited.
    pub fn accepted_roots(&self) -> [&Path; 2] {
        [self.quarterly_root.as_path(), self.monthly_root.as_path()]
    }
}
