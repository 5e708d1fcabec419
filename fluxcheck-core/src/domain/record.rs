// fluxcheck-core/src/domain/record.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::naming::{EntityId, GrammarSegment, Period};
use crate::domain::validation::{LengthViolation, TypeViolation};

/// Which allow-list a flux name was missing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FluxGate {
    /// Sheet names of the cahier des charges.
    Declared,
    /// Names sanctioned by the Notice sheet.
    Sanctioned,
}

/// Typed rejection cause of a file. `Display` is the ledger/report wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    GrammarMismatch,
    UnknownFlux { flux: String, gate: FluxGate },
    InvalidDate(String),
    DateMismatch { observed: NaiveDate, expected: NaiveDate },
    UnreadableContent(String),
    MissingFields { flux: String, fields: Vec<String> },
    ContentViolations {
        length: Vec<LengthViolation>,
        types: Vec<TypeViolation>,
    },
}

fn join_or_none<T: fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrammarMismatch => write!(f, "Filename does not match naming grammar"),
            Self::UnknownFlux { flux, gate } => match gate {
                FluxGate::Declared => {
                    write!(f, "Unknown flux '{flux}': not declared in the cahier des charges")
                }
                FluxGate::Sanctioned => write!(f, "Unknown flux '{flux}': not listed in the Notice"),
            },
            Self::InvalidDate(block) => write!(f, "Invalid date '{block}' in filename"),
            Self::DateMismatch { observed, expected } => write!(
                f,
                "Different date '{}', expected '{}'",
                observed.format("%Y%m%d"),
                expected.format("%Y%m%d")
            ),
            Self::UnreadableContent(msg) => write!(f, "Unreadable content: {msg}"),
            Self::MissingFields { flux, fields } => write!(
                f,
                "Missing mandatory fields for {flux}: {}",
                fields.join(", ")
            ),
            Self::ContentViolations { length, types } => write!(
                f,
                "Length: {} | Type: {}",
                join_or_none(length),
                join_or_none(types)
            ),
        }
    }
}

/// The file could not be filed where its outcome says. It stays in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingFailure {
    DestinationExists(PathBuf),
    MoveFailed { destination: PathBuf, message: String },
}

impl RoutingFailure {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DestinationExists(_))
    }
}

impl fmt::Display for RoutingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DestinationExists(path) => {
                write!(f, "Destination already exists: {}", path.display())
            }
            Self::MoveFailed {
                destination,
                message,
            } => write!(f, "Move to {} failed: {message}", destination.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Everything known about one candidate file during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub filename: String,
    pub source: PathBuf,
    pub resolved_flux: Option<String>,
    /// Looser reading of a rejected name, only used to pick a rejected subfolder.
    pub best_guess_flux: Option<String>,
    pub period: Option<Period>,
    pub entity: Option<EntityId>,
    /// Calendar order.
    pub dates: Vec<NaiveDate>,
    pub status: FileStatus,
    pub reason: Option<RejectionReason>,
    pub failed_segment: Option<GrammarSegment>,
    pub destination: Option<PathBuf>,
    /// Set when the move did not happen. The rejection reason, if any, is kept.
    pub routing_failure: Option<RoutingFailure>,
}

impl FileRecord {
    pub fn pending(source: &Path) -> Self {
        let filename = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::named(filename, source.to_path_buf())
    }

    fn named(filename: String, source: PathBuf) -> Self {
        Self {
            filename,
            source,
            resolved_flux: None,
            best_guess_flux: None,
            period: None,
            entity: None,
            dates: Vec::new(),
            status: FileStatus::Pending,
            reason: None,
            failed_segment: None,
            destination: None,
            routing_failure: None,
        }
    }

    /// Only a pending record can be accepted.
    pub fn accept(&mut self) {
        if self.status == FileStatus::Pending {
            self.status = FileStatus::Accepted;
        }
    }

    /// The first rejection cause wins.
    pub fn reject(&mut self, reason: RejectionReason) {
        if self.status != FileStatus::Rejected {
            self.status = FileStatus::Rejected;
            self.reason = Some(reason);
        }
    }

    /// The file could not be moved. An accepted file becomes rejected; an earlier
    /// rejection reason is left as is.
    pub fn mark_unrouted(&mut self, failure: RoutingFailure) {
        self.status = FileStatus::Rejected;
        self.destination = None;
        self.routing_failure = Some(failure);
    }

    pub fn is_accepted(&self) -> bool {
        self.status == FileStatus::Accepted
    }

    /// Flux used to file a rejected record: resolved first, best guess otherwise.
    pub fn routing_flux(&self) -> Option<&str> {
        self.resolved_flux
            .as_deref()
            .or(self.best_guess_flux.as_deref())
    }
}
