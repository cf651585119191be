// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run-level errors.

use mep_openings_core::SegmentKind;
use thiserror::Error;

use crate::report::PlacementReport;

/// Result type for placement runs.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a placement run.
///
/// Nothing from the failing transaction is written: the precondition
/// variants are raised before a transaction starts, and host failures
/// during placement roll the open transaction back. Only
/// [`Error::PartiallyCommitted`] reports writes, the ones committed by
/// earlier transactions of the same run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no open document title contains \"{marker}\" ({kind} source)")]
    DocumentNotFound { kind: SegmentKind, marker: String },

    #[error("family \"{0}\" not found in the generic model category")]
    FamilyNotFound(String),

    #[error("no non-template 3D view found in the target document")]
    View3DNotFound,

    #[error("model error: {0}")]
    Model(#[from] mep_openings_core::Error),

    /// A later transaction failed after earlier ones committed.
    #[error(
        "{} openings committed before placement failed: {source}",
        .committed.total_openings()
    )]
    PartiallyCommitted {
        committed: Box<PlacementReport>,
        source: Box<Error>,
    },
}

impl Error {
    /// Whether this is a precondition failure: a missing source document,
    /// family, 3D view, wall or level, or a document that is not open.
    ///
    /// The classification is by kind, not by phase. A precondition failure
    /// is always raised before a transaction opens, but other host errors
    /// can be raised then too, e.g. when the caster cannot be built.
    pub fn is_precondition(&self) -> bool {
        match self {
            Error::DocumentNotFound { .. } | Error::FamilyNotFound(_) | Error::View3DNotFound => {
                true
            }
            Error::PartiallyCommitted { .. } => false,
            Error::Model(inner) => matches!(
                inner,
                mep_openings_core::Error::BarrierNotAWall(_)
                    | mep_openings_core::Error::LevelNotFound { .. }
                    | mep_openings_core::Error::DocumentNotOpen(_)
            ),
        }
    }

    /// Single message shown to the end user when a run is cancelled.
    pub fn user_message(&self) -> String {
        match self {
            Error::DocumentNotFound { kind, marker } => {
                let discipline = match kind {
                    SegmentKind::Duct => "ventilation",
                    SegmentKind::Pipe => "plumbing",
                };
                format!("The {discipline} file (title containing \"{marker}\") is not open")
            }
            Error::FamilyNotFound(name) => format!("The family \"{name}\" is not loaded"),
            Error::View3DNotFound => "No 3D view is available for intersection checks".into(),
            Error::Model(inner) => format!("Openings were not placed: {inner}"),
            Error::PartiallyCommitted { committed, source } => {
                let kinds: Vec<String> = committed
                    .collections
                    .iter()
                    .map(|c| format!("{}s", c.kind))
                    .collect();
                format!(
                    "{} openings were placed for {}, then placement failed: {}",
                    committed.total_openings(),
                    kinds.join(" and "),
                    source.user_message()
                )
            }
        }
    }
}
