// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model lookups and host writes.

use crate::ids::{BarrierRef, DocumentId, ElementId};

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by a host while resolving or writing elements.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document id does not name an open document.
    #[error("document not open: {0}")]
    DocumentNotOpen(DocumentId),

    /// An element id does not name an element of the expected kind.
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),

    /// The barrier reported by an intersection does not resolve to a wall.
    #[error("barrier {0} does not resolve to a wall")]
    BarrierNotAWall(BarrierRef),

    /// A wall references a level that does not exist.
    #[error("level {level} of wall {wall} not found")]
    LevelNotFound { wall: BarrierRef, level: ElementId },

    /// A family symbol id is unknown to the document.
    #[error("family symbol not found: {0}")]
    SymbolNotFound(ElementId),

    /// A created instance lacks a parameter the workflow writes.
    #[error("parameter \"{name}\" not found on instance {instance}")]
    ParameterNotFound { instance: ElementId, name: String },

    /// The host refused to create an instance.
    #[error("instance creation rejected: {0}")]
    CreationRejected(String),

    /// A write was attempted outside an open transaction.
    #[error("no open transaction on {0}")]
    NoTransaction(DocumentId),

    /// A transaction was started while another one is still open.
    #[error("transaction already open on {0}")]
    TransactionAlreadyOpen(DocumentId),
}
