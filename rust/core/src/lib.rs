// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # MEP-Openings Core
//!
//! Element model shared by the opening placement crates: identifiers,
//! barrier references, walls and levels, family symbols, 3D views and the
//! duct/pipe routing segments read from source documents.
//!
//! Identifiers are plain value types. Barrier identity is the composite
//! `(linked_context, barrier_id)` key so that hits on walls from linked
//! sub-models never collapse into a local wall with the same id.

pub mod element;
pub mod error;
pub mod ids;
pub mod segment;

pub use element::{ElementCategory, FamilySymbol, Level, StructuralType, View3D, Wall};
pub use error::{Error, Result};
pub use ids::{BarrierKey, BarrierRef, DocumentId, ElementId, LinkedContextId};
pub use segment::{LocationCurve, RoutingSegment, SegmentKind, SegmentLine};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Unit, Vector3};
