// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening placement runs.
//!
//! [`OpeningPlacer`] drives a run against any [`ModelHost`]: it finds the
//! ventilation and plumbing source documents, the opening family and a 3D
//! view of the target document, computes every penetration of every duct
//! and pipe, and writes the openings atomically. [`InMemoryHost`] is a
//! complete host for tests and offline use.
//!
//! The crate logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod pipeline;
pub mod report;

pub use config::{PlacementConfig, TransactionScope};
pub use error::{Error, Result};
pub use host::{
    DocumentInfo, DocumentProvider, FamilyCatalog, InstanceRequest, IntersectionHost, ModelHost,
    PlacementApi,
};
pub use memory::{CreatedInstance, InMemoryHost, MemoryDocument, WallGeometry};
pub use pipeline::{CollectionPlan, OpeningPlacer, PlacementPlan, PlannedOpening};
pub use report::{CollectionSummary, PlacedOpening, PlacementReport};
