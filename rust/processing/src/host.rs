// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator interfaces the host application implements.
//!
//! Every call names the document it acts on; there is no implicit current
//! document. Lookups return everything the host has and the run decides
//! which entry to use.

use mep_openings_core::{
    BarrierRef, DocumentId, ElementId, FamilySymbol, Level, Point3, Result, RoutingSegment,
    SegmentKind, StructuralType, View3D, Wall,
};
use mep_openings_geometry::RayCaster;

/// An open document as listed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub id: DocumentId,
    pub title: String,
}

/// Open documents and the elements they contain.
pub trait DocumentProvider {
    /// Open documents in host order.
    fn documents(&self) -> Vec<DocumentInfo>;

    /// All ducts or all pipes of a document.
    fn routing_segments(&self, document: DocumentId, kind: SegmentKind)
        -> Result<Vec<RoutingSegment>>;

    /// Resolves a barrier reference to the wall it names, if it is a wall.
    fn wall(&self, document: DocumentId, barrier: &BarrierRef) -> Option<Wall>;

    fn level(&self, document: DocumentId, id: ElementId) -> Option<Level>;
}

/// Intersection queries against a document's 3D geometry.
pub trait IntersectionHost {
    /// 3D views of a document, templates included.
    fn views_3d(&self, document: DocumentId) -> Vec<View3D>;

    /// Caster over the geometry visible in `view`.
    fn ray_caster(&self, document: DocumentId, view: &View3D) -> Result<&dyn RayCaster>;
}

/// Placeable family types.
pub trait FamilyCatalog {
    fn family_symbols(&self, document: DocumentId) -> Vec<FamilySymbol>;

    /// Makes a symbol placeable. Must run inside a transaction.
    fn activate_symbol(&mut self, document: DocumentId, symbol: ElementId) -> Result<()>;
}

/// A hosted instance to create.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRequest {
    pub symbol: ElementId,
    pub location: Point3<f64>,
    pub host: BarrierRef,
    pub level: ElementId,
    pub structural_type: StructuralType,
}

/// Writes into a document. All writes happen inside a transaction.
pub trait PlacementApi {
    fn begin_transaction(&mut self, document: DocumentId, name: &str) -> Result<()>;

    fn commit_transaction(&mut self, document: DocumentId) -> Result<()>;

    /// Discards every write made since the transaction began.
    fn rollback_transaction(&mut self, document: DocumentId) -> Result<()>;

    fn create_instance(&mut self, document: DocumentId, request: &InstanceRequest)
        -> Result<ElementId>;

    fn set_parameter(
        &mut self,
        document: DocumentId,
        instance: ElementId,
        name: &str,
        value: f64,
    ) -> Result<()>;
}

/// Everything a placement run needs from the host.
pub trait ModelHost: DocumentProvider + IntersectionHost + FamilyCatalog + PlacementApi {}

impl<T> ModelHost for T where
    T: DocumentProvider + IntersectionHost + FamilyCatalog + PlacementApi
{
}
