// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host
//!
//! A self-contained implementation of the host interfaces. Documents hold
//! their elements in plain collections, wall geometry lives in a
//! [`BarrierScene`], and writes are staged per transaction so a rollback
//! restores the document exactly as it was when the transaction began.

use mep_openings_core::{
    BarrierKey, BarrierRef, DocumentId, ElementCategory, ElementId, Error, FamilySymbol, Level,
    LinkedContextId, LocationCurve, Point3, Result, RoutingSegment, SegmentKind, View3D, Wall,
};
use mep_openings_geometry::{BarrierScene, RayCaster};
use rustc_hash::FxHashMap;

use crate::host::{
    DocumentInfo, DocumentProvider, FamilyCatalog, InstanceRequest, IntersectionHost, PlacementApi,
};

/// A family instance created through [`PlacementApi::create_instance`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedInstance {
    pub id: ElementId,
    pub request: InstanceRequest,
    pub parameters: FxHashMap<String, f64>,
}

impl CreatedInstance {
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }
}

/// Solid geometry of a straight wall; see [`BarrierScene::add_wall`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallGeometry {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub thickness: f64,
    pub height: f64,
}

impl WallGeometry {
    pub fn new(start: Point3<f64>, end: Point3<f64>, thickness: f64, height: f64) -> Self {
        Self {
            start,
            end,
            thickness,
            height,
        }
    }
}

/// Injected creation failure: `allowed` more creations succeed, then every
/// one fails with `reason`.
#[derive(Debug, Clone)]
struct Rejection {
    allowed: usize,
    reason: String,
}

/// Snapshot taken when a transaction begins.
#[derive(Debug, Clone)]
struct OpenTransaction {
    name: String,
    instances: Vec<CreatedInstance>,
    symbols: Vec<FamilySymbol>,
}

/// One open document.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    id: DocumentId,
    title: String,
    next_element: i64,
    segments: Vec<RoutingSegment>,
    walls: FxHashMap<BarrierKey, Wall>,
    levels: FxHashMap<ElementId, Level>,
    symbols: Vec<FamilySymbol>,
    symbol_parameters: FxHashMap<ElementId, Vec<String>>,
    views: Vec<View3D>,
    scene: BarrierScene,
    instances: Vec<CreatedInstance>,
    transaction: Option<OpenTransaction>,
    committed: Vec<String>,
    rejection: Option<Rejection>,
}

impl MemoryDocument {
    fn new(id: DocumentId, title: String) -> Self {
        Self {
            id,
            title,
            next_element: 0,
            segments: Vec::new(),
            walls: FxHashMap::default(),
            levels: FxHashMap::default(),
            symbols: Vec::new(),
            symbol_parameters: FxHashMap::default(),
            views: Vec::new(),
            scene: BarrierScene::new(),
            instances: Vec::new(),
            transaction: None,
            committed: Vec::new(),
            rejection: None,
        }
    }

    fn next_id(&mut self) -> ElementId {
        self.next_element += 1;
        ElementId(self.next_element)
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn add_level(&mut self, name: &str, elevation: f64) -> ElementId {
        let id = self.next_id();
        self.levels.insert(
            id,
            Level {
                id,
                name: name.to_string(),
                elevation,
            },
        );
        id
    }

    pub fn add_duct(&mut self, curve: LocationCurve, diameter: f64) -> ElementId {
        let id = self.next_id();
        self.segments.push(RoutingSegment::duct(id, curve, diameter));
        id
    }

    pub fn add_pipe(&mut self, curve: LocationCurve, diameter: f64) -> ElementId {
        let id = self.next_id();
        self.segments.push(RoutingSegment::pipe(id, curve, diameter));
        id
    }

    /// Adds a wall owned by this document, with a single solid.
    pub fn add_wall(&mut self, name: &str, level: ElementId, geometry: WallGeometry) -> BarrierRef {
        let barrier = BarrierRef::local(self.next_id());
        self.register_wall(barrier, name, level, &geometry);
        self.add_wall_solid(barrier, geometry);
        barrier
    }

    /// Adds a wall that lives in a linked sub-model.
    pub fn add_linked_wall(
        &mut self,
        context: LinkedContextId,
        barrier_id: ElementId,
        name: &str,
        level: ElementId,
        geometry: WallGeometry,
    ) -> BarrierRef {
        let barrier = BarrierRef::linked(barrier_id, context);
        self.register_wall(barrier, name, level, &geometry);
        self.add_wall_solid(barrier, geometry);
        barrier
    }

    /// Adds another solid to an existing wall, the way a layered wall
    /// exposes one solid per layer.
    pub fn add_wall_solid(&mut self, barrier: BarrierRef, geometry: WallGeometry) {
        let WallGeometry {
            start,
            end,
            thickness,
            height,
        } = geometry;
        if !self.scene.add_wall(barrier, start, end, thickness, height) {
            tracing::debug!(barrier = %barrier, "Wall solid without horizontal extent ignored");
        }
    }

    fn register_wall(
        &mut self,
        barrier: BarrierRef,
        name: &str,
        level: ElementId,
        geometry: &WallGeometry,
    ) {
        self.walls.insert(
            barrier.key(),
            Wall {
                barrier,
                name: name.to_string(),
                level_id: level,
                thickness: geometry.thickness,
            },
        );
    }

    /// Direct access to the geometry, e.g. to add non-wall faces.
    pub fn scene_mut(&mut self) -> &mut BarrierScene {
        &mut self.scene
    }

    /// Adds a family symbol whose instances carry `parameters`, all
    /// initialised to zero.
    pub fn add_family_symbol(
        &mut self,
        family_name: &str,
        type_name: &str,
        category: ElementCategory,
        is_active: bool,
        parameters: &[&str],
    ) -> ElementId {
        let id = self.next_id();
        self.symbols.push(FamilySymbol {
            id,
            family_name: family_name.to_string(),
            type_name: type_name.to_string(),
            category,
            is_active,
        });
        self.symbol_parameters
            .insert(id, parameters.iter().map(|p| p.to_string()).collect());
        id
    }

    pub fn add_view_3d(&mut self, name: &str, is_template: bool) -> ElementId {
        let id = self.next_id();
        self.views.push(View3D {
            id,
            name: name.to_string(),
            is_template,
        });
        id
    }

    /// Makes every later instance creation fail with `reason`.
    pub fn reject_instances(&mut self, reason: impl Into<String>) {
        self.reject_instances_after(0, reason);
    }

    /// Lets `allowed` more instance creations succeed, then fails every
    /// later one with `reason`. Creations undone by a rollback still count.
    pub fn reject_instances_after(&mut self, allowed: usize, reason: impl Into<String>) {
        self.rejection = Some(Rejection {
            allowed,
            reason: reason.into(),
        });
    }

    pub fn instances(&self) -> &[CreatedInstance] {
        &self.instances
    }

    pub fn symbol(&self, id: ElementId) -> Option<&FamilySymbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    pub fn has_open_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Names of committed transactions, oldest first.
    pub fn committed_transactions(&self) -> &[String] {
        &self.committed
    }

    fn ensure_transaction(&self) -> Result<()> {
        if self.transaction.is_some() {
            Ok(())
        } else {
            Err(Error::NoTransaction(self.id))
        }
    }
}

/// Host holding any number of in-memory documents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    documents: Vec<MemoryDocument>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an empty document. Ids are assigned in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the host already holds `u32::MAX + 1` documents, the
    /// number of distinct [`DocumentId`]s.
    pub fn add_document(&mut self, title: &str) -> DocumentId {
        let Ok(index) = u32::try_from(self.documents.len()) else {
            panic!("in-memory host is limited to {} documents", u64::from(u32::MAX) + 1);
        };
        let id = DocumentId(index);
        self.documents.push(MemoryDocument::new(id, title.to_string()));
        id
    }

    pub fn document(&self, id: DocumentId) -> Option<&MemoryDocument> {
        self.documents.get(id.0 as usize)
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut MemoryDocument> {
        self.documents.get_mut(id.0 as usize)
    }

    fn doc(&self, id: DocumentId) -> Result<&MemoryDocument> {
        self.document(id).ok_or(Error::DocumentNotOpen(id))
    }

    fn doc_mut(&mut self, id: DocumentId) -> Result<&mut MemoryDocument> {
        self.document_mut(id).ok_or(Error::DocumentNotOpen(id))
    }
}

impl DocumentProvider for InMemoryHost {
    fn documents(&self) -> Vec<DocumentInfo> {
        self.documents
            .iter()
            .map(|doc| DocumentInfo {
                id: doc.id,
                title: doc.title.clone(),
            })
            .collect()
    }

    fn routing_segments(
        &self,
        document: DocumentId,
        kind: SegmentKind,
    ) -> Result<Vec<RoutingSegment>> {
        Ok(self
            .doc(document)?
            .segments
            .iter()
            .filter(|s| s.kind == kind)
            .cloned()
            .collect())
    }

    fn wall(&self, document: DocumentId, barrier: &BarrierRef) -> Option<Wall> {
        self.document(document)?.walls.get(&barrier.key()).cloned()
    }

    fn level(&self, document: DocumentId, id: ElementId) -> Option<Level> {
        self.document(document)?.levels.get(&id).cloned()
    }
}

impl IntersectionHost for InMemoryHost {
    fn views_3d(&self, document: DocumentId) -> Vec<View3D> {
        self.document(document)
            .map(|doc| doc.views.clone())
            .unwrap_or_default()
    }

    fn ray_caster(&self, document: DocumentId, view: &View3D) -> Result<&dyn RayCaster> {
        let doc = self.doc(document)?;
        if !doc.views.iter().any(|v| v.id == view.id) {
            return Err(Error::ElementNotFound(view.id));
        }
        Ok(&doc.scene)
    }
}

impl FamilyCatalog for InMemoryHost {
    fn family_symbols(&self, document: DocumentId) -> Vec<FamilySymbol> {
        self.document(document)
            .map(|doc| doc.symbols.clone())
            .unwrap_or_default()
    }

    fn activate_symbol(&mut self, document: DocumentId, symbol: ElementId) -> Result<()> {
        let doc = self.doc_mut(document)?;
        doc.ensure_transaction()?;
        let entry = doc
            .symbols
            .iter_mut()
            .find(|s| s.id == symbol)
            .ok_or(Error::SymbolNotFound(symbol))?;
        entry.is_active = true;
        Ok(())
    }
}

impl PlacementApi for InMemoryHost {
    fn begin_transaction(&mut self, document: DocumentId, name: &str) -> Result<()> {
        let doc = self.doc_mut(document)?;
        if doc.transaction.is_some() {
            return Err(Error::TransactionAlreadyOpen(document));
        }
        doc.transaction = Some(OpenTransaction {
            name: name.to_string(),
            instances: doc.instances.clone(),
            symbols: doc.symbols.clone(),
        });
        Ok(())
    }

    fn commit_transaction(&mut self, document: DocumentId) -> Result<()> {
        let doc = self.doc_mut(document)?;
        let transaction = doc.transaction.take().ok_or(Error::NoTransaction(document))?;
        doc.committed.push(transaction.name);
        Ok(())
    }

    fn rollback_transaction(&mut self, document: DocumentId) -> Result<()> {
        let doc = self.doc_mut(document)?;
        let transaction = doc.transaction.take().ok_or(Error::NoTransaction(document))?;
        doc.instances = transaction.instances;
        doc.symbols = transaction.symbols;
        Ok(())
    }

    fn create_instance(
        &mut self,
        document: DocumentId,
        request: &InstanceRequest,
    ) -> Result<ElementId> {
        let doc = self.doc_mut(document)?;
        doc.ensure_transaction()?;
        if let Some(rejection) = &mut doc.rejection {
            if rejection.allowed == 0 {
                return Err(Error::CreationRejected(rejection.reason.clone()));
            }
            rejection.allowed -= 1;
        }

        let symbol = doc
            .symbol(request.symbol)
            .ok_or(Error::SymbolNotFound(request.symbol))?;
        if !symbol.is_active {
            return Err(Error::CreationRejected(format!(
                "symbol {} is not active",
                request.symbol
            )));
        }
        if !doc.walls.contains_key(&request.host.key()) {
            return Err(Error::BarrierNotAWall(request.host));
        }
        if !doc.levels.contains_key(&request.level) {
            return Err(Error::ElementNotFound(request.level));
        }

        let parameters = doc
            .symbol_parameters
            .get(&request.symbol)
            .map(|names| names.iter().map(|n| (n.clone(), 0.0)).collect())
            .unwrap_or_default();
        let id = doc.next_id();
        doc.instances.push(CreatedInstance {
            id,
            request: request.clone(),
            parameters,
        });
        Ok(id)
    }

    fn set_parameter(
        &mut self,
        document: DocumentId,
        instance: ElementId,
        name: &str,
        value: f64,
    ) -> Result<()> {
        let doc = self.doc_mut(document)?;
        doc.ensure_transaction()?;
        let created = doc
            .instances
            .iter_mut()
            .find(|i| i.id == instance)
            .ok_or(Error::ElementNotFound(instance))?;
        let slot = created
            .parameters
            .get_mut(name)
            .ok_or_else(|| Error::ParameterNotFound {
                instance,
                name: name.to_string(),
            })?;
        *slot = value;
        Ok(())
    }
}
