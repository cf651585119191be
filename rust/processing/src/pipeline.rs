// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement run
//!
//! A run has two phases:
//!
//! 1. **Plan** (read-only): resolve the source documents, the opening
//!    family and a 3D view, then cast every duct and pipe against the
//!    target's walls and resolve each surviving hit to its wall and level.
//!    Any unresolved precondition aborts here, before anything is written.
//! 2. **Apply**: inside the configured transaction scope, activate the
//!    family symbol if needed, create one instance per planned opening and
//!    size it. A failure rolls the open transaction back. With
//!    [`TransactionScope::PerCollection`], batches committed before the
//!    failure stay in the document and are returned in
//!    [`Error::PartiallyCommitted`].

use mep_openings_core::{
    DocumentId, ElementCategory, ElementId, FamilySymbol, Level, RoutingSegment, SegmentKind,
    StructuralType, View3D, Wall,
};
use mep_openings_geometry::{penetrations, ElementClassFilter, PenetrationPoint, RayCaster};

use crate::config::{PlacementConfig, TransactionScope};
use crate::error::{Error, Result};
use crate::host::{
    DocumentInfo, DocumentProvider, FamilyCatalog, InstanceRequest, IntersectionHost, ModelHost,
    PlacementApi,
};
use crate::report::{CollectionSummary, PlacedOpening, PlacementReport};

/// Source collections in processing order.
const COLLECTIONS: [SegmentKind; 2] = [SegmentKind::Duct, SegmentKind::Pipe];

/// One opening to create, fully resolved against the target document.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedOpening {
    pub kind: SegmentKind,
    pub source_segment: ElementId,
    pub point: PenetrationPoint,
    pub wall: Wall,
    pub level: Level,
}

/// Planned openings of one source collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPlan {
    pub kind: SegmentKind,
    pub source: DocumentInfo,
    pub segments: usize,
    pub skipped_segments: usize,
    pub raw_hits: usize,
    pub openings: Vec<PlannedOpening>,
}

impl CollectionPlan {
    fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            kind: self.kind,
            source_document: self.source.id,
            source_title: self.source.title.clone(),
            segments: self.segments,
            skipped_segments: self.skipped_segments,
            raw_hits: self.raw_hits,
            openings: self.openings.len(),
        }
    }
}

/// Everything the apply phase needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPlan {
    pub target: DocumentId,
    pub symbol: FamilySymbol,
    pub view: View3D,
    pub collections: Vec<CollectionPlan>,
}

impl PlacementPlan {
    pub fn opening_count(&self) -> usize {
        self.collections.iter().map(|c| c.openings.len()).sum()
    }
}

/// Places openings where ducts and pipes cross walls of a target document.
#[derive(Debug, Clone)]
pub struct OpeningPlacer {
    config: PlacementConfig,
    filter: ElementClassFilter,
}

impl OpeningPlacer {
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            filter: ElementClassFilter::walls(),
        }
    }

    /// Plans and applies a complete run against `target`.
    pub fn run<H>(&self, host: &mut H, target: DocumentId) -> Result<PlacementReport>
    where
        H: ModelHost + ?Sized,
    {
        let outcome = self
            .plan(host, target)
            .and_then(|plan| self.apply(host, plan));

        match &outcome {
            Ok(report) => tracing::info!(
                target = %target,
                openings = report.total_openings(),
                "Opening placement committed"
            ),
            Err(Error::PartiallyCommitted { committed, source }) => tracing::warn!(
                target = %target,
                error = %source,
                committed_openings = committed.total_openings(),
                committed_collections = committed.collections.len(),
                "Opening placement stopped after a partial commit"
            ),
            Err(err) => tracing::warn!(
                target = %target,
                error = %err,
                precondition = err.is_precondition(),
                "Opening placement cancelled"
            ),
        }
        outcome
    }

    /// Read-only phase: resolves preconditions and computes every opening.
    pub fn plan<H>(&self, host: &H, target: DocumentId) -> Result<PlacementPlan>
    where
        H: DocumentProvider + IntersectionHost + FamilyCatalog + ?Sized,
    {
        let mut sources = Vec::with_capacity(COLLECTIONS.len());
        for kind in COLLECTIONS {
            sources.push((kind, self.find_source_document(host, kind)?));
        }
        let symbol = self.find_symbol(host, target)?;
        let view = find_view(host, target)?;
        let caster = host.ray_caster(target, &view)?;

        tracing::info!(
            target = %target,
            family = %symbol.family_name,
            view = %view.name,
            "Planning openings"
        );

        let collections = sources
            .into_iter()
            .map(|(kind, source)| self.plan_collection(host, caster, target, kind, source))
            .collect::<Result<Vec<_>>>()?;

        Ok(PlacementPlan {
            target,
            symbol,
            view,
            collections,
        })
    }

    /// Write phase: creates and sizes every planned opening.
    ///
    /// The report lists only committed collections. When a batch fails
    /// after an earlier one committed, the committed part is returned in
    /// [`Error::PartiallyCommitted`].
    pub fn apply<H>(&self, host: &mut H, plan: PlacementPlan) -> Result<PlacementReport>
    where
        H: FamilyCatalog + PlacementApi + ?Sized,
    {
        let batches: Vec<&[CollectionPlan]> = match self.config.transaction_scope {
            TransactionScope::Single => vec![plan.collections.as_slice()],
            TransactionScope::PerCollection => plan.collections.chunks(1).collect(),
        };

        let mut symbol_active = plan.symbol.is_active;
        let mut report = PlacementReport {
            target: plan.target,
            family: plan.symbol.family_name.clone(),
            collections: Vec::with_capacity(plan.collections.len()),
            openings: Vec::with_capacity(plan.opening_count()),
        };

        for batch in batches {
            let written =
                self.write_batch(host, &plan, batch, &mut symbol_active, &mut report.openings);
            if let Err(err) = written {
                if report.collections.is_empty() {
                    return Err(err);
                }
                return Err(Error::PartiallyCommitted {
                    committed: Box::new(report),
                    source: Box::new(err),
                });
            }
            report
                .collections
                .extend(batch.iter().map(CollectionPlan::summary));
        }
        Ok(report)
    }

    fn find_source_document<H>(&self, host: &H, kind: SegmentKind) -> Result<DocumentInfo>
    where
        H: DocumentProvider + ?Sized,
    {
        let marker = match kind {
            SegmentKind::Duct => &self.config.duct_document_marker,
            SegmentKind::Pipe => &self.config.pipe_document_marker,
        };
        host.documents()
            .into_iter()
            .find(|doc| doc.title.contains(marker.as_str()))
            .ok_or_else(|| Error::DocumentNotFound {
                kind,
                marker: marker.clone(),
            })
    }

    fn find_symbol<H>(&self, host: &H, target: DocumentId) -> Result<FamilySymbol>
    where
        H: FamilyCatalog + ?Sized,
    {
        host.family_symbols(target)
            .into_iter()
            .find(|s| {
                s.category == ElementCategory::GenericModel
                    && s.family_name == self.config.opening_family
            })
            .ok_or_else(|| Error::FamilyNotFound(self.config.opening_family.clone()))
    }

    fn plan_collection<H>(
        &self,
        host: &H,
        caster: &dyn RayCaster,
        target: DocumentId,
        kind: SegmentKind,
        source: DocumentInfo,
    ) -> Result<CollectionPlan>
    where
        H: DocumentProvider + ?Sized,
    {
        let segments = host.routing_segments(source.id, kind)?;
        let mut plan = CollectionPlan {
            kind,
            source,
            segments: segments.len(),
            skipped_segments: 0,
            raw_hits: 0,
            openings: Vec::new(),
        };

        for segment in &segments {
            let Some(found) = penetrations(segment, caster, &self.filter) else {
                tracing::debug!(
                    segment = %segment.id,
                    kind = %kind,
                    "Skipping segment without a straight centerline"
                );
                plan.skipped_segments += 1;
                continue;
            };
            plan.raw_hits += found.raw_hits;

            for point in found.points {
                plan.openings.push(resolve_opening(host, target, segment, point)?);
            }
        }

        tracing::debug!(
            kind = %kind,
            source = %plan.source.title,
            segments = plan.segments,
            skipped = plan.skipped_segments,
            raw_hits = plan.raw_hits,
            openings = plan.openings.len(),
            "Collection planned"
        );
        Ok(plan)
    }

    /// Writes `collections` inside one transaction, rolling back on failure.
    fn write_batch<H>(
        &self,
        host: &mut H,
        plan: &PlacementPlan,
        collections: &[CollectionPlan],
        symbol_active: &mut bool,
        placed: &mut Vec<PlacedOpening>,
    ) -> Result<()>
    where
        H: FamilyCatalog + PlacementApi + ?Sized,
    {
        host.begin_transaction(plan.target, &self.config.transaction_name)?;

        match self.write_openings(host, plan, collections, symbol_active) {
            Ok(created) => {
                host.commit_transaction(plan.target)?;
                placed.extend(created);
                Ok(())
            }
            Err(err) => {
                if let Err(rollback) = host.rollback_transaction(plan.target) {
                    tracing::warn!(
                        error = %rollback,
                        "Rollback after failed placement also failed"
                    );
                }
                Err(err)
            }
        }
    }

    fn write_openings<H>(
        &self,
        host: &mut H,
        plan: &PlacementPlan,
        collections: &[CollectionPlan],
        symbol_active: &mut bool,
    ) -> Result<Vec<PlacedOpening>>
    where
        H: FamilyCatalog + PlacementApi + ?Sized,
    {
        if !*symbol_active {
            host.activate_symbol(plan.target, plan.symbol.id)?;
            *symbol_active = true;
        }

        let mut created = Vec::new();
        for opening in collections.iter().flat_map(|c| &c.openings) {
            let request = InstanceRequest {
                symbol: plan.symbol.id,
                location: opening.point.insertion_point,
                host: opening.point.barrier,
                level: opening.level.id,
                structural_type: StructuralType::NonStructural,
            };
            let instance = host.create_instance(plan.target, &request)?;
            let size = opening.point.size;
            host.set_parameter(plan.target, instance, &self.config.width_parameter, size)?;
            host.set_parameter(plan.target, instance, &self.config.height_parameter, size)?;

            tracing::debug!(
                instance = %instance,
                segment = %opening.source_segment,
                wall = %opening.point.barrier,
                size,
                "Opening placed"
            );
            created.push(PlacedOpening {
                instance,
                kind: opening.kind,
                source_segment: opening.source_segment,
                location: opening.point.insertion_point,
                barrier: opening.point.barrier,
                level: opening.level.id,
                size,
            });
        }
        Ok(created)
    }
}

impl Default for OpeningPlacer {
    fn default() -> Self {
        Self::new(PlacementConfig::default())
    }
}

/// First non-template 3D view of the target document.
fn find_view<H>(host: &H, target: DocumentId) -> Result<View3D>
where
    H: IntersectionHost + ?Sized,
{
    host.views_3d(target)
        .into_iter()
        .find(|v| !v.is_template)
        .ok_or(Error::View3DNotFound)
}

fn resolve_opening<H>(
    host: &H,
    target: DocumentId,
    segment: &RoutingSegment,
    point: PenetrationPoint,
) -> Result<PlannedOpening>
where
    H: DocumentProvider + ?Sized,
{
    let wall = host
        .wall(target, &point.barrier)
        .ok_or(mep_openings_core::Error::BarrierNotAWall(point.barrier))?;
    let level = host.level(target, wall.level_id).ok_or(
        mep_openings_core::Error::LevelNotFound {
            wall: point.barrier,
            level: wall.level_id,
        },
    )?;

    Ok(PlannedOpening {
        kind: segment.kind,
        source_segment: segment.id,
        point,
        wall,
        level,
    })
}
