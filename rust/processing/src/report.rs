// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Summary of a committed placement run.

use mep_openings_core::{BarrierRef, DocumentId, ElementId, Point3, SegmentKind};
use serde::Serialize;

/// Counts for one source collection (all ducts, or all pipes).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub kind: SegmentKind,
    pub source_document: DocumentId,
    pub source_title: String,
    pub segments: usize,
    /// Segments without a straight centerline.
    pub skipped_segments: usize,
    /// Hits reported by the caster before range filtering and dedupe.
    pub raw_hits: usize,
    pub openings: usize,
}

/// An opening instance that was created and sized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOpening {
    pub instance: ElementId,
    pub kind: SegmentKind,
    pub source_segment: ElementId,
    pub location: Point3<f64>,
    pub barrier: BarrierRef,
    pub level: ElementId,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementReport {
    pub target: DocumentId,
    pub family: String,
    pub collections: Vec<CollectionSummary>,
    pub openings: Vec<PlacedOpening>,
}

impl PlacementReport {
    pub fn total_openings(&self) -> usize {
        self.openings.len()
    }

    pub fn collection(&self, kind: SegmentKind) -> Option<&CollectionSummary> {
        self.collections.iter().find(|c| c.kind == kind)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
