// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Penetration points: where an opening goes and how large it is.

use mep_openings_core::{BarrierRef, RoutingSegment, SegmentLine};
use nalgebra::Point3;
use smallvec::SmallVec;

use crate::caster::{ElementClassFilter, RayCaster};
use crate::dedupe::filter_and_dedupe;
use crate::ray::{Ray, RayHit};

/// Location and size of one opening.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenetrationPoint {
    pub insertion_point: Point3<f64>,
    pub barrier: BarrierRef,
    /// Width and height of the opening.
    pub size: f64,
}

/// Computes the opening for a hit on a segment's centerline.
pub fn place(line: &SegmentLine, diameter: f64, hit: &RayHit) -> PenetrationPoint {
    PenetrationPoint {
        insertion_point: line.start + line.direction.into_inner() * hit.proximity,
        barrier: hit.barrier,
        size: diameter,
    }
}

/// Result of running one segment through cast, dedupe and place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPenetrations {
    /// Hits reported by the caster before filtering.
    pub raw_hits: usize,
    pub points: SmallVec<[PenetrationPoint; 4]>,
}

/// Finds the openings a segment needs.
///
/// Returns `None` when the segment's centerline is not a usable straight
/// line; such segments are skipped, not errors.
pub fn penetrations<C>(
    segment: &RoutingSegment,
    caster: &C,
    filter: &ElementClassFilter,
) -> Option<SegmentPenetrations>
where
    C: RayCaster + ?Sized,
{
    let line = segment.centerline()?;
    let ray = Ray::from_line(&line);

    let mut raw_hits = 0usize;
    let hits = caster.cast(&ray, filter).inspect(|_| raw_hits += 1);
    let survivors = filter_and_dedupe(hits, line.length);

    let points = survivors
        .iter()
        .map(|hit| place(&line, segment.diameter, hit))
        .collect();

    Some(SegmentPenetrations { raw_hits, points })
}
