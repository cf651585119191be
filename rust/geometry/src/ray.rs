// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rays and ray/barrier hits.

use mep_openings_core::{BarrierKey, BarrierRef, SegmentLine};
use nalgebra::{Point3, Unit, Vector3};

/// A half-line from `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Unit<Vector3<f64>>) -> Self {
        Self { origin, direction }
    }

    /// Ray starting at the segment's start point, pointing toward its end.
    pub fn from_line(line: &SegmentLine) -> Self {
        Self {
            origin: line.start,
            direction: line.direction,
        }
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction.into_inner() * t
    }
}

/// A single ray/barrier-surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayHit {
    pub barrier: BarrierRef,
    /// Signed distance from the ray origin along the ray direction.
    pub proximity: f64,
}

impl RayHit {
    pub fn new(barrier: BarrierRef, proximity: f64) -> Self {
        Self { barrier, proximity }
    }

    pub fn key(&self) -> BarrierKey {
        self.barrier.key()
    }
}
