// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MEP-Openings Geometry
//!
//! Finds where straight duct and pipe runs cross walls:
//!
//! 1. [`RayCaster`] casts a ray from the segment start along its direction
//!    and reports every barrier face it crosses.
//! 2. [`filter_and_dedupe`] drops hits off the segment and keeps one hit per
//!    `(linked_context, barrier_id)`.
//! 3. [`place`] turns each surviving hit into a [`PenetrationPoint`] sized to
//!    the segment diameter.
//!
//! [`BarrierScene`] is a self-contained caster over triangulated faces.

pub mod caster;
pub mod dedupe;
pub mod placement;
pub mod ray;
pub mod scene;

pub use caster::{ElementClassFilter, Hits, RayCaster};
pub use dedupe::{filter_and_dedupe, is_within_range, HitList};
pub use placement::{penetrations, place, PenetrationPoint, SegmentPenetrations};
pub use ray::{Ray, RayHit};
pub use scene::BarrierScene;
