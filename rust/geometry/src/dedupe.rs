// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Range filtering and barrier-identity deduplication of ray hits.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::ray::RayHit;

/// Surviving hits of one segment; most segments cross only a few walls.
pub type HitList = SmallVec<[RayHit; 4]>;

/// Whether `proximity` lies on the segment, i.e. in `[0, max_proximity]`.
///
/// NaN and infinite proximities never qualify.
pub fn is_within_range(proximity: f64, max_proximity: f64) -> bool {
    proximity.is_finite() && (0.0..=max_proximity).contains(&proximity)
}

/// Keeps one hit per barrier among the hits that fall on the segment.
///
/// Hits outside `[0, max_proximity]` are dropped first. Two hits are the same
/// barrier when their `(linked_context, barrier_id)` keys are equal; of those
/// the first one encountered is kept. Survivors keep their input order, so
/// applying this to its own output returns it unchanged.
pub fn filter_and_dedupe<I>(hits: I, max_proximity: f64) -> HitList
where
    I: IntoIterator<Item = RayHit>,
{
    let mut seen = FxHashSet::default();
    hits.into_iter()
        .filter(|hit| is_within_range(hit.proximity, max_proximity))
        .filter(|hit| seen.insert(hit.key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mep_openings_core::{BarrierRef, ElementId, LinkedContextId};

    fn local(id: i64, proximity: f64) -> RayHit {
        RayHit::new(BarrierRef::local(ElementId(id)), proximity)
    }

    fn linked(id: i64, context: i64, proximity: f64) -> RayHit {
        RayHit::new(
            BarrierRef::linked(ElementId(id), LinkedContextId(context)),
            proximity,
        )
    }

    #[test]
    fn same_barrier_collapses_to_one() {
        let out = filter_and_dedupe([local(1, 4.0), local(1, 4.01)], 10.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].barrier, BarrierRef::local(ElementId(1)));
    }

    #[test]
    fn first_encountered_survives() {
        let out = filter_and_dedupe([local(1, 4.01), local(2, 6.0), local(1, 4.0)], 10.0);
        assert_eq!(out.as_slice(), &[local(1, 4.01), local(2, 6.0)]);
    }

    #[test]
    fn different_linked_contexts_stay_distinct() {
        let out = filter_and_dedupe([linked(1, 100, 5.0), linked(1, 200, 5.0)], 10.0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn linked_and_local_with_same_id_stay_distinct() {
        let out = filter_and_dedupe([local(1, 5.0), linked(1, 100, 5.0)], 10.0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn hits_beyond_length_are_dropped() {
        assert!(filter_and_dedupe([local(1, 12.0)], 10.0).is_empty());
    }

    #[test]
    fn negative_and_non_finite_hits_are_dropped() {
        let out = filter_and_dedupe(
            [
                local(1, -0.5),
                local(2, f64::NAN),
                local(3, f64::INFINITY),
                local(4, 0.0),
            ],
            10.0,
        );
        assert_eq!(out.as_slice(), &[local(4, 0.0)]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(is_within_range(0.0, 10.0));
        assert!(is_within_range(10.0, 10.0));
        assert!(!is_within_range(10.000001, 10.0));
    }

    #[test]
    fn out_of_range_duplicate_does_not_shadow_valid_hit() {
        // The first W1 hit is off the segment, so the later in-range one wins.
        let out = filter_and_dedupe([local(1, 11.0), local(1, 3.0)], 10.0);
        assert_eq!(out.as_slice(), &[local(1, 3.0)]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let hits = [
            local(1, 4.0),
            linked(1, 7, 4.0),
            local(1, 4.1),
            local(2, 12.0),
            local(3, 9.9),
            local(3, -1.0),
        ];
        let once = filter_and_dedupe(hits, 10.0);
        let twice = filter_and_dedupe(once.iter().copied(), 10.0);
        assert_eq!(once, twice);
    }
}
