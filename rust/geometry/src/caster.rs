// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray caster contract and the class filter that restricts it.

use mep_openings_core::ElementCategory;
use smallvec::SmallVec;

use crate::ray::{Ray, RayHit};

/// Lazy sequence of hits produced by a [`RayCaster`].
pub type Hits<'a> = Box<dyn Iterator<Item = RayHit> + 'a>;

/// Intersection query against barrier geometry.
///
/// Implementations report every crossing in front of the ray origin
/// (`proximity >= 0`) in whatever order the underlying engine finds them.
/// Callers must not assume the sequence is sorted by proximity, and a single
/// barrier may be reported more than once (one hit per crossed sub-surface).
pub trait RayCaster {
    fn cast<'a>(&'a self, ray: &Ray, filter: &'a ElementClassFilter) -> Hits<'a>;
}

/// Restricts intersection tests to geometry of the listed categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementClassFilter {
    categories: SmallVec<[ElementCategory; 2]>,
}

impl ElementClassFilter {
    pub fn new(categories: impl IntoIterator<Item = ElementCategory>) -> Self {
        let mut categories: SmallVec<[ElementCategory; 2]> = categories.into_iter().collect();
        categories.sort();
        categories.dedup();
        Self { categories }
    }

    /// Filter that only admits walls.
    pub fn walls() -> Self {
        Self::new([ElementCategory::Walls])
    }

    pub fn accepts(&self, category: ElementCategory) -> bool {
        self.categories.contains(&category)
    }

    pub fn categories(&self) -> &[ElementCategory] {
        &self.categories
    }
}

impl Default for ElementClassFilter {
    fn default() -> Self {
        Self::walls()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_filter_rejects_other_categories() {
        let filter = ElementClassFilter::walls();
        assert!(filter.accepts(ElementCategory::Walls));
        assert!(!filter.accepts(ElementCategory::Floors));
        assert!(!filter.accepts(ElementCategory::Ducts));
    }

    #[test]
    fn duplicate_categories_collapse() {
        let filter = ElementClassFilter::new([
            ElementCategory::Floors,
            ElementCategory::Walls,
            ElementCategory::Floors,
        ]);
        assert_eq!(
            filter.categories(),
            &[ElementCategory::Walls, ElementCategory::Floors]
        );
    }
}
