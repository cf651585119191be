// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier types for model elements.
//!
//! Element ids are plain integers assigned by the host document. They are
//! compared by value, never by handle identity, so two lookups of the same
//! element always produce equal keys.

use std::fmt;

/// Identifier of an element inside a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(pub i64);

impl ElementId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for ElementId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Identifier of an open document in the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DocumentId(pub u32);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc:{}", self.0)
    }
}

/// Identifier of a linked sub-model instance placed in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LinkedContextId(pub i64);

impl fmt::Display for LinkedContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link:{}", self.0)
    }
}

/// Reference to a barrier element as reported by an intersection query.
///
/// `barrier_id` is the element id inside the model that owns the barrier.
/// `linked_context` is set when that model is a linked sub-model, so equal
/// `barrier_id`s from different links never name the same wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierRef {
    pub barrier_id: ElementId,
    pub linked_context: Option<LinkedContextId>,
}

impl BarrierRef {
    /// Reference to a barrier owned by the host document itself.
    pub fn local(barrier_id: ElementId) -> Self {
        Self {
            barrier_id,
            linked_context: None,
        }
    }

    /// Reference to a barrier inside a linked sub-model.
    pub fn linked(barrier_id: ElementId, context: LinkedContextId) -> Self {
        Self {
            barrier_id,
            linked_context: Some(context),
        }
    }

    pub fn is_linked(&self) -> bool {
        self.linked_context.is_some()
    }

    /// Identity key used to collapse hits on the same physical barrier.
    pub fn key(&self) -> BarrierKey {
        BarrierKey {
            linked_context: self.linked_context,
            barrier_id: self.barrier_id,
        }
    }
}

impl fmt::Display for BarrierRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.linked_context {
            Some(context) => write!(f, "{} in {}", self.barrier_id, context),
            None => write!(f, "{}", self.barrier_id),
        }
    }
}

/// Composite `(linked_context, barrier_id)` key with structural equality and
/// a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierKey {
    pub linked_context: Option<LinkedContextId>,
    pub barrier_id: ElementId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_and_linked_keys_differ() {
        let local = BarrierRef::local(ElementId(7));
        let linked = BarrierRef::linked(ElementId(7), LinkedContextId(1));
        assert_ne!(local.key(), linked.key());
        assert!(!local.is_linked());
        assert!(linked.is_linked());
    }

    #[test]
    fn keys_from_different_contexts_differ() {
        let a = BarrierRef::linked(ElementId(10), LinkedContextId(1));
        let b = BarrierRef::linked(ElementId(10), LinkedContextId(2));
        assert_ne!(a.key(), b.key());
        assert_eq!(
            a.key(),
            BarrierRef::linked(ElementId(10), LinkedContextId(1)).key()
        );
    }

    #[test]
    fn key_order_is_total() {
        let mut keys = vec![
            BarrierRef::linked(ElementId(1), LinkedContextId(3)).key(),
            BarrierRef::local(ElementId(5)).key(),
            BarrierRef::local(ElementId(2)).key(),
        ];
        keys.sort();
        // Local keys (no context) order before linked ones.
        assert_eq!(keys[0], BarrierRef::local(ElementId(2)).key());
        assert_eq!(keys[1], BarrierRef::local(ElementId(5)).key());
        assert!(keys[2].linked_context.is_some());
    }

    #[test]
    fn display() {
        assert_eq!(ElementId(42).to_string(), "#42");
        assert_eq!(
            BarrierRef::linked(ElementId(9), LinkedContextId(1)).to_string(),
            "#9 in link:1"
        );
    }
}
