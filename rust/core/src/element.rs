// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host elements the opening workflow reads or writes.

use crate::ids::{BarrierRef, ElementId};

/// Built-in element category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementCategory {
    Walls,
    Floors,
    Ducts,
    Pipes,
    GenericModel,
    Other,
}

impl ElementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementCategory::Walls => "Walls",
            ElementCategory::Floors => "Floors",
            ElementCategory::Ducts => "Ducts",
            ElementCategory::Pipes => "Pipes",
            ElementCategory::GenericModel => "GenericModel",
            ElementCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural classification of a created instance.
///
/// Openings are always created as [`StructuralType::NonStructural`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructuralType {
    #[default]
    NonStructural,
    Beam,
    Column,
    Footing,
}

/// A wall that can host a penetration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wall {
    pub barrier: BarrierRef,
    pub name: String,
    /// Level the wall is based on.
    pub level_id: ElementId,
    pub thickness: f64,
}

/// A named horizontal datum.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub id: ElementId,
    pub name: String,
    pub elevation: f64,
}

/// A placeable family type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FamilySymbol {
    pub id: ElementId,
    pub family_name: String,
    pub type_name: String,
    pub category: ElementCategory,
    /// Inactive symbols must be activated before instances can be created.
    pub is_active: bool,
}

/// A 3D view; intersection queries run against its visible geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct View3D {
    pub id: ElementId,
    pub name: String,
    pub is_template: bool,
}
