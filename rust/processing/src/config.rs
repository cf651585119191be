// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement configuration with built-in defaults and environment overrides.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How placements are grouped into transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionScope {
    /// One transaction for ducts and pipes together.
    #[default]
    Single,
    /// Ducts and pipes are committed separately.
    PerCollection,
}

impl FromStr for TransactionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(TransactionScope::Single),
            "per-collection" | "per_collection" => Ok(TransactionScope::PerCollection),
            other => Err(format!("unknown transaction scope: {other}")),
        }
    }
}

/// Names the run uses to find documents, the opening family and its
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Substring identifying the ventilation (duct) document title.
    pub duct_document_marker: String,
    /// Substring identifying the plumbing (pipe) document title.
    pub pipe_document_marker: String,
    /// Family name of the opening type, looked up among generic models.
    pub opening_family: String,
    pub width_parameter: String,
    pub height_parameter: String,
    pub transaction_name: String,
    pub transaction_scope: TransactionScope,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            duct_document_marker: "ОВ".into(),
            pipe_document_marker: "ВК".into(),
            opening_family: "Отверстия".into(),
            width_parameter: "Ширина".into(),
            height_parameter: "Высота".into(),
            transaction_name: "Расстановка отверстий".into(),
            transaction_scope: TransactionScope::Single,
        }
    }
}

impl PlacementConfig {
    /// Load configuration from `MEP_OPENINGS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup, falling back to defaults for
    /// missing, empty or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        Self {
            duct_document_marker: text(
                "MEP_OPENINGS_DUCT_DOCUMENT",
                defaults.duct_document_marker,
            ),
            pipe_document_marker: text(
                "MEP_OPENINGS_PIPE_DOCUMENT",
                defaults.pipe_document_marker,
            ),
            opening_family: text("MEP_OPENINGS_FAMILY", defaults.opening_family),
            width_parameter: text("MEP_OPENINGS_WIDTH_PARAMETER", defaults.width_parameter),
            height_parameter: text("MEP_OPENINGS_HEIGHT_PARAMETER", defaults.height_parameter),
            transaction_name: text("MEP_OPENINGS_TRANSACTION_NAME", defaults.transaction_name),
            transaction_scope: lookup("MEP_OPENINGS_TRANSACTION_SCOPE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.transaction_scope),
        }
    }
}
