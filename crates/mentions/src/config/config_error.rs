// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

use super::Placeholder;

/// Errors raised while building a [`ConfigRegistry`](super::ConfigRegistry).
///
/// Configuration is the only place this crate reports errors: parsing,
/// reconciliation and suggestion resolution are total.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid trigger {trigger:?}: expected a single non-whitespace character")]
    InvalidTrigger { trigger: String },

    #[error("Template {template:?} is missing the {{{placeholder}}} placeholder")]
    MissingPlaceholder {
        template: String,
        placeholder: Placeholder,
    },

    #[error("Template {template:?} uses {{{placeholder}}} more than once")]
    DuplicatePlaceholder {
        template: String,
        placeholder: Placeholder,
    },

    #[error("Template {template:?} has an unknown placeholder {{{name}}}")]
    UnknownPlaceholder { template: String, name: String },

    #[error(
        "Template {template:?}: {{{placeholder}}} must be followed by literal text"
    )]
    UnterminatedPlaceholder {
        template: String,
        placeholder: Placeholder,
    },

    #[error("Matching pattern {pattern:?} has no capture group named {group:?}")]
    MissingCaptureGroup { pattern: String, group: String },

    #[error("Invalid regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("The name {name:?} is registered more than once")]
    DuplicateName { name: String },

    #[error("Invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
}
