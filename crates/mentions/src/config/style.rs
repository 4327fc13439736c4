// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::MentionData;

/// Style for a highlighted part. Opaque to this crate: it is carried
/// through to the renderer untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

impl TextStyle {
    /// Used for mentions whose trigger has no style of its own.
    pub fn trigger_default() -> Self {
        Self {
            color: Some("blue".to_owned()),
            background_color: None,
            font_weight: Some("bold".to_owned()),
        }
    }

    fn with_color(mut self, color: Option<&str>) -> Self {
        if let Some(color) = color {
            self.color = Some(color.to_owned());
        }
        self
    }
}

type StyleFn = dyn Fn(&MentionData) -> TextStyle + Send + Sync;

/// How a config styles the parts it produces.
#[derive(Clone)]
pub enum StyleRule {
    Static(TextStyle),
    Computed(Arc<StyleFn>),
}

impl StyleRule {
    pub fn computed(
        f: impl Fn(&MentionData) -> TextStyle + Send + Sync + 'static,
    ) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Resolve the style for one part.
    ///
    /// A static style takes the mention's `color` attribute when it has one.
    /// A computed style needs mention data, so pattern parts get the default
    /// style from it.
    pub fn resolve(&self, data: Option<&MentionData>) -> TextStyle {
        match (self, data) {
            (Self::Static(style), data) => {
                style.clone().with_color(data.and_then(MentionData::color))
            }
            (Self::Computed(f), Some(data)) => f(data),
            (Self::Computed(_), None) => TextStyle::default(),
        }
    }
}

impl fmt::Debug for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(style) => f.debug_tuple("Static").field(style).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<TextStyle> for StyleRule {
    fn from(style: TextStyle) -> Self {
        Self::Static(style)
    }
}
