// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Trigger and pattern configuration.

mod config_error;
mod config_file;
mod pattern_config;
mod registry;
mod style;
mod template;
mod trigger_config;

pub use config_error::ConfigError;
pub use config_file::{PatternSettings, RegistrySettings, TriggerSettings};
pub use pattern_config::PatternConfig;
pub use registry::{ConfigEntry, ConfigRegistry, MentionConfig, RegistryBuilder};
pub use style::{StyleRule, TextStyle};
pub use template::{
    EncodingTemplate, Placeholder, Template, DEFAULT_DISPLAY_TEMPLATE,
    DEFAULT_ENCODING_TEMPLATE,
};
pub use trigger_config::TriggerConfig;
