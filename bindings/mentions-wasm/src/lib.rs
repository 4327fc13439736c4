// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! JavaScript bindings for [`mentions::MentionsSession`].

use mentions::{ConfigRegistry, MentionsSession, Position, Suggestion};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct MentionsComposer {
    inner: MentionsSession,
}

#[wasm_bindgen]
impl MentionsComposer {
    /// Build a composer from a JSON registry config such as
    /// `{"triggers":[{"name":"mention","trigger":"@"}]}`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: &str,
        value: &str,
    ) -> Result<MentionsComposer, JsError> {
        let registry = ConfigRegistry::from_json(config_json)?;
        Ok(Self {
            inner: MentionsSession::new(registry, value),
        })
    }

    pub fn value(&self) -> String {
        self.inner.value().to_owned()
    }

    pub fn plain_text(&self) -> String {
        self.inner.state().plain_text().to_owned()
    }

    pub fn set_value(&mut self, value: &str) {
        self.inner.set_value(value);
    }

    /// The parts of the current value, each with its resolved `style`, as
    /// a JSON array.
    pub fn parts_json(&self) -> String {
        let registry = self.inner.registry();
        let parts: Vec<serde_json::Value> = self
            .inner
            .state()
            .parts()
            .iter()
            .map(|part| {
                serde_json::json!({
                    "part": part,
                    "style": registry.style_for(part),
                })
            })
            .collect();
        serde_json::Value::Array(parts).to_string()
    }

    /// Apply the input's new plain text and return the new encoded value.
    pub fn on_text_change(&mut self, text: &str) -> String {
        self.inner.handle_text_change(text)
    }

    pub fn on_selection_change(&mut self, start: u32, end: u32) {
        self.inner
            .handle_selection_change(Position::new(start as usize, end as usize));
    }

    pub fn selection_start(&self) -> u32 {
        self.inner.selection().start as u32
    }

    pub fn selection_end(&self) -> u32 {
        self.inner.selection().end as u32
    }

    /// The keyword typed after `trigger_name`, if that trigger is active.
    pub fn keyword(&self, trigger_name: &str) -> Option<String> {
        self.inner
            .triggers()
            .get(trigger_name)
            .and_then(|state| state.keyword.clone())
    }

    pub fn trigger_start(&self, trigger_name: &str) -> Option<u32> {
        self.inner
            .triggers()
            .get(trigger_name)
            .and_then(|state| state.trigger_start)
            .map(|start| start as u32)
    }

    /// Replace the active keyword with a mention and return the new value.
    /// `attributes_json` is an optional JSON object of extra attributes.
    pub fn select_suggestion(
        &mut self,
        trigger_name: &str,
        id: &str,
        name: &str,
        attributes_json: Option<String>,
    ) -> Result<Option<String>, JsError> {
        let mut suggestion = Suggestion::new(id, name);
        if let Some(json) = attributes_json {
            suggestion.attributes = serde_json::from_str(&json)?;
        }
        Ok(self
            .inner
            .select_suggestion(trigger_name, &suggestion)
            .map(|update| update.value))
    }
}

#[cfg(test)]
mod tests {
    use super::MentionsComposer;

    const CONFIG: &str = r#"{"triggers":[{"name":"mention","trigger":"@"}]}"#;

    fn composer(value: &str) -> MentionsComposer {
        match MentionsComposer::new(CONFIG, value) {
            Ok(composer) => composer,
            Err(_) => panic!("config should be valid"),
        }
    }

    #[test]
    fn exposes_value_and_plain_text() {
        let composer = composer("hi @[Alice](id:1)");
        assert_eq!(composer.value(), "hi @[Alice](id:1)");
        assert_eq!(composer.plain_text(), "hi @Alice");
    }

    #[test]
    fn keyword_and_suggestion() {
        let mut composer = composer("");
        composer.on_text_change("hi @al");
        composer.on_selection_change(6, 6);
        assert_eq!(composer.keyword("mention").as_deref(), Some("al"));
        assert_eq!(composer.trigger_start("mention"), Some(3));

        let value = match composer.select_suggestion("mention", "1", "Alice", None)
        {
            Ok(value) => value,
            Err(_) => panic!("no attributes to parse"),
        };
        assert_eq!(value.as_deref(), Some("hi @[Alice](id:1)"));
        assert_eq!(composer.selection_start(), 9);
        assert_eq!(composer.keyword("mention"), None);
    }

    #[test]
    fn parts_json_includes_styles() {
        let composer = composer("@[Alice](id:1)");
        let parts: serde_json::Value =
            serde_json::from_str(&composer.parts_json()).unwrap();
        assert_eq!(parts[0]["part"]["text"], "@Alice");
        assert_eq!(parts[0]["part"]["kind"]["type"], "mention");
        assert!(parts[0]["style"].is_object());
    }
}
