// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use indoc::indoc;
use mentions::{
    parse_value, reconcile, resolve_keywords, utf16_len, ConfigError,
    ConfigRegistry, MentionsSession, PartKind, PatternConfig, Position,
    Suggestion, TriggerConfig,
};
use speculoos::prelude::*;

const CONFIG: &str = indoc! {r##"
    {
        "triggers": [
            { "name": "mention", "trigger": "@", "textStyle": { "color": "#0000ff" } },
            { "name": "channel", "trigger": "#", "insertSpaceAfterMention": true }
        ],
        "patterns": [
            { "name": "url", "pattern": "https?://\\S+", "textStyle": { "color": "green" } }
        ]
    }
"##};

fn registry() -> ConfigRegistry {
    ConfigRegistry::builder()
        .trigger("mention", TriggerConfig::new("@").unwrap())
        .trigger("channel", TriggerConfig::new("#").unwrap())
        .pattern("hashtag", PatternConfig::new(r"#\w+").unwrap())
        .build()
        .unwrap()
}

fn json_registry() -> ConfigRegistry {
    ConfigRegistry::from_json(CONFIG).unwrap()
}

#[test]
fn any_value_survives_a_parse() {
    let registry = registry();
    for value in [
        "",
        "plain",
        "@[Alice](id:1)",
        "hi @[Alice](id:1 color:#ff0000), #[general](id:c1) #rust",
        "@[broken](id:",
        "@[](id:1)",
        "[x](id:1)@@##",
        "😀@[Ann](id:1)😀",
        "@[Alice](id:1)@[Bob](id:2)",
    ] {
        let state = parse_value(value, &registry);
        assert_eq!(state.encoded_value(), value);
        let encoded: String =
            state.parts().iter().map(|p| p.encoded_text.as_str()).collect();
        assert_eq!(encoded, value);
        let mut plain_end = 0;
        for part in state.parts() {
            assert_eq!(part.plain_range.start, plain_end);
            plain_end = part.plain_range.end;
        }
        assert_eq!(plain_end, utf16_len(state.plain_text()));
    }
}

#[test]
fn reconciled_values_parse_back_to_the_edited_text() {
    let registry = registry();
    let state =
        parse_value("hi @[Alice](id:1) and @[Bob](id:2)", &registry);
    assert_eq!(state.plain_text(), "hi @Alice and @Bob");

    for edited in [
        "hi @Alice and @Bob!",
        "hi @Alce and @Bob",
        "hi and @Bob",
        "Xhi @Alice and @Bob",
        "X",
        "",
    ] {
        let value = reconcile(&state, edited);
        let reparsed = parse_value(&value, &registry);
        assert_eq!(reparsed.plain_text(), edited);
        assert_eq!(reconcile(&reparsed, edited), value);
    }
}

#[test]
fn editing_inside_a_mention_removes_its_markup() {
    let registry = registry();
    let state = parse_value("@[Alice](id:1)", &registry);
    let value = reconcile(&state, "@Alce");
    assert_that!(value).is_equal_to("@Alce".to_owned());
    assert_that!(value.contains("id:1")).is_false();
}

#[test]
fn inserting_between_mentions_keeps_both() {
    let registry = registry();
    let state = parse_value("@[Alice](id:1)@[Bob](id:2)", &registry);
    assert_eq!(
        reconcile(&state, "@Alice @Bob"),
        "@[Alice](id:1) @[Bob](id:2)"
    );
}

#[test]
fn keyword_activates_and_deactivates() {
    let registry = registry();

    let state = parse_value("Hello @ali", &registry);
    let triggers = resolve_keywords(&state, Position::caret(10), &registry);
    let mention = triggers.get("mention").unwrap();
    assert_eq!(mention.keyword.as_deref(), Some("ali"));
    assert_eq!(mention.trigger_start, Some(6));
    assert!(!triggers.get("channel").unwrap().is_active());

    let state = parse_value("Hello @ali ", &registry);
    let triggers = resolve_keywords(&state, Position::caret(11), &registry);
    assert!(triggers.active().is_none());
}

#[test]
fn committing_a_suggestion_through_a_session() {
    let mut session = MentionsSession::new(registry(), "");
    session.handle_text_change("Hello @ali");
    session.handle_selection_change(Position::caret(10));

    let update = session
        .select_suggestion(
            "mention",
            &Suggestion::new("1", "Alice").with_attribute("color", "#ff0000"),
        )
        .unwrap();
    assert_eq!(update.value, "Hello @[Alice](id:1 color:#ff0000)");
    assert_eq!(update.selection, Position::caret(12));

    let mention = session.state().mentions().next().unwrap().clone();
    assert_eq!(mention.name, "Alice");
    assert_eq!(mention.color(), Some("#ff0000"));

    // Typing after the mention leaves it alone.
    let value = session.handle_text_change("Hello @Alice!");
    assert_eq!(value, "Hello @[Alice](id:1 color:#ff0000)!");
}

#[test]
fn json_config_drives_parsing_and_styles() {
    let registry = json_registry();
    let state = parse_value("see #[general](id:c1) at https://x.org", &registry);
    let parts = state.parts();
    assert_that!(parts.len()).is_equal_to(4);

    assert_eq!(parts[1].text, "#general");
    assert!(matches!(
        &parts[1].kind,
        PartKind::Mention { trigger_name, .. } if trigger_name == "channel"
    ));
    assert!(matches!(
        &parts[3].kind,
        PartKind::Pattern { pattern_name } if pattern_name == "url"
    ));

    assert_eq!(registry.style_for(&parts[0]), None);
    let channel_style = registry.style_for(&parts[1]).unwrap();
    assert_eq!(channel_style.font_weight.as_deref(), Some("bold"));
    let url_style = registry.style_for(&parts[3]).unwrap();
    assert_eq!(url_style.color.as_deref(), Some("green"));

    let state = parse_value("@[Alice](id:1)", &registry);
    let style = registry.style_for(&state.parts()[0]).unwrap();
    assert_eq!(style.color.as_deref(), Some("#0000ff"));
}

#[test]
fn json_config_can_insert_a_space_after_mentions() {
    let mut session = MentionsSession::new(json_registry(), "");
    session.handle_text_change("#ge");
    session.handle_selection_change(Position::caret(3));
    let update = session
        .select_suggestion("channel", &Suggestion::new("c1", "general"))
        .unwrap();
    assert_eq!(update.value, "#[general](id:c1) ");
    assert_eq!(update.selection, Position::caret(9));
}

#[test]
fn invalid_configs_are_rejected() {
    let err = ConfigRegistry::from_json(
        r#"{ "triggers": [{ "name": "a", "trigger": "ab" }] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTrigger { .. }));

    let err = ConfigRegistry::from_json(indoc! {r#"
        {
            "triggers": [{ "name": "a", "trigger": "@" }],
            "patterns": [{ "name": "a", "pattern": "x" }]
        }
    "#})
    .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateName { .. }));

    let err = ConfigRegistry::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));

    let err = ConfigRegistry::from_json(
        r#"{ "patterns": [{ "name": "p", "pattern": "(" }] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Regex(_)));
}

#[test]
fn offsets_count_utf16_code_units() {
    let registry = registry();
    let state = parse_value("😀@[Ann](id:1)", &registry);
    assert_eq!(state.plain_text(), "😀@Ann");
    assert_eq!(state.parts()[1].plain_range, 2..6);

    let state = parse_value("😀 @an", &registry);
    let triggers = resolve_keywords(&state, Position::caret(6), &registry);
    assert_eq!(triggers.get("mention").unwrap().trigger_start, Some(3));
}
