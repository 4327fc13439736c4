// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Encoded value -> [`MentionState`].

use std::ops::Range;

use regex::Regex;

use crate::config::{ConfigEntry, ConfigRegistry, MentionConfig};
use crate::mention_state::PartsBuilder;
use crate::{MentionState, PartKind};

/// Parse `encoded` into parts.
///
/// Scans left to right. At each step the config whose next match starts
/// earliest wins; on a tie the config registered first wins. Text before the
/// winning match becomes a plain part. Anything that no config matches,
/// including malformed or truncated tokens, is plain text, so this never
/// fails.
pub fn parse_value(encoded: &str, registry: &ConfigRegistry) -> MentionState {
    let entries = registry.entries();
    let mut builder = PartsBuilder::default();
    // Next match of each config at or after `pos`. `None` means not yet
    // searched, `Some(None)` means there are no more matches.
    let mut next: Vec<Option<Option<Range<usize>>>> = vec![None; entries.len()];
    let mut pos = 0;

    while pos < encoded.len() {
        let mut best: Option<(usize, Range<usize>)> = None;
        for (index, entry) in entries.iter().enumerate() {
            let stale = match &next[index] {
                None => true,
                Some(Some(range)) => range.start < pos,
                Some(None) => false,
            };
            if stale {
                next[index] =
                    Some(next_match(entry.config.regex(), encoded, pos));
            }
            if let Some(Some(range)) = &next[index] {
                let earlier = best
                    .as_ref()
                    .map_or(true, |(_, best)| range.start < best.start);
                if earlier {
                    best = Some((index, range.clone()));
                }
            }
        }

        let Some((index, range)) = best else {
            builder.push_plain(&encoded[pos..]);
            break;
        };
        builder.push_plain(&encoded[pos..range.start]);
        push_match(&mut builder, &entries[index], encoded, range.clone());
        pos = range.end;
    }

    let state = builder.finish(encoded.to_owned());
    log::trace!(
        target: "mentions::parser",
        "Parsed {} parts ({} mentions) from {} bytes",
        state.parts().len(),
        state.mentions().count(),
        encoded.len()
    );
    state
}

/// The first non-empty match of `regex` starting at or after `from`.
fn next_match(regex: &Regex, haystack: &str, from: usize) -> Option<Range<usize>> {
    let mut at = from;
    while at <= haystack.len() {
        let found = regex.find_at(haystack, at)?;
        if !found.is_empty() {
            return Some(found.range());
        }
        // Empty matches would never advance the scan
        at = found.start()
            + haystack[found.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }
    None
}

fn push_match(
    builder: &mut PartsBuilder,
    entry: &ConfigEntry,
    encoded: &str,
    range: Range<usize>,
) {
    let matched = &encoded[range.clone()];
    match &entry.config {
        MentionConfig::Trigger(config) => {
            let data = config
                .matching_pattern()
                .captures_at(encoded, range.start)
                .filter(|caps| caps.get(0).map(|m| m.range()) == Some(range.clone()))
                .and_then(|caps| config.decode(&caps));
            match data {
                Some(data) => builder.push(
                    config.display_text(&data),
                    matched.to_owned(),
                    PartKind::Mention {
                        trigger_name: entry.name.clone(),
                        data,
                    },
                ),
                None => {
                    log::debug!(
                        target: "mentions::parser",
                        "Trigger {:?} matched {:?} without name and id groups",
                        entry.name,
                        matched
                    );
                    builder.push_plain(matched);
                }
            }
        }
        MentionConfig::Pattern(_) => builder.push(
            matched.to_owned(),
            matched.to_owned(),
            PartKind::Pattern {
                pattern_name: entry.name.clone(),
            },
        ),
    }
}
