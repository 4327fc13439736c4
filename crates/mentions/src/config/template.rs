// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Templates describing how a mention is written.
//!
//! A template is literal text with `{trigger}`, `{name}`, `{id}` and `{data}`
//! placeholders. The default encoding template is
//! `{trigger}[{name}](id:{id}{data})`, which produces tokens such as
//! `@[Alice](id:1 color:#ff0000)`. `{data}` expands to zero or more
//! ` key:value` pairs.
//!
//! An [`EncodingTemplate`] also derives the regex that recognizes its own
//! output. Each placeholder captures characters up to the literal that
//! follows it, so values are sanitized on the way in to keep every encoded
//! token parseable.

use std::collections::BTreeMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use strum_macros::{AsRefStr, Display, EnumString};

use super::ConfigError;
use crate::MentionData;

pub const DEFAULT_ENCODING_TEMPLATE: &str = "{trigger}[{name}](id:{id}{data})";
pub const DEFAULT_DISPLAY_TEMPLATE: &str = "{trigger}{name}";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_]+)\}").expect("placeholder regex is valid")
});

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Placeholder {
    Trigger,
    Name,
    Id,
    Data,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed template. Renders mention data into text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let mut segments = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(source) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let placeholder = Placeholder::from_str(name.as_str()).map_err(
                |_| ConfigError::UnknownPlaceholder {
                    template: source.to_owned(),
                    name: name.as_str().to_owned(),
                },
            )?;
            if whole.start() > last {
                segments.push(Segment::Literal(
                    source[last..whole.start()].to_owned(),
                ));
            }
            segments.push(Segment::Placeholder(placeholder));
            last = whole.end();
        }
        if last < source.len() {
            segments.push(Segment::Literal(source[last..].to_owned()));
        }
        Ok(Self {
            source: source.to_owned(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn count(&self, placeholder: Placeholder) -> usize {
        self.segments
            .iter()
            .filter(|s| **s == Segment::Placeholder(placeholder))
            .count()
    }

    /// Render `data` verbatim.
    pub fn render(&self, data: &MentionData) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(Placeholder::Trigger) => {
                    out.push_str(&data.trigger)
                }
                Segment::Placeholder(Placeholder::Name) => {
                    out.push_str(&data.name)
                }
                Segment::Placeholder(Placeholder::Id) => out.push_str(&data.id),
                Segment::Placeholder(Placeholder::Data) => {
                    for (key, value) in &data.attributes {
                        out.push(' ');
                        out.push_str(key);
                        out.push(':');
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }
}

/// Characters a placeholder value may not contain.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Stop {
    /// First character of the literal that ends the value.
    terminator: char,
    /// Whitespace is reserved because `{data}` follows, or because the value
    /// is an id or a data pair.
    no_whitespace: bool,
}

impl Stop {
    fn allows(&self, ch: char) -> bool {
        ch != self.terminator
            && ch != '\n'
            && ch != '\r'
            && !(self.no_whitespace && ch.is_whitespace())
    }

    fn sanitize(&self, value: &str) -> String {
        value.chars().filter(|ch| self.allows(*ch)).collect()
    }

    fn class(&self) -> String {
        let terminator = regex::escape(&self.terminator.to_string());
        if self.no_whitespace {
            format!(r"[^\s{terminator}]")
        } else {
            format!(r"[^{terminator}\r\n]")
        }
    }
}

/// A template used to serialize mentions into the encoded value, together
/// with the regex that recognizes its output.
#[derive(Clone, Debug)]
pub struct EncodingTemplate {
    template: Template,
    stops: BTreeMap<usize, Stop>,
    regex: Regex,
}

impl EncodingTemplate {
    pub fn new(source: &str, trigger: &str) -> Result<Self, ConfigError> {
        let template = Template::parse(source)?;

        for placeholder in [Placeholder::Name, Placeholder::Id] {
            if template.count(placeholder) == 0 {
                return Err(ConfigError::MissingPlaceholder {
                    template: source.to_owned(),
                    placeholder,
                });
            }
        }
        for placeholder in [
            Placeholder::Trigger,
            Placeholder::Name,
            Placeholder::Id,
            Placeholder::Data,
        ] {
            if template.count(placeholder) > 1 {
                return Err(ConfigError::DuplicatePlaceholder {
                    template: source.to_owned(),
                    placeholder,
                });
            }
        }

        let stops = Self::compute_stops(&template)?;
        let regex = Regex::new(&Self::derive_pattern(&template, &stops, trigger))?;
        Ok(Self {
            template,
            stops,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        self.template.source()
    }

    /// The regex recognizing tokens produced by [`Self::encode`].
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    fn compute_stops(
        template: &Template,
    ) -> Result<BTreeMap<usize, Stop>, ConfigError> {
        let segments = &template.segments;
        let first_char = |index: usize| match segments.get(index) {
            Some(Segment::Literal(text)) => text.chars().next(),
            _ => None,
        };

        let mut stops = BTreeMap::new();
        for (index, segment) in segments.iter().enumerate() {
            let Segment::Placeholder(placeholder) = *segment else {
                continue;
            };
            if placeholder == Placeholder::Trigger {
                continue;
            }
            let followed_by_data = placeholder != Placeholder::Data
                && segments.get(index + 1)
                    == Some(&Segment::Placeholder(Placeholder::Data));
            let terminator = if followed_by_data {
                first_char(index + 2)
            } else {
                first_char(index + 1)
            };
            let Some(terminator) = terminator else {
                return Err(ConfigError::UnterminatedPlaceholder {
                    template: template.source.clone(),
                    placeholder,
                });
            };
            let no_whitespace = placeholder != Placeholder::Name || followed_by_data;
            stops.insert(
                index,
                Stop {
                    terminator,
                    no_whitespace,
                },
            );
        }
        Ok(stops)
    }

    fn derive_pattern(
        template: &Template,
        stops: &BTreeMap<usize, Stop>,
        trigger: &str,
    ) -> String {
        let mut pattern = String::new();
        for (index, segment) in template.segments.iter().enumerate() {
            let stop = stops.get(&index);
            match (segment, stop) {
                (Segment::Literal(text), _) => {
                    pattern.push_str(&regex::escape(text))
                }
                (Segment::Placeholder(Placeholder::Trigger), _) => {
                    pattern.push_str(&regex::escape(trigger))
                }
                (Segment::Placeholder(Placeholder::Data), Some(stop)) => {
                    let class = stop.class();
                    let terminator =
                        regex::escape(&stop.terminator.to_string());
                    pattern.push_str(&format!(
                        r"(?P<data>(?: [^\s:{terminator}]+:{class}*)*)"
                    ));
                }
                (Segment::Placeholder(placeholder), Some(stop)) => {
                    pattern.push_str(&format!(
                        "(?P<{}>{}+)",
                        placeholder.as_ref(),
                        stop.class()
                    ));
                }
                // Every non-trigger placeholder has a stop
                (Segment::Placeholder(_), None) => {}
            }
        }
        pattern
    }

    fn stop_for(&self, placeholder: Placeholder) -> Option<&Stop> {
        let index = self
            .template
            .segments
            .iter()
            .position(|s| *s == Segment::Placeholder(placeholder))?;
        self.stops.get(&index)
    }

    /// `data` with every character that would make the token unparseable
    /// removed. This is exactly what [`Self::encode`] writes.
    pub fn sanitize(&self, data: &MentionData) -> MentionData {
        let clean = |placeholder: Placeholder, value: &str| {
            self.stop_for(placeholder)
                .map_or_else(|| value.to_owned(), |stop| stop.sanitize(value))
        };
        let attributes = match self.stop_for(Placeholder::Data) {
            Some(stop) => data
                .attributes
                .iter()
                .filter_map(|(key, value)| {
                    let key: String = stop
                        .sanitize(key)
                        .chars()
                        .filter(|ch| *ch != ':')
                        .collect();
                    (!key.is_empty()).then(|| (key, stop.sanitize(value)))
                })
                .collect(),
            None => BTreeMap::new(),
        };
        MentionData {
            trigger: data.trigger.clone(),
            id: clean(Placeholder::Id, &data.id),
            name: clean(Placeholder::Name, &data.name),
            attributes,
        }
    }

    /// Serialize `data` after [`Self::sanitize`].
    pub fn encode(&self, data: &MentionData) -> String {
        self.template.render(&self.sanitize(data))
    }
}

pub(crate) fn decode_captures(
    caps: &Captures<'_>,
    trigger: &str,
) -> Option<MentionData> {
    let name = caps.name("name")?.as_str().to_owned();
    let id = caps.name("id")?.as_str().to_owned();
    let attributes = caps
        .name("data")
        .map(|data| parse_attributes(data.as_str()))
        .unwrap_or_default();
    Some(MentionData {
        trigger: trigger.to_owned(),
        id,
        name,
        attributes,
    })
}

fn parse_attributes(data: &str) -> BTreeMap<String, String> {
    data.split_whitespace()
        .filter_map(|pair| pair.split_once(':'))
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
}
