use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// A detected transition of an account's tracked value.
///
/// Only ever persisted as a single text line:
/// `[<RFC3339 timestamp>] <entity_id> changed from <from> to <to>`.
/// Backslashes and control characters in the values are escaped so a value
/// can never spill onto a second line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub entity_id: String,
    pub from_value: String,
    pub to_value: String,
    pub detected_at: DateTime<Utc>,
}

const CHANGED_FROM: &str = " changed from ";
const TO: &str = " to ";

impl ChangeRecord {
    /// Parse a line previously written by `Display`.
    ///
    /// Returns `None` for lines that do not follow the layout or carry an
    /// unknown escape. A value containing the literal text ` to ` is split
    /// at its first occurrence.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let (timestamp, rest) = rest.split_once("] ")?;
        let detected_at = DateTime::parse_from_rfc3339(timestamp)
            .ok()?
            .with_timezone(&Utc);

        let (entity_id, values) = rest.split_once(CHANGED_FROM)?;
        if entity_id.is_empty() {
            return None;
        }

        // With an empty from-value the remainder starts with " to " directly
        let (from_value, to_value) = if let Some(to_value) = values.strip_prefix(TO) {
            ("", to_value)
        } else {
            values.split_once(TO)?
        };

        Some(Self {
            entity_id: entity_id.to_string(),
            from_value: unescape(from_value)?,
            to_value: unescape(to_value)?,
            detected_at,
        })
    }
}

/// Escape `\` and control characters as `\\`, `\n`, `\r`, `\t` or `\u{XX}`.
fn escape(value: &str) -> Cow<'_, str> {
    if !value.chars().any(|c| c == '\\' || c.is_control()) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn unescape(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let rest = chars.as_str().strip_prefix('{')?;
                let (hex, tail) = rest.split_once('}')?;
                out.push(char::from_u32(u32::from_str_radix(hex, 16).ok()?)?);
                chars = tail.chars();
            }
            _ => return None,
        }
    }
    Some(out)
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}{CHANGED_FROM}{}{TO}{}",
            self.detected_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.entity_id,
            escape(&self.from_value),
            escape(&self.to_value),
        )
    }
}
