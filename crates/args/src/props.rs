//! Java-style `.properties` files.
//!
//! Supported syntax:
//! - `#` and `!` comment lines, blank lines
//! - `key=value`, `key:value` and `key value` (whitespace around the
//!   separator is ignored)
//! - line continuation with a trailing `\` (leading whitespace of the next
//!   line is dropped)
//! - escapes `\t \n \r \f \uXXXX`; any other escaped char stands for itself
//!
//! Files are decoded as ISO-8859-1. A malformed `\u` escape is kept as
//! literal text.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Key/value pairs loaded from a properties file, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text. Later keys replace earlier ones.
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            entries.insert(unescape(key), unescape(value));
        }
        Self { entries }
    }

    /// Read and parse the file at `path` as ISO-8859-1.
    pub fn load(path: &Path) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        // Every byte maps to the code point of the same value.
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        let props = Self::parse(&text);
        tracing::debug!(path = %path.display(), entries = props.len(), "loaded properties");
        Ok(props)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Join continued physical lines and drop comments and blank lines.
/// Escapes are still raw in the returned lines.
fn logical_lines(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Option<String> = None;

    for physical in text.lines() {
        let trimmed = physical.trim_start_matches(is_blank);

        if current.is_none() && (trimmed.is_empty() || trimmed.starts_with(['#', '!'])) {
            continue;
        }

        let trailing = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        let continues = trailing % 2 == 1;
        let content = if continues {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };

        let line = current.get_or_insert_with(String::new);
        line.push_str(content);

        if !continues {
            out.extend(current.take());
        }
    }

    // A continuation on the last line just ends the entry.
    out.extend(current);
    out
}

/// Split a logical line into raw key and raw value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                let well_formed = hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit());
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if well_formed => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    _ => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
