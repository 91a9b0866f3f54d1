//! Last-resort recovery of baseline records from raw text
//!
//! When a primary record no longer parses as YAML, the fields are pulled
//! out by pattern match instead. Deliberately lossy: whatever scalar fields
//! survive are kept, and the attempt fails only when no snapshot payload
//! can be found. Reachable solely through the store's load chain.

use crate::store::record::BaselineRecord;
use regex::Regex;
use tracing::warn;

/// Try to reconstruct a record from the raw text of a damaged primary file
pub(crate) fn recover_from_text(text: &str) -> Option<BaselineRecord> {
    let snapshot_json = extract_payload(text)?;
    if snapshot_json.is_empty() {
        return None;
    }

    let record = BaselineRecord {
        scene_guid: match_scalar(text, r"(?m)^scene_guid:\s*(.+)$").unwrap_or_default(),
        scene_path: match_scalar(text, r"(?m)^scene_path:\s*(.+)$").unwrap_or_default(),
        snapshot_json,
        timestamp: match_scalar(text, r"(?m)^timestamp:\s*(.+)$").unwrap_or_default(),
    };
    warn!(
        scene_path = %record.scene_path,
        "Recovered baseline record by pattern match"
    );
    Some(record)
}

/// Extract the snapshot payload, tolerating double-quoted, single-quoted,
/// and block-literal YAML encodings
fn extract_payload(text: &str) -> Option<String> {
    let double_quoted = Regex::new(r#"(?s)snapshot_json:[ \t]*"((?:[^"\\]|\\.)*)""#).ok()?;
    if let Some(captures) = double_quoted.captures(text) {
        return Some(unescape_double_quoted(&captures[1]));
    }

    let single_quoted = Regex::new(r"(?s)snapshot_json:[ \t]*'((?:[^']|'')*)'").ok()?;
    if let Some(captures) = single_quoted.captures(text) {
        return Some(captures[1].replace("''", "'"));
    }

    let block = Regex::new(r"(?m)^snapshot_json:[ \t]*[|>][+-]?[ \t]*\r?\n((?:[ \t]+.*\r?\n?)+)")
        .ok()?;
    if let Some(captures) = block.captures(text) {
        let lines: Vec<&str> = captures[1]
            .lines()
            .map(str::trim_start)
            .filter(|l| !l.is_empty())
            .collect();
        return Some(lines.join("\n"));
    }

    None
}

fn unescape_double_quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => break,
        }
    }
    out
}

fn match_scalar(text: &str, pattern: &str) -> Option<String> {
    let regex = Regex::new(pattern).ok()?;
    let captured = regex.captures(text)?.get(1)?.as_str().trim();
    // scalars may themselves be quoted
    let unquoted = captured
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| {
            captured
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
        })
        .unwrap_or(captured);
    Some(unquoted.to_string())
}
