// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streamed-text sanitization and bounded previews.
//!
//! Raw model output interleaves wrapper tags (`<thinking>`, `<tool_call>`),
//! partial JSON tool arguments, and escaped whitespace. Sanitization runs
//! over the *accumulated* buffer rather than per-delta so a tag split across
//! two deltas is still removed whole. All operations are pure and total:
//! empty input yields empty output, multi-byte text never splits a char.

/// Normalize raw streamed or single-shot reasoning text for display.
///
/// Strips angle-bracket tags, drops inline `{...}` JSON fragments and stray
/// bracket characters, un-escapes `\n` / `\t` / `\"` / `\\`, collapses
/// whitespace runs to a single separator, and trims the ends.
pub fn sanitize(raw: &str) -> String {
    let stripped = strip_tags(raw);
    let stripped = strip_json_fragments(&stripped);
    let unescaped = unescape(&stripped);
    collapse_whitespace(&unescaped)
}

/// Word-boundary-safe truncation with an ellipsis marker.
///
/// Returns `text` unchanged when it fits. Otherwise cuts at the last space
/// at or before `max_len`, unless that space falls before `0.8 * max_len`,
/// in which case the cut is hard at `max_len`. Lengths are in characters.
pub fn truncate(text: &str, max_len: usize) -> String {
    let total = text.chars().count();
    if total <= max_len {
        return text.to_string();
    }

    let head: String = text.chars().take(max_len).collect();
    let floor = (max_len * 4) / 5;
    let cut = match head.rfind(' ') {
        Some(byte_idx) if head[..byte_idx].chars().count() >= floor => byte_idx,
        _ => head.len(),
    };
    format!("{}...", head[..cut].trim_end())
}

/// Hard cap keeping the head of the text. Character-counted.
pub fn cap(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        text.chars().take(max_len).collect()
    }
}

/// Most recent `max_len` characters of an accumulator (the display window).
pub fn recent_window(text: &str, max_len: usize) -> &str {
    let total = text.chars().count();
    if total <= max_len {
        return text;
    }
    let skip = total - max_len;
    match text.char_indices().nth(skip) {
        Some((byte_idx, _)) => &text[byte_idx..],
        None => text,
    }
}

/// Remove `<...>` tag spans (wrapper tags plus any residual markup).
///
/// A span only counts as a tag when it closes within a bounded distance and
/// looks tag-like (starts with a letter, `/` or `_`), so stray `<` in prose
/// survives.
fn strip_tags(raw: &str) -> String {
    const MAX_TAG_LEN: usize = 64;
    let mut out = String::with_capacity(raw.len());
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        if bytes[i] == b'<' {
            if let Some(end) = find_tag_close(raw, i, MAX_TAG_LEN) {
                i = end + 1;
                continue;
            }
        }
        let ch = raw[i..].chars().next().unwrap_or('\u{0}');
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

fn find_tag_close(raw: &str, open: usize, max_len: usize) -> Option<usize> {
    let inner = raw[open + 1..].chars().next()?;
    if !(inner.is_alphanumeric() || inner == '/' || inner == '_') {
        return None;
    }
    let mut limit = raw.len().min(open + max_len);
    while !raw.is_char_boundary(limit) {
        limit -= 1;
    }
    let off = raw[open + 1..limit].find('>')?;
    if raw[open + 1..open + 1 + off].contains('<') {
        return None;
    }
    Some(open + 1 + off)
}

/// Drop balanced `{...}` spans and any stray `{` `}` `[` `]` characters.
fn strip_json_fragments(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for ch in raw.chars() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '[' | ']' => {}
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Un-escape the common sequences left behind by JSON-encoded deltas.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                out.push('\n');
                chars.next();
            }
            Some('t') => {
                out.push('\t');
                chars.next();
            }
            Some('"') => {
                out.push('"');
                chars.next();
            }
            Some('\\') => {
                out.push('\\');
                chars.next();
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Collapse whitespace runs: runs containing a newline become one newline,
/// other runs become one space. Trims both ends.
fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut run_has_newline = false;
    let mut in_run = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            in_run = true;
            run_has_newline |= ch == '\n';
        } else {
            if in_run && !out.is_empty() {
                out.push(if run_has_newline { '\n' } else { ' ' });
            }
            in_run = false;
            run_has_newline = false;
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
