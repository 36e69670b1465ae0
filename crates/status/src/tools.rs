// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable labels for tool identifiers.

/// Wire tool names mapped to the labels shown in the status panel.
/// Unknown names pass through verbatim.
const TOOL_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("web_search", "Web Search"),
    ("write_file", "Write File"),
    ("file_write", "Write File"),
    ("read_file", "Read File"),
    ("file_read", "Read File"),
    ("task", "Subagent Task"),
    ("delegate", "Subagent Task"),
    ("reasoning_chain", "Reasoning"),
    ("http_request", "HTTP Request"),
    ("python_repl", "Python"),
];

/// Display label for a raw tool name.
pub fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    for (name, label) in TOOL_DISPLAY_NAMES {
        if name.eq_ignore_ascii_case(trimmed) {
            return (*label).to_string();
        }
    }
    trimmed.to_string()
}

/// Label recorded when a tool finishes. Tool-end payloads sometimes carry
/// dotted provider paths ("tools.web_search"); dots are removed before the
/// display lookup so the stored label never contains a path separator.
pub fn completed_label(raw: &str) -> String {
    let flat: String = raw.trim().chars().filter(|c| *c != '.').collect();
    display_name(&flat)
}

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
