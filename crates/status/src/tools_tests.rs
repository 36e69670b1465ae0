// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{completed_label, display_name};
use yare::parameterized;

#[parameterized(
    web_search = { "web_search", "Web Search" },
    write_file = { "write_file", "Write File" },
    file_write_alias = { "file_write", "Write File" },
    read_file = { "read_file", "Read File" },
    file_read_alias = { "file_read", "Read File" },
    task = { "task", "Subagent Task" },
    delegate_alias = { "delegate", "Subagent Task" },
    reasoning = { "reasoning_chain", "Reasoning" },
    http = { "http_request", "HTTP Request" },
    python = { "python_repl", "Python" },
)]
fn known_tools_get_display_labels(raw: &str, label: &str) {
    assert_eq!(display_name(raw), label);
}

#[test]
fn lookup_is_case_insensitive_and_trims() {
    assert_eq!(display_name("Web_Search"), "Web Search");
    assert_eq!(display_name("  python_repl "), "Python");
}

#[test]
fn unknown_tools_pass_through_verbatim() {
    assert_eq!(display_name("custom_scraper"), "custom_scraper");
    assert_eq!(display_name(""), "");
}

#[test]
fn completed_label_strips_dots() {
    assert_eq!(completed_label("tools.web.search"), "toolswebsearch");
    assert_eq!(completed_label("web_search"), "Web Search");
}
