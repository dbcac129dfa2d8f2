//! Post-processing: deterministic cleanup of raw recognizer output.
//!
//! Tesseract's plain-text output carries artefacts that have nothing to do
//! with page content: a trailing form feed on every page, platform line
//! endings, trailing whitespace where line detection overshot, and runs of
//! blank lines between detected blocks. This module applies a few cheap,
//! ordered string/regex rules that fix those quirks without touching the
//! recognized text itself. Each rule is a pure function and independently
//! testable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Clean one page's raw OCR text before it is appended to the document.
///
/// Rules (applied in order):
/// 1. Normalize line endings (CRLF → LF)
/// 2. Drop form feeds (tesseract terminates each page with `\x0c`)
/// 3. Trim trailing whitespace per line
/// 4. Collapse runs of blank lines down to a single blank line
/// 5. Trim leading/trailing blank lines
pub fn clean_page_text(input: &str) -> String {
    let s = normalize_line_endings(input);
    let s = drop_form_feeds(&s);
    let s = trim_trailing_whitespace(&s);
    let s = collapse_blank_lines(&s);
    s.trim_matches('\n').to_string()
}

fn normalize_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn drop_form_feeds(input: &str) -> String {
    input.replace('\u{0C}', "")
}

static RE_TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());

fn trim_trailing_whitespace(input: &str) -> String {
    let s = RE_TRAILING_WS.replace_all(input, "\n").to_string();
    s.trim_end_matches([' ', '\t']).to_string()
}

static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_RUNS.replace_all(input, "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tesseract_form_feed() {
        assert_eq!(clean_page_text("你好世界\n\u{0C}"), "你好世界");
    }

    #[test]
    fn normalizes_crlf() {
        assert_eq!(clean_page_text("line one\r\nline two\r\n"), "line one\nline two");
    }

    #[test]
    fn trims_trailing_whitespace_per_line() {
        assert_eq!(clean_page_text("a  \nb\t\nc"), "a\nb\nc");
    }

    #[test]
    fn collapses_blank_line_runs() {
        assert_eq!(clean_page_text("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn empty_page_stays_empty() {
        assert_eq!(clean_page_text("\u{0C}"), "");
        assert_eq!(clean_page_text(""), "");
    }

    #[test]
    fn idempotent() {
        let raw = "第一段  \r\n\r\n\r\n\r\n第二段\n\u{0C}";
        let once = clean_page_text(raw);
        assert_eq!(clean_page_text(&once), once);
    }
}
