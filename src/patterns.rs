//! Compiled regex patterns used across the export pipeline.
//!
//! All patterns are compiled once at startup using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Matches the `language-<lang>` class convention that chat platforms put on
/// `<code>` elements inside fenced blocks (highlight.js / Prism style).
pub static CODE_LANGUAGE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"language-([A-Za-z0-9_+#-]+)").expect("CODE_LANGUAGE_CLASS regex"));

/// Matches the conversation id segment of a ChatGPT page path (`/c/<id>`).
pub static CHATGPT_CONVERSATION_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/c/([^/]+)").expect("CHATGPT_CONVERSATION_PATH regex"));

/// Matches a fully transparent CSS background-color value.
///
/// Used by the Gemini active-item heuristic: a history entry whose inline
/// background is anything other than transparent is treated as selected.
pub static TRANSPARENT_BACKGROUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)background-color\s*:\s*(transparent|rgba\(\s*0\s*,\s*0\s*,\s*0\s*,\s*0\s*\))")
        .expect("TRANSPARENT_BACKGROUND regex")
});

/// Matches any inline background-color declaration.
pub static BACKGROUND_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)background-color\s*:").expect("BACKGROUND_DECLARATION regex"));

/// Characters that are illegal in filenames on common filesystems.
pub static ILLEGAL_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("ILLEGAL_FILENAME_CHARS regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_language_class_extracts_language() {
        let caps = CODE_LANGUAGE_CLASS.captures("hljs language-python copyable");
        assert_eq!(caps.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("python"));
        assert!(CODE_LANGUAGE_CLASS.captures("hljs copyable").is_none());
    }

    #[test]
    fn code_language_class_handles_compound_names() {
        let caps = CODE_LANGUAGE_CLASS.captures("language-c++");
        assert_eq!(caps.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("c++"));
    }

    #[test]
    fn conversation_path_extracts_id() {
        let caps = CHATGPT_CONVERSATION_PATH.captures("/c/abc-123/extra");
        assert_eq!(caps.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("abc-123"));
        assert!(CHATGPT_CONVERSATION_PATH.captures("/g/something").is_none());
    }

    #[test]
    fn transparent_background_detection() {
        assert!(TRANSPARENT_BACKGROUND.is_match("background-color: transparent"));
        assert!(TRANSPARENT_BACKGROUND.is_match("background-color: rgba(0, 0, 0, 0)"));
        assert!(!TRANSPARENT_BACKGROUND.is_match("background-color: rgb(240, 240, 240)"));
    }

    #[test]
    fn illegal_filename_chars_are_matched() {
        let cleaned = ILLEGAL_FILENAME_CHARS.replace_all(r#"a/b\c:d?e"#, "-");
        assert_eq!(cleaned, "a-b-c-d-e");
    }
}
