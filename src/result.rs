//! Output types for conversation export.
//!
//! This module defines the structured output handed to the file-delivery
//! collaborator: the assembled document, the role-tagged message sequence,
//! and the conversation-list entries used by batch-export callers.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human side of the conversation.
    User,
    /// The model side of the conversation.
    Assistant,
}

/// A single conversation message.
///
/// Created by the message extractor in conversation order and consumed once
/// by the document assembler; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message author.
    pub role: Role,

    /// Message body, already converted to Markdown.
    pub content: String,
}

impl Message {
    /// Body length in characters, used for the empty-extraction check.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// How a conversation-list entry can be reached again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locator {
    /// A navigable URL (platforms with stable per-conversation links).
    Url(String),

    /// Position of the entry in the page's history list, for platforms
    /// without stable links; the caller re-resolves it against the live page.
    InPage(usize),
}

/// One entry of the page's conversation history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationListItem {
    /// Platform-specific identifier (URL path segment, or list index).
    pub id: String,

    /// Display title of the conversation.
    pub title: String,

    /// How to navigate back to this conversation.
    pub locator: Locator,
}

/// Result of exporting a conversation page.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// The assembled Markdown document.
    pub markdown: String,

    /// Resolved conversation title (sentinel fallback when unresolvable).
    pub title: String,

    /// Platform the page was identified as.
    pub platform: Platform,

    /// Number of user messages extracted.
    pub user_count: usize,

    /// Number of assistant messages extracted.
    pub assistant_count: usize,

    /// Warnings encountered during extraction.
    ///
    /// Non-fatal issues, such as a turn whose content subtree was missing
    /// and which was therefore skipped.
    pub warnings: Vec<String>,
}

impl ExportResult {
    /// Total number of extracted messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.user_count + self.assistant_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, r#""assistant""#);
    }

    #[test]
    fn locator_round_trips() {
        let item = ConversationListItem {
            id: "abc-123".to_string(),
            title: "Borrow checker help".to_string(),
            locator: Locator::Url("https://chatgpt.com/c/abc-123".to_string()),
        };

        let json = serde_json::to_string(&item).unwrap();
        let back: ConversationListItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn body_len_counts_chars_not_bytes() {
        let msg = Message {
            role: Role::User,
            content: "héllo".to_string(),
        };
        assert_eq!(msg.body_len(), 5);
    }
}
