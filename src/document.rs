//! Document assembler: composes title, messages, and metadata into the
//! final Markdown document.
//!
//! Two layout variants are supported. `Layout::FrontMatter` leads with a YAML
//! front-matter block; `Layout::SummaryHeader` leads with the summary section.
//! In both, every message appears exactly once, in extraction order, as a
//! role-labelled section separated by horizontal rules.

use chrono::{DateTime, Utc};

use crate::options::{Layout, Options};
use crate::platform::PlatformConfig;
use crate::result::{Message, Role};

/// Icon prefixed to user message headings.
pub const USER_ICON: &str = "👤";

/// Icon prefixed to assistant message headings.
pub const ASSISTANT_ICON: &str = "🤖";

/// Role label used for the human side of every conversation.
const USER_LABEL: &str = "User";

/// A fully extracted conversation, ready for assembly.
#[derive(Debug)]
pub struct ConversationDocument<'a> {
    /// Resolved display title (never empty; sentinel-backed).
    pub title: String,

    /// Platform the conversation came from.
    pub config: &'a PlatformConfig,

    /// Messages in extraction order.
    pub messages: &'a [Message],

    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Assemble the final Markdown document.
#[must_use]
pub fn assemble(doc: &ConversationDocument, options: &Options) -> String {
    let mut out = String::new();

    if options.layout == Layout::FrontMatter {
        push_front_matter(doc, &mut out);
    }

    out.push_str(&format!("# {}\n\n", doc.title));

    if options.include_summary {
        push_summary(doc, &mut out);
    }

    out.push_str("## Conversation\n\n");

    for message in doc.messages {
        let (icon, label) = match message.role {
            Role::User => (USER_ICON, USER_LABEL),
            Role::Assistant => (ASSISTANT_ICON, doc.config.display_name),
        };

        out.push_str(&format!("### {icon} {label}\n"));
        out.push_str(&message.content);
        out.push_str("\n\n---\n\n");
    }

    out
}

fn push_front_matter(doc: &ConversationDocument, out: &mut String) {
    let date = doc.generated_at.format("%Y-%m-%d");
    let chat_id = doc.generated_at.format("%Y%m%dT%H%M%S");

    out.push_str("---\n");
    out.push_str(&format!("title: {}\n", doc.title));
    out.push_str(&format!("date: {date}\n"));
    out.push_str(&format!("chat_id: {chat_id}\n"));
    out.push_str(&format!("source: {}\n", doc.config.platform.id()));
    out.push_str(&format!("model: {}\n", doc.config.display_name));
    out.push_str("type: chat-log\n");
    out.push_str("tags: []\n");
    out.push_str("---\n\n");
}

fn push_summary(doc: &ConversationDocument, out: &mut String) {
    let user_count = doc
        .messages
        .iter()
        .filter(|m| m.role == Role::User)
        .count();
    let assistant_count = doc.messages.len() - user_count;

    out.push_str("## Summary\n");
    out.push_str(&format!("- Date: {}\n", doc.generated_at.format("%Y-%m-%d")));
    out.push_str(&format!("- Topic: {}\n", doc.title));
    out.push_str(&format!(
        "- Participants: {USER_LABEL} / {}\n",
        doc.config.display_name
    ));
    out.push_str(&format!(
        "- Messages: {} ({user_count} user, {assistant_count} assistant)\n",
        doc.messages.len()
    ));
    out.push_str(&format!("- Code blocks: {}\n", count_code_blocks(doc.messages)));
    out.push_str("\n---\n\n");
}

/// Count fenced code blocks across all message bodies.
///
/// Fences come in pairs, so the count is the number of triple-backtick
/// markers divided by two.
#[must_use]
pub fn count_code_blocks(messages: &[Message]) -> usize {
    messages
        .iter()
        .map(|m| m.content.matches("```").count())
        .sum::<usize>()
        / 2
}

/// Suggest a filename for the assembled document.
///
/// Shape: `<platform>-<YYYY-MM-DD>-<title>.md`. Illegal filesystem characters
/// and whitespace collapse to single hyphens, the title is capped at
/// `Options::max_filename_title_len` characters, and an empty residue falls
/// back to "untitled". Naming is a suggestion only; persistence belongs to
/// the file-delivery collaborator.
#[must_use]
pub fn suggest_filename(doc: &ConversationDocument, options: &Options) -> String {
    let cleaned = crate::patterns::ILLEGAL_FILENAME_CHARS.replace_all(&doc.title, "-");

    let mut slug = String::new();
    for ch in cleaned.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else {
            slug.push(ch);
        }
    }

    let mut slug: String = slug.chars().take(options.max_filename_title_len).collect();
    slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        slug = "untitled".to_string();
    }

    format!(
        "{}-{}-{slug}.md",
        doc.config.platform.id(),
        doc.generated_at.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Layout;
    use crate::platform::{config_for, Platform};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    fn sample_doc<'a>(messages: &'a [Message]) -> ConversationDocument<'a> {
        ConversationDocument {
            title: "Borrow checker help".to_string(),
            config: config_for(Platform::ChatGpt),
            messages,
            generated_at: fixed_time(),
        }
    }

    fn sample_messages() -> Vec<Message> {
        vec![
            Message {
                role: Role::User,
                content: "How do I fix E0502?".to_string(),
            },
            Message {
                role: Role::Assistant,
                content: "Split the borrows:\n\n```rust\nlet (a, b) = x.split_at_mut(1);\n```"
                    .to_string(),
            },
        ]
    }

    #[test]
    fn front_matter_layout_has_metadata_block() {
        let messages = sample_messages();
        let doc = sample_doc(&messages);
        let md = assemble(&doc, &Options::default());

        assert!(md.starts_with("---\n"));
        assert!(md.contains("title: Borrow checker help\n"));
        assert!(md.contains("date: 2026-03-14\n"));
        assert!(md.contains("chat_id: 20260314T092653\n"));
        assert!(md.contains("source: chatgpt\n"));
        assert!(md.contains("model: ChatGPT\n"));
        assert!(md.contains("type: chat-log\n"));
    }

    #[test]
    fn summary_header_layout_has_no_front_matter() {
        let messages = sample_messages();
        let doc = sample_doc(&messages);
        let md = assemble(
            &doc,
            &Options {
                layout: Layout::SummaryHeader,
                ..Options::default()
            },
        );

        assert!(md.starts_with("# Borrow checker help\n"));
        assert!(!md.contains("chat_id:"));
        assert!(md.contains("## Summary\n"));
    }

    #[test]
    fn every_message_appears_once_in_order() {
        let messages = sample_messages();
        let doc = sample_doc(&messages);
        let md = assemble(&doc, &Options::default());

        assert_eq!(md.matches("### 👤 User").count(), 1);
        assert_eq!(md.matches("### 🤖 ChatGPT").count(), 1);

        let user_pos = md.find("How do I fix E0502?").unwrap();
        let assistant_pos = md.find("Split the borrows").unwrap();
        assert!(user_pos < assistant_pos);
    }

    #[test]
    fn summary_counts_messages_and_code_blocks() {
        let messages = sample_messages();
        let doc = sample_doc(&messages);
        let md = assemble(&doc, &Options::default());

        assert!(md.contains("- Messages: 2 (1 user, 1 assistant)\n"));
        assert!(md.contains("- Code blocks: 1\n"));
    }

    #[test]
    fn summary_can_be_disabled() {
        let messages = sample_messages();
        let doc = sample_doc(&messages);
        let md = assemble(
            &doc,
            &Options {
                include_summary: false,
                ..Options::default()
            },
        );

        assert!(!md.contains("## Summary"));
        assert!(md.contains("## Conversation"));
    }

    #[test]
    fn count_code_blocks_pairs_fences() {
        let messages = vec![
            Message {
                role: Role::Assistant,
                content: "```rust\na\n```\ntext\n```sh\nb\n```".to_string(),
            },
            Message {
                role: Role::User,
                content: "no fences".to_string(),
            },
        ];
        assert_eq!(count_code_blocks(&messages), 2);
    }

    #[test]
    fn empty_message_sequence_still_assembles() {
        let messages = Vec::new();
        let doc = sample_doc(&messages);
        let md = assemble(&doc, &Options::default());

        assert!(md.contains("# Borrow checker help"));
        assert!(md.contains("- Messages: 0 (0 user, 0 assistant)"));
    }

    #[test]
    fn filename_is_sanitized_and_dated() {
        let messages = sample_messages();
        let mut doc = sample_doc(&messages);
        doc.title = "Rust: async/await <explained>?".to_string();

        let name = suggest_filename(&doc, &Options::default());
        assert_eq!(name, "chatgpt-2026-03-14-Rust-async-await-explained.md");
    }

    #[test]
    fn filename_title_is_truncated() {
        let messages = Vec::new();
        let mut doc = sample_doc(&messages);
        doc.title = "x".repeat(120);

        let name = suggest_filename(
            &doc,
            &Options {
                max_filename_title_len: 10,
                ..Options::default()
            },
        );
        assert_eq!(name, "chatgpt-2026-03-14-xxxxxxxxxx.md");
    }

    #[test]
    fn filename_falls_back_when_title_is_all_illegal() {
        let messages = Vec::new();
        let mut doc = sample_doc(&messages);
        doc.title = "???///".to_string();

        let name = suggest_filename(&doc, &Options::default());
        assert_eq!(name, "chatgpt-2026-03-14-untitled.md");
    }
}
