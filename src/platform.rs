//! Platform registry and detector.
//!
//! Each supported chat platform is described by a static `PlatformConfig`:
//! its hostname patterns, the CSS selectors for its conversation layout, and
//! which extraction strategy that layout requires. Detection matches the page
//! hostname against the registry in order.

use serde::{Deserialize, Serialize};

/// Identifier for a supported chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// chat.openai.com / chatgpt.com
    ChatGpt,
    /// gemini.google.com
    Gemini,
}

impl Platform {
    /// Short machine identifier, used in front-matter (`source:`).
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::ChatGpt => "chatgpt",
            Self::Gemini => "gemini",
        }
    }
}

/// How messages are laid out in the page structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// One container element per turn; role decided by membership tests
    /// against the user/assistant selectors within each container.
    TurnBased,

    /// User and assistant messages form two separately-queryable element
    /// streams; extraction interleaves them index by index.
    PairedList,
}

/// How the active conversation is identified in the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleHeuristic {
    /// Match list-entry hrefs against the conversation id in the page path.
    UrlPathMatch,

    /// Look for an entry whose visual state marks it selected (non-transparent
    /// inline background, aria-selected, or a "selected" class). Fragile by
    /// nature; only the first link of the title fallback chain.
    SelectedState,
}

/// CSS selectors describing one platform's conversation DOM.
#[derive(Debug, Clone, Copy)]
pub struct SelectorSet {
    /// Turn container (turn-based layouts only).
    pub turn_container: &'static str,
    /// User message element.
    pub user_message: &'static str,
    /// Assistant message element.
    pub assistant_message: &'static str,
    /// Content subtree within a turn container.
    pub message_content: &'static str,
    /// Page-level title/heading element.
    pub title: &'static str,
    /// Conversation history list entries.
    pub conversation_list: &'static str,
    /// Title element within a history list entry.
    pub conversation_item_title: &'static str,
}

/// Static description of one supported platform.
///
/// Immutable, defined once in the registry; all extraction components borrow
/// from it.
#[derive(Debug, Clone, Copy)]
pub struct PlatformConfig {
    /// Platform identifier.
    pub platform: Platform,
    /// Human-readable name, used as the assistant's role label.
    pub display_name: &'static str,
    /// Hostname patterns for detection.
    pub hostnames: &'static [&'static str],
    /// Message layout strategy.
    pub strategy: ExtractionStrategy,
    /// Active-conversation heuristic for the title resolver.
    pub title_heuristic: TitleHeuristic,
    /// DOM selectors for this platform.
    pub selectors: SelectorSet,
}

/// Pre-split pieces of the page URL the pipeline needs: the hostname for
/// detection, the path for the active-conversation heuristic, and the origin
/// for rebuilding absolute conversation links.
#[derive(Debug, Clone, Default)]
pub struct PageUrl {
    /// Page hostname.
    pub hostname: String,
    /// Page path (leading slash included).
    pub path: String,
    /// Scheme + host, e.g. `https://chatgpt.com`.
    pub origin: String,
}

impl PageUrl {
    /// Split a page URL into the pieces the pipeline needs.
    ///
    /// A string that does not parse as an absolute URL is treated as a bare
    /// hostname, matching how a caller embedded in the page would hand over
    /// `location.hostname` directly.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match url::Url::parse(raw) {
            Ok(parsed) => Self {
                hostname: parsed.host_str().unwrap_or_default().to_string(),
                path: parsed.path().to_string(),
                origin: parsed.origin().ascii_serialization(),
            },
            Err(_) => Self {
                hostname: raw.trim().to_string(),
                path: String::new(),
                origin: String::new(),
            },
        }
    }
}

/// The platform registry. Order matters: detection returns the first match.
static REGISTRY: &[PlatformConfig] = &[
    PlatformConfig {
        platform: Platform::ChatGpt,
        display_name: "ChatGPT",
        hostnames: &["chat.openai.com", "chatgpt.com"],
        strategy: ExtractionStrategy::TurnBased,
        title_heuristic: TitleHeuristic::UrlPathMatch,
        selectors: SelectorSet {
            turn_container: r#"[data-testid^="conversation-turn"]"#,
            user_message: r#"[data-message-author-role="user"]"#,
            assistant_message: r#"[data-message-author-role="assistant"]"#,
            message_content: ".markdown, .whitespace-pre-wrap",
            title: "main h1",
            conversation_list: r#"nav a[href^="/c/"]"#,
            conversation_item_title: r#"span[dir="auto"]"#,
        },
    },
    PlatformConfig {
        platform: Platform::Gemini,
        display_name: "Gemini",
        hostnames: &["gemini.google.com"],
        strategy: ExtractionStrategy::PairedList,
        title_heuristic: TitleHeuristic::SelectedState,
        selectors: SelectorSet {
            turn_container: "message-content",
            user_message: "user-query",
            assistant_message: "model-response",
            message_content: ".message-content",
            title: r#"[role="heading"]"#,
            conversation_list: r#"[data-test-id="conversation"]"#,
            conversation_item_title: ".conversation-title",
        },
    },
];

/// All registered platforms, in detection order.
#[must_use]
pub fn registry() -> &'static [PlatformConfig] {
    REGISTRY
}

/// Look up the config for a known platform.
#[must_use]
pub fn config_for(platform: Platform) -> &'static PlatformConfig {
    // The registry covers every enum variant, so this cannot miss; fall back
    // to the first entry rather than panic if it ever does.
    REGISTRY
        .iter()
        .find(|c| c.platform == platform)
        .unwrap_or(&REGISTRY[0])
}

/// Detect the platform for a page hostname.
///
/// A pattern matches if it is a substring of the hostname, the hostname is a
/// substring of it, or the two are equal. The fuzziness is intentional: it
/// admits subdomains and alternate domains without enumerating them. If two
/// platforms could both match a hostname, registry order decides.
#[must_use]
pub fn detect_platform(hostname: &str) -> Option<&'static PlatformConfig> {
    if hostname.is_empty() {
        return None;
    }

    REGISTRY.iter().find(|config| {
        config
            .hostnames
            .iter()
            .any(|pattern| hostname.contains(pattern) || pattern.contains(hostname))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_chatgpt_domains() {
        assert_eq!(
            detect_platform("chatgpt.com").map(|c| c.platform),
            Some(Platform::ChatGpt)
        );
        assert_eq!(
            detect_platform("chat.openai.com").map(|c| c.platform),
            Some(Platform::ChatGpt)
        );
    }

    #[test]
    fn detects_gemini_domain() {
        assert_eq!(
            detect_platform("gemini.google.com").map(|c| c.platform),
            Some(Platform::Gemini)
        );
    }

    #[test]
    fn fuzzy_match_admits_subdomains() {
        // hostname contains a registered pattern
        assert_eq!(
            detect_platform("www.chatgpt.com").map(|c| c.platform),
            Some(Platform::ChatGpt)
        );
        // registered pattern contains the hostname
        assert_eq!(
            detect_platform("openai.com").map(|c| c.platform),
            Some(Platform::ChatGpt)
        );
    }

    #[test]
    fn unknown_hostname_yields_none() {
        assert!(detect_platform("example.com").is_none());
        assert!(detect_platform("claude.ai").is_none());
    }

    #[test]
    fn empty_hostname_yields_none() {
        // "" is a substring of every pattern; guard against that.
        assert!(detect_platform("").is_none());
    }

    #[test]
    fn config_for_round_trips() {
        assert_eq!(config_for(Platform::Gemini).platform, Platform::Gemini);
        assert_eq!(config_for(Platform::ChatGpt).display_name, "ChatGPT");
    }

    #[test]
    fn strategies_match_layouts() {
        assert_eq!(
            config_for(Platform::ChatGpt).strategy,
            ExtractionStrategy::TurnBased
        );
        assert_eq!(
            config_for(Platform::Gemini).strategy,
            ExtractionStrategy::PairedList
        );
    }

    #[test]
    fn page_url_splits_absolute_urls() {
        let page = PageUrl::parse("https://chatgpt.com/c/abc-123?x=1");
        assert_eq!(page.hostname, "chatgpt.com");
        assert_eq!(page.path, "/c/abc-123");
        assert_eq!(page.origin, "https://chatgpt.com");
    }

    #[test]
    fn page_url_accepts_bare_hostname() {
        let page = PageUrl::parse("gemini.google.com");
        assert_eq!(page.hostname, "gemini.google.com");
        assert_eq!(page.path, "");
        assert_eq!(page.origin, "");
    }

    #[test]
    fn platform_id_strings() {
        assert_eq!(Platform::ChatGpt.id(), "chatgpt");
        assert_eq!(Platform::Gemini.id(), "gemini");
    }
}
