//! Robustness tests: malformed or unusual page structures must degrade
//! gracefully, never panic.

use chat2md::{export, normalize::normalize, Error};

fn normalize_html(html: &str) -> String {
    let doc = chat2md::dom::parse(html);
    normalize(&doc.select("body"))
}

#[test]
fn deeply_nested_lists_render_every_item() {
    let html = "<ul><li>1<ul><li>2<ul><li>3<ul><li>4</li></ul></li></ul></li></ul></li></ul>";
    let result = normalize_html(html);

    for item in ["1", "2", "3", "4"] {
        assert_eq!(result.matches(item).count(), 1, "item {item}");
    }
}

#[test]
fn unicode_content_survives() {
    let result = normalize_html("<p>naïve café — 中文 🦀</p>");
    assert_eq!(result, "naïve café — 中文 🦀");
}

#[test]
fn empty_code_block_still_fences() {
    let result = normalize_html(r#"<pre><code class="language-sh"></code></pre>"#);
    assert_eq!(result, "```sh\n\n```");
}

#[test]
fn code_block_with_markdown_lookalike_body() {
    let result = normalize_html(
        "<pre><code># not a heading\n- not a list\n**not bold**</code></pre>",
    );
    assert!(result.contains("# not a heading"));
    assert!(result.contains("**not bold**"));
    // Exactly one fence pair
    assert_eq!(result.matches("```").count(), 2);
}

#[test]
fn attribute_noise_on_formatting_tags_is_ignored() {
    let result = normalize_html(
        r#"<p class="x" data-y="z"><strong style="color: red">loud</strong></p>"#,
    );
    assert_eq!(result, "**loud**");
}

#[test]
fn truncated_markup_does_not_panic() {
    // html5ever recovers from unclosed tags; we only require a string back.
    let _ = normalize_html("<div><p>unclosed <strong>bold");
    let _ = normalize_html("</p></div>");
    let _ = normalize_html("");
}

#[test]
fn turn_page_with_only_unclassifiable_turns_is_empty_extraction() {
    let html = r#"
        <div data-testid="conversation-turn-1"><div class="markdown">orphan content</div></div>
        <div data-testid="conversation-turn-2"><div>banner</div></div>
    "#;
    let err = export(html, "https://chatgpt.com/c/x").unwrap_err();
    assert!(matches!(err, Error::EmptyExtraction { .. }));
}

#[test]
fn whitespace_only_page_title_falls_through_to_sentinel() {
    let html = r#"
        <main><h1 role="heading">   </h1></main>
        <user-query>Tell me something long enough to pass the length gate, please.</user-query>
    "#;
    let result = export(html, "https://gemini.google.com/app").unwrap();
    assert_eq!(result.title, "untitled conversation");
}
