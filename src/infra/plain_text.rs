//! Plain-text extraction from note bodies for full-text matching.

use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("html tag regex is valid"));

/// Converts a markup body (HTML from the rich-text editor, or markdown) to
/// whitespace-normalized plain text.
///
/// HTML tags are replaced by spaces, common entities are decoded, and the
/// result is run through a markdown parser so emphasis markers, link
/// syntax and headings do not leak into search text.
///
/// # Examples
///
/// ```
/// use quill::infra::plain_text;
///
/// assert_eq!(plain_text("<p>Hello <b>world</b></p>"), "Hello world");
/// assert_eq!(plain_text("# Title\n\nSome *emphasis*"), "Title Some emphasis");
/// ```
pub fn plain_text(body: &str) -> String {
    let without_tags = HTML_TAG.replace_all(body, " ");
    let decoded = decode_entities(&without_tags);

    let mut text = String::with_capacity(decoded.len());
    for event in Parser::new(&decoded) {
        match event {
            Event::Text(t) | Event::Code(t) => {
                text.push_str(&t);
            }
            Event::End(
                Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link(..) | Tag::Image(..),
            ) => {}
            Event::SoftBreak | Event::HardBreak | Event::End(_) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
