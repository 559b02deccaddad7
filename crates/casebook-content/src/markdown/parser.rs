//! Markdown structure parsing utilities.
//!
//! This module turns markdown blocks into text using `pulldown-cmark`:
//!
//! - Strip formatting to get flat plain text (search, word counts)
//! - Render blocks as terminal-friendly text (paragraphs, lists, code)
//!
//! # Example
//!
//! ```rust
//! use casebook_content::markdown::parser::{extract_text_content, word_count};
//!
//! let content = "# Title\n\nSome **bold** text.";
//! assert_eq!(extract_text_content(content), "Title Some bold text.");
//! assert_eq!(word_count(content), 4);
//! ```

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Extract plain text content from markdown, stripping all formatting.
///
/// Removes headings markers, bold, italic, links, code blocks, etc. Returns
/// just the text content on a single whitespace-normalized line.
///
/// # Example
///
/// ```rust
/// use casebook_content::markdown::parser::extract_text_content;
///
/// let content = "# Title\n\nSome **bold** and *italic* text.\n\n```rust\ncode\n```";
/// let text = extract_text_content(content);
/// assert!(text.contains("Some bold and italic text"));
/// assert!(!text.contains("code"));
/// ```
pub fn extract_text_content(content: &str) -> String {
    let parser = Parser::new(content);
    let mut text_content = String::new();
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
            }
            Event::Text(text) | Event::Code(text) if !in_code_block => {
                if !text_content.is_empty() && !text_content.ends_with(' ') {
                    text_content.push(' ');
                }
                text_content.push_str(&text);
            }
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_)) => {
                if !text_content.is_empty() && !text_content.ends_with(' ') {
                    text_content.push(' ');
                }
            }
            _ => {}
        }
    }

    normalize_whitespace(&text_content)
}

/// Count the words of the plain text behind some markdown.
pub fn word_count(content: &str) -> usize {
    extract_text_content(content).split_whitespace().count()
}

/// Render markdown blocks as plain text for a terminal.
///
/// Paragraphs and headings are separated by blank lines, list items get a
/// `- ` bullet (nested items are indented), code blocks are indented by four
/// spaces, and inline formatting is dropped.
///
/// # Example
///
/// ```rust
/// use casebook_content::markdown::parser::render_plain_text;
///
/// let rendered = render_plain_text("Intro with **bold**.\n\n* one\n* two\n");
/// assert_eq!(rendered, "Intro with bold.\n\n- one\n- two");
/// ```
pub fn render_plain_text(content: &str) -> String {
    let mut out = String::new();
    let mut list_depth = 0usize;
    let mut in_code_block = false;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::List(_)) => {
                if list_depth > 0 {
                    start_line(&mut out);
                }
                list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    end_block(&mut out);
                }
            }
            Event::Start(Tag::Item) => {
                start_line(&mut out);
                out.push_str(&"  ".repeat(list_depth.saturating_sub(1)));
                out.push_str("- ");
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                end_block(&mut out);
            }
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Heading(_)) => {
                if list_depth == 0 {
                    end_block(&mut out);
                } else {
                    start_line(&mut out);
                }
            }
            Event::Text(text) if in_code_block => {
                for line in text.lines() {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            Event::Text(text) | Event::Code(text) => {
                out.push_str(&text);
            }
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

/// Start a new line unless already at one.
fn start_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Close a block with a blank line.
fn end_block(out: &mut String) {
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    if out.ends_with('\n') {
        out.push('\n');
    } else {
        out.push_str("\n\n");
    }
}

/// Normalize whitespace: collapse runs, trim ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Tests
// ============================================================================
