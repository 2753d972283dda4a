//! Splitting variant bodies into prose and code.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use serde::Serialize;

/// A piece of a variant body, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodySegment {
    /// Running text between code blocks, trimmed.
    Prose {
        /// The prose, with its markdown left intact.
        text: String,
    },
    /// A fenced code block.
    Code {
        /// First word of the fence info string, if any.
        language: Option<String>,
        /// Block contents, trimmed.
        source: String,
    },
}

/// Splits `text` on fenced code blocks. Whitespace-only prose is dropped.
pub(crate) fn split(text: &str) -> Vec<BodySegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut open: Option<(Option<String>, String)> = None;

    for (event, range) in Parser::new(text).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                push_prose(&mut segments, &text[cursor..range.start]);
                cursor = range.end;
                let language = info.split_whitespace().next().map(str::to_owned);
                open = Some((language, String::new()));
            }
            Event::Text(chunk) => {
                if let Some((_, source)) = open.as_mut() {
                    source.push_str(&chunk);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, source)) = open.take() {
                    segments.push(BodySegment::Code {
                        language,
                        source: source.trim().to_owned(),
                    });
                }
            }
            _ => {}
        }
    }

    push_prose(&mut segments, &text[cursor..]);
    segments
}

fn push_prose(segments: &mut Vec<BodySegment>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        segments.push(BodySegment::Prose {
            text: trimmed.to_owned(),
        });
    }
}
