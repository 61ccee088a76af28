//! Inline span tokenizer.
//!
//! Text is split by a fixed sequence of passes: images, links, code, bold,
//! italic. Every pass only looks at spans that are still plain, so markers
//! inside an earlier match (e.g. `*` inside a code span) are left alone.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::Span;
use crate::error::{Error, Result};

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Split raw inline text into typed spans.
pub fn tokenize(text: &str) -> Result<Vec<Span>> {
    let spans = vec![Span::Plain(text.to_string())];
    let spans = split_matches(spans, &IMAGE_RE, |alt, url| Span::Image { alt, url });
    let spans = split_matches(spans, &LINK_RE, |text, url| Span::Link { text, url });
    let spans = split_delimited(spans, "`", Span::Code)?;
    let spans = split_delimited(spans, "**", Span::Bold)?;
    split_delimited(spans, "*", Span::Italic)
}

/// Extract every `pattern` match from plain spans, left to right.
///
/// Text between matches stays plain; empty stretches are dropped.
fn split_matches(
    spans: Vec<Span>,
    pattern: &Regex,
    make: impl Fn(String, String) -> Span,
) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut rest = 0;
        for caps in pattern.captures_iter(&text) {
            let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            push_plain(&mut out, &text[rest..whole.start()]);
            out.push(make(label.as_str().to_string(), url.as_str().to_string()));
            rest = whole.end();
        }
        push_plain(&mut out, &text[rest..]);
    }

    out
}

/// Split plain spans on `delimiter`; odd-numbered pieces become `make` spans.
///
/// An unpaired delimiter is rejected instead of being kept as literal text.
fn split_delimited(
    spans: Vec<Span>,
    delimiter: &'static str,
    make: fn(String) -> Span,
) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let pieces: Vec<&str> = text.split(delimiter).collect();
        if pieces.len() % 2 == 0 {
            return Err(Error::MalformedInline { delimiter });
        }

        for (index, piece) in pieces.into_iter().enumerate() {
            if piece.is_empty() {
                continue;
            }
            if index % 2 == 0 {
                out.push(Span::Plain(piece.to_string()));
            } else {
                out.push(make(piece.to_string()));
            }
        }
    }

    Ok(out)
}

fn push_plain(out: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        out.push(Span::Plain(text.to_string()));
    }
}
