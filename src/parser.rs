use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, BlockKind};

/// Two or more line breaks, allowing whitespace-only lines in between
static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap());

pub(crate) const FENCE: &str = "```";

/// Split a document into trimmed, non-empty blocks in document order
pub fn split_blocks(markdown: &str) -> Vec<&str> {
    BLANK_LINES_RE
        .split(markdown)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Decide the kind of a single block from its lines
pub fn classify(block: &str) -> BlockKind {
    let lines: Vec<&str> = block.lines().collect();
    let Some(first) = lines.first() else {
        return BlockKind::Paragraph;
    };

    if let Some((level, _)) = heading_marker(first) {
        return BlockKind::Heading(level);
    }

    if lines.len() >= 2 && *first == FENCE && lines.last() == Some(&FENCE) {
        return BlockKind::Code;
    }

    if first.starts_with('>') {
        return if lines.iter().all(|line| line.starts_with('>')) {
            BlockKind::Quote
        } else {
            BlockKind::Paragraph
        };
    }

    if let Some(bullet) = bullet_marker(first) {
        // Mixing `*` and `-` in one block demotes it
        return if lines.iter().all(|line| bullet_marker(line) == Some(bullet)) {
            BlockKind::UnorderedList
        } else {
            BlockKind::Paragraph
        };
    }

    if first.starts_with("1. ") {
        let numbered = lines
            .iter()
            .enumerate()
            .all(|(index, line)| strip_number(line, index + 1).is_some());
        return if numbered {
            BlockKind::OrderedList
        } else {
            BlockKind::Paragraph
        };
    }

    BlockKind::Paragraph
}

/// Split and classify a whole document
pub fn parse(markdown: &str) -> Vec<Block<'_>> {
    split_blocks(markdown)
        .into_iter()
        .map(|text| {
            let kind = classify(text);
            tracing::debug!(?kind, len = text.len(), "classified block");
            Block { text, kind }
        })
        .collect()
}

/// Level and remaining text of a `#`..`######` heading line
pub(crate) fn heading_marker(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = line[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, rest))
}

/// Bullet character of an unordered list line (`* ` or `- `)
pub(crate) fn bullet_marker(line: &str) -> Option<char> {
    ['*', '-']
        .into_iter()
        .find(|&bullet| line.strip_prefix(bullet).is_some_and(|rest| rest.starts_with(' ')))
}

/// Text after `N. ` when the line is numbered exactly `number`
pub(crate) fn strip_number(line: &str, number: usize) -> Option<&str> {
    let (prefix, rest) = line.split_once(". ")?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match prefix.parse::<usize>() {
        Ok(n) if n == number => Some(rest),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_heading_and_paragraph() {
        assert_eq!(split_blocks("# H\n\nP"), vec!["# H", "P"]);
    }

    #[test]
    fn split_keeps_single_newlines() {
        let markdown = "\n# This is a heading\n\nThis is a paragraph.\nStill the same one.\n\n\n\n\
                        * This is a list item\n* This is another list item\n";
        assert_eq!(
            split_blocks(markdown),
            vec![
                "# This is a heading",
                "This is a paragraph.\nStill the same one.",
                "* This is a list item\n* This is another list item",
            ]
        );
    }

    #[test]
    fn split_treats_whitespace_lines_as_blank() {
        assert_eq!(split_blocks("a\n   \nb\r\n\r\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_empty_document() {
        assert!(split_blocks("  \n\n \n").is_empty());
    }

    #[test]
    fn headings() {
        assert_eq!(classify("# This is a heading"), BlockKind::Heading(1));
        assert_eq!(classify("#### This is a heading"), BlockKind::Heading(4));
        assert_eq!(classify("###### six"), BlockKind::Heading(6));
        assert_eq!(classify("####### seven"), BlockKind::Paragraph);
        assert_eq!(classify("#no space"), BlockKind::Paragraph);
    }

    #[test]
    fn code() {
        assert_eq!(classify("```\nthis is code\n```"), BlockKind::Code);
        assert_eq!(classify("```\nunclosed"), BlockKind::Paragraph);
        assert_eq!(classify("```rust\nlet x = 1;\n```"), BlockKind::Paragraph);
    }

    #[test]
    fn quote() {
        assert_eq!(classify("> This is\n> a quote"), BlockKind::Quote);
        assert_eq!(classify(">tight\n>quote"), BlockKind::Quote);
        assert_eq!(classify("> this is a messed\nup quote"), BlockKind::Paragraph);
    }

    #[test]
    fn unordered() {
        assert_eq!(classify("* a\n* b"), BlockKind::UnorderedList);
        assert_eq!(classify("- a\n- b"), BlockKind::UnorderedList);
        assert_eq!(classify("* a\n- b"), BlockKind::Paragraph);
        assert_eq!(classify("*italic* start"), BlockKind::Paragraph);
    }

    #[test]
    fn ordered() {
        assert_eq!(classify("1. a\n2. b\n3. c"), BlockKind::OrderedList);
        assert_eq!(classify("1. a\n3. b"), BlockKind::Paragraph);
        assert_eq!(classify("2. a\n3. b"), BlockKind::Paragraph);
        assert_eq!(classify("1. a\nx. b"), BlockKind::Paragraph);
        assert_eq!(classify("1. a\n+2. b"), BlockKind::Paragraph);
    }

    #[test]
    fn paragraph_fallback() {
        assert_eq!(classify("Just some text"), BlockKind::Paragraph);
    }

    #[test]
    fn parse_keeps_order() {
        let blocks = parse("# T\n\n* a\n\ntext");
        let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Heading(1), BlockKind::UnorderedList, BlockKind::Paragraph]
        );
        assert_eq!(blocks[1].text, "* a");
    }
}
