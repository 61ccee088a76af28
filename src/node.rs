//! HTML node tree and its construction from classified blocks.

use crate::block::{Block, BlockKind, Span};
use crate::error::Result;
use crate::inline::tokenize;
use crate::parser::{self, FENCE};

/// Attributes in insertion order; the order is kept in the rendered markup.
pub type Props = Vec<(String, String)>;

/// A node of the HTML tree.
///
/// A `Leaf` without a tag is bare text. `img` leaves are self-closing and
/// carry no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        tag: Option<String>,
        value: String,
        props: Props,
    },
    Parent {
        tag: String,
        children: Vec<Node>,
        props: Props,
    },
}

impl Node {
    /// Untagged text.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            value: value.into(),
            props: Props::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            props: Props::new(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent {
            tag: tag.into(),
            children,
            props: Props::new(),
        }
    }

    /// Append an attribute.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Node::Leaf { props, .. } | Node::Parent { props, .. } => {
                props.push((key.into(), value.into()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } => tag.as_deref(),
            Node::Parent { tag, .. } => Some(tag),
        }
    }

    /// Children of a parent; a leaf has none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Parent { children, .. } => children,
        }
    }

    pub fn props(&self) -> &Props {
        match self {
            Node::Leaf { props, .. } | Node::Parent { props, .. } => props,
        }
    }
}

impl From<Span> for Node {
    fn from(span: Span) -> Self {
        match span {
            Span::Plain(text) => Node::text(text),
            Span::Bold(text) => Node::leaf("b", text),
            Span::Italic(text) => Node::leaf("i", text),
            Span::Code(text) => Node::leaf("code", text),
            Span::Link { text, url } => Node::leaf("a", text).with_prop("href", url),
            Span::Image { alt, url } => Node::leaf("img", "")
                .with_prop("src", url)
                .with_prop("alt", alt),
        }
    }
}

/// Build the node tree for a whole document, rooted at a `div`.
///
/// Blocks and list items whose inline text yields no spans (e.g. `# ****`)
/// are left out, so every `Parent` in the tree has at least one child. Only
/// a document without any content gives an empty root.
pub fn build(markdown: &str) -> Result<Node> {
    let mut children = Vec::new();
    for block in parser::parse(markdown) {
        match block_to_node(&block)? {
            Some(node) => children.push(node),
            None => tracing::debug!(kind = ?block.kind, "dropping block without content"),
        }
    }
    Ok(Node::parent("div", children))
}

fn block_to_node(block: &Block) -> Result<Option<Node>> {
    let text = block.text;
    match block.kind {
        BlockKind::Heading(level) => heading_to_node(text, level),
        BlockKind::Code => Ok(code_to_node(text)),
        BlockKind::Quote => quote_to_node(text),
        BlockKind::UnorderedList => list_to_node(text, "ul", |line, _| {
            line.get(2..).unwrap_or_default()
        }),
        BlockKind::OrderedList => list_to_node(text, "ol", |line, number| {
            parser::strip_number(line, number).unwrap_or_default()
        }),
        BlockKind::Paragraph => paragraph_to_node(text),
    }
}

fn inline_children(text: &str) -> Result<Vec<Node>> {
    Ok(tokenize(text)?.into_iter().map(Node::from).collect())
}

/// `Parent(tag, children)`, or nothing when there are no children.
fn non_empty(tag: impl Into<String>, children: Vec<Node>) -> Option<Node> {
    (!children.is_empty()).then(|| Node::parent(tag, children))
}

fn join_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.collect::<Vec<_>>().join(" ")
}

fn heading_to_node(text: &str, level: u8) -> Result<Option<Node>> {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default();
    let title = parser::heading_marker(first).map_or(first, |(_, rest)| rest);
    // Continuation lines belong to the heading text
    let content = join_lines(std::iter::once(title).chain(lines));
    Ok(non_empty(format!("h{level}"), inline_children(&content)?))
}

fn code_to_node(text: &str) -> Option<Node> {
    let lines: Vec<&str> = text.lines().collect();
    let interior = match lines.as_slice() {
        [first, inner @ .., last] if *first == FENCE && *last == FENCE => inner.join("\n"),
        _ => text.to_string(),
    };
    if interior.is_empty() {
        return None;
    }
    Some(Node::parent("pre", vec![Node::parent("code", vec![Node::text(interior)])]))
}

fn quote_to_node(text: &str) -> Result<Option<Node>> {
    let content = join_lines(text.lines().map(|line| {
        let line = line.strip_prefix('>').unwrap_or(line);
        line.strip_prefix(' ').unwrap_or(line)
    }));
    Ok(non_empty("blockquote", inline_children(&content)?))
}

fn list_to_node(
    text: &str,
    tag: &str,
    strip: impl Fn(&str, usize) -> &str,
) -> Result<Option<Node>> {
    let mut items = Vec::new();
    for (index, line) in text.lines().enumerate() {
        // Blank items (`* ` on its own) are skipped
        if let Some(item) = non_empty("li", inline_children(strip(line, index + 1))?) {
            items.push(item);
        }
    }
    Ok(non_empty(tag, items))
}

fn paragraph_to_node(text: &str) -> Result<Option<Node>> {
    let content = join_lines(text.lines().map(str::trim));
    let mut children = inline_children(&content)?;
    // A lone text span becomes the paragraph's own value
    if children.len() == 1 && children[0].tag().is_none() {
        if let Some(Node::Leaf { value, .. }) = children.pop() {
            return Ok(Some(Node::leaf("p", value)));
        }
    }
    Ok(non_empty("p", children))
}
