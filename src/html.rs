use crate::error::{Error, Result};
use crate::node::{Node, Props};

/// Tags rendered without a value or closing tag
const SELF_CLOSING: &[&str] = &["img"];

/// Serialize a node tree to HTML
pub fn render(node: &Node) -> Result<String> {
    let mut out = String::new();
    emit_node(node, &mut out)?;
    Ok(out)
}

fn emit_node(node: &Node, out: &mut String) -> Result<()> {
    match node {
        Node::Leaf { tag, value, props } => emit_leaf(tag.as_deref(), value, props, out),
        Node::Parent {
            tag,
            children,
            props,
        } => {
            if tag.is_empty() {
                return Err(Error::MissingTag);
            }
            if children.is_empty() {
                return Err(Error::EmptyParent { tag: tag.clone() });
            }
            open_tag(tag, props, out);
            for child in children {
                emit_node(child, out)?;
            }
            close_tag(tag, out);
            Ok(())
        }
    }
}

fn emit_leaf(tag: Option<&str>, value: &str, props: &Props, out: &mut String) -> Result<()> {
    match tag {
        Some(tag) if SELF_CLOSING.contains(&tag) => {
            open_tag(tag, props, out);
        }
        Some(tag) => {
            if value.is_empty() {
                return Err(Error::EmptyLeaf {
                    tag: format!("<{tag}>"),
                });
            }
            open_tag(tag, props, out);
            out.push_str(value);
            close_tag(tag, out);
        }
        None => {
            if value.is_empty() {
                return Err(Error::EmptyLeaf {
                    tag: "text".to_string(),
                });
            }
            // Raw text is emitted as-is
            out.push_str(value);
        }
    }
    Ok(())
}

fn open_tag(tag: &str, props: &Props, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (key, value) in props {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
