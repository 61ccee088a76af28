//! Page assembly: title lookup and template substitution.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::html::render;
use crate::node::build;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{ (?:Title|Content) \}\}").unwrap());

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Text of the first `# ` line in the document.
pub fn extract_title(markdown: &str) -> Result<&str> {
    split_title(markdown).map(|(title, _)| title)
}

/// Title text and the document with its title line removed.
fn split_title(markdown: &str) -> Result<(&str, String)> {
    let caps = TITLE_RE.captures(markdown).ok_or(Error::MissingTitle)?;
    let (Some(line), Some(title)) = (caps.get(0), caps.get(1)) else {
        return Err(Error::MissingTitle);
    };
    let body = [&markdown[..line.start()], &markdown[line.end()..]].concat();
    Ok((title.as_str().trim(), body))
}

/// Render `markdown` and place it into `template`.
///
/// The title line fills `{{ Title }}` and is left out of `{{ Content }}`,
/// unless nothing else would remain, in which case its heading is kept.
/// It is looked up before anything is rendered, so a document without one
/// fails with [`Error::MissingTitle`] even if its body is malformed.
pub fn render_page(markdown: &str, template: &str) -> Result<String> {
    let (title, body) = split_title(markdown)?;
    let mut tree = build(&body)?;
    if tree.children().is_empty() {
        tree = build(markdown)?;
    }
    let content = render(&tree)?;
    Ok(fill_template(template, title, &content))
}

/// Replace every title and content placeholder in one pass.
///
/// Values are inserted verbatim: a placeholder inside the title or content
/// is not expanded again.
pub fn fill_template(template: &str, title: &str, content: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            if &caps[0] == TITLE_PLACEHOLDER {
                title.to_string()
            } else {
                content.to_string()
            }
        })
        .into_owned()
}
