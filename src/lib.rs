mod block;
pub mod config;
mod error;
mod html;
mod inline;
mod node;
mod page;
mod parser;
pub mod site;

pub use block::{Block, BlockKind, Span};
pub use config::{Config, ConfigError, OnError};
pub use error::{Error, Result};
pub use html::render;
pub use inline::tokenize;
pub use node::{Node, Props, build};
pub use page::{extract_title, fill_template, render_page};
pub use parser::{classify, parse, split_blocks};
pub use site::{BuildReport, Site, SiteError};

/// Convert markdown to an HTML fragment wrapped in a `div`.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    let tree = build(markdown)?;
    render(&tree)
}
