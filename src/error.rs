//! Errors raised while turning one markdown document into HTML.

/// Failure of the markdown pipeline for a single document.
///
/// The renderer variants (`EmptyLeaf`, `MissingTag`, `EmptyParent`) describe
/// an invalid node tree rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unterminated `{delimiter}` in inline text")]
    MalformedInline { delimiter: &'static str },

    #[error("leaf node {tag} has no value")]
    EmptyLeaf { tag: String },

    #[error("parent node has no tag")]
    MissingTag,

    #[error("parent node <{tag}> has no children")]
    EmptyParent { tag: String },

    #[error("document has no `# ` title line")]
    MissingTitle,
}

pub type Result<T> = std::result::Result<T, Error>;
