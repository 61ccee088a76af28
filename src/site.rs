//! Static site generation.
//!
//! Mirrors the content directory into the public directory: markdown files
//! are rendered to `.html` pages through the page template, everything else is
//! copied unchanged. Static assets are copied first, so a page with the same
//! relative path wins over an asset.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{Config, OnError};
use crate::error::Error;
use crate::page::render_page;

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    Document { path: PathBuf, source: Error },

    #[error("public directory {} overlaps {}", .public.display(), .other.display())]
    Overlap { public: PathBuf, other: PathBuf },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Counts of what a build produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Markdown files rendered to pages.
    pub pages: usize,
    /// Files copied unchanged, from both the static and content directories.
    pub assets: usize,
    /// Documents that failed and were skipped.
    pub skipped: usize,
}

/// Builds a static site from a [`Config`].
pub struct Site {
    config: Config,
}

impl Site {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Regenerate the public directory from scratch.
    ///
    /// The public directory is deleted first, so it must not contain, or sit
    /// inside, the content or static directory.
    pub fn build(&self) -> Result<BuildReport, SiteError> {
        let public = &self.config.public_dir;
        self.check_overlap()?;

        if public.exists() {
            tracing::debug!(path = %public.display(), "removing previous output");
            fs::remove_dir_all(public).map_err(io_error(public))?;
        }
        fs::create_dir_all(public).map_err(io_error(public))?;

        let mut report = BuildReport::default();

        let static_dir = &self.config.static_dir;
        if static_dir.is_dir() {
            report.assets += copy_tree(static_dir, public)?;
        } else {
            tracing::debug!(path = %static_dir.display(), "no static directory");
        }

        let template_path = &self.config.template;
        let template = fs::read_to_string(template_path).map_err(io_error(template_path))?;

        self.generate_dir(&self.config.content_dir, public, &template, &mut report)?;

        tracing::info!(
            pages = report.pages,
            assets = report.assets,
            skipped = report.skipped,
            "site built"
        );
        Ok(report)
    }

    fn check_overlap(&self) -> Result<(), SiteError> {
        let public = resolve(&self.config.public_dir)?;
        for dir in [&self.config.content_dir, &self.config.static_dir] {
            let other = resolve(dir)?;
            if other.starts_with(&public) || public.starts_with(&other) {
                return Err(SiteError::Overlap {
                    public: self.config.public_dir.clone(),
                    other: dir.clone(),
                });
            }
        }
        Ok(())
    }

    fn generate_dir(
        &self,
        source: &Path,
        dest: &Path,
        template: &str,
        report: &mut BuildReport,
    ) -> Result<(), SiteError> {
        for entry in sorted_entries(source)? {
            let path = entry.path();
            let target = dest.join(entry.file_name());

            if path.is_dir() {
                fs::create_dir_all(&target).map_err(io_error(&target))?;
                self.generate_dir(&path, &target, template, report)?;
            } else if path.extension().is_some_and(|ext| ext == "md") {
                let target = target.with_extension("html");
                match generate_page(&path, &target, template) {
                    Ok(()) => report.pages += 1,
                    Err(err @ SiteError::Document { .. }) if self.config.on_error == OnError::Skip => {
                        tracing::warn!(error = %err, "skipping document");
                        report.skipped += 1;
                    }
                    Err(err) => return Err(err),
                }
            } else {
                fs::copy(&path, &target).map_err(io_error(&path))?;
                report.assets += 1;
            }
        }
        Ok(())
    }
}

/// Render one markdown file into an HTML page at `dest`.
pub fn generate_page(source: &Path, dest: &Path, template: &str) -> Result<(), SiteError> {
    let markdown = fs::read_to_string(source).map_err(io_error(source))?;
    let html = render_page(&markdown, template).map_err(|source_err| SiteError::Document {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    fs::write(dest, html).map_err(io_error(dest))?;
    tracing::debug!(from = %source.display(), to = %dest.display(), "generated page");
    Ok(())
}

/// Recursively copy `source` into `dest`, returning the number of files copied.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;
    for entry in sorted_entries(source)? {
        let path = entry.path();
        let target = dest.join(entry.file_name());
        if path.is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
            copied += copy_tree(&path, &target)?;
        } else {
            fs::copy(&path, &target).map_err(io_error(&path))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Absolute form of `path` for comparisons.
///
/// The deepest existing ancestor is canonicalized (symlinks, `.` and `..`
/// resolved); components below it are kept as written.
fn resolve(path: &Path) -> Result<PathBuf, SiteError> {
    let absolute = std::path::absolute(path).map_err(io_error(path))?;
    for ancestor in absolute.ancestors() {
        if let Ok(base) = fs::canonicalize(ancestor) {
            let rest = absolute.strip_prefix(ancestor).unwrap_or(Path::new(""));
            return Ok(base.join(rest));
        }
    }
    Ok(absolute)
}

/// Directory entries in name order, for reproducible builds and logs.
fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>, SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(io_error(dir))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error(dir))?;
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries)
}
