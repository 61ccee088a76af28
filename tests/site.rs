use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use mdpage::{Config, OnError, Site, SiteError};

const TEMPLATE: &str = "<html><title>{{ Title }}</title><body>{{ Content }}</body></html>";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site_in(root: &Path, on_error: OnError) -> Site {
    let mut config = Config::default().relative_to(root);
    config.on_error = on_error;
    Site::new(config)
}

fn scaffold() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("template.html"), TEMPLATE);
    write(&root.join("static/css/site.css"), "body {}");
    write(&root.join("content/index.md"), "# Home\n\nWelcome *in*");
    write(
        &root.join("content/blog/post.md"),
        "# Post\n\n* one\n* two\n\n![cat](/img/cat.png)",
    );
    write(&root.join("content/blog/photo.jpg"), "jpeg");
    dir
}

#[test]
fn mirrors_content_into_public() {
    let dir = scaffold();
    let root = dir.path();

    let report = site_in(root, OnError::Abort).build().unwrap();
    assert_eq!((report.pages, report.assets, report.skipped), (2, 2, 0));

    let public = root.join("public");
    assert_eq!(
        fs::read_to_string(public.join("index.html")).unwrap(),
        "<html><title>Home</title><body><div><p>Welcome <i>in</i></p></div></body></html>"
    );
    assert_eq!(
        fs::read_to_string(public.join("blog/post.html")).unwrap(),
        "<html><title>Post</title><body><div>\
         <ul><li>one</li><li>two</li></ul>\
         <p><img src=\"/img/cat.png\" alt=\"cat\"></p>\
         </div></body></html>"
    );
    assert_eq!(fs::read_to_string(public.join("blog/photo.jpg")).unwrap(), "jpeg");
    assert_eq!(fs::read_to_string(public.join("css/site.css")).unwrap(), "body {}");
    assert!(!public.join("blog/post.md").exists());
}

#[test]
fn stale_output_is_removed() {
    let dir = scaffold();
    let root = dir.path();
    write(&root.join("public/old.html"), "stale");

    site_in(root, OnError::Abort).build().unwrap();
    assert!(!root.join("public/old.html").exists());
}

#[test]
fn failing_document_aborts_by_default() {
    let dir = scaffold();
    let root = dir.path();
    write(&root.join("content/untitled.md"), "no title here");

    let err = site_in(root, OnError::Abort).build().unwrap_err();
    assert!(matches!(
        err,
        SiteError::Document { source: mdpage::Error::MissingTitle, .. }
    ));
}

#[test]
fn failing_document_can_be_skipped() {
    let dir = scaffold();
    let root = dir.path();
    write(&root.join("content/broken.md"), "# Broken\n\nunterminated `code");

    let report = site_in(root, OnError::Skip).build().unwrap();
    assert_eq!((report.pages, report.skipped), (2, 1));
    assert!(!root.join("public/broken.html").exists());
    assert!(root.join("public/index.html").exists());
}

#[test]
fn missing_static_dir_is_fine() {
    let dir = scaffold();
    let root = dir.path();
    fs::remove_dir_all(root.join("static")).unwrap();

    let report = site_in(root, OnError::Abort).build().unwrap();
    assert_eq!(report.assets, 1);
}

#[test]
fn missing_template_is_an_io_error() {
    let dir = scaffold();
    let root = dir.path();
    fs::remove_file(root.join("template.html")).unwrap();

    let err = site_in(root, OnError::Abort).build().unwrap_err();
    assert!(matches!(err, SiteError::Io { .. }));
}

#[test]
fn loads_config_file() {
    let dir = scaffold();
    let root = dir.path();
    write(&root.join("mdpage.toml"), "public_dir = \"dist\"\n");

    let config = Config::load(&root.join("mdpage.toml")).unwrap();
    Site::new(config).build().unwrap();
    assert!(root.join("dist/index.html").exists());
}

fn assert_overlap_keeps_sources(site: Site, root: &Path) {
    let err = site.build().unwrap_err();
    assert!(matches!(err, SiteError::Overlap { .. }), "unexpected error: {err}");
    assert!(root.join("content/index.md").exists());
    assert!(root.join("content/blog/post.md").exists());
}

#[test]
fn public_containing_content_is_rejected() {
    let dir = scaffold();
    let root = dir.path();
    let mut config = site_in(root, OnError::Abort).config().clone();
    config.public_dir = root.join("content/..");

    assert_overlap_keeps_sources(Site::new(config), root);
}

#[test]
fn public_inside_content_is_rejected() {
    let dir = scaffold();
    let root = dir.path();
    let mut config = site_in(root, OnError::Abort).config().clone();
    config.public_dir = root.join("content/public");

    assert_overlap_keeps_sources(Site::new(config), root);
    assert!(!root.join("content/public").exists());
}

#[test]
fn public_inside_static_is_rejected() {
    let dir = scaffold();
    let root = dir.path();
    let mut config = site_in(root, OnError::Abort).config().clone();
    config.public_dir = root.join("static/out");

    assert_overlap_keeps_sources(Site::new(config), root);
    assert!(root.join("static/css/site.css").exists());
}

#[test]
fn relative_dot_public_is_rejected() {
    let dir = scaffold();
    let root = dir.path();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(root).unwrap();

    let mut config = Config::default();
    config.public_dir = ".".into();
    let result = Site::new(config).build();

    std::env::set_current_dir(previous).unwrap();
    assert!(matches!(result, Err(SiteError::Overlap { .. })));
    assert!(root.join("content/index.md").exists());
}
