use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdpage::{Config, ConfigError, OnError, Site, SiteError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Render(#[from] mdpage::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Parser)]
#[command(name = "mdpage", version)]
#[command(about = "Convert a tree of Markdown files into HTML pages")]
struct Cli {
    /// Log progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the public directory from content and static files
    Build(BuildArgs),
    /// Print the HTML for a single Markdown file
    Render(RenderArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Config file
    #[arg(short, long, default_value = "mdpage.toml")]
    config: PathBuf,

    /// Markdown source directory
    #[arg(long)]
    content: Option<PathBuf>,

    /// Output directory
    #[arg(long)]
    public: Option<PathBuf>,

    /// Static asset directory
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,

    /// Page template
    #[arg(long)]
    template: Option<PathBuf>,

    /// Skip documents that fail instead of aborting
    #[arg(long)]
    skip_errors: bool,
}

#[derive(Args)]
struct RenderArgs {
    /// Input Markdown file
    input: PathBuf,

    /// Wrap the fragment in this page template
    #[arg(short, long)]
    template: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Build(args) => build(args),
        Command::Render(args) => render(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build(args: BuildArgs) -> Result<(), CliError> {
    let mut config = Config::load(&args.config)?;
    if let Some(content) = args.content {
        config.content_dir = content;
    }
    if let Some(public) = args.public {
        config.public_dir = public;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = static_dir;
    }
    if let Some(template) = args.template {
        config.template = template;
    }
    if args.skip_errors {
        config.on_error = OnError::Skip;
    }

    let report = Site::new(config).build()?;
    println!(
        "Generated {} pages, copied {} files{}",
        report.pages,
        report.assets,
        if report.skipped > 0 {
            format!(", skipped {}", report.skipped)
        } else {
            String::new()
        }
    );
    Ok(())
}

fn render(args: RenderArgs) -> Result<(), CliError> {
    let markdown = read_file(&args.input)?;

    let html = match args.template {
        Some(path) => {
            let template = read_file(&path)?;
            mdpage::render_page(&markdown, &template)?
        }
        None => mdpage::markdown_to_html(&markdown)?,
    };

    println!("{}", html);
    Ok(())
}
