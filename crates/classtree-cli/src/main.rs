//! CLI binary for classtree: scan a source directory and explore its class forest.

use anyhow::{Context, Result};
use clap::Parser;
use classtree_core::config::ClasstreeConfig;
use classtree_core::hierarchy::Forest;
use classtree_core::stats::TreeStats;
use classtree_nav::export::{export_dir, render_text};
use classtree_nav::{App, SyntectHighlighter, TextExporter, render_tree};
use classtree_parser::{ExtractionReport, ExtractorRegistry, Language, ScanOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "classtree",
    version,
    about = "Browse the class inheritance forest of a source tree"
)]
struct Cli {
    /// Directory to scan
    path: PathBuf,

    /// Source language: csharp, java, cpp or python (auto-detected if not specified)
    #[arg(short, long)]
    lang: Option<String>,

    /// Only scan files directly inside PATH
    #[arg(long)]
    no_recursive: bool,

    /// Glob patterns to exclude, relative to PATH (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// Print the tree and a summary instead of opening the navigator
    #[arg(long, conflicts_with = "json")]
    print: bool,

    /// Print the extracted classes as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn interactive(&self) -> bool {
        !self.print && !self.json
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.interactive() { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = std::fs::canonicalize(&cli.path)
        .with_context(|| format!("cannot open {}", cli.path.display()))?;
    let mut config = ClasstreeConfig::load(&root).context("failed to load classtree config")?;
    if cli.no_recursive {
        config.scan.recursive = false;
    }
    config.scan.extra_excludes.extend(cli.exclude.iter().cloned());
    let options = ScanOptions::from(&config.scan);

    let registry = ExtractorRegistry::new();
    let language = resolve_language(&registry, &root, cli.lang.as_deref(), &options)?;
    let report = extract_with_progress(&registry, &root, language, &options)?;
    if !report.errors.is_empty() {
        eprintln!("warning: {} files could not be read", report.errors.len());
    }
    if report.is_empty() {
        println!("nothing to display");
        return Ok(());
    }

    let forest = Forest::build(report.entities);

    if cli.json {
        let entities: Vec<_> = forest.iter().map(|(_, node)| &node.entity).collect();
        let json = serde_json::to_string_pretty(&entities).context("failed to serialize classes")?;
        println!("{json}");
        return Ok(());
    }

    if cli.print {
        let stats = TreeStats::aggregate(&forest);
        print!("{}", render_text(&forest, &render_tree(&forest), &stats));
        return Ok(());
    }

    let exporter = TextExporter::new(export_dir(config.view.export_dir.as_deref(), &root));
    let mut app = App::new(
        root,
        language,
        forest,
        config.view,
        Box::new(SyntectHighlighter::new()),
    );
    classtree_nav::terminal::run(&mut app, &exporter)
}

/// The requested language, or the most common one under `root`.
fn resolve_language(
    registry: &ExtractorRegistry,
    root: &Path,
    requested: Option<&str>,
    options: &ScanOptions,
) -> Result<Language> {
    if let Some(name) = requested {
        let (language, _) = registry.for_name(name).with_context(|| {
            let known: Vec<&str> = registry.languages().map(Language::name).collect();
            format!("unknown language '{name}' (expected one of: {})", known.join(", "))
        })?;
        return Ok(language);
    }

    match registry.detect_language(root, options)? {
        Some(language) => {
            tracing::info!("detected language: {}", language.display_name());
            Ok(language)
        }
        None => anyhow::bail!(
            "no supported source files under {}; pass --lang to choose a language",
            root.display()
        ),
    }
}

fn extract_with_progress(
    registry: &ExtractorRegistry,
    root: &Path,
    language: Language,
    options: &ScanOptions,
) -> Result<ExtractionReport> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Scanning [{bar:30.cyan/blue}] {pos}/{len} files")
            .expect("valid template")
            .progress_chars("##-"),
    );
    let mut on_progress = |done: usize, total: usize| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    };
    let report = registry
        .extract_directory(root, language, options, Some(&mut on_progress))
        .with_context(|| format!("failed to scan {}", root.display()))?;
    pb.finish_and_clear();
    Ok(report)
}
