//! Writing the rendered tree outside the terminal.

use crate::tree::TreeLine;
use anyhow::Context;
use classtree_core::hierarchy::Forest;
use classtree_core::stats::{DEEP_INHERITANCE_THRESHOLD, TreeStats};
use classtree_parser::Language;
use std::path::{Path, PathBuf};

/// Destination for a tree export requested from the navigator.
pub trait TreeExporter {
    /// Export the tree and return where it was written.
    fn export(
        &self,
        forest: &Forest,
        lines: &[TreeLine],
        stats: &TreeStats,
        language: Language,
    ) -> anyhow::Result<PathBuf>;
}

/// Writes the plain tree plus a statistics footer to a text file.
#[derive(Debug, Clone)]
pub struct TextExporter {
    dir: PathBuf,
}

impl TextExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn target(&self, language: Language) -> PathBuf {
        self.dir.join(format!("classtree-{}.txt", language.name()))
    }
}

impl TreeExporter for TextExporter {
    fn export(
        &self,
        forest: &Forest,
        lines: &[TreeLine],
        stats: &TreeStats,
        language: Language,
    ) -> anyhow::Result<PathBuf> {
        let path = self.target(language);
        std::fs::write(&path, render_text(forest, lines, stats))
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("exported {} tree lines to {}", lines.len(), path.display());
        Ok(path)
    }
}

/// Plain tree lines, a blank line, then the statistics summary.
pub fn render_text(forest: &Forest, lines: &[TreeLine], stats: &TreeStats) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.plain());
        out.push('\n');
    }
    out.push('\n');
    for line in summary_lines(forest, stats) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Human-readable statistics, one fact per line.
pub fn summary_lines(forest: &Forest, stats: &TreeStats) -> Vec<String> {
    let name = |id| forest.node(id).entity.full_name();
    let mut lines = vec![
        format!("Classes: {} ({} nested)", stats.total, stats.nested),
        format!(
            "Normal: {}  Abstract: {}  Sealed: {}  Static: {}",
            stats.normal, stats.abstract_count, stats.sealed, stats.static_count
        ),
        format!("Max inheritance depth: {}", stats.max_depth),
    ];
    if let Some(largest) = stats.largest {
        lines.push(format!(
            "Largest: {} ({} lines)",
            name(largest),
            forest.node(largest).entity.line_count
        ));
    }
    if !stats.deep.is_empty() {
        let deep: Vec<String> = stats.deep.iter().map(|&id| name(id)).collect();
        lines.push(format!(
            "Deep inheritance (depth >= {}): {}",
            DEEP_INHERITANCE_THRESHOLD,
            deep.join(", ")
        ));
    }
    if stats.deepest_chain_len() > 0 {
        lines.push("Deepest chains:".to_string());
        for chain in &stats.deepest_chains {
            let names: Vec<String> = chain.iter().map(|&id| name(id)).collect();
            lines.push(format!("  {}", names.join(" -> ")));
        }
    }
    lines
}

/// Directory exports go to: the configured one, else the scanned root.
pub fn export_dir(configured: Option<&Path>, root: &Path) -> PathBuf {
    configured.unwrap_or(root).to_path_buf()
}
