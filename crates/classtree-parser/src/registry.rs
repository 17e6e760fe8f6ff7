//! Language → extractor table and directory-level extraction.

use crate::extract::{ExtractError, Extractor};
use crate::languages::Language;
use classtree_core::config::ScanConfig;
use classtree_core::entity::ClassEntity;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// Options controlling which files a directory scan visits.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub recursive: bool,
    pub respect_gitignore: bool,
    /// Glob patterns matched against the path relative to the scanned root.
    pub extra_excludes: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

impl From<&ScanConfig> for ScanOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            recursive: config.recursive,
            respect_gitignore: config.respect_gitignore,
            extra_excludes: config.extra_excludes.clone(),
        }
    }
}

/// A file that could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of extracting every matching file under a directory.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Entities in file order, then declaration order within each file.
    pub entities: Vec<ClassEntity>,
    pub files_scanned: usize,
    pub errors: Vec<FileError>,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Static table of one extractor per language.
#[derive(Debug, Clone)]
pub struct ExtractorRegistry {
    extractors: [Extractor; 4],
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            extractors: Language::ALL.map(Extractor::for_language),
        }
    }

    pub fn get(&self, language: Language) -> &Extractor {
        &self.extractors[language.index()]
    }

    /// Look up an extractor by language name or alias.
    pub fn for_name(&self, name: &str) -> Option<(Language, &Extractor)> {
        Language::from_name(name).map(|lang| (lang, self.get(lang)))
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.extractors.iter().map(Extractor::language)
    }

    /// Every file under `root` that belongs to `language`, sorted by path.
    pub fn collect_files(
        &self,
        root: &Path,
        language: Language,
        options: &ScanOptions,
    ) -> Result<Vec<PathBuf>, ExtractError> {
        check_root(root)?;
        let excludes = build_excludes(&options.extra_excludes)?;
        let excluded_dirs = language.excluded_dirs();
        let walk_root = root.to_path_buf();

        let mut builder = ignore::WalkBuilder::new(root);
        builder
            .hidden(true)
            .git_ignore(options.respect_gitignore)
            .git_exclude(options.respect_gitignore)
            .ignore(options.respect_gitignore)
            .parents(options.respect_gitignore)
            .require_git(false)
            .max_depth(if options.recursive { None } else { Some(1) })
            .filter_entry(move |entry| {
                let path = entry.path();
                if path == walk_root {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                if is_dir
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| excluded_dirs.contains(&name))
                {
                    return false;
                }
                let relative = path.strip_prefix(&walk_root).unwrap_or(path);
                !excludes.is_match(relative)
            });

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry under {}: {e}", root.display());
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if Language::from_extension(ext) == Some(language) {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        tracing::debug!(
            "found {} {} files under {}",
            files.len(),
            language.display_name(),
            root.display()
        );
        Ok(files)
    }

    /// Extract every matching file under `root`.
    ///
    /// `progress` receives `(done, total)` after each file, failed ones
    /// included. Per-file failures are recorded in the report; only an
    /// unusable root is an error.
    pub fn extract_directory(
        &self,
        root: &Path,
        language: Language,
        options: &ScanOptions,
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<ExtractionReport, ExtractError> {
        let files = self.collect_files(root, language, options)?;
        let extractor = self.get(language);
        let total = files.len();
        let mut report = ExtractionReport::default();

        for (idx, path) in files.iter().enumerate() {
            match extractor.extract_file(path) {
                Ok(entities) => {
                    tracing::debug!("{}: {} classes", path.display(), entities.len());
                    report.entities.extend(entities);
                }
                Err(e) => {
                    tracing::warn!("{e}");
                    report.errors.push(FileError {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
            report.files_scanned += 1;
            if let Some(callback) = progress.as_deref_mut() {
                callback(idx + 1, total);
            }
        }

        tracing::info!(
            "extracted {} classes from {} {} files ({} failed)",
            report.entities.len(),
            report.files_scanned,
            language.display_name(),
            report.errors.len()
        );
        Ok(report)
    }

    /// The language with the most matching files under `root`.
    ///
    /// Ties go to the earlier language in [`Language::ALL`]. Returns `None`
    /// when no supported file exists.
    pub fn detect_language(
        &self,
        root: &Path,
        options: &ScanOptions,
    ) -> Result<Option<Language>, ExtractError> {
        let mut best: Option<(Language, usize)> = None;
        for language in self.languages() {
            let count = self.collect_files(root, language, options)?.len();
            if count > 0 && best.is_none_or(|(_, top)| count > top) {
                best = Some((language, count));
            }
        }
        Ok(best.map(|(language, _)| language))
    }
}

fn check_root(root: &Path) -> Result<(), ExtractError> {
    if !root.exists() {
        return Err(ExtractError::MissingRoot(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ExtractError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

fn build_excludes(patterns: &[String]) -> Result<GlobSet, ExtractError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ExtractError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ExtractError::Pattern {
        pattern: patterns.join(","),
        source,
    })
}
