//! Language-dispatched extraction entry points.

use crate::brace::BraceSyntax;
use crate::indent::IndentSyntax;
use crate::languages::Language;
use classtree_core::entity::ClassEntity;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} does not exist")]
    MissingRoot(PathBuf),
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// One extractor per supported language.
#[derive(Debug, Clone, Copy)]
pub enum Extractor {
    Brace(BraceSyntax),
    Indent(IndentSyntax),
}

impl Extractor {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::CSharp => Self::Brace(BraceSyntax::csharp()),
            Language::Java => Self::Brace(BraceSyntax::java()),
            Language::Cpp => Self::Brace(BraceSyntax::cpp()),
            Language::Python => Self::Indent(IndentSyntax::python()),
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Self::Brace(syntax) => syntax.language(),
            Self::Indent(syntax) => syntax.language(),
        }
    }

    /// Extract entities from in-memory source text.
    pub fn extract_source(&self, path: &Path, source: &str) -> Vec<ClassEntity> {
        match self {
            Self::Brace(syntax) => syntax.extract(path, source),
            Self::Indent(syntax) => syntax.extract(path, source),
        }
    }

    /// Read `path` and extract its entities.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<ClassEntity>, ExtractError> {
        let source = std::fs::read_to_string(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.extract_source(path, &source))
    }
}
