//! Supported languages and their file-level metadata.

use std::fmt;

/// A source language with a class extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    CSharp,
    Java,
    Cpp,
    Python,
}

impl Language {
    /// Every supported language, in declaration order.
    pub const ALL: [Language; 4] = [
        Language::CSharp,
        Language::Java,
        Language::Cpp,
        Language::Python,
    ];

    pub fn all() -> &'static [Language] {
        &Self::ALL
    }

    /// Position within [`Language::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical lowercase identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::CSharp => "csharp",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::Python => "python",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::CSharp => "C#",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::Python => "Python",
        }
    }

    /// Resolve a language identifier or common alias, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "c#" => Some(Self::CSharp),
            "java" => Some(Self::Java),
            "cpp" | "c++" | "cxx" | "cc" => Some(Self::Cpp),
            "python" | "py" => Some(Self::Python),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// File extensions (without dot) scanned for this language.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::CSharp => &["cs"],
            Self::Java => &["java"],
            Self::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx", "h"],
            Self::Python => &["py"],
        }
    }

    /// Directory names never descended into (build output, caches, venvs).
    pub fn excluded_dirs(self) -> &'static [&'static str] {
        match self {
            Self::CSharp => &["bin", "obj"],
            Self::Java => &["target", "build", "out"],
            Self::Cpp => &["build", "out", "cmake-build-debug", "cmake-build-release"],
            Self::Python => &["__pycache__", "venv", ".venv", "build", "dist", ".tox"],
        }
    }

    /// Whether `I` + uppercase names in an inheritance list are treated as interfaces.
    pub fn uses_interface_prefix(self) -> bool {
        matches!(self, Self::CSharp | Self::Cpp)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
