//! Brace-delimited extractor for C#, Java and C++.
//!
//! Declarations are located with one regex per language. Nesting is decided
//! from brace balance, and each declaration's body is the brace-balanced
//! block that follows its header.

use crate::languages::Language;
use crate::scan;
use classtree_core::entity::ClassEntity;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::OnceLock;

const CPP_STRIP_WORDS: &[&str] = &["public", "protected", "private", "virtual"];

/// How a language spells the inheritance list after the class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InheritanceStyle {
    /// `: A, B` (C#, C++).
    Colon,
    /// `extends A implements B, C` (Java).
    ExtendsImplements,
}

/// Compiled patterns for one brace-delimited language.
#[derive(Debug)]
struct Patterns {
    declaration: Regex,
    method: Regex,
    namespace: Option<Regex>,
    pure_virtual: Option<Regex>,
}

/// Extractor configuration for one brace-delimited language.
#[derive(Debug, Clone, Copy)]
pub struct BraceSyntax {
    language: Language,
    style: InheritanceStyle,
    patterns: &'static Patterns,
}

/// A declaration accepted during the scan, kept for parent lookup.
struct Declared {
    name: String,
    body_start: usize,
    body_end: usize,
}

fn csharp_patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        declaration: Regex::new(
            r"(?P<mods>(?:\b(?:public|private|protected|internal|abstract|sealed|static|partial|unsafe|new|readonly|ref|file)\s+)*)\b(?:record\s+(?:class|struct)|class|struct|record)\s+(?P<name>[A-Za-z_]\w*)(?:\s*<[^{;]*?>)?(?:\s*\([^)]*\))?(?:\s*:\s*(?P<bases>[^{;]+?))?\s*(?:\bwhere\b[^{;]*)?(?P<open>[{;])",
        )
        .unwrap(),
        method: Regex::new(
            r"(?m)(?:^|[{;}])[ \t]*(?:(?:public|private|protected|internal|static|virtual|override|abstract|sealed|async|extern|unsafe|new|partial|readonly)\s+)*(?P<ret>[\w<>\[\],.?]+)\s+(?P<name>[A-Za-z_]\w*)\s*(?:<[^>(]*>)?\s*\(",
        )
        .unwrap(),
        namespace: Some(
            Regex::new(r"(?m)^[ \t]*namespace\s+(?P<name>[\w.]+)\s*(?P<open>[{;])").unwrap(),
        ),
        pure_virtual: None,
    })
}

fn java_patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        declaration: Regex::new(
            r"(?P<mods>(?:\b(?:public|private|protected|abstract|final|static|sealed|non-sealed|strictfp)\s+)*)\b(?:class|record)\s+(?P<name>[A-Za-z_]\w*)(?:\s*<[^{;]*?>)?(?:\s*\([^)]*\))?(?:\s+extends\s+(?P<extends>[^{;]+?))?(?:\s+implements\s+(?P<implements>[^{;]+?))?(?:\s+permits\s+[^{;]+?)?\s*(?P<open>\{)",
        )
        .unwrap(),
        method: Regex::new(
            r"(?m)(?:^|[{;}])[ \t]*(?:(?:public|private|protected|static|final|abstract|synchronized|native|default|strictfp)\s+)*(?:<[^>(]*>\s+)?(?P<ret>[\w<>\[\],.?]+)\s+(?P<name>[A-Za-z_]\w*)\s*\(",
        )
        .unwrap(),
        namespace: Some(Regex::new(r"(?m)^[ \t]*package\s+(?P<name>[\w.]+)\s*(?P<open>;)").unwrap()),
        pure_virtual: None,
    })
}

fn cpp_patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        declaration: Regex::new(
            r"(?P<enum>\benum\s+)?\b(?:class|struct)\s+(?:(?:alignas\s*\([^)]*\)|\[\[[^\]]*\]\]|[A-Z][A-Z0-9_]*_API)\s+)?(?P<name>[A-Za-z_]\w*)(?P<final>\s+final)?\s*(?::\s*(?P<bases>[^{;]+?))?\s*(?P<open>[{;])",
        )
        .unwrap(),
        method: Regex::new(
            r"(?m)(?:^|[{;}])[ \t]*(?:(?:virtual|static|inline|explicit|constexpr|friend)\s+)*(?:(?P<ret>[\w:<>,*&\[\]]+[*&]*)\s+)?(?P<name>~?[A-Za-z_]\w*)\s*\([^;{}]*\)\s*(?:const\b\s*)?(?:noexcept\b\s*)?(?:override\b\s*)?(?:final\b\s*)?(?:=\s*(?:0|default|delete)\s*)?(?:[{;:]|->)",
        )
        .unwrap(),
        namespace: Some(Regex::new(r"\bnamespace\s+(?P<name>[A-Za-z_][\w:]*)\s*(?P<open>\{)").unwrap()),
        pure_virtual: Some(Regex::new(r"\)\s*(?:const\s*)?=\s*0\s*;").unwrap()),
    })
}

impl BraceSyntax {
    pub fn csharp() -> Self {
        Self {
            language: Language::CSharp,
            style: InheritanceStyle::Colon,
            patterns: csharp_patterns(),
        }
    }

    pub fn java() -> Self {
        Self {
            language: Language::Java,
            style: InheritanceStyle::ExtendsImplements,
            patterns: java_patterns(),
        }
    }

    pub fn cpp() -> Self {
        Self {
            language: Language::Cpp,
            style: InheritanceStyle::Colon,
            patterns: cpp_patterns(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Extract every class-like declaration from `source`.
    pub fn extract(&self, path: &Path, source: &str) -> Vec<ClassEntity> {
        let namespaces = self.namespace_scopes(source);
        let mut declared: Vec<Declared> = Vec::new();
        let mut entities = Vec::new();

        for caps in self.patterns.declaration.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            let start = whole.start();
            if caps.name("enum").is_some() || scan::in_comment(source, start) {
                continue;
            }
            let (Some(name), Some(open)) = (caps.name("name"), caps.name("open")) else {
                continue;
            };
            let body_start = open.start();
            let body_end = if open.as_str() == "{" {
                scan::block_end(source, body_start)
            } else if self.language == Language::CSharp {
                // Positional record without a body.
                open.end()
            } else {
                // Forward declaration.
                continue;
            };
            let name = name.as_str().to_string();

            let parent_class_name = if scan::brace_balance(source, start) > 0 {
                declared
                    .iter()
                    .rev()
                    .find(|d| d.body_start < start && d.body_end > start)
                    .map(|d| d.name.clone())
            } else {
                None
            };

            let body = &source[body_start..body_end];
            let (base_class, interfaces) = self.inheritance(&caps);
            let mut entity = ClassEntity::new(name.clone(), path);
            entity.namespace = namespace_at(&namespaces, start);
            entity.base_class = base_class;
            entity.interfaces = interfaces;
            self.apply_modifiers(&mut entity, &caps, body);
            entity.method_count = scan::count_methods(body, &self.patterns.method, &name);
            entity.line_count = scan::lines_spanned(&source[start..body_end]);
            entity.parent_class_name = parent_class_name;

            declared.push(Declared {
                name,
                body_start,
                body_end,
            });
            entities.push(entity);
        }

        entities
    }

    fn inheritance(&self, caps: &Captures<'_>) -> (Option<String>, Vec<String>) {
        match self.style {
            InheritanceStyle::Colon => {
                let strip: &[&str] = if self.language == Language::Cpp {
                    CPP_STRIP_WORDS
                } else {
                    &[]
                };
                let tokens = caps
                    .name("bases")
                    .map(|m| scan::split_inheritance(m.as_str(), strip))
                    .unwrap_or_default();
                scan::assign_bases(tokens, self.language.uses_interface_prefix())
            }
            InheritanceStyle::ExtendsImplements => {
                let base = caps
                    .name("extends")
                    .and_then(|m| scan::split_inheritance(m.as_str(), &[]).into_iter().next());
                let interfaces = caps
                    .name("implements")
                    .map(|m| scan::split_inheritance(m.as_str(), &[]))
                    .unwrap_or_default();
                (base, interfaces)
            }
        }
    }

    fn apply_modifiers(&self, entity: &mut ClassEntity, caps: &Captures<'_>, body: &str) {
        let mods: Vec<&str> = caps
            .name("mods")
            .map(|m| m.as_str().split_whitespace().collect())
            .unwrap_or_default();
        match self.language {
            Language::CSharp => {
                entity.is_abstract = mods.contains(&"abstract");
                entity.is_sealed = mods.contains(&"sealed");
                entity.is_static = mods.contains(&"static");
            }
            Language::Java => {
                entity.is_abstract = mods.contains(&"abstract");
                entity.is_sealed = mods.contains(&"final") || mods.contains(&"sealed");
                entity.is_static = mods.contains(&"static");
            }
            Language::Cpp => {
                entity.is_sealed = caps.name("final").is_some();
                entity.is_abstract = self
                    .patterns
                    .pure_virtual
                    .as_ref()
                    .is_some_and(|re| re.is_match(body));
            }
            Language::Python => {}
        }
    }

    /// Namespace declarations outside comments, with the byte range each one covers.
    fn namespace_scopes(&self, source: &str) -> Vec<NamespaceScope> {
        let Some(pattern) = &self.patterns.namespace else {
            return Vec::new();
        };
        pattern
            .captures_iter(source)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.name("name")?.as_str().replace("::", ".");
                let open = caps.name("open")?;
                if scan::in_comment(source, whole.start()) {
                    return None;
                }
                let end = if open.as_str() == "{" {
                    scan::block_end(source, open.start())
                } else {
                    source.len()
                };
                Some(NamespaceScope {
                    name,
                    start: open.start(),
                    end,
                })
            })
            .collect()
    }
}

struct NamespaceScope {
    name: String,
    start: usize,
    end: usize,
}

/// Join every namespace enclosing `pos`, outermost first.
fn namespace_at(scopes: &[NamespaceScope], pos: usize) -> Option<String> {
    let parts: Vec<&str> = scopes
        .iter()
        .filter(|s| s.start < pos && s.end > pos)
        .map(|s| s.name.as_str())
        .collect();
    (!parts.is_empty()).then(|| parts.join("."))
}
