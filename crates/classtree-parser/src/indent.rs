//! Indentation-delimited extractor for Python.
//!
//! A class body is every following line indented deeper than the `class`
//! line; blank and comment-only lines never end a body.

use crate::languages::Language;
use crate::scan;
use classtree_core::entity::ClassEntity;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Extractor configuration for an indentation-delimited language.
#[derive(Debug, Clone, Copy)]
pub struct IndentSyntax {
    language: Language,
}

/// A declaration accepted during the scan, kept for parent lookup.
struct Declared {
    name: String,
    indent: usize,
    first_line: usize,
    last_line: usize,
}

fn class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?m)^(?P<indent>[ \t]*)class[ \t]+(?P<name>[A-Za-z_]\w*)[ \t]*(?:\[[^\]]*\])?[ \t]*(?:\((?P<bases>[^)]*)\))?[ \t]*:",
        )
        .unwrap()
    })
}

fn def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*(?:async[ \t]+)?def[ \t]+(?P<name>\w+)[ \t]*\(").unwrap())
}

fn abstract_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*@(?:abc\.)?abstractmethod\b").unwrap())
}

fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

impl IndentSyntax {
    pub fn python() -> Self {
        Self {
            language: Language::Python,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Extract every class declaration from `source`.
    pub fn extract(&self, path: &Path, source: &str) -> Vec<ClassEntity> {
        let lines: Vec<&str> = source.lines().collect();
        let line_starts = line_offsets(source);
        let mut declared: Vec<Declared> = Vec::new();
        let mut entities = Vec::new();

        for caps in class_re().captures_iter(source) {
            let (Some(whole), Some(name), Some(indent)) =
                (caps.get(0), caps.name("name"), caps.name("indent"))
            else {
                continue;
            };
            let first_line = line_index(&line_starts, whole.start());
            // Multi-line base lists end on a later line than they start.
            let header_line = line_index(&line_starts, whole.end().saturating_sub(1));
            let own_indent = scan::indent_width(indent.as_str());
            let last_line = extent_end(&lines, header_line, own_indent);

            let parent_class_name = declared
                .iter()
                .rev()
                .find(|d| d.indent < own_indent && d.first_line < first_line && d.last_line >= first_line)
                .map(|d| d.name.clone());

            let body = lines
                .get(first_line..=last_line.min(lines.len().saturating_sub(1)))
                .map(|slice| slice.join("\n"))
                .unwrap_or_default();

            let raw_bases = caps.name("bases").map_or("", |m| m.as_str());
            let (bases, abstract_meta) = parse_bases(raw_bases);
            let mut entity = ClassEntity::new(name.as_str(), path);
            entity.is_abstract = abstract_meta
                || bases.iter().any(|b| b == "ABC" || b == "abc.ABC")
                || abstract_marker_re().is_match(&body);
            let mut bases = bases.into_iter();
            entity.base_class = bases.next();
            entity.interfaces = bases.collect();
            entity.method_count = def_re().captures_iter(&body).count();
            entity.line_count = last_line - first_line + 1;
            entity.parent_class_name = parent_class_name;

            declared.push(Declared {
                name: name.as_str().to_string(),
                indent: own_indent,
                first_line,
                last_line,
            });
            entities.push(entity);
        }

        entities
    }
}

/// Split a Python base list, dropping keyword arguments and `object`.
/// Also reports whether an `ABCMeta` metaclass was given.
fn parse_bases(raw: &str) -> (Vec<String>, bool) {
    let mut abstract_meta = false;
    let bases = raw
        .split(',')
        .map(str::trim)
        .filter(|token| {
            if let Some((key, value)) = token.split_once('=') {
                if key.trim() == "metaclass" && value.trim().ends_with("ABCMeta") {
                    abstract_meta = true;
                }
                return false;
            }
            !token.is_empty() && *token != "object"
        })
        .map(String::from)
        .collect();
    (bases, abstract_meta)
}

/// Byte offset of each line start.
fn line_offsets(source: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn line_index(line_starts: &[usize], offset: usize) -> usize {
    line_starts.partition_point(|&start| start <= offset).saturating_sub(1)
}

/// Last line of the body that starts after `header_line`: the line before the
/// first significant line indented at or below `own_indent`.
fn extent_end(lines: &[&str], header_line: usize, own_indent: usize) -> usize {
    let mut last = header_line;
    for (idx, line) in lines.iter().enumerate().skip(header_line + 1) {
        if is_blank_or_comment(line) {
            last = idx;
            continue;
        }
        if scan::indent_width(line) <= own_indent {
            break;
        }
        last = idx;
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bases_drops_keywords_and_object() {
        let (bases, meta) = parse_bases("Base, Mixin, metaclass=abc.ABCMeta");
        assert_eq!(bases, vec!["Base", "Mixin"]);
        assert!(meta);

        let (bases, meta) = parse_bases("object");
        assert!(bases.is_empty());
        assert!(!meta);
    }

    #[test]
    fn test_line_index() {
        let starts = line_offsets("ab\ncd\n\nef");
        assert_eq!(starts, vec![0, 3, 6, 7]);
        assert_eq!(line_index(&starts, 0), 0);
        assert_eq!(line_index(&starts, 4), 1);
        assert_eq!(line_index(&starts, 7), 3);
    }

    #[test]
    fn test_extent_end_skips_blank_lines() {
        let lines = vec!["class A:", "    x = 1", "", "    # note", "    y = 2", "z = 3"];
        assert_eq!(extent_end(&lines, 0, 0), 4);
    }
}
