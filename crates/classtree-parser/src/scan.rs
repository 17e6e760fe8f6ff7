//! Lexical helpers shared by the extractors.
//!
//! These are heuristics over raw text, not a tokenizer: braces or comment
//! markers inside string literals are counted like any other character.

use regex::Regex;

/// Keywords that look like a method name or return type to the signature
/// patterns but introduce statements instead.
const NOT_METHOD_WORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "case", "catch", "return", "using",
    "lock", "sizeof", "typeof", "nameof", "new", "await", "throw", "yield", "goto", "fixed",
    "when", "class", "struct", "record", "interface", "enum", "delete", "synchronized",
];

/// Whether byte offset `pos` lies inside a `//` line comment or an unclosed
/// `/* */` block comment.
pub fn in_comment(text: &str, pos: usize) -> bool {
    let before = &text[..pos];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    if before[line_start..].contains("//") {
        return true;
    }
    match (before.rfind("/*"), before.rfind("*/")) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Net `{` minus `}` count from the start of `text` up to `pos`.
pub fn brace_balance(text: &str, pos: usize) -> i64 {
    text[..pos].bytes().fold(0i64, |depth, b| match b {
        b'{' => depth + 1,
        b'}' => depth - 1,
        _ => depth,
    })
}

/// End offset (exclusive) of the brace-balanced block opening at `open`.
///
/// The block ends right after the `}` that brings the running counter back
/// to zero. An unterminated block runs to the end of the text.
pub fn block_end(text: &str, open: usize) -> usize {
    let mut depth = 0usize;
    for (offset, b) in text.as_bytes()[open..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return open + offset + 1;
                }
            }
            _ => {}
        }
    }
    text.len()
}

/// Lines spanned by `text`: one more than its newline count.
pub fn lines_spanned(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Leading whitespace width, tabs counted as four columns.
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Split an inheritance list on commas.
///
/// Each token is trimmed, cut at the first `(` (constructor arguments in
/// C# records or Python calls), and stripped of any leading words listed in
/// `strip_words` such as C++ access specifiers. Empty tokens are dropped.
pub fn split_inheritance(list: &str, strip_words: &[&str]) -> Vec<String> {
    list.split(',')
        .filter_map(|raw| {
            let token = raw.split('(').next().unwrap_or("").trim();
            let mut words: Vec<&str> = token.split_whitespace().collect();
            while words.len() > 1 && strip_words.contains(&words[0]) {
                words.remove(0);
            }
            let cleaned = words.join(" ");
            (!cleaned.is_empty()).then_some(cleaned)
        })
        .collect()
}

/// `I` followed by an uppercase letter, checked on the last dotted segment.
pub fn is_interface_name(name: &str) -> bool {
    let simple = name.rsplit(['.', ':']).next().unwrap_or(name);
    let mut chars = simple.chars();
    chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Split a parsed inheritance list into base class and interfaces.
///
/// With `interface_prefix`, a list whose first token looks like an interface
/// name has no base class at all.
pub fn assign_bases(tokens: Vec<String>, interface_prefix: bool) -> (Option<String>, Vec<String>) {
    let Some(first) = tokens.first() else {
        return (None, Vec::new());
    };
    if interface_prefix && is_interface_name(first) {
        return (None, tokens);
    }
    let mut iter = tokens.into_iter();
    let base = iter.next();
    (base, iter.collect())
}

/// Count method signatures in `body`.
///
/// `pattern` must define a `name` group and may define a `ret` group. A
/// match without a return type only counts when it names a constructor or
/// destructor of `class_name`.
pub fn count_methods(body: &str, pattern: &Regex, class_name: &str) -> usize {
    pattern
        .captures_iter(body)
        .filter(|caps| {
            let Some(name) = caps.name("name").map(|m| m.as_str()) else {
                return false;
            };
            if NOT_METHOD_WORDS.contains(&name) {
                return false;
            }
            match caps.name("ret").map(|m| m.as_str()) {
                Some(ret) => !NOT_METHOD_WORDS.contains(&ret),
                None => pattern.capture_names().all(|n| n != Some("ret"))
                    || name == class_name
                    || name.trim_start_matches('~') == class_name,
            }
        })
        .count()
}
