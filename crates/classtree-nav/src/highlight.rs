//! Syntax highlighting for preview lines.

use classtree_parser::Language;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

const THEME: &str = "base16-ocean.dark";

/// Turns one line of source text into styled spans.
pub trait Highlighter {
    fn highlight(&self, line: &str, language: Language) -> Vec<Span<'static>>;
}

/// Emits the line unstyled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, line: &str, _language: Language) -> Vec<Span<'static>> {
        vec![Span::raw(line.to_string())]
    }
}

/// Highlighter backed by syntect's bundled syntaxes and themes.
///
/// Each line is highlighted on its own, so constructs spanning lines (block
/// comments, multi-line strings) are only coloured where a line shows them
/// whole.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Option<Theme>,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        let syntax_set = SyntaxSet::load_defaults_nonewlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(THEME);
        if theme.is_none() {
            tracing::warn!("syntax theme {THEME} unavailable, previews will be plain");
        }
        Self { syntax_set, theme }
    }

    fn extension(language: Language) -> &'static str {
        match language {
            Language::CSharp => "cs",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Python => "py",
        }
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, line: &str, language: Language) -> Vec<Span<'static>> {
        let (Some(theme), Some(syntax)) = (
            self.theme.as_ref(),
            self.syntax_set.find_syntax_by_extension(Self::extension(language)),
        ) else {
            return PlainHighlighter.highlight(line, language);
        };
        let mut highlighter = HighlightLines::new(syntax, theme);
        match highlighter.highlight_line(line, &self.syntax_set) {
            Ok(regions) => regions
                .into_iter()
                .map(|(style, text)| Span::styled(text.to_string(), convert_style(style)))
                .collect(),
            Err(e) => {
                tracing::debug!("highlighting failed: {e}");
                PlainHighlighter.highlight(line, language)
            }
        }
    }
}

fn convert_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        converted = converted.add_modifier(Modifier::UNDERLINED);
    }
    converted
}
