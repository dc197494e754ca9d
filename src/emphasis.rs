use std::io::IsTerminal;

/// Visual role of a piece of diagnostic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Diagnostic titles such as "Module not found". Rendered bold red.
    Error,
    /// File and page paths in labels. Rendered cyan.
    Path,
    /// Line and column numbers in labels. Rendered yellow.
    Position,
    /// The unresolved request inside a message. Rendered green.
    Highlight,
}

/// Applies a [`Style`] to a piece of text.
///
/// The classifier only ever talks to this trait, so swapping ANSI escapes for
/// plain text changes presentation and nothing else.
pub trait Emphasis {
    fn emphasize(&self, text: &str, style: Style) -> String;
}

/// Raw ANSI escape sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiEmphasis;

impl Emphasis for AnsiEmphasis {
    fn emphasize(&self, text: &str, style: Style) -> String {
        let code = match style {
            Style::Error => "1;31",
            Style::Path => "36",
            Style::Position => "33",
            Style::Highlight => "32",
        };
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

/// Returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainEmphasis;

impl Emphasis for PlainEmphasis {
    fn emphasize(&self, text: &str, _style: Style) -> String {
        text.to_owned()
    }
}

/// When to colorize output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colorize when stdout is a terminal (default).
    #[default]
    Auto,
    /// Always emit ANSI escapes.
    Always,
    /// Never emit ANSI escapes.
    Never,
}

impl ColorMode {
    /// Pick the emphasis implementation for this mode.
    pub fn emphasis(self) -> Box<dyn Emphasis> {
        let use_color = match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };
        if use_color {
            Box::new(AnsiEmphasis)
        } else {
            Box::new(PlainEmphasis)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_emphasis_is_identity() {
        for style in [Style::Error, Style::Path, Style::Position, Style::Highlight] {
            assert_eq!(PlainEmphasis.emphasize("lodash", style), "lodash");
        }
    }

    #[test]
    fn test_ansi_styles_are_distinct() {
        let rendered: Vec<String> = [Style::Error, Style::Path, Style::Position, Style::Highlight]
            .iter()
            .map(|&s| AnsiEmphasis.emphasize("x", s))
            .collect();
        for (i, a) in rendered.iter().enumerate() {
            for b in &rendered[i + 1..] {
                assert_ne!(a, b, "every style should produce distinct escapes");
            }
        }
        assert_eq!(AnsiEmphasis.emphasize("x", Style::Error), "\x1b[1;31mx\x1b[0m");
    }

    #[test]
    fn test_color_never_yields_plain_text() {
        let emphasis = ColorMode::Never.emphasis();
        assert_eq!(emphasis.emphasize("a.js", Style::Path), "a.js");
        let emphasis = ColorMode::Always.emphasis();
        assert!(emphasis.emphasize("a.js", Style::Path).starts_with("\x1b["));
    }
}
