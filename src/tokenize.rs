//! Line tokenization.
//!
//! Lines are split on the literal space character only. Tabs, punctuation and
//! case are left untouched so that positional comparison sees exactly what the
//! author wrote.

/// One source line, ready for positional comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLine<'a> {
    /// A zero-length line. Marks a paragraph break.
    Blank,
    /// The space-separated tokens of a non-empty line.
    Words(Vec<&'a str>),
}

impl<'a> TokenLine<'a> {
    /// Tokenize a single line of text.
    ///
    /// Only a line of length zero is blank. A line made only of spaces yields
    /// `Words` with no tokens.
    pub fn from_line(line: &'a str) -> Self {
        if line.is_empty() {
            TokenLine::Blank
        } else {
            TokenLine::Words(split_words(line))
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, TokenLine::Blank)
    }

    /// Tokens of the line (empty for a blank line).
    pub fn words(&self) -> &[&'a str] {
        match self {
            TokenLine::Blank => &[],
            TokenLine::Words(words) => words,
        }
    }
}

/// Split a line on single spaces.
///
/// Leading and interior runs of spaces produce empty tokens, which take part
/// in comparisons like any other token. Trailing empty tokens are dropped.
pub fn split_words(line: &str) -> Vec<&str> {
    let mut words: Vec<&str> = line.split(' ').collect();
    while words.last().is_some_and(|w| w.is_empty()) {
        words.pop();
    }
    words
}

/// Tokenize every line of a document.
pub fn tokenize_lines(lines: &[String]) -> Vec<TokenLine<'_>> {
    lines.iter().map(|line| TokenLine::from_line(line)).collect()
}
