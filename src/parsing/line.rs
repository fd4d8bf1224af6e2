//! Line grammars and URL scanning.
//!
//! Two grammars are recognised, tried in this order:
//!
//! - **Bracketed**: `[<date-time>] <author>: <content>`
//!   Example: `[3/1/24, 10:00:15] Alice: check this out`
//! - **Dashed**: `<numeric-date...> - <author>: <content>`
//!   Example: `15/01/2024, 10:30 - Bob: hello`
//!
//! Lines matching neither are dropped by the parser. There is no
//! continuation-line handling.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `[date] author: content`
pub const BRACKETED_PATTERN: &str = r"^\[(.*?)\]\s(.*?):\s(.*)$";

/// `date - author: content`, date is numeric with `-`, `.` or `/` separators.
pub const DASHED_PATTERN: &str = r"^(\d{1,4}[-./]\d{1,2}[-./]\d{1,4}.*?)\s-\s(.*?):\s(.*)$";

/// A URL token runs from the scheme to the next whitespace.
pub const URL_PATTERN: &str = r"https?://\S+";

/// Zero-width and directional marks that chat apps sprinkle into exports.
pub const INVISIBLE_CHARS: &[char] = &[
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{200E}', // left-to-right mark
    '\u{200F}', // right-to-left mark
    '\u{2060}', // word joiner
    '\u{FEFF}', // byte order mark
];

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("built-in URL pattern is valid"));

/// Which grammar recognised a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineGrammar {
    /// `[date] author: content`
    Bracketed,
    /// `date - author: content`
    Dashed,
}

impl LineGrammar {
    /// Returns the built-in regex pattern for this grammar.
    pub fn pattern(self) -> &'static str {
        match self {
            LineGrammar::Bracketed => BRACKETED_PATTERN,
            LineGrammar::Dashed => DASHED_PATTERN,
        }
    }

    /// Returns all grammars in matching priority order.
    pub fn all() -> &'static [LineGrammar] {
        &[LineGrammar::Bracketed, LineGrammar::Dashed]
    }
}

/// Captures from a matched line. Nothing is trimmed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub grammar: LineGrammar,
    pub date: &'a str,
    pub author: &'a str,
    pub content: &'a str,
}

/// Compiled grammars, tried in priority order.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    grammars: Vec<(LineGrammar, Regex)>,
}

impl LineMatcher {
    /// Compiles a matcher from custom patterns.
    ///
    /// Each pattern must expose three capture groups: date, author, content.
    pub fn new(bracketed: &str, dashed: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            grammars: vec![
                (LineGrammar::Bracketed, Regex::new(bracketed)?),
                (LineGrammar::Dashed, Regex::new(dashed)?),
            ],
        })
    }

    /// Matches a cleaned line against each grammar in turn.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<LineMatch<'a>> {
        self.grammars.iter().find_map(|(grammar, regex)| {
            let caps = regex.captures(line)?;
            Some(LineMatch {
                grammar: *grammar,
                date: caps.get(1).map_or("", |m| m.as_str()),
                author: caps.get(2).map_or("", |m| m.as_str()),
                content: caps.get(3).map_or("", |m| m.as_str()),
            })
        })
    }
}

impl Default for LineMatcher {
    fn default() -> Self {
        Self::new(BRACKETED_PATTERN, DASHED_PATTERN).expect("built-in line patterns are valid")
    }
}

/// Removes invisible characters and surrounding whitespace.
pub fn clean_line(line: &str, invisible: &[char]) -> String {
    let stripped: String = line.chars().filter(|c| !invisible.contains(c)).collect();
    stripped.trim().to_string()
}

/// Iterates over every URL token in `text`, left to right.
pub fn find_urls(text: &str) -> impl Iterator<Item = &str> {
    URL_REGEX.find_iter(text).map(|m| m.as_str())
}
