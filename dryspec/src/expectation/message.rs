//! Error message matchers.

use std::fmt;

use regex::Regex;

/// Constraint on the message of a raised error.
///
/// The message is the raised error's top-level `Display` output.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum MessageMatcher {
    /// The message must equal the text.
    Exact(String),
    /// The message must contain a match for the pattern.
    Pattern(Regex),
}

impl MessageMatcher {
    /// Require the message to equal `text`.
    #[must_use]
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    /// Require the message to match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// Whether `message` satisfies the constraint.
    #[must_use]
    pub fn matches(&self, message: &str) -> bool {
        match self {
            Self::Exact(text) => text == message,
            Self::Pattern(regex) => regex.is_match(message),
        }
    }

    /// Debug-style rendering: quoted text, or the pattern between slashes.
    #[must_use]
    pub fn inspect(&self) -> String {
        match self {
            Self::Exact(text) => format!("{text:?}"),
            Self::Pattern(regex) => format!("/{}/", regex.as_str()),
        }
    }
}

impl fmt::Display for MessageMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(text) => f.write_str(text),
            Self::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

impl From<&str> for MessageMatcher {
    fn from(text: &str) -> Self {
        Self::exact(text)
    }
}

impl From<String> for MessageMatcher {
    fn from(text: String) -> Self {
        Self::Exact(text)
    }
}

impl From<Regex> for MessageMatcher {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}
