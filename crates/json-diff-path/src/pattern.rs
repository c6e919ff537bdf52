//! Declarative path patterns.
//!
//! A pattern is a literal path prefix plus an optional wildcard suffix:
//!
//! | pattern    | matches                                   |
//! |------------|-------------------------------------------|
//! | `/a/b`     | exactly `/a/b`                            |
//! | `/a/*`     | `/a/x`, but neither `/a` nor `/a/x/y`     |
//! | `/a/**`    | `/a/x`, `/a/x/y`, ... but not `/a`        |
//!
//! Every component that selects paths (ignore lists, counting rules,
//! structural updates and sub-diff extraction) goes through
//! [`Pattern::matches`].

use std::fmt;

use thiserror::Error;

use crate::{segments, SEPARATOR};

/// Maximum allowed pattern string length.
const MAX_PATTERN_LENGTH: usize = 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern {0:?} must be empty or start with '/'")]
    NotAbsolute(String),
    #[error("pattern {pattern:?} has a wildcard in segment {segment}; wildcards are only allowed last")]
    MisplacedWildcard { pattern: String, segment: usize },
    #[error("pattern is longer than {MAX_PATTERN_LENGTH} characters")]
    TooLong,
}

/// Arity of the suffix that follows a pattern's literal prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wildcard {
    /// No suffix: the path must equal the prefix.
    None,
    /// `*`: exactly one further segment.
    One,
    /// `**`: one or more further segments.
    Many,
}

impl Wildcard {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "*" => Some(Wildcard::One),
            "**" => Some(Wildcard::Many),
            _ => None,
        }
    }

    fn accepts(self, remaining: usize) -> bool {
        match self {
            Wildcard::None => remaining == 0,
            Wildcard::One => remaining == 1,
            Wildcard::Many => remaining >= 1,
        }
    }
}

/// A parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    prefix: Vec<String>,
    wildcard: Wildcard,
}

impl Pattern {
    /// Parse a pattern string.
    ///
    /// # Errors
    ///
    /// - [`PatternError::NotAbsolute`] if the pattern is non-empty and does
    ///   not start with `/`
    /// - [`PatternError::MisplacedWildcard`] if `*` or `**` appears anywhere
    ///   but in the last segment
    /// - [`PatternError::TooLong`] past 1024 characters
    ///
    /// ```
    /// use json_diff_path::{Pattern, Wildcard};
    ///
    /// let p = Pattern::parse("/users/**").unwrap();
    /// assert_eq!(p.wildcard(), Wildcard::Many);
    /// assert_eq!(p.prefix(), ["users"]);
    ///
    /// assert!(Pattern::parse("users").is_err());
    /// assert!(Pattern::parse("/a/*/b").is_err());
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong);
        }
        if !pattern.is_empty() && !pattern.starts_with(SEPARATOR) {
            return Err(PatternError::NotAbsolute(pattern.to_string()));
        }
        let mut prefix: Vec<String> = segments(pattern).map(str::to_string).collect();
        let wildcard = match prefix.last().and_then(|last| Wildcard::from_segment(last)) {
            Some(wildcard) => {
                prefix.pop();
                wildcard
            }
            None => Wildcard::None,
        };
        if let Some(segment) = prefix
            .iter()
            .position(|s| Wildcard::from_segment(s).is_some())
        {
            return Err(PatternError::MisplacedWildcard {
                pattern: pattern.to_string(),
                segment,
            });
        }
        Ok(Pattern {
            source: pattern.to_string(),
            prefix,
            wildcard,
        })
    }

    /// Pattern matching the direct children of `path` (`path/*`).
    pub fn children_of(path: &str) -> Self {
        Pattern {
            source: format!("{path}{SEPARATOR}*"),
            prefix: segments(path).map(str::to_string).collect(),
            wildcard: Wildcard::One,
        }
    }

    /// Check if `path` is covered by this pattern.
    ///
    /// The path must start with the literal prefix segment by segment; the
    /// number of remaining segments is then checked against the wildcard.
    pub fn matches(&self, path: &str) -> bool {
        let mut rest = segments(path);
        for expected in &self.prefix {
            match rest.next() {
                Some(segment) if segment == expected => {}
                _ => return false,
            }
        }
        self.wildcard.accepts(rest.count())
    }

    /// Select the paths matched by this pattern, keeping their order.
    pub fn filter<'a, I, S>(&'a self, paths: I) -> impl Iterator<Item = S> + 'a
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
        S: AsRef<str> + 'a,
    {
        paths
            .into_iter()
            .filter(move |path| self.matches(path.as_ref()))
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Raw (escaped) literal prefix segments.
    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    pub fn wildcard(&self) -> Wildcard {
        self.wildcard
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

/// Check if `path` is covered by the pattern string `pattern`.
///
/// # Errors
///
/// Returns the parse error when `pattern` is malformed.
///
/// ```
/// use json_diff_path::matches;
///
/// assert!(matches("/a", "/a").unwrap());
/// assert!(matches("/a/x", "/a/*").unwrap());
/// assert!(!matches("/a/x/y", "/a/*").unwrap());
/// assert!(matches("/a/x/y", "/a/**").unwrap());
/// ```
pub fn matches(path: &str, pattern: &str) -> Result<bool, PatternError> {
    Ok(Pattern::parse(pattern)?.matches(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Pattern {
        Pattern::parse(s).unwrap()
    }

    #[test]
    fn exact_pattern() {
        assert!(p("/a/b").matches("/a/b"));
        assert!(!p("/a/b").matches("/a"));
        assert!(!p("/a/b").matches("/a/b/c"));
        assert!(!p("/a/b").matches("/a/bc"));
    }

    #[test]
    fn root_pattern_matches_only_root() {
        assert!(p("").matches(""));
        assert!(!p("").matches("/a"));
    }

    #[test]
    fn single_wildcard() {
        let pattern = p("/list/*");
        assert!(pattern.matches("/list/0"));
        assert!(pattern.matches("/list/name"));
        assert!(!pattern.matches("/list"));
        assert!(!pattern.matches("/list/0/id"));
        assert!(!pattern.matches("/other/0"));
    }

    #[test]
    fn deep_wildcard() {
        let pattern = p("/list/**");
        assert!(pattern.matches("/list/0"));
        assert!(pattern.matches("/list/0/id/x"));
        assert!(!pattern.matches("/list"));
        assert!(!pattern.matches("/lists/0"));
    }

    #[test]
    fn root_wildcards() {
        assert!(p("/*").matches("/a"));
        assert!(!p("/*").matches("/a/b"));
        assert!(!p("/*").matches(""));
        assert!(p("/**").matches("/a/b/c"));
        assert!(!p("/**").matches(""));
    }

    #[test]
    fn prefix_compares_whole_segments() {
        assert!(!p("/ab/*").matches("/a/b"));
        assert!(p("/a~1b/*").matches("/a~1b/0"));
    }

    #[test]
    fn children_of_matches_p_star() {
        assert_eq!(Pattern::children_of("/a"), p("/a/*"));
        assert_eq!(Pattern::children_of(""), p("/*"));
        assert!(Pattern::children_of("").matches("/x"));
    }

    #[test]
    fn malformed_patterns() {
        assert_eq!(
            Pattern::parse("a/b"),
            Err(PatternError::NotAbsolute("a/b".into()))
        );
        assert_eq!(
            Pattern::parse("/**/x"),
            Err(PatternError::MisplacedWildcard {
                pattern: "/**/x".into(),
                segment: 0
            })
        );
        assert_eq!(
            Pattern::parse(&format!("/{}", "a".repeat(2000))),
            Err(PatternError::TooLong)
        );
    }

    #[test]
    fn star_inside_a_segment_is_literal() {
        let pattern = p("/a*");
        assert_eq!(pattern.wildcard(), Wildcard::None);
        assert!(pattern.matches("/a*"));
        assert!(!pattern.matches("/ab"));
    }

    #[test]
    fn filter_keeps_order() {
        let paths = ["", "/a", "/a/0", "/a/1", "/a/1/x", "/b"];
        let hits: Vec<&str> = p("/a/*").filter(paths).collect();
        assert_eq!(hits, vec!["/a/0", "/a/1"]);
    }
}
