//! Wait-event selectors given with `--event`.
//!
//! A selector is either the exact event name or a regular expression
//! written between slashes, e.g. `/^db file (sequential|scattered) read$/`.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::ParseError;

#[derive(Debug, Clone)]
pub enum Selector {
    Literal(String),
    Pattern { name: String, regex: Regex },
}

impl Selector {
    /// Text the selector was configured with, delimiters included.
    pub fn name(&self) -> &str {
        match self {
            Selector::Literal(name) => name,
            Selector::Pattern { name, .. } => name,
        }
    }

    pub fn matches(&self, event: &str) -> bool {
        match self {
            Selector::Literal(name) => name == event,
            Selector::Pattern { regex, .. } => regex.is_match(event),
        }
    }
}

impl FromStr for Selector {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(ParseError::Empty);
        }

        if value.len() > 2 && value.starts_with('/') && value.ends_with('/') {
            let inner = &value[1..value.len() - 1];
            let pattern_error = |source: regex::Error| ParseError::Pattern {
                selector: value.to_string(),
                source,
            };
            // Checked on its own first so a stray `)` can't escape the anchors.
            Regex::new(inner).map_err(pattern_error)?;
            // Anchored so the whole event name has to match.
            let regex = Regex::new(&format!("^(?:{inner})$")).map_err(pattern_error)?;
            return Ok(Selector::Pattern {
                name: value.to_string(),
                regex,
            });
        }

        Ok(Selector::Literal(value.to_string()))
    }
}

/// Ordered set of configured selectors.
#[derive(Debug, Clone, Default)]
pub struct WaitEventNames {
    selectors: Vec<Selector>,
}

impl WaitEventNames {
    pub fn new() -> Self {
        WaitEventNames::default()
    }

    /// Parses and appends a selector. On error nothing is added.
    pub fn add(&mut self, value: &str) -> Result<(), ParseError> {
        let selector = value.parse()?;
        self.selectors.push(selector);
        Ok(())
    }

    pub fn matches(&self, event: &str) -> bool {
        self.selectors.iter().any(|s| s.matches(event))
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.selectors.iter()
    }
}

impl fmt::Display for WaitEventNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{:?}", selector.name())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a WaitEventNames {
    type Item = &'a Selector;
    type IntoIter = std::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> WaitEventNames {
        let mut opt = WaitEventNames::new();
        for v in values {
            opt.add(v).expect("selector should parse");
        }
        opt
    }

    #[test]
    fn test_empty_selector() {
        let mut opt = WaitEventNames::new();
        assert!(matches!(opt.add(""), Err(ParseError::Empty)));
        assert!(opt.is_empty());

        opt.add("foo").expect("literal should be accepted");
        assert_eq!(opt.len(), 1);
    }

    #[test]
    fn test_display() {
        let opt = names(&["foo", "bar", r#""baz""#]);
        assert_eq!(opt.to_string(), r#""foo","bar","\"baz\"""#);
    }

    #[test]
    fn test_display_keeps_pattern_delimiters() {
        let opt = names(&["/^log/"]);
        assert_eq!(opt.to_string(), r#""/^log/""#);
    }

    #[test]
    fn test_match() {
        let opt = names(&["foo", "bar", r#""baz""#, "/^(mackerel|agent)$/"]);

        let tests = [
            ("foo", true),
            ("bar", true),
            ("baz", false),
            (r#""baz""#, true),
            ("macker", false),
            ("mackerel", true),
            ("agent", true),
            ("mackerel-agent", false),
        ];
        for (name, want) in tests {
            assert_eq!(opt.matches(name), want, "matches({name:?})");
        }
    }

    #[test]
    fn test_pattern_matches_whole_name() {
        let opt = names(&["/db file .* read/"]);
        assert!(opt.matches("db file sequential read"));
        assert!(opt.matches("db file scattered read"));
        assert!(!opt.matches("db file sequential read ahead"));
        assert!(!opt.matches("x db file sequential read"));
    }

    #[test]
    fn test_literal_matches_after_add() {
        for name in ["log file sync", "/", "//", "a/", "/a"] {
            let opt = names(&[name]);
            assert!(opt.matches(name), "matches({name:?})");
        }
    }

    #[test]
    fn test_short_slashes_are_literal() {
        let opt = names(&["//"]);
        assert!(matches!(opt.iter().next(), Some(Selector::Literal(_))));
    }

    #[test]
    fn test_bad_pattern() {
        let mut opt = WaitEventNames::new();
        let err = opt.add("/(unclosed/").unwrap_err();
        assert!(
            matches!(err, ParseError::Pattern { ref selector, .. } if selector == "/(unclosed/")
        );
        assert!(opt.is_empty());
    }

    #[test]
    fn test_unbalanced_pattern_is_rejected() {
        let mut opt = WaitEventNames::new();
        assert!(opt.add("/a)|(b/").is_err());
    }

    #[test]
    fn test_no_selectors_match_nothing() {
        let opt = WaitEventNames::new();
        assert!(!opt.matches("log file sync"));
    }
}
