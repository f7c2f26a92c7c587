use std::borrow::Borrow;
use std::fmt;

/// Canonical metric identifier: lowercase, with `_` in place of the
/// separators Oracle uses in resource, class and event names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey(String);

impl MetricKey {
    /// Single pass: `/` is dropped, space, `*` and `:` become `_`, then the
    /// whole key is ASCII-lowercased.
    pub fn normalize(raw: &str) -> MetricKey {
        let mut key = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '/' => {}
                ' ' | '*' | ':' => key.push('_'),
                c => key.push(c.to_ascii_lowercase()),
            }
        }
        MetricKey(key)
    }

    /// Derived key such as `<event>_count`. The suffix must already be canonical.
    pub fn with_suffix(&self, suffix: &str) -> MetricKey {
        debug_assert_eq!(MetricKey::normalize(suffix).as_str(), suffix);
        MetricKey(format!("{}{}", self.0, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MetricKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MetricKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
