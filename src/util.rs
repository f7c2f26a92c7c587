/// mp_oracle's version string, e.g. `v0.1.0 [3f2c1ab]`.
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"), " [", env!("GIT_HASH"), "]");

/// Get mp_oracle's version string.
pub fn version() -> String {
    VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(version().starts_with(concat!("v", env!("CARGO_PKG_VERSION"), " [")));
        assert!(version().ends_with(']'));
    }
}
