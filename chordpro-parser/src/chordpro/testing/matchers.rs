//! Text matching utilities for tree assertions

#[derive(Debug, Clone)]
pub enum TextMatch {
    Exact(String),
    StartsWith(String),
    Contains(String),
}

impl TextMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::StartsWith(prefix) => actual.starts_with(prefix),
            TextMatch::Contains(substring) => actual.contains(substring),
        }
    }

    /// Assert that the actual text matches this pattern
    pub fn assert(&self, actual: &str, context: &str) {
        let what = match self {
            TextMatch::Exact(expected) => format!("to be {expected:?}"),
            TextMatch::StartsWith(prefix) => format!("to start with {prefix:?}"),
            TextMatch::Contains(substring) => format!("to contain {substring:?}"),
        };
        assert!(
            self.matches(actual),
            "{context}: Expected text {what}, but got {actual:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        assert!(TextMatch::Exact("la".into()).matches("la"));
        assert!(!TextMatch::Exact("la".into()).matches("la "));
        assert!(TextMatch::StartsWith("C'era".into()).matches("C'era una volta"));
        assert!(TextMatch::Contains("volta".into()).matches("C'era una volta"));
    }

    #[test]
    #[should_panic(expected = "songs[0]: Expected text to be \"a\"")]
    fn test_assert_reports_context() {
        TextMatch::Exact("a".into()).assert("b", "songs[0]");
    }
}
