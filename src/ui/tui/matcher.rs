//! Fuzzy narrowing of filter options with nucleo

use nucleo::{
    Config, Nucleo,
    pattern::{CaseMatching, Normalization},
};
use std::fmt;
use std::sync::Arc;

/// Matches a typed pattern against one dimension's options
///
/// The matcher is rebuilt whenever the option list changes.
pub struct OptionMatcher {
    nucleo: Nucleo<u32>,
    options: Vec<String>,
    pattern: String,
}

impl OptionMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Vec::new())
    }

    fn with_options(options: Vec<String>) -> Self {
        let nucleo: Nucleo<u32> = Nucleo::new(Config::DEFAULT, Arc::new(|| {}), None, 1);

        let injector = nucleo.injector();
        for (idx, option) in options.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let _ = injector.push(idx as u32, |_, cols| {
                cols[0] = option.clone().into();
            });
        }

        Self {
            nucleo,
            options,
            pattern: String::new(),
        }
    }

    /// Indices into `options` matching `pattern`, best match first
    ///
    /// An empty pattern keeps every option in its original order.
    pub fn matches(&mut self, options: &[String], pattern: &str) -> Vec<usize> {
        if pattern.is_empty() {
            self.pattern.clear();
            return (0..options.len()).collect();
        }

        if self.options != options {
            *self = Self::with_options(options.to_vec());
        }

        let append = !self.pattern.is_empty() && pattern.starts_with(&self.pattern);
        self.nucleo.pattern.reparse(
            0,
            pattern,
            CaseMatching::Smart,
            Normalization::Smart,
            append,
        );
        self.pattern = pattern.to_string();

        self.nucleo.tick(100);
        let snapshot = self.nucleo.snapshot();
        snapshot
            .matched_items(..)
            .map(|item| *item.data as usize)
            .collect()
    }
}

impl Default for OptionMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OptionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionMatcher")
            .field("options", &self.options.len())
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn licenses() -> Vec<String> {
        vec!["Apache-2.0".into(), "MIT".into(), "GPL-3.0".into()]
    }

    #[test]
    fn test_empty_pattern_keeps_order() {
        let mut matcher = OptionMatcher::new();
        assert_eq!(matcher.matches(&licenses(), ""), vec![0, 1, 2]);
    }

    #[test]
    fn test_pattern_narrows_options() {
        let mut matcher = OptionMatcher::new();
        assert_eq!(matcher.matches(&licenses(), "mit"), vec![1]);
        assert!(matcher.matches(&licenses(), "zzz").is_empty());
    }
}
