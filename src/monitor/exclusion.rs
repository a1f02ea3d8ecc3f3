//! Terminal name exclusion.
//!
//! Patterns are comma-separated and matched case-insensitively against the
//! whole terminal name. `*` matches any run of characters; everything else
//! is literal.

use regex::{Regex, RegexBuilder};

use crate::config::{split_patterns, MonitorSettings};

/// Compiled exclusion patterns
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    patterns: Vec<Regex>,
}

impl ExclusionFilter {
    /// Compile `raw`; a disabled filter never excludes anything
    pub fn new(enabled: bool, raw: &str) -> Self {
        if !enabled {
            return Self::default();
        }
        let patterns = split_patterns(raw)
            .into_iter()
            .filter_map(compile_pattern)
            .collect();
        Self { patterns }
    }

    pub fn from_settings(settings: &MonitorSettings) -> Self {
        Self::new(settings.enable_exclusions, &settings.exclude_patterns)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_excluded(&self, terminal_name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(terminal_name))
    }
}

/// Translate one glob into an anchored, case-insensitive regex
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    let body = regex::escape(pattern).replace(r"\*", ".*");
    match RegexBuilder::new(&format!("^{}$", body))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            // Only reachable through the regex size limit
            tracing::warn!("Skipping exclusion pattern {:?}: {}", pattern, e);
            None
        }
    }
}

/// One-shot check without keeping the compiled filter around
pub fn is_excluded(terminal_name: &str, enabled: bool, raw_patterns: &str) -> bool {
    ExclusionFilter::new(enabled, raw_patterns).is_excluded(terminal_name)
}
