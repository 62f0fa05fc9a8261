//! Visibility predicate for log records

use crate::types::{LogLevel, LogRecord};

/// Which levels are shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Only(LogLevel),
}

impl LevelFilter {
    /// Next filter in the cycle all → trace → ... → error → all.
    pub fn cycle(&self) -> Self {
        let levels = &LogLevel::FILTERABLE;
        match self {
            LevelFilter::All => LevelFilter::Only(levels[0].clone()),
            LevelFilter::Only(level) => match levels.iter().position(|l| l == level) {
                Some(idx) if idx + 1 < levels.len() => LevelFilter::Only(levels[idx + 1].clone()),
                _ => LevelFilter::All,
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LevelFilter::All => "all",
            LevelFilter::Only(level) => level.as_str(),
        }
    }
}

/// Level + target-substring filter. Affects visibility only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogFilter {
    level: LevelFilter,
    /// Trimmed, lowercased needle; empty matches everything
    target: String,
}

impl LogFilter {
    pub fn new(level: LevelFilter, target: &str) -> Self {
        Self {
            level,
            target: target.trim().to_lowercase(),
        }
    }

    pub fn level(&self) -> &LevelFilter {
        &self.level
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Same target needle, different level.
    pub fn with_level(&self, level: LevelFilter) -> Self {
        Self {
            level,
            target: self.target.clone(),
        }
    }

    /// Same level, different target needle.
    pub fn with_target(&self, target: &str) -> Self {
        Self::new(self.level.clone(), target)
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        let level_ok = match &self.level {
            LevelFilter::All => true,
            LevelFilter::Only(level) => record.level == *level,
        };
        level_ok
            && (self.target.is_empty() || record.target.to_lowercase().contains(&self.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: LogLevel, target: &str) -> LogRecord {
        LogRecord {
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            level,
            target: target.to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn test_default_matches_everything() {
        let filter = LogFilter::default();
        assert!(filter.matches(&record(LogLevel::Trace, "x")));
        assert!(filter.matches(&record(LogLevel::Other("fatal".into()), "")));
    }

    #[test]
    fn test_level_is_exact_not_threshold() {
        let filter = LogFilter::new(LevelFilter::Only(LogLevel::Warn), "");
        assert!(filter.matches(&record(LogLevel::Warn, "a")));
        assert!(!filter.matches(&record(LogLevel::Error, "a")));
    }

    #[test]
    fn test_target_is_case_insensitive_substring() {
        let filter = LogFilter::new(LevelFilter::All, "  Gateway::SSE ");
        assert_eq!(filter.target(), "gateway::sse");
        assert!(filter.matches(&record(LogLevel::Info, "ironclaw::gateway::sse::chat")));
        assert!(!filter.matches(&record(LogLevel::Info, "ironclaw::agent")));
    }

    #[test]
    fn test_level_cycle_wraps() {
        let mut level = LevelFilter::All;
        let mut seen = vec![level.label().to_string()];
        for _ in 0..6 {
            level = level.cycle();
            seen.push(level.label().to_string());
        }
        assert_eq!(
            seen,
            vec!["all", "trace", "debug", "info", "warn", "error", "all"]
        );
    }
}
