//! Severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity classification.
///
/// Used both to declare how important a directive is and to threshold which
/// directives are emitted. Comparisons follow declaration order, so
/// `Trace < Debug < ... < Fatal`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Level {
    /// Most verbose level.
    Trace,
    /// Diagnostic detail for development.
    Debug,
    /// General information (default).
    #[default]
    Information,
    /// Potentially problematic situations.
    Warning,
    /// Failures of a single operation.
    Error,
    /// Failures affecting a whole component.
    Critical,
    /// Failures the process cannot recover from.
    Fatal,
}

impl Level {
    /// All levels, least severe first.
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Information,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Fatal,
    ];

    /// Returns the level name as written in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "Trace",
            Level::Debug => "Debug",
            Level::Information => "Information",
            Level::Warning => "Warning",
            Level::Error => "Error",
            Level::Critical => "Critical",
            Level::Fatal => "Fatal",
        }
    }

    /// Converts this level to a `tracing::Level`.
    ///
    /// `tracing` stops at ERROR, so Critical and Fatal collapse onto it.
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Level::Trace => tracing::Level::TRACE,
            Level::Debug => tracing::Level::DEBUG,
            Level::Information => tracing::Level::INFO,
            Level::Warning => tracing::Level::WARN,
            Level::Error | Level::Critical | Level::Fatal => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level `{0}`")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Information < Level::Warning);
        assert!(Level::Critical < Level::Fatal);
        assert_eq!(Level::default(), Level::Information);
    }

    #[test]
    fn test_level_display_and_parse() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_serde_names() {
        let json = serde_json::to_string(&Level::Information).unwrap();
        assert_eq!(json, "\"Information\"");
        let level: Level = serde_json::from_str("\"Critical\"").unwrap();
        assert_eq!(level, Level::Critical);
    }

    #[test]
    fn test_to_tracing_level() {
        assert_eq!(Level::Warning.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(Level::Fatal.to_tracing_level(), tracing::Level::ERROR);
    }
}
