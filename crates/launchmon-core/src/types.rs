//! Domain types shared by the API client and the polling engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The full current window of log lines for a filter.
///
/// Each fetch returns a complete snapshot that replaces the previous one
/// wholesale -- never an incremental diff.
pub type LogSnapshot = Vec<String>;

/// A component managed by the remote supervisor.
///
/// Owned by the server; the client holds a read-only snapshot refreshed on
/// demand. `name` is the unique, stable identifier used in control and log
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub status: ComponentStatus,
}

/// Lifecycle status reported by the supervisor for a component.
///
/// Statuses the client does not recognize decode to [`Unknown`] rather than
/// failing the whole component list.
///
/// [`Unknown`]: ComponentStatus::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum ComponentStatus {
    #[serde(alias = "running")]
    Running,
    #[serde(alias = "stopped")]
    Stopped,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentStatus::Running => "Running",
            ComponentStatus::Stopped => "Stopped",
            ComponentStatus::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Log severity filter value.
///
/// Declared in severity-descending order; the order matters only for
/// display -- filtering itself happens on the server. [`Any`] is the
/// wildcard matching every level and the default.
///
/// Wire strings are case-sensitive (`Error`, `Warning`, `Info`, `Debug`,
/// `Any`).
///
/// [`Any`]: LogLevel::Any
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
    #[default]
    Any,
}

impl LogLevel {
    /// All levels in display order (severity-descending, wildcard last).
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Any,
    ];

    /// The exact string sent in the `level` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warning => "Warning",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Any => "Any",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    /// Parse a case-sensitive level string. Unknown values are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .iter()
            .find(|level| level.as_str() == s)
            .copied()
            .ok_or_else(|| Error::unknown_log_level(s))
    }
}

/// The (component, level) pair selecting which logs to fetch.
///
/// Immutable value: a new filter fully replaces the old one, there is no
/// incremental merge. `component: None` targets the supervisor's global log
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogFilter {
    pub component: Option<String>,
    pub level: LogLevel,
}

impl LogFilter {
    /// Filter for one component at the given level.
    pub fn component(name: impl Into<String>, level: LogLevel) -> Self {
        Self {
            component: Some(name.into()),
            level,
        }
    }

    /// Filter for the global log at the given level.
    pub fn global(level: LogLevel) -> Self {
        Self {
            component: None,
            level,
        }
    }
}

impl fmt::Display for LogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.component {
            Some(name) => write!(f, "{name}/{}", self.level),
            None => write!(f, "*/{}", self.level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_level_default_is_any() {
        assert_eq!(LogLevel::default(), LogLevel::Any);
        assert_eq!(LogFilter::default().level, LogLevel::Any);
        assert!(LogFilter::default().component.is_none());
    }

    #[test]
    fn test_log_level_round_trip() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_log_level_parse_is_case_sensitive() {
        assert!("error".parse::<LogLevel>().is_err());
        assert!("ANY".parse::<LogLevel>().is_err());
        let err = "Verbose".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, Error::UnknownLogLevel { value } if value == "Verbose"));
    }

    #[test]
    fn test_log_level_severity_descending_order() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Any);
    }

    #[test]
    fn test_component_deserializes_known_status() {
        let comp: Component =
            serde_json::from_value(json!({ "name": "web", "status": "Running" })).unwrap();
        assert_eq!(comp.name, "web");
        assert_eq!(comp.status, ComponentStatus::Running);
    }

    #[test]
    fn test_component_unknown_status_does_not_fail() {
        let comp: Component =
            serde_json::from_value(json!({ "name": "db", "status": "Restarting" })).unwrap();
        assert_eq!(comp.status, ComponentStatus::Unknown);
    }

    #[test]
    fn test_component_missing_status_defaults_to_unknown() {
        let comp: Component = serde_json::from_value(json!({ "name": "db" })).unwrap();
        assert_eq!(comp.status, ComponentStatus::Unknown);
    }

    #[test]
    fn test_filter_display() {
        let filter = LogFilter::component("web", LogLevel::Error);
        assert_eq!(filter.to_string(), "web/Error");
        assert_eq!(LogFilter::global(LogLevel::Any).to_string(), "*/Any");
    }
}
