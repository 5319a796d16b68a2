//! CLI configuration from environment.

use crate::output::OutputFormat;
use route_core::DrawingRules;
use std::env;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub min_polygon_points: usize,
    pub notice_capacity: usize,
    pub output: OutputFormat,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        let rules = DrawingRules::default();
        Self {
            min_polygon_points: rules.min_polygon_points,
            notice_capacity: rules.notice_capacity,
            output: OutputFormat::Text,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            min_polygon_points: lookup("ROUTE_MIN_POLYGON_POINTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_polygon_points),
            notice_capacity: lookup("ROUTE_NOTICE_CAPACITY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.notice_capacity),
            output: match lookup("ROUTE_OUTPUT").as_deref() {
                Some("json") => OutputFormat::Json,
                Some("text") => OutputFormat::Text,
                _ => defaults.output,
            },
            log_format: match lookup("ROUTE_LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => defaults.log_format,
            },
        }
    }

    pub fn rules(&self) -> DrawingRules {
        DrawingRules {
            min_polygon_points: self.min_polygon_points,
            notice_capacity: self.notice_capacity,
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_known_variables() {
        let config = config_from(&[
            ("ROUTE_MIN_POLYGON_POINTS", "5"),
            ("ROUTE_OUTPUT", "json"),
            ("ROUTE_LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.min_polygon_points, 5);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config_from(&[("ROUTE_NOTICE_CAPACITY", "lots"), ("ROUTE_OUTPUT", "xml")]);
        assert_eq!(config.notice_capacity, 64);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn rules_never_drop_below_triangle() {
        let config = config_from(&[("ROUTE_MIN_POLYGON_POINTS", "2")]);
        assert_eq!(config.rules().min_polygon_points, 3);
    }
}
