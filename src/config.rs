use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_PATTERN: &str = r"(?i)\.json(?:!json)?$";

/// Plugin options, as passed in the SWC plugin config JSON.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(rename = "match")]
    pub match_pattern: Option<String>,
    pub match_flags: Option<String>,
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str::<Option<Self>>(raw)?.unwrap_or_default())
    }
}

/// Decides whether a module path refers to an inlinable JSON resource.
#[derive(Debug, Clone)]
pub struct MatchPattern(Regex);

impl MatchPattern {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let pattern = match config.match_pattern.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => return Ok(Self::default()),
        };

        let mut builder = RegexBuilder::new(pattern);
        for flag in config.match_flags.as_deref().unwrap_or_default().chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                // Rust regexes are always unicode-aware; global/sticky only
                // affect stateful matching, which a path test never uses.
                'u' | 'g' | 'y' => {}
                other => return Err(ConfigError::Flag { flag: other }),
            }
        }

        builder
            .build()
            .map(Self)
            .map_err(|source| ConfigError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn is_match(&self, module: &str) -> bool {
        self.0.is_match(module)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for MatchPattern {
    fn default() -> Self {
        Self(Regex::new(DEFAULT_PATTERN).expect("default pattern compiles"))
    }
}

impl From<Regex> for MatchPattern {
    fn from(re: Regex) -> Self {
        Self(re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pattern: Option<&str>, flags: Option<&str>) -> Config {
        Config {
            match_pattern: pattern.map(str::to_string),
            match_flags: flags.map(str::to_string),
        }
    }

    #[test]
    fn default_matches_json_case_insensitively() {
        let m = MatchPattern::default();
        assert!(m.is_match("./data.json"));
        assert!(m.is_match("../DATA.JSON"));
        assert!(m.is_match("./data.json!json"));
        assert!(!m.is_match("./styles.css"));
        assert!(!m.is_match("./foo.js"));
        assert!(!m.is_match("./data.json.js"));
    }

    #[test]
    fn empty_match_falls_back_to_default() {
        let m = MatchPattern::from_config(&config(Some(""), Some("i"))).unwrap();
        assert_eq!(m.as_str(), DEFAULT_PATTERN);
    }

    #[test]
    fn custom_pattern_is_case_sensitive_without_flags() {
        let m = MatchPattern::from_config(&config(Some(r"\.data$"), None)).unwrap();
        assert!(m.is_match("./foo.data"));
        assert!(!m.is_match("./foo.DATA"));
        assert!(!m.is_match("./foo.json"));
    }

    #[test]
    fn flags_apply_to_custom_pattern() {
        let m = MatchPattern::from_config(&config(Some(r"\.data$"), Some("iu"))).unwrap();
        assert!(m.is_match("./foo.DATA"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = MatchPattern::from_config(&config(Some("x"), Some("iq"))).unwrap_err();
        assert!(matches!(err, ConfigError::Flag { flag: 'q' }));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = MatchPattern::from_config(&config(Some("(unclosed"), None)).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { .. }));
    }

    #[test]
    fn prebuilt_regex_is_used_verbatim() {
        let m = MatchPattern::from(Regex::new(r"\.jsonc$").unwrap());
        assert!(m.is_match("./a.jsonc"));
        assert!(!m.is_match("./a.json"));
    }

    #[test]
    fn config_reads_camel_case_keys() {
        let c = Config::from_json(r#"{"match": "\\.data$", "matchFlags": "i"}"#).unwrap();
        assert_eq!(c.match_pattern.as_deref(), Some(r"\.data$"));
        assert_eq!(c.match_flags.as_deref(), Some("i"));

        let empty = Config::from_json("").unwrap();
        assert!(empty.match_pattern.is_none());
        let null = Config::from_json("null").unwrap();
        assert!(null.match_flags.is_none());
    }
}
