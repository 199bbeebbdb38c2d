//! Backend configuration from TOML (`[backend]` section)

use dpc_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Longest accepted request timeout
const MAX_TIMEOUT_SECS: u64 = 300;

/// Raw backend configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: Option<String>,
    /// Public (anon) API key
    pub anon_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_secs: 15,
        }
    }
}

impl FileBackendConfig {
    /// Whether both the URL and the key are set
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
            && self.anon_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Issues with whatever is set, regardless of whether remote access is used
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Some(url) = self.url.as_deref().map(str::trim)
            && !url.is_empty()
            && !(url.starts_with("https://") || url.starts_with("http://"))
        {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidBackendUrl {
                    value: url.to_string(),
                },
                message: format!("backend.url: '{}' is not an http(s) URL", url),
            });
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::OutOfRange {
                    field: "backend.timeout_secs".to_string(),
                    value: self.timeout_secs,
                },
                message: format!(
                    "backend.timeout_secs: {} is outside 1..={}, the default of 15 is used",
                    self.timeout_secs, MAX_TIMEOUT_SECS
                ),
            });
        }

        issues
    }

    /// Issues that prevent talking to the backend at all
    pub fn validate_remote(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.url.as_deref().is_none_or(|u| u.trim().is_empty()) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::MissingBackendUrl,
                message: "backend.url is not set (or use --offline)".to_string(),
            });
        }
        if self.anon_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::MissingApiKey,
                message: "backend.anon_key is not set (or use --offline)".to_string(),
            });
        }
        issues
    }

    /// Timeout to use, falling back to the default when out of range
    pub fn effective_timeout_secs(&self) -> u64 {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            Self::default().timeout_secs
        } else {
            self.timeout_secs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unconfigured() {
        let config = FileBackendConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 15);
        assert!(config.validate().is_empty());
        assert_eq!(config.validate_remote().len(), 2);
    }

    #[test]
    fn test_invalid_url_is_error() {
        let config = FileBackendConfig {
            url: Some("xyz.supabase.co".into()),
            anon_key: Some("key".into()),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(matches!(
            issues[0].code,
            ConfigIssueCode::InvalidBackendUrl { .. }
        ));
    }

    #[test]
    fn test_out_of_range_timeout_falls_back() {
        let config = FileBackendConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert_eq!(config.effective_timeout_secs(), 15);
    }

    #[test]
    fn test_configured_backend_passes_remote_checks() {
        let config = FileBackendConfig {
            url: Some("https://xyz.supabase.co".into()),
            anon_key: Some("anon".into()),
            timeout_secs: 30,
        };
        assert!(config.is_configured());
        assert!(config.validate_remote().is_empty());
        assert_eq!(config.effective_timeout_secs(), 30);
    }
}
