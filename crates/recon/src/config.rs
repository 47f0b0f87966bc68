use std::path::Path;

use serde::Deserialize;

use crate::error::ReconError;
use crate::retention::DEFAULT_MAX_INACTIVE_DAYS;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingConfig {
    /// Forum id reserved for the guest placeholder account.
    pub guest_id: i64,
    /// Forum column compared against roster full names.
    pub name_field: NameField,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            guest_id: 1,
            name_field: NameField::Username,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    #[default]
    Username,
    DisplayName,
}

impl std::fmt::Display for NameField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Username => write!(f, "username"),
            Self::DisplayName => write!(f, "display_name"),
        }
    }
}

// ---------------------------------------------------------------------------
// Retention + Export
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetentionConfig {
    pub max_inactive_days: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_inactive_days: DEFAULT_MAX_INACTIVE_DAYS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Membership season label selected from the club database.
    pub season: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            season: "2018-2019".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ReconError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_toml(&input)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.retention.max_inactive_days <= 0 {
            return Err(ReconError::ConfigValidation(format!(
                "retention.max_inactive_days must be positive, got {}",
                self.retention.max_inactive_days
            )));
        }

        if self.export.season.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "export.season must not be empty".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ReconConfig::from_toml("").unwrap();
        assert_eq!(config.matching.guest_id, 1);
        assert_eq!(config.matching.name_field, NameField::Username);
        assert_eq!(config.retention.max_inactive_days, 730);
        assert_eq!(config.export.season, "2018-2019");
    }

    #[test]
    fn parse_full_config() {
        let input = r#"
[matching]
guest_id = 0
name_field = "display_name"

[retention]
max_inactive_days = 365

[export]
season = "2023-2024"
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        assert_eq!(config.matching.guest_id, 0);
        assert_eq!(config.matching.name_field, NameField::DisplayName);
        assert_eq!(config.retention.max_inactive_days, 365);
        assert_eq!(config.export.season, "2023-2024");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = ReconConfig::from_toml("[matching]\nname_field = \"display_name\"\n").unwrap();
        assert_eq!(config.matching.guest_id, 1);
        assert_eq!(config.matching.name_field, NameField::DisplayName);
    }

    #[test]
    fn reject_unknown_name_field() {
        let err = ReconConfig::from_toml("[matching]\nname_field = \"realname\"\n").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_unknown_key() {
        let err = ReconConfig::from_toml("[retention]\nmax_days = 10\n").unwrap_err();
        assert!(err.to_string().contains("config parse error"));
    }

    #[test]
    fn reject_non_positive_window() {
        let err = ReconConfig::from_toml("[retention]\nmax_inactive_days = 0\n").unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn reject_blank_season() {
        let err = ReconConfig::from_toml("[export]\nseason = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("export.season"));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[retention]\nmax_inactive_days = 90\n").unwrap();
        let config = ReconConfig::from_file(&path).unwrap();
        assert_eq!(config.retention.max_inactive_days, 90);
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let err = ReconConfig::from_file(Path::new("/nonexistent/rollcall.toml")).unwrap_err();
        assert!(matches!(err, ReconError::Io(_)));
    }
}
