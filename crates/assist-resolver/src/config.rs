//! User settings that shape what a resolved context offers.
use std::fs;
use std::path::Path;

use assist_error::{Error, ErrorKind, Result};
use serde::Deserialize;

/// Settings loaded from an `assist.toml`.
///
/// ```toml
/// favorite_static_members = ["java.lang.Math.*", "org.junit.Assert.assertEquals"]
/// resolve_threads = 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssistConfig {
    /// Static members offered without qualification, as `Type.member` or `Type.*`.
    #[serde(default)]
    pub favorite_static_members: Vec<String>,
    /// Worker count for batch resolution; the global rayon pool when unset.
    #[serde(default)]
    pub resolve_threads: Option<usize>,
}

impl AssistConfig {
    /// Load settings from `path`, falling back to defaults when the file is absent.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(Error::from(err)
                    .with_operation("config::from_path")
                    .with_context("path", path.display().to_string()));
            }
        };
        Self::from_toml_str(&text).map_err(|err| {
            err.with_operation("config::from_path")
                .with_context("path", path.display().to_string())
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AssistConfig = toml::from_str(text).map_err(|err| {
            Error::config_invalid("invalid TOML in assist config")
                .with_operation("config::from_toml_str")
                .set_source(err)
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.resolve_threads == Some(0) {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "resolve_threads must be at least 1",
            )
            .with_operation("config::validate"));
        }
        if let Some(bad) = self
            .favorite_static_members
            .iter()
            .find(|member| !member.contains('.'))
        {
            return Err(Error::config_invalid("favorite static member needs a type")
                .with_operation("config::validate")
                .with_context("member", bad.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_default() {
        let config = AssistConfig::from_toml_str("").unwrap();
        assert_eq!(config, AssistConfig::default());
    }

    #[test]
    fn fields_are_read() {
        let config = AssistConfig::from_toml_str(
            "favorite_static_members = [\"java.lang.Math.*\"]\nresolve_threads = 2\n",
        )
        .unwrap();
        assert_eq!(config.favorite_static_members, vec!["java.lang.Math.*"]);
        assert_eq!(config.resolve_threads, Some(2));
    }

    #[test]
    fn bad_toml_keeps_source() {
        let err = AssistConfig::from_toml_str("resolve_threads = [").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.source_ref().is_some());
    }

    #[test]
    fn zero_threads_rejected() {
        let err = AssistConfig::from_toml_str("resolve_threads = 0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.operation(), "config::validate");
    }

    #[test]
    fn unqualified_favorite_rejected() {
        let err = AssistConfig::from_toml_str("favorite_static_members = [\"max\"]").unwrap_err();
        assert_eq!(err.context_value("member"), Some("max"));
    }
}
