//! Application settings loaded via OrthoConfig.
//!
//! Values come from `RECIPEHUB_*` environment variables and configuration
//! files; the CLI's own flags are parsed separately with clap.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const SESSION_DIR_NAME: &str = "recipehub";

fn default_session_dir() -> PathBuf {
    std::env::temp_dir().join(SESSION_DIR_NAME)
}

/// Configuration for the recipehub CLI.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPEHUB")]
pub struct AppSettings {
    /// Directory holding the persisted session record.
    pub session_dir: Option<PathBuf>,
    /// Seed the recipe store with the bundled sample catalogue.
    pub sample_data: Option<bool>,
}

impl AppSettings {
    /// Return the configured session directory, falling back to
    /// `<temp dir>/recipehub`.
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(default_session_dir)
    }

    /// Whether to seed the bundled sample catalogue; on unless disabled.
    pub fn sample_data(&self) -> bool {
        self.sample_data.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("recipehub")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("RECIPEHUB_SESSION_DIR", None::<String>),
            ("RECIPEHUB_SAMPLE_DATA", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.sample_data());
        assert_eq!(settings.session_dir(), default_session_dir());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "RECIPEHUB_SESSION_DIR",
                Some("/tmp/recipehub-sessions".to_owned()),
            ),
            ("RECIPEHUB_SAMPLE_DATA", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.sample_data());
        assert_eq!(
            settings.session_dir(),
            PathBuf::from("/tmp/recipehub-sessions")
        );
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(true), true)]
    #[case(Some(false), false)]
    fn sample_data_is_on_unless_disabled(#[case] raw: Option<bool>, #[case] expected: bool) {
        let settings = AppSettings {
            session_dir: None,
            sample_data: raw,
        };
        assert_eq!(settings.sample_data(), expected);
    }
}
