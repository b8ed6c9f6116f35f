mod mode;

use std::path::Path;

use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
pub use mode::ErrorMode;
pub use mode::UnknownErrorMode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub error_mode: ErrorMode,
}

impl Settings {
    /// Load settings for a project, layering the user config file under the
    /// project's `.lqd.toml` and `lqd.toml`.
    pub fn new(project_root: &Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("com.github", "lqd", "lqd")
            .map(|proj_dirs| proj_dirs.config_dir().join("lqd.toml"));

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    fn load_from_paths(
        project_root: &Path,
        user_config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            tracing::debug!("Looking for user config at {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            File::from(project_root.join(".lqd.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("lqd.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(error_mode = %settings.error_mode, "Loaded settings");
        Ok(settings)
    }

    #[must_use]
    pub fn with_error_mode(self, error_mode: ErrorMode) -> Self {
        Self { error_mode }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn strict() -> Settings {
        Settings {
            error_mode: ErrorMode::Strict,
        }
    }

    fn lax() -> Settings {
        Settings {
            error_mode: ErrorMode::Lax,
        }
    }

    mod defaults {
        use super::*;

        #[test]
        fn test_load_no_files() {
            let dir = tempdir().unwrap();
            let settings = Settings::load_from_paths(dir.path(), None).unwrap();
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.error_mode, ErrorMode::Lax);
        }

        #[test]
        fn test_empty_file_keeps_defaults() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("lqd.toml"), "").unwrap();
            let settings = Settings::load_from_paths(dir.path(), None).unwrap();
            assert_eq!(settings, Settings::default());
        }
    }

    mod project_files {
        use super::*;

        #[test]
        fn test_load_lqd_toml_only() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("lqd.toml"), "error_mode = \"strict\"").unwrap();
            let settings = Settings::load_from_paths(dir.path(), None).unwrap();
            assert_eq!(settings, strict());
        }

        #[test]
        fn test_load_dot_lqd_toml_only() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join(".lqd.toml"), "error_mode = \"warn\"").unwrap();
            let settings = Settings::load_from_paths(dir.path(), None).unwrap();
            assert_eq!(settings.error_mode, ErrorMode::Warn);
        }
    }

    mod priority {
        use super::*;

        #[test]
        fn test_project_priority_lqd_overrides_dot_lqd() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join(".lqd.toml"), "error_mode = \"lax\"").unwrap();
            fs::write(dir.path().join("lqd.toml"), "error_mode = \"strict\"").unwrap();
            let settings = Settings::load_from_paths(dir.path(), None).unwrap();
            assert_eq!(settings, strict());
        }

        #[test]
        fn test_project_overrides_user() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_conf_path = user_dir.path().join("lqd.toml");
            fs::write(&user_conf_path, "error_mode = \"strict\"").unwrap();
            fs::write(project_dir.path().join("lqd.toml"), "error_mode = \"lax\"").unwrap();

            let settings =
                Settings::load_from_paths(project_dir.path(), Some(&user_conf_path)).unwrap();
            assert_eq!(settings, lax());
        }
    }

    mod user_config {
        use super::*;

        #[test]
        fn test_load_user_config_only() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_conf_path = user_dir.path().join("lqd.toml");
            fs::write(&user_conf_path, "error_mode = \"strict\"").unwrap();

            let settings =
                Settings::load_from_paths(project_dir.path(), Some(&user_conf_path)).unwrap();
            assert_eq!(settings, strict());
        }

        #[test]
        fn test_no_user_config_file_present() {
            let user_dir = tempdir().unwrap();
            let project_dir = tempdir().unwrap();
            let user_conf_path = user_dir.path().join("lqd.toml");

            let settings =
                Settings::load_from_paths(project_dir.path(), Some(&user_conf_path)).unwrap();
            assert_eq!(settings, Settings::default());
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_invalid_toml_content() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("lqd.toml"), "error_mode = = strict").unwrap();
            let result = Settings::load_from_paths(dir.path(), None);
            assert!(matches!(result.unwrap_err(), ConfigError::Config(_)));
        }

        #[test]
        fn test_unknown_error_mode() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("lqd.toml"), "error_mode = \"pedantic\"").unwrap();
            let result = Settings::load_from_paths(dir.path(), None);
            assert!(matches!(result.unwrap_err(), ConfigError::Config(_)));
        }
    }

    #[test]
    fn test_with_error_mode_overrides() {
        let settings = Settings::default().with_error_mode(ErrorMode::Strict);
        assert_eq!(settings, strict());
    }
}
