//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::output::OutputFormat;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default notes directory
    pub dir: Option<PathBuf>,

    /// Editor command for `edit` without field options
    pub editor: Option<String>,

    /// Output format used when a command is given no `--format`
    pub default_format: Option<OutputFormat>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/quill/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quill")
            .join("config.toml")
    }

    /// Resolve the notes directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Current working directory
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the output format: `--format`, then config, then human.
    pub fn format(&self, cli_format: Option<OutputFormat>) -> OutputFormat {
        cli_format.or(self.default_format).unwrap_or_default()
    }

    /// Resolve the editor command.
    ///
    /// Precedence order:
    /// 1. Config file `editor` setting
    /// 2. $EDITOR environment variable
    /// 3. $VISUAL environment variable
    /// 4. "vi" as fallback
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_dir() {
        let config = Config::default();
        assert!(config.dir.is_none());
        assert!(config.default_format.is_none());
    }

    #[test]
    fn notes_dir_prefers_cli_arg() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            ..Default::default()
        };
        let cli_dir = PathBuf::from("/cli/notes");
        assert_eq!(
            config.notes_dir(Some(&cli_dir)),
            PathBuf::from("/cli/notes")
        );
    }

    #[test]
    fn notes_dir_falls_back_to_config() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            ..Default::default()
        };
        assert_eq!(config.notes_dir(None), PathBuf::from("/config/notes"));
    }

    #[test]
    fn notes_dir_falls_back_to_cwd() {
        let config = Config::default();
        assert_eq!(config.notes_dir(None), PathBuf::from("."));
    }

    #[test]
    fn format_precedence() {
        let config = Config {
            default_format: Some(OutputFormat::Json),
            ..Default::default()
        };
        assert_eq!(config.format(None), OutputFormat::Json);
        assert_eq!(config.format(Some(OutputFormat::Human)), OutputFormat::Human);
        assert_eq!(Config::default().format(None), OutputFormat::Human);
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("quill/config.toml"));
    }

    #[test]
    fn load_from_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.dir.is_none());
    }

    #[test]
    fn load_from_parses_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "dir = \"/home/me/notes\"\neditor = \"nano\"\ndefault_format = \"json\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.dir, Some(PathBuf::from("/home/me/notes")));
        assert_eq!(config.editor(), "nano");
        assert_eq!(config.default_format, Some(OutputFormat::Json));
    }

    #[test]
    fn load_from_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "vault = \"x\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config file"));
    }
}
