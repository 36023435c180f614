use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, DEFAULT_EXTENSION, DEFAULT_HINT};
use crate::rewrite::FixOptions;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[svgvarfix]` table.
    pub svgvarfix: SvgVarFixConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` if using defaults.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Options of the `[svgvarfix]` table.
pub struct SvgVarFixConfig {
    /// Expected input extension, with or without a leading dot.
    pub extension: Option<String>,
    /// Follow-up message printed after a complete fix.
    pub hint: Option<String>,
    /// Whether to print the follow-up message at all.
    pub show_hint: Option<bool>,
}

impl SvgVarFixConfig {
    /// Expected extension without the leading dot.
    pub fn extension(&self) -> &str {
        self.extension
            .as_deref()
            .map(|ext| ext.trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_EXTENSION)
    }

    /// Follow-up message, or `None` when disabled.
    pub fn hint(&self) -> Option<&str> {
        if self.show_hint == Some(false) {
            return None;
        }
        Some(self.hint.as_deref().unwrap_or(DEFAULT_HINT))
    }

    /// Rewrite options derived from this configuration.
    pub fn fix_options(&self, dry_run: bool) -> FixOptions {
        FixOptions {
            extension: self.extension().to_owned(),
            dry_run,
        }
    }
}

impl Config {
    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Unreadable or malformed files are reported and skipped.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                match Self::parse_file(&candidate) {
                    Ok(config) => return config,
                    Err(reason) => tracing::warn!(
                        path = %candidate.display(),
                        "ignoring configuration file: {reason}"
                    ),
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    fn parse_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut config = toml::from_str::<Config>(&content).map_err(|e| e.to_string())?;
        config.config_file_path = Some(path.to_path_buf());
        Ok(config)
    }
}
