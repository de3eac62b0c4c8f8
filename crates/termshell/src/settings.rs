use serde::Deserialize;
use std::path::{Path, PathBuf};
use termshell_platform::AppPaths;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,

    /// Platform identifier to resolve for instead of the host.
    #[serde(default)]
    pub platform_override: Option<String>,

    /// Editor settings file to read when `--settings` is not given.
    #[serde(default)]
    pub editor_settings: Option<PathBuf>,
}

fn default_max_log_size_bytes() -> u64 {
    1024 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
            platform_override: None,
            editor_settings: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        let Ok(paths) = AppPaths::new() else {
            return Self::default();
        };
        Self::load_from(&paths.app_settings_file())
    }

    /// Missing or invalid files yield the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// The editor settings file to read, if any: the configured one, else
    /// `settings.json` in the application config directory.
    pub fn editor_settings_path(&self) -> Option<PathBuf> {
        self.editor_settings.clone().or_else(|| {
            AppPaths::new()
                .ok()
                .map(|paths| paths.editor_settings_file())
        })
    }
}
