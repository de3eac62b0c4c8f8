//! Editor settings files as a source of terminal profiles.
//!
//! Settings follow the VS Code `settings.json` layout: comments and trailing
//! commas are allowed, and keys may be written flat
//! (`"terminal.integrated.profiles.linux"`) or as nested objects.

use jsonc_parser::ParseOptions;
use serde_json::{Map, Value};
use std::path::Path;
use termshell_resolve::{ConfigAccessError, ConfigProvider};

use crate::error::AppError;

pub const TERMINAL_SECTION: &str = "terminal.integrated";

#[derive(Debug, Clone, Default)]
pub struct EditorSettings {
    values: Map<String, Value>,
}

impl EditorSettings {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// A file holding only whitespace and comments has no settings.
    pub fn parse(content: &str, path: &Path) -> Result<Self, AppError> {
        let value = jsonc_parser::parse_to_serde_value(content, &settings_syntax()).map_err(
            |source| AppError::SettingsParse {
                path: path.to_path_buf(),
                source,
            },
        )?;

        match value {
            None => Ok(Self::default()),
            Some(Value::Object(values)) => Ok(Self { values }),
            Some(_) => Err(AppError::SettingsNotObject {
                path: path.to_path_buf(),
            }),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        lookup(&self.values, key)
    }
}

// Property names must still be quoted, as in the editor's own files.
fn settings_syntax() -> ParseOptions {
    ParseOptions {
        allow_comments: true,
        allow_trailing_commas: true,
        allow_loose_object_property_names: false,
        ..ParseOptions::default()
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }

    key.match_indices('.').find_map(|(index, _)| {
        let (head, rest) = (&key[..index], &key[index + 1..]);
        match map.get(head) {
            Some(Value::Object(nested)) => lookup(nested, rest),
            _ => None,
        }
    })
}

/// The configuration handed to the resolver.
///
/// A settings file that exists but cannot be used is kept as `Unreadable`,
/// so the failure is reported as a configuration fault and resolution
/// carries on with the remaining sources.
#[derive(Debug, Clone)]
pub enum EditorConfig {
    Loaded(EditorSettings),
    Unreadable(String),
    Missing,
}

impl EditorConfig {
    /// Load a settings file the user did not name explicitly.
    #[must_use]
    pub fn discover(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No editor settings at {}", path.display());
            return Self::Missing;
        }

        match EditorSettings::load(path) {
            Ok(settings) => {
                log::debug!("Loaded editor settings from {}", path.display());
                Self::Loaded(settings)
            }
            Err(e) => {
                log::warn!("{e}");
                Self::Unreadable(e.to_string())
            }
        }
    }
}

impl ConfigProvider for EditorConfig {
    fn get(&self, key: &str) -> Result<Option<Value>, ConfigAccessError> {
        match self {
            Self::Loaded(settings) => Ok(settings
                .get(&format!("{TERMINAL_SECTION}.{key}"))
                .cloned()),
            Self::Unreadable(message) => Err(ConfigAccessError::Unavailable(message.clone())),
            Self::Missing => Ok(None),
        }
    }
}
