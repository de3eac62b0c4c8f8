use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not read settings file {}: {source}", path.display())]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not parse settings file {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        source: jsonc_parser::errors::ParseError,
    },

    #[error("Settings file {} must contain a JSON object", path.display())]
    SettingsNotObject { path: PathBuf },

    #[error("Resolved shell {path} is not an executable: {reason}")]
    NotExecutable { path: String, reason: String },

    #[error("Could not write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Could not encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AppError {
    /// Errors that mean the user's own settings are unusable, as opposed to
    /// failures while producing output.
    #[must_use]
    pub fn is_settings_error(&self) -> bool {
        matches!(
            self,
            Self::SettingsRead { .. } | Self::SettingsParse { .. } | Self::SettingsNotObject { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::AppError;

    #[test]
    fn settings_errors_include_path() {
        let error = AppError::SettingsNotObject {
            path: PathBuf::from("settings.json"),
        };

        assert_eq!(
            error.to_string(),
            "Settings file settings.json must contain a JSON object"
        );
        assert!(error.is_settings_error());
    }

    #[test]
    fn not_executable_is_not_a_settings_error() {
        let error = AppError::NotExecutable {
            path: "/bin/missing".to_string(),
            reason: "cannot find binary path".to_string(),
        };

        assert!(!error.is_settings_error());
        assert_eq!(
            error.to_string(),
            "Resolved shell /bin/missing is not an executable: cannot find binary path"
        );
    }
}
