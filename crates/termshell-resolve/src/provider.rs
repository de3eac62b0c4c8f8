use serde_json::Value;
use std::collections::HashMap;
use termshell_platform::{UserInfo, UserInfoError, current_user_info};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigAccessError {
    #[error("Configuration unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid value for `{key}`: {message}")]
    Malformed { key: String, message: String },
}

impl ConfigAccessError {
    pub fn malformed(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Malformed {
            key: key.into(),
            message: message.to_string(),
        }
    }
}

/// Read access to the editor's `terminal.integrated` settings section.
///
/// Keys are relative to that section, e.g. `defaultProfile.linux`.
pub trait ConfigProvider {
    /// # Errors
    /// Returns an error when the underlying settings store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, ConfigAccessError>;
}

/// Configuration that never has a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConfig;

impl ConfigProvider for NoConfig {
    fn get(&self, _key: &str) -> Result<Option<Value>, ConfigAccessError> {
        Ok(None)
    }
}

/// In-memory configuration for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    values: HashMap<String, Value>,
}

impl MemoryConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

impl ConfigProvider for MemoryConfig {
    fn get(&self, key: &str) -> Result<Option<Value>, ConfigAccessError> {
        Ok(self.values.get(key).cloned())
    }
}

pub trait UserInfoProvider {
    /// # Errors
    /// Returns an error when the user database cannot be queried.
    fn user_info(&self) -> Result<UserInfo, UserInfoError>;
}

/// The operating system's record of the current user.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsUserInfo;

impl UserInfoProvider for OsUserInfo {
    fn user_info(&self) -> Result<UserInfo, UserInfoError> {
        current_user_info()
    }
}

impl UserInfoProvider for UserInfo {
    fn user_info(&self) -> Result<UserInfo, UserInfoError> {
        Ok(self.clone())
    }
}

pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
