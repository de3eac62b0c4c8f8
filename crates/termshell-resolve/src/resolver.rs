use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use termshell_platform::{PlatformClass, PlatformTable};

use crate::profile::Profile;
use crate::provider::{ConfigAccessError, ConfigProvider, EnvSource, UserInfoProvider};

/// Which step of the fallback chain produced the shell path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellSource {
    ProfilePath,
    ProfileSource,
    ProfileName,
    UserInfo,
    Environment,
    PlatformDefault,
}

impl ShellSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProfilePath => "profile path",
            Self::ProfileSource => "profile source",
            Self::ProfileName => "profile name",
            Self::UserInfo => "user info",
            Self::Environment => "environment",
            Self::PlatformDefault => "platform default",
        }
    }
}

impl std::fmt::Display for ShellSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    ConfigurationAccess,
    UserInfoAccess,
}

/// A source that raised while being read and was treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFault {
    pub kind: FaultKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub path: String,
    pub source: ShellSource,
    pub faults: Vec<SourceFault>,
}

struct DefaultProfile {
    name: String,
    profile: Profile,
}

pub struct ShellResolver<'a> {
    platform: PlatformClass,
    config: &'a dyn ConfigProvider,
    user_info: &'a dyn UserInfoProvider,
    env: &'a dyn EnvSource,
}

impl<'a> ShellResolver<'a> {
    #[must_use]
    pub fn new(
        platform: PlatformClass,
        config: &'a dyn ConfigProvider,
        user_info: &'a dyn UserInfoProvider,
        env: &'a dyn EnvSource,
    ) -> Self {
        Self {
            platform,
            config,
            user_info,
            env,
        }
    }

    #[must_use]
    pub fn resolve(&self) -> String {
        self.resolve_traced().path
    }

    /// Resolve the shell path and report how it was chosen.
    ///
    /// Order: profile path, profile source tag, profile name keyword, user
    /// database, environment variable, platform default. A source that
    /// fails to read is recorded in `faults` and skipped.
    #[must_use]
    pub fn resolve_traced(&self) -> Resolution {
        let table = self.platform.table();
        let mut faults = Vec::new();

        match self.read_default_profile(table) {
            Ok(Some(default)) => {
                if let Some((path, source)) = match_profile(table, &default) {
                    return Resolution {
                        path,
                        source,
                        faults,
                    };
                }
            }
            Ok(None) => {}
            Err(e) => faults.push(SourceFault {
                kind: FaultKind::ConfigurationAccess,
                message: e.to_string(),
            }),
        }

        match self.user_info.user_info() {
            Ok(info) => {
                if let Some(shell) = info.login_shell() {
                    return Resolution {
                        path: shell.to_string(),
                        source: ShellSource::UserInfo,
                        faults,
                    };
                }
            }
            Err(e) => faults.push(SourceFault {
                kind: FaultKind::UserInfoAccess,
                message: e.to_string(),
            }),
        }

        if let Some(name) = table.env_var
            && let Some(value) = self.env.var(name)
            && !value.is_empty()
        {
            return Resolution {
                path: value,
                source: ShellSource::Environment,
                faults,
            };
        }

        Resolution {
            path: table.default_shell.to_string(),
            source: ShellSource::PlatformDefault,
            faults,
        }
    }

    /// Read both terminal settings, then pick out the default profile's
    /// entry. Other entries in the table are never inspected.
    fn read_default_profile(
        &self,
        table: &PlatformTable,
    ) -> Result<Option<DefaultProfile>, ConfigAccessError> {
        let (Some(default_key), Some(profiles_key)) =
            (table.default_profile_key(), table.profiles_key())
        else {
            return Ok(None);
        };

        let default_name = match self.config.get(&default_key)? {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(other) => {
                return Err(ConfigAccessError::malformed(
                    default_key,
                    format!("expected a profile name, found {other}"),
                ));
            }
        };

        let profiles = match self.config.get(&profiles_key)? {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(profiles)) => profiles,
            Some(other) => {
                return Err(ConfigAccessError::malformed(
                    profiles_key,
                    format!("expected a map of profiles, found {other}"),
                ));
            }
        };

        let Some(name) = default_name.filter(|name| !name.is_empty()) else {
            return Ok(None);
        };
        let Some(entry) = profiles.get(&name) else {
            return Ok(None);
        };

        // A `null` entry hides a built-in profile; its name still counts.
        let profile = match entry {
            Value::Null => Profile::default(),
            value => Profile::deserialize(value).map_err(|e| {
                ConfigAccessError::malformed(format!("{profiles_key}.{name}"), e)
            })?,
        };

        Ok(Some(DefaultProfile { name, profile }))
    }
}

fn match_profile(
    table: &PlatformTable,
    default: &DefaultProfile,
) -> Option<(String, ShellSource)> {
    let profile = &default.profile;

    if let Some(path) = profile.explicit_path() {
        return Some((path.to_string(), ShellSource::ProfilePath));
    }

    if let Some(path) = profile
        .source_tag()
        .and_then(|source| table.path_for_source(source))
    {
        return Some((path.to_string(), ShellSource::ProfileSource));
    }

    table
        .path_for_profile_name(&default.name)
        .map(|path| (path.to_string(), ShellSource::ProfileName))
}

/// Resolve the shell path for `platform` from the given sources.
#[must_use]
pub fn resolve(
    platform: PlatformClass,
    config: &dyn ConfigProvider,
    user_info: &dyn UserInfoProvider,
    env: &dyn EnvSource,
) -> String {
    ShellResolver::new(platform, config, user_info, env).resolve()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use termshell_platform::{
        CMD, POWERSHELL_7, POWERSHELL_LEGACY, PlatformClass, UserInfo, UserInfoError,
    };

    use super::{FaultKind, ShellResolver, ShellSource};
    use crate::provider::{ConfigAccessError, ConfigProvider, MemoryConfig, NoConfig, UserInfoProvider};

    struct FailingConfig;

    impl ConfigProvider for FailingConfig {
        fn get(&self, _key: &str) -> Result<Option<Value>, ConfigAccessError> {
            Err(ConfigAccessError::Unavailable("Configuration error".to_string()))
        }
    }

    struct FailingUserInfo;

    impl UserInfoProvider for FailingUserInfo {
        fn user_info(&self) -> Result<UserInfo, UserInfoError> {
            Err(UserInfoError::Lookup("userInfo error".to_string()))
        }
    }

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn windows_config(default_profile: &str, profiles: Value) -> MemoryConfig {
        MemoryConfig::new()
            .with("defaultProfile.windows", json!(default_profile))
            .with("profiles.windows", profiles)
    }

    #[test]
    fn source_tag_is_checked_before_profile_name() {
        // The name says PowerShell but the tag says WSL.
        let config = windows_config("PowerShell", json!({ "PowerShell": { "source": "WSL" } }));
        let no_user = UserInfo::default();
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::Windows, &config, &no_user, &env).resolve_traced();

        assert_eq!(resolution.path, "/bin/bash");
        assert_eq!(resolution.source, ShellSource::ProfileSource);
    }

    #[test]
    fn unknown_source_tag_falls_back_to_profile_name() {
        let config = windows_config(
            "Windows PowerShell",
            json!({ "Windows PowerShell": { "source": "Git Bash" } }),
        );
        let no_user = UserInfo::default();
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::Windows, &config, &no_user, &env).resolve_traced();

        assert_eq!(resolution.path, POWERSHELL_LEGACY);
        assert_eq!(resolution.source, ShellSource::ProfileName);
    }

    #[test]
    fn name_heuristic_needs_a_matching_profile_entry() {
        let config = windows_config("PowerShell", json!({}));
        let no_user = UserInfo::default();
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::Windows, &config, &no_user, &env).resolve_traced();

        assert_eq!(resolution.path, CMD);
        assert_eq!(resolution.source, ShellSource::PlatformDefault);
    }

    #[test]
    fn empty_profile_path_is_skipped() {
        let config = windows_config(
            "PowerShell",
            json!({ "PowerShell": { "path": "", "source": "PowerShell" } }),
        );
        let no_user = UserInfo::default();
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::Windows, &config, &no_user, &env).resolve_traced();

        assert_eq!(resolution.path, POWERSHELL_7);
        assert_eq!(resolution.source, ShellSource::ProfileSource);
    }

    #[test]
    fn posix_platforms_ignore_name_keywords() {
        let config = MemoryConfig::new()
            .with("defaultProfile.linux", json!("pwsh"))
            .with("profiles.linux", json!({ "pwsh": { "source": "PowerShell" } }));
        let no_user = UserInfo::default();
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::Linux, &config, &no_user, &env).resolve_traced();

        assert_eq!(resolution.path, "/bin/bash");
        assert_eq!(resolution.source, ShellSource::PlatformDefault);
    }

    #[test]
    fn configuration_for_other_platforms_is_never_read() {
        let no_user = UserInfo::default();
        let env = env(&[("SHELL", "/usr/bin/ksh")]);

        let resolution =
            ShellResolver::new(PlatformClass::Other, &FailingConfig, &no_user, &env)
                .resolve_traced();

        assert_eq!(resolution.path, "/bin/sh");
        assert!(resolution.faults.is_empty());
    }

    #[test]
    fn other_platform_still_consults_user_info() {
        let user = UserInfo::with_shell("/usr/bin/ksh");
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::Other, &NoConfig, &user, &env).resolve_traced();

        assert_eq!(resolution.path, "/usr/bin/ksh");
        assert_eq!(resolution.source, ShellSource::UserInfo);
    }

    #[test]
    fn malformed_profile_table_is_treated_as_absent() {
        let config = MemoryConfig::new()
            .with("defaultProfile.osx", json!("fish"))
            .with("profiles.osx", json!(["not", "a", "map"]));
        let user = UserInfo::with_shell("/bin/zsh");
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::MacOs, &config, &user, &env).resolve_traced();

        assert_eq!(resolution.path, "/bin/zsh");
        assert_eq!(resolution.source, ShellSource::UserInfo);
        assert_eq!(resolution.faults.len(), 1);
        assert_eq!(resolution.faults[0].kind, FaultKind::ConfigurationAccess);
    }

    #[test]
    fn malformed_default_entry_fault_names_the_entry() {
        let config = MemoryConfig::new()
            .with("defaultProfile.linux", json!("fish"))
            .with(
                "profiles.linux",
                json!({ "fish": { "path": 42 }, "bash": { "path": "/bin/bash" } }),
            );
        let no_user = UserInfo::default();
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::Linux, &config, &no_user, &env).resolve_traced();

        assert_eq!(resolution.source, ShellSource::PlatformDefault);
        assert_eq!(resolution.faults.len(), 1);
        assert!(
            resolution.faults[0]
                .message
                .starts_with("Invalid value for `profiles.linux.fish`:")
        );
    }

    #[test]
    fn null_default_entry_still_matches_by_name() {
        let config = windows_config("Ubuntu WSL", json!({ "Ubuntu WSL": null }));
        let no_user = UserInfo::default();
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::Windows, &config, &no_user, &env).resolve_traced();

        assert_eq!(resolution.path, "/bin/bash");
        assert_eq!(resolution.source, ShellSource::ProfileName);
    }

    #[test]
    fn non_string_default_profile_is_treated_as_absent() {
        let config = MemoryConfig::new()
            .with("defaultProfile.linux", json!(7))
            .with("profiles.linux", json!({ "7": { "path": "/usr/bin/fish" } }));
        let no_user = UserInfo::default();
        let env = env(&[("SHELL", "/usr/bin/zsh")]);

        let resolution =
            ShellResolver::new(PlatformClass::Linux, &config, &no_user, &env).resolve_traced();

        assert_eq!(resolution.path, "/usr/bin/zsh");
        assert_eq!(resolution.source, ShellSource::Environment);
        assert_eq!(resolution.faults[0].kind, FaultKind::ConfigurationAccess);
    }

    #[test]
    fn every_failure_is_recorded() {
        let env = env(&[]);

        let resolution =
            ShellResolver::new(PlatformClass::Linux, &FailingConfig, &FailingUserInfo, &env)
                .resolve_traced();

        assert_eq!(resolution.path, "/bin/bash");
        let kinds: Vec<FaultKind> = resolution.faults.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![FaultKind::ConfigurationAccess, FaultKind::UserInfoAccess]
        );
        assert_eq!(
            resolution.faults[1].message,
            "User database lookup failed: userInfo error"
        );
    }

    #[test]
    fn empty_environment_variable_is_skipped() {
        let no_user = UserInfo::default();
        let env = env(&[("COMSPEC", "")]);

        let resolution =
            ShellResolver::new(PlatformClass::Windows, &NoConfig, &no_user, &env).resolve_traced();

        assert_eq!(resolution.path, CMD);
        assert_eq!(resolution.source, ShellSource::PlatformDefault);
    }

    #[test]
    fn windows_ignores_shell_variable() {
        let no_user = UserInfo::default();
        let env = env(&[("SHELL", "/usr/bin/bash")]);

        let path = ShellResolver::new(PlatformClass::Windows, &NoConfig, &no_user, &env).resolve();

        assert_eq!(path, CMD);
    }

    #[test]
    fn shell_source_serializes_as_snake_case() {
        let value = serde_json::to_value(ShellSource::PlatformDefault)
            .expect("shell source should serialize");
        assert_eq!(value, json!("platform_default"));
    }
}
