use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserInfoError {
    #[error("No user database entry for uid {uid}")]
    UnknownUser { uid: u32 },

    #[error("User database lookup failed: {0}")]
    Lookup(String),
}

/// Facts about the current OS user that matter for shell selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub shell: Option<String>,
}

impl UserInfo {
    #[must_use]
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: Some(shell.into()),
        }
    }

    /// The registered shell, if it is a non-empty string.
    #[must_use]
    pub fn login_shell(&self) -> Option<&str> {
        self.shell.as_deref().filter(|shell| !shell.is_empty())
    }
}

/// Look up the current user in the system user database.
///
/// # Errors
/// Returns an error if the database cannot be queried or has no entry for
/// the current uid.
#[cfg(unix)]
pub fn current_user_info() -> Result<UserInfo, UserInfoError> {
    use nix::unistd::{Uid, User};

    let uid = Uid::current();
    let user = User::from_uid(uid)
        .map_err(|e| UserInfoError::Lookup(e.to_string()))?
        .ok_or(UserInfoError::UnknownUser { uid: uid.as_raw() })?;

    let shell = user.shell.to_string_lossy().into_owned();
    log::debug!("User {} has login shell {:?}", user.name, shell);

    Ok(UserInfo {
        shell: Some(shell).filter(|s| !s.is_empty()),
    })
}

/// Windows has no per-user login shell.
///
/// # Errors
/// Never fails on this platform; the signature matches the Unix lookup.
#[cfg(not(unix))]
pub fn current_user_info() -> Result<UserInfo, UserInfoError> {
    Ok(UserInfo::default())
}
