use serde::{Deserialize, Serialize};

use crate::tables::PlatformTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformClass {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl PlatformClass {
    /// Classify a host platform identifier.
    ///
    /// Accepts the identifiers editors report for the host (`win32`,
    /// `darwin`, `linux`) as well as Rust target names (`windows`, `macos`).
    /// Anything else is [`PlatformClass::Other`].
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "win32" | "windows" => Self::Windows,
            "darwin" | "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn current() -> Self {
        Self::from_identifier(std::env::consts::OS)
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub fn table(self) -> &'static PlatformTable {
        PlatformTable::for_class(self)
    }
}

impl std::fmt::Display for PlatformClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
