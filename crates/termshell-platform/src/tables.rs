use crate::class::PlatformClass;

pub const POWERSHELL_7: &str = r"C:\Program Files\PowerShell\7\pwsh.exe";
pub const POWERSHELL_LEGACY: &str = r"C:\Windows\System32\WindowsPowerShell\v1.0\powershell.exe";
pub const CMD: &str = r"C:\Windows\System32\cmd.exe";
pub const WSL_BASH: &str = "/bin/bash";

/// A well-known shell family and the executable it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyPath {
    pub key: &'static str,
    pub path: &'static str,
}

/// Every piece of per-platform data the resolver needs.
///
/// The resolution order itself is platform-agnostic; only these tables
/// differ between platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTable {
    /// Suffix of the `defaultProfile.<ns>` / `profiles.<ns>` configuration keys.
    pub namespace: Option<&'static str>,
    /// Environment variable consulted before the hard-coded default.
    pub env_var: Option<&'static str>,
    pub default_shell: &'static str,
    /// Exact (case-sensitive) matches on a profile's `source` tag.
    pub source_families: &'static [FamilyPath],
    /// Lower-case keywords searched for in the profile name, in order.
    pub name_keywords: &'static [FamilyPath],
}

static WINDOWS: PlatformTable = PlatformTable {
    namespace: Some("windows"),
    env_var: Some("COMSPEC"),
    default_shell: CMD,
    source_families: &[
        FamilyPath {
            key: "PowerShell",
            path: POWERSHELL_7,
        },
        FamilyPath {
            key: "WSL",
            path: WSL_BASH,
        },
    ],
    name_keywords: &[
        FamilyPath {
            key: "powershell",
            path: POWERSHELL_LEGACY,
        },
        FamilyPath {
            key: "wsl",
            path: WSL_BASH,
        },
    ],
};

static MACOS: PlatformTable = PlatformTable {
    namespace: Some("osx"),
    env_var: Some("SHELL"),
    default_shell: "/bin/zsh",
    source_families: &[],
    name_keywords: &[],
};

static LINUX: PlatformTable = PlatformTable {
    namespace: Some("linux"),
    env_var: Some("SHELL"),
    default_shell: "/bin/bash",
    source_families: &[],
    name_keywords: &[],
};

static OTHER: PlatformTable = PlatformTable {
    namespace: None,
    env_var: None,
    default_shell: "/bin/sh",
    source_families: &[],
    name_keywords: &[],
};

impl PlatformTable {
    #[must_use]
    pub fn for_class(class: PlatformClass) -> &'static Self {
        match class {
            PlatformClass::Windows => &WINDOWS,
            PlatformClass::MacOs => &MACOS,
            PlatformClass::Linux => &LINUX,
            PlatformClass::Other => &OTHER,
        }
    }

    #[must_use]
    pub fn default_profile_key(&self) -> Option<String> {
        self.namespace.map(|ns| format!("defaultProfile.{ns}"))
    }

    #[must_use]
    pub fn profiles_key(&self) -> Option<String> {
        self.namespace.map(|ns| format!("profiles.{ns}"))
    }

    #[must_use]
    pub fn path_for_source(&self, source: &str) -> Option<&'static str> {
        self.source_families
            .iter()
            .find(|family| family.key == source)
            .map(|family| family.path)
    }

    #[must_use]
    pub fn path_for_profile_name(&self, name: &str) -> Option<&'static str> {
        let name = name.to_lowercase();
        self.name_keywords
            .iter()
            .find(|family| name.contains(family.key))
            .map(|family| family.path)
    }
}
