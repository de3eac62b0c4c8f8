use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
    Sh,
    Dash,
    Ksh,
    Csh,
    Tcsh,
    PowerShell,
    Cmd,
    Unknown,
}

impl ShellKind {
    /// Classify a shell executable path by its file name.
    ///
    /// Both `/` and `\` separate components, so Windows paths classify the
    /// same on every host.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let file_name = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(path)
            .to_lowercase();
        let stem = file_name.strip_suffix(".exe").unwrap_or(&file_name);

        match stem {
            "bash" => Self::Bash,
            "zsh" => Self::Zsh,
            "fish" => Self::Fish,
            "sh" => Self::Sh,
            "dash" => Self::Dash,
            "ksh" => Self::Ksh,
            "csh" => Self::Csh,
            "tcsh" => Self::Tcsh,
            "pwsh" | "powershell" => Self::PowerShell,
            "cmd" => Self::Cmd,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
            Self::Sh => "sh",
            Self::Dash => "dash",
            Self::Ksh => "ksh",
            Self::Csh => "csh",
            Self::Tcsh => "tcsh",
            Self::PowerShell => "powershell",
            Self::Cmd => "cmd",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ShellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
