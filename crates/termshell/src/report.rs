use serde::Serialize;
use std::fmt::Write as _;
use termshell_resolve::{
    FaultKind, PlatformClass, Resolution, ShellKind, ShellSource, SourceFault,
};

/// A resolution together with the facts the CLI prints about it.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub path: String,
    pub kind: ShellKind,
    pub source: ShellSource,
    pub platform: PlatformClass,
    pub faults: Vec<SourceFault>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
}

impl Report {
    #[must_use]
    pub fn new(platform: PlatformClass, resolution: Resolution) -> Self {
        Self {
            kind: ShellKind::from_path(&resolution.path),
            path: resolution.path,
            source: resolution.source,
            platform,
            faults: resolution.faults,
            executable: None,
        }
    }

    #[must_use]
    pub fn explain(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "shell:    {}", self.path);
        let _ = writeln!(out, "kind:     {}", self.kind);
        let _ = writeln!(out, "source:   {}", self.source);
        let _ = writeln!(out, "platform: {}", self.platform);
        if let Some(executable) = &self.executable {
            let _ = writeln!(out, "found at: {executable}");
        }
        for fault in &self.faults {
            let label = match fault.kind {
                FaultKind::ConfigurationAccess => "configuration",
                FaultKind::UserInfoAccess => "user info",
            };
            let _ = writeln!(out, "skipped:  {label} ({})", fault.message);
        }
        out
    }
}
