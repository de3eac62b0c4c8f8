use clap::Parser;
use std::path::PathBuf;

/// Print the shell executable a new terminal should use.
#[derive(Debug, Parser)]
#[command(name = "termshell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Editor settings file holding `terminal.integrated.*` profiles
    #[arg(short, long, conflicts_with = "no_settings")]
    pub settings: Option<PathBuf>,

    /// Ignore editor settings entirely
    #[arg(long)]
    pub no_settings: bool,

    /// Resolve for another platform (win32, darwin, linux, ...)
    #[arg(short, long)]
    pub platform: Option<String>,

    /// Show which source produced the shell and which sources failed
    #[arg(short, long, conflicts_with = "json")]
    pub explain: bool,

    /// Print the resolution as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail unless the resolved shell is an executable on this host
    #[arg(long)]
    pub check: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
