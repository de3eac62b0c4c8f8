#![allow(clippy::missing_errors_doc)]

mod cli;
mod editor;
mod error;
mod logging;
mod report;
mod settings;

use std::io::Write as _;

use termshell_resolve::{
    ConfigProvider, EnvSource, OsUserInfo, PlatformClass, ProcessEnv, ShellResolver, UserInfo,
    UserInfoProvider,
};

pub use cli::Cli;
pub use editor::{EditorConfig, EditorSettings, TERMINAL_SECTION};
pub use error::AppError;
pub use report::Report;
pub use settings::AppSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Explain,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            Self::Json
        } else if cli.explain {
            Self::Explain
        } else {
            Self::Plain
        }
    }
}

pub fn run(cli: &Cli) -> Result<(), AppError> {
    let settings = AppSettings::load();
    logging::init_logging(
        cli.debug || settings.debug_logging,
        settings.max_log_size_bytes,
    );

    let platform = cli
        .platform
        .as_deref()
        .or(settings.platform_override.as_deref())
        .map_or_else(PlatformClass::current, PlatformClass::from_identifier);
    let config = editor_config(cli, &settings)?;

    let mut report = build_report(platform, &config, user_info_for(platform), &ProcessEnv);
    let checked = if cli.check {
        check_executable(&mut report)
    } else {
        Ok(())
    };

    let output = render(&report, OutputFormat::from_cli(cli))?;
    std::io::stdout().write_all(output.as_bytes())?;
    checked
}

/// An explicitly named settings file must load; the default one may be
/// missing or broken without stopping resolution.
pub fn editor_config(cli: &Cli, settings: &AppSettings) -> Result<EditorConfig, AppError> {
    if cli.no_settings {
        return Ok(EditorConfig::Missing);
    }

    if let Some(path) = &cli.settings {
        return EditorSettings::load(path).map(EditorConfig::Loaded);
    }

    Ok(settings
        .editor_settings_path()
        .map_or(EditorConfig::Missing, |path| EditorConfig::discover(&path)))
}

/// The user database only describes the host, so resolving for another
/// platform goes without it.
#[must_use]
pub fn user_info_for(platform: PlatformClass) -> &'static dyn UserInfoProvider {
    static NO_USER: UserInfo = UserInfo { shell: None };

    if platform == PlatformClass::current() {
        &OsUserInfo
    } else {
        log::debug!("Resolving for {platform} on another host, ignoring the user database");
        &NO_USER
    }
}

#[must_use]
pub fn build_report(
    platform: PlatformClass,
    config: &dyn ConfigProvider,
    user_info: &dyn UserInfoProvider,
    env: &dyn EnvSource,
) -> Report {
    let report = Report::new(
        platform,
        ShellResolver::new(platform, config, user_info, env).resolve_traced(),
    );

    for fault in &report.faults {
        log::debug!("Skipped {:?} source: {}", fault.kind, fault.message);
    }
    log::debug!(
        "Resolved {} shell {} from {}",
        platform,
        report.path,
        report.source
    );

    report
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String, AppError> {
    Ok(match format {
        OutputFormat::Plain => format!("{}\n", report.path),
        OutputFormat::Explain => report.explain(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            json
        }
    })
}

/// Record where the resolved shell lives, or fail if it cannot be run here.
pub fn check_executable(report: &mut Report) -> Result<(), AppError> {
    match which::which(&report.path) {
        Ok(found) => {
            report.executable = Some(found.display().to_string());
            Ok(())
        }
        Err(e) => {
            log::warn!("{} is not runnable on this host", report.path);
            Err(AppError::NotExecutable {
                path: report.path.clone(),
                reason: e.to_string(),
            })
        }
    }
}
