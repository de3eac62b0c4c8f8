mod kind;
mod profile;
mod provider;
mod resolver;

pub use kind::ShellKind;
pub use profile::Profile;
pub use provider::{
    ConfigAccessError, ConfigProvider, EnvSource, MemoryConfig, NoConfig, OsUserInfo, ProcessEnv,
    UserInfoProvider,
};
pub use resolver::{FaultKind, Resolution, ShellResolver, ShellSource, SourceFault, resolve};
pub use termshell_platform::{PlatformClass, UserInfo, UserInfoError};
