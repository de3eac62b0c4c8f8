mod class;
mod paths;
mod tables;
mod user;

pub use class::PlatformClass;
pub use paths::{AppPaths, AppPathsError};
pub use tables::{CMD, FamilyPath, POWERSHELL_7, POWERSHELL_LEGACY, PlatformTable, WSL_BASH};
pub use user::{UserInfo, UserInfoError, current_user_info};
