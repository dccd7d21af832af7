// Browser profile discovery, toggling and URL dispatch

mod dispatcher;
mod launcher;
mod local_state;
mod platform;
mod scanner;
mod service;
mod toggle;

pub use dispatcher::{DispatchSummary, Dispatcher};
pub use launcher::{LaunchRequest, ProcessLauncher, ShellLauncher, shell_command};
pub use local_state::{LOCAL_STATE_FILE, read_profile_names};
pub use platform::{BrowserRegistry, PlatformEnv, PlatformFamily};
pub use scanner::ProfileScanner;
pub use service::ProfileService;
pub use toggle::{ToggleOutcome, ToggleResolver};
