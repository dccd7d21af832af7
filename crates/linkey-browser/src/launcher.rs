use crate::platform::PlatformFamily;
use linkey_core::{Error, Result};
use std::process::{Child, Command, Stdio};

/// One browser launch: a full shell command line plus what it is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub browser: String,
    pub dir_name: String,
    pub url: String,
    pub command: String,
}

/// Starts browser processes without waiting for them
pub trait ProcessLauncher: Send + Sync {
    /// Issue the spawn. `Ok` means the process was started, not that it succeeded.
    fn launch(&self, request: &LaunchRequest) -> Result<()>;
}

/// Build the full launch command for a profile and URL, quoting each argument
/// for the platform shell
pub fn shell_command(family: PlatformFamily, template: &str, dir_name: &str, url: &str) -> String {
    match family {
        PlatformFamily::Windows => format!(
            "{} --profile-directory=\"{}\" \"{}\"",
            template,
            dir_name.replace('"', ""),
            url.replace('"', "%22")
        ),
        PlatformFamily::MacOs | PlatformFamily::Linux => format!(
            "{} --profile-directory={} {}",
            template,
            posix_quote(dir_name),
            posix_quote(url)
        ),
    }
}

fn posix_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Runs launch commands through the platform shell, detached
pub struct ShellLauncher {
    family: PlatformFamily,
}

impl ShellLauncher {
    pub fn new(family: PlatformFamily) -> Self {
        Self { family }
    }

    fn command(&self, line: &str) -> Command {
        match self.family {
            PlatformFamily::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.arg("/C");
                #[cfg(windows)]
                {
                    use std::os::windows::process::CommandExt;
                    cmd.raw_arg(line);
                }
                #[cfg(not(windows))]
                {
                    cmd.arg(line);
                }
                cmd
            }
            PlatformFamily::MacOs | PlatformFamily::Linux => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(line);
                cmd
            }
        }
    }

    /// Wait for the shell on a background thread and log how it ended
    fn reap(child: Child, request: LaunchRequest) {
        let spawned = std::thread::Builder::new()
            .name(format!("reap-{}", child.id()))
            .spawn(move || {
                let mut child = child;
                match child.wait() {
                    Ok(status) if status.success() => {
                        tracing::info!(
                            "Opened {} in {}:{}",
                            request.url,
                            request.browser,
                            request.dir_name
                        );
                    }
                    Ok(status) => {
                        tracing::error!(
                            "Error opening in {} ({}): exited with {}",
                            request.browser,
                            request.dir_name,
                            status
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            "Error opening in {} ({}): {}",
                            request.browser,
                            request.dir_name,
                            e
                        );
                    }
                }
            });

        if let Err(e) = spawned {
            tracing::warn!("Could not watch launch process: {}", e);
        }
    }
}

impl ProcessLauncher for ShellLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<()> {
        tracing::debug!("Spawning: {}", request.command);

        let child = self
            .command(&request.command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                Error::Launch(format!(
                    "Failed to launch {} ({}): {}",
                    request.browser, request.dir_name, e
                ))
            })?;

        Self::reap(child, request.clone());
        Ok(())
    }
}
