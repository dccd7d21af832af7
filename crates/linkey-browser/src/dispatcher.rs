use crate::launcher::{LaunchRequest, ProcessLauncher, shell_command};
use crate::platform::BrowserRegistry;
use linkey_core::{EnabledProfileSet, Error, Result};
use serde::Serialize;

/// What happened when a URL was fanned out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummary {
    pub url: String,
    /// Enabled entries considered, including skipped and failed ones
    pub attempted_count: usize,
    pub spawned: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Opens a URL in every enabled profile
pub struct Dispatcher<'a> {
    registry: &'a BrowserRegistry,
    launcher: &'a dyn ProcessLauncher,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a BrowserRegistry, launcher: &'a dyn ProcessLauncher) -> Self {
        Self { registry, launcher }
    }

    pub fn open(&self, url: &str, enabled: &EnabledProfileSet) -> Result<DispatchSummary> {
        if url.is_empty() {
            return Err(Error::MissingUrl);
        }
        if enabled.is_empty() {
            return Err(Error::NoEnabledProfiles);
        }

        let mut summary = DispatchSummary {
            url: url.to_string(),
            attempted_count: enabled.len(),
            spawned: 0,
            skipped: 0,
            failed: 0,
        };

        for profile in enabled.profiles() {
            let Some(template) = self.registry.template(&profile.browser) else {
                tracing::warn!("No executable mapping for browser {}", profile.browser);
                summary.skipped += 1;
                continue;
            };

            let request = LaunchRequest {
                browser: profile.browser.clone(),
                dir_name: profile.dir_name.clone(),
                url: url.to_string(),
                command: shell_command(self.registry.family(), template, &profile.dir_name, url),
            };

            match self.launcher.launch(&request) {
                Ok(()) => summary.spawned += 1,
                Err(e) => {
                    tracing::error!("{}", e);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            "Opening {} in {} enabled profiles ({} spawned, {} skipped, {} failed)",
            url,
            summary.attempted_count,
            summary.spawned,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }
}
