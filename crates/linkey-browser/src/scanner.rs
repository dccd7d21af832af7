use crate::local_state::read_profile_names;
use linkey_core::{BrowserRoot, Degrade, DiscoveredProfile, EnabledProfileSet, Result};
use std::fs;
use std::path::Path;

/// Discovers profile directories under each browser root
pub struct ProfileScanner<'a> {
    roots: &'a [BrowserRoot],
}

impl<'a> ProfileScanner<'a> {
    pub fn new(roots: &'a [BrowserRoot]) -> Self {
        Self { roots }
    }

    /// Scan every root, in root order.
    ///
    /// A root that cannot be listed contributes no profiles; the other roots
    /// are still scanned.
    pub fn scan(&self, enabled: &EnabledProfileSet) -> Vec<DiscoveredProfile> {
        let profiles: Vec<DiscoveredProfile> = self
            .roots
            .iter()
            .flat_map(|root| {
                Self::scan_root(root, enabled).or_degrade(format_args!(
                    "Could not read {} profiles at {}",
                    root.browser_name,
                    root.install_path.display()
                ))
            })
            .collect();

        tracing::debug!("Scan found {} profiles", profiles.len());
        profiles
    }

    /// Scan a single root, failing only if its directory cannot be listed
    pub fn scan_root(root: &BrowserRoot, enabled: &EnabledProfileSet) -> Result<Vec<DiscoveredProfile>> {
        let dirs = Self::profile_dirs(&root.install_path)?;
        let names = read_profile_names(&root.install_path).or_degrade(format_args!(
            "Could not read Local State for {}",
            root.browser_name
        ));

        Ok(dirs
            .into_iter()
            .map(|dir_name| DiscoveredProfile {
                browser: root.browser_name.clone(),
                name: names.get(&dir_name).cloned().unwrap_or_else(|| dir_name.clone()),
                command: root.profile_command(&dir_name),
                enabled: enabled.contains(&root.browser_name, &dir_name),
                dir_name,
            })
            .collect())
    }

    /// Profile subdirectory names, in filesystem listing order
    fn profile_dirs(install_path: &Path) -> Result<Vec<String>> {
        let mut dirs = Vec::new();

        for entry in fs::read_dir(install_path)?.flatten() {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }

            // Non-UTF-8 names can't be passed through the launch command
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };

            if Self::is_profile_dir(&name) {
                dirs.push(name);
            }
        }

        Ok(dirs)
    }

    pub fn is_profile_dir(name: &str) -> bool {
        name == "Default" || name.starts_with("Profile")
    }
}
