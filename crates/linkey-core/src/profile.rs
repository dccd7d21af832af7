use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A known browser installation root and the shell command that launches it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserRoot {
    pub browser_name: String,
    pub install_path: PathBuf,
    pub launch_template: String,
}

impl BrowserRoot {
    pub fn new(
        browser_name: impl Into<String>,
        install_path: impl Into<PathBuf>,
        launch_template: impl Into<String>,
    ) -> Self {
        Self {
            browser_name: browser_name.into(),
            install_path: install_path.into(),
            launch_template: launch_template.into(),
        }
    }

    /// Launch command for a profile, without the URL
    pub fn profile_command(&self, dir_name: &str) -> String {
        format!("{} --profile-directory=\"{}\"", self.launch_template, dir_name)
    }
}

/// A profile found on disk during a scan. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredProfile {
    pub browser: String,
    #[serde(rename = "dirName")]
    pub dir_name: String,
    /// Human readable name from the browser's local state, or the directory name
    pub name: String,
    pub command: String,
    pub enabled: bool,
}

/// Identifies one enabled entry by browser and profile directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnabledProfileKey {
    browser: String,
    dir_name: String,
}

impl EnabledProfileKey {
    pub fn new(browser: impl Into<String>, dir_name: impl Into<String>) -> Self {
        Self {
            browser: browser.into(),
            dir_name: dir_name.into(),
        }
    }

    pub fn browser(&self) -> &str {
        &self.browser
    }

    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }
}

impl fmt::Display for EnabledProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.browser, self.dir_name)
    }
}

/// The persisted form of one enabled profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledProfile {
    pub browser: String,
    #[serde(rename = "dirName")]
    pub dir_name: String,
}

impl EnabledProfile {
    pub fn new(browser: impl Into<String>, dir_name: impl Into<String>) -> Self {
        Self {
            browser: browser.into(),
            dir_name: dir_name.into(),
        }
    }

    pub fn key(&self) -> EnabledProfileKey {
        EnabledProfileKey::new(&self.browser, &self.dir_name)
    }
}

/// The set of profiles a URL is dispatched to.
///
/// Keys are always derived from their values, so the map cannot hold an entry
/// filed under the wrong key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledProfileSet {
    entries: BTreeMap<EnabledProfileKey, EnabledProfile>,
}

impl EnabledProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, browser: &str, dir_name: &str) -> bool {
        self.entries
            .contains_key(&EnabledProfileKey::new(browser, dir_name))
    }

    /// Insert an entry, returning false if it was already present
    pub fn insert(&mut self, profile: EnabledProfile) -> bool {
        let key = profile.key();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, profile);
        true
    }

    /// Remove an entry, returning false if it was not present
    pub fn remove(&mut self, browser: &str, dir_name: &str) -> bool {
        self.entries
            .remove(&EnabledProfileKey::new(browser, dir_name))
            .is_some()
    }

    /// Flip membership of (browser, dir_name) and return the new state
    pub fn toggle(&mut self, browser: &str, dir_name: &str) -> bool {
        if self.remove(browser, dir_name) {
            false
        } else {
            self.insert(EnabledProfile::new(browser, dir_name))
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn profiles(&self) -> impl Iterator<Item = &EnabledProfile> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &EnabledProfileKey> {
        self.entries.keys()
    }
}

impl FromIterator<EnabledProfile> for EnabledProfileSet {
    fn from_iter<I: IntoIterator<Item = EnabledProfile>>(iter: I) -> Self {
        let mut set = Self::new();
        for profile in iter {
            set.insert(profile);
        }
        set
    }
}
