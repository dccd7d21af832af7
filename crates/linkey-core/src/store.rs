use crate::profile::{EnabledProfile, EnabledProfileSet};
use crate::{Degrade, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const STATE_FILE_NAME: &str = "enabledProfiles.json";

/// Loads and saves the enabled-profile set as a JSON array of `{browser, dirName}`
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
    file: PathBuf,
}

impl StateStore {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        let dir = storage_dir.into();
        let file = dir.join(STATE_FILE_NAME);
        Self { dir, file }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Load the enabled set. Missing, unreadable or malformed files yield an empty set.
    pub fn load(&self) -> EnabledProfileSet {
        self.try_load()
            .or_degrade(format!("Could not load {}", self.file.display()))
    }

    pub fn try_load(&self) -> Result<EnabledProfileSet> {
        fs::create_dir_all(&self.dir)?;

        if !self.file.exists() {
            tracing::debug!("No state file at {}", self.file.display());
            return Ok(EnabledProfileSet::new());
        }

        let content = fs::read_to_string(&self.file)?;
        let set = Self::parse(&content)?;

        tracing::debug!(
            "Loaded {} enabled profiles from {}",
            set.len(),
            self.file.display()
        );

        Ok(set)
    }

    /// Parse the persisted format.
    ///
    /// Legacy entries (bare directory-name strings) and entries missing either
    /// field are dropped.
    pub fn parse(content: &str) -> Result<EnabledProfileSet> {
        let parsed: Value = serde_json::from_str(content)?;

        let Value::Array(entries) = parsed else {
            tracing::warn!("State file is not a JSON array, ignoring it");
            return Ok(EnabledProfileSet::new());
        };

        Ok(entries.iter().filter_map(Self::parse_entry).collect())
    }

    fn parse_entry(entry: &Value) -> Option<EnabledProfile> {
        let browser = entry.get("browser")?.as_str()?;
        let dir_name = entry.get("dirName")?.as_str()?;

        if browser.is_empty() || dir_name.is_empty() {
            return None;
        }

        Some(EnabledProfile::new(browser, dir_name))
    }

    /// Rewrite the whole file. Failures are logged; the in-memory set stays authoritative.
    pub fn save(&self, set: &EnabledProfileSet) {
        if let Err(e) = self.try_save(set) {
            tracing::error!("Failed to save {}: {}", self.file.display(), e);
        }
    }

    pub fn try_save(&self, set: &EnabledProfileSet) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let values: Vec<&EnabledProfile> = set.profiles().collect();
        let json = serde_json::to_string_pretty(&values)?;
        fs::write(&self.file, json)?;

        tracing::debug!(
            "Saved {} enabled profiles to {}",
            set.len(),
            self.file.display()
        );

        Ok(())
    }
}
