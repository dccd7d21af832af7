use crate::scanner::ProfileScanner;
use linkey_core::{BrowserRoot, EnabledProfileSet, Error, Result, StateStore};
use serde::Serialize;

/// Result of flipping one profile in or out of the enabled set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    #[serde(rename = "dirName")]
    pub dir_name: String,
    pub browser: String,
    pub enabled: bool,
    /// Set when the browser was resolved by scanning rather than given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred: Option<bool>,
}

/// Mutates the enabled set and persists it after every change
pub struct ToggleResolver<'a> {
    roots: &'a [BrowserRoot],
    store: &'a StateStore,
}

impl<'a> ToggleResolver<'a> {
    pub fn new(roots: &'a [BrowserRoot], store: &'a StateStore) -> Self {
        Self { roots, store }
    }

    /// Toggle `dir_name`, resolving the browser by a scan when none is given
    pub fn toggle(
        &self,
        set: &mut EnabledProfileSet,
        dir_name: &str,
        browser: Option<&str>,
    ) -> Result<ToggleOutcome> {
        if dir_name.is_empty() {
            return Err(Error::MissingParameter("profile dirName"));
        }

        let (browser, inferred) = match browser.filter(|b| !b.is_empty()) {
            Some(browser) => (browser.to_string(), None),
            None => (self.infer_browser(set, dir_name)?, Some(true)),
        };

        let enabled = set.toggle(&browser, dir_name);
        self.store.save(set);

        tracing::info!(
            "{} {}:{}",
            if enabled { "Enabled" } else { "Disabled" },
            browser,
            dir_name
        );

        Ok(ToggleOutcome {
            dir_name: dir_name.to_string(),
            browser,
            enabled,
            inferred,
        })
    }

    /// Find the single browser that has a profile named `dir_name` on disk
    pub fn infer_browser(&self, set: &EnabledProfileSet, dir_name: &str) -> Result<String> {
        let mut browsers: Vec<String> = ProfileScanner::new(self.roots)
            .scan(set)
            .into_iter()
            .filter(|profile| profile.dir_name == dir_name)
            .map(|profile| profile.browser)
            .collect();

        match browsers.len() {
            0 => Err(Error::ProfileNotFound(dir_name.to_string())),
            1 => Ok(browsers.remove(0)),
            _ => Err(Error::AmbiguousProfile {
                dir_name: dir_name.to_string(),
                browsers,
            }),
        }
    }
}
