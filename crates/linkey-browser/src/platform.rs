use linkey_core::{BrowserRoot, Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Operating system families with known browser layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Windows,
    MacOs,
    Linux,
}

impl PlatformFamily {
    /// Detect the family of the running OS
    pub fn detect() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "windows" => Ok(PlatformFamily::Windows),
            "macos" => Ok(PlatformFamily::MacOs),
            "linux" => Ok(PlatformFamily::Linux),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// The inputs the platform layout is derived from
#[derive(Debug, Clone)]
pub struct PlatformEnv {
    family: PlatformFamily,
    home: PathBuf,
    local_app_data: Option<PathBuf>,
}

impl PlatformEnv {
    pub fn new(family: PlatformFamily, home: impl Into<PathBuf>) -> Self {
        Self {
            family,
            home: home.into(),
            local_app_data: None,
        }
    }

    pub fn with_local_app_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_app_data = Some(path.into());
        self
    }

    /// Read the running OS, home directory and `%LOCALAPPDATA%`
    pub fn detect() -> Result<Self> {
        let family = PlatformFamily::detect()?;
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Platform("Could not determine home directory".to_string()))?;

        let local_app_data = std::env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .or_else(dirs::data_local_dir);

        Ok(Self {
            family,
            home,
            local_app_data,
        })
    }

    /// Detect the running OS but resolve everything under `home`
    pub fn detect_with_home(home: impl Into<PathBuf>) -> Result<Self> {
        let home = home.into();
        let local_app_data = home.join("AppData").join("Local");
        Ok(Self::new(PlatformFamily::detect()?, home).with_local_app_data(local_app_data))
    }

    pub fn family(&self) -> PlatformFamily {
        self.family
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    fn local_app_data(&self) -> Result<&Path> {
        self.local_app_data
            .as_deref()
            .ok_or_else(|| Error::Platform("LOCALAPPDATA is not set".to_string()))
    }

    /// Directory holding the persisted enabled-profile set
    pub fn storage_directory(&self) -> Result<PathBuf> {
        Ok(match self.family {
            PlatformFamily::Windows => self.local_app_data()?.join("LinkeyLauncher"),
            PlatformFamily::MacOs => self
                .home
                .join("Library/Application Support/LinkeyLauncher"),
            PlatformFamily::Linux => self.home.join(".config/linkey-launcher"),
        })
    }

    /// Known browsers, in dispatch and listing order
    pub fn browser_roots(&self) -> Result<Vec<BrowserRoot>> {
        Ok(match self.family {
            PlatformFamily::Windows => {
                let base = self.local_app_data()?;
                vec![
                    BrowserRoot::new("Chrome", base.join("Google/Chrome/User Data"), "start chrome"),
                    BrowserRoot::new("Chromium", base.join("Chromium/User Data"), "start chromium"),
                    BrowserRoot::new(
                        "Brave",
                        base.join("BraveSoftware/Brave-Browser/User Data"),
                        "start brave",
                    ),
                ]
            }
            PlatformFamily::MacOs => {
                let base = self.home.join("Library/Application Support");
                vec![
                    BrowserRoot::new(
                        "Chrome",
                        base.join("Google/Chrome"),
                        r#"open -na "Google Chrome" --args"#,
                    ),
                    BrowserRoot::new(
                        "Chromium",
                        base.join("Chromium"),
                        r#"open -na "Chromium" --args"#,
                    ),
                    BrowserRoot::new(
                        "Brave",
                        base.join("BraveSoftware/Brave-Browser"),
                        r#"open -na "Brave Browser" --args"#,
                    ),
                ]
            }
            PlatformFamily::Linux => {
                let base = self.home.join(".config");
                vec![
                    BrowserRoot::new("Chrome", base.join("google-chrome"), "google-chrome"),
                    BrowserRoot::new("Chromium", base.join("chromium-browser"), "chromium-browser"),
                    BrowserRoot::new("Brave", base.join("brave-browser"), "brave-browser"),
                ]
            }
        })
    }
}

/// Browser roots plus a name -> launch template map, computed once per process
#[derive(Debug, Clone)]
pub struct BrowserRegistry {
    family: PlatformFamily,
    env: Option<PlatformEnv>,
    roots: Vec<BrowserRoot>,
    templates: HashMap<String, String>,
}

impl BrowserRegistry {
    pub fn new(env: PlatformEnv) -> Result<Self> {
        let roots = env.browser_roots()?;
        let mut registry = Self::from_roots(env.family(), roots);
        registry.env = Some(env);
        Ok(registry)
    }

    /// Build a registry from explicit roots
    pub fn from_roots(family: PlatformFamily, roots: Vec<BrowserRoot>) -> Self {
        let templates = Self::template_map(&roots);
        Self {
            family,
            env: None,
            roots,
            templates,
        }
    }

    fn template_map(roots: &[BrowserRoot]) -> HashMap<String, String> {
        roots
            .iter()
            .map(|root| (root.browser_name.clone(), root.launch_template.clone()))
            .collect()
    }

    /// Re-derive the roots from the platform environment
    pub fn refresh(&mut self) -> Result<()> {
        if let Some(env) = &self.env {
            self.roots = env.browser_roots()?;
            self.templates = Self::template_map(&self.roots);
            tracing::debug!("Refreshed {} browser roots", self.roots.len());
        }
        Ok(())
    }

    pub fn family(&self) -> PlatformFamily {
        self.family
    }

    pub fn roots(&self) -> &[BrowserRoot] {
        &self.roots
    }

    /// Launch template for a browser name (case-sensitive)
    pub fn template(&self, browser: &str) -> Option<&str> {
        self.templates.get(browser).map(String::as_str)
    }
}
