use crate::dispatcher::{DispatchSummary, Dispatcher};
use crate::launcher::{ProcessLauncher, ShellLauncher};
use crate::platform::{BrowserRegistry, PlatformEnv};
use crate::scanner::ProfileScanner;
use crate::toggle::{ToggleOutcome, ToggleResolver};
use linkey_core::{DiscoveredProfile, EnabledProfileSet, Result, StateStore};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard};

/// Process-scoped state behind the three operations: list, toggle and open.
///
/// Constructed once at startup and shared by reference. All changes to the
/// enabled set go through one mutex, held for the whole read-modify-write-save.
pub struct ProfileService {
    registry: RwLock<BrowserRegistry>,
    store: StateStore,
    enabled: Mutex<EnabledProfileSet>,
    launcher: Arc<dyn ProcessLauncher>,
}

impl ProfileService {
    /// Create a service, loading the enabled set from `store`
    pub fn new(registry: BrowserRegistry, store: StateStore, launcher: Arc<dyn ProcessLauncher>) -> Self {
        let enabled = store.load();
        tracing::debug!("Starting with {} enabled profiles", enabled.len());

        Self {
            registry: RwLock::new(registry),
            store,
            enabled: Mutex::new(enabled),
            launcher,
        }
    }

    /// Wire up the real platform layout, state file and shell launcher
    pub fn from_env(env: PlatformEnv, state_dir: Option<PathBuf>) -> Result<Self> {
        let storage_dir = match state_dir {
            Some(dir) => dir,
            None => env.storage_directory()?,
        };
        let launcher = Arc::new(ShellLauncher::new(env.family()));
        let registry = BrowserRegistry::new(env)?;

        Ok(Self::new(registry, StateStore::new(storage_dir), launcher))
    }

    fn lock(&self) -> MutexGuard<'_, EnabledProfileSet> {
        // The set is always a valid value, even if a holder panicked
        self.enabled.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, BrowserRegistry> {
        self.registry.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the cached browser registry
    pub fn registry(&self) -> BrowserRegistry {
        self.read_registry().clone()
    }

    /// Re-derive the browser roots from the platform environment
    pub fn refresh(&self) -> Result<()> {
        let mut registry = self.registry.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        registry.refresh()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn enabled(&self) -> EnabledProfileSet {
        self.lock().clone()
    }

    /// Discover all profiles and mark the enabled ones
    pub fn profiles(&self) -> Vec<DiscoveredProfile> {
        let enabled = self.enabled();
        ProfileScanner::new(self.read_registry().roots()).scan(&enabled)
    }

    pub fn toggle(&self, dir_name: &str, browser: Option<&str>) -> Result<ToggleOutcome> {
        let mut enabled = self.lock();
        let registry = self.read_registry();
        ToggleResolver::new(registry.roots(), &self.store).toggle(&mut enabled, dir_name, browser)
    }

    /// Open `url` in every enabled profile without waiting for the browsers
    pub fn open(&self, url: &str) -> Result<DispatchSummary> {
        let enabled = self.enabled();
        let registry = self.read_registry();
        Dispatcher::new(&registry, self.launcher.as_ref()).open(url, &enabled)
    }
}
