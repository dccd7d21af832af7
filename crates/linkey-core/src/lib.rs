pub mod degrade;
pub mod error;
pub mod profile;
pub mod store;

pub use degrade::Degrade;
pub use error::{Error, Result};
pub use profile::{BrowserRoot, DiscoveredProfile, EnabledProfile, EnabledProfileKey, EnabledProfileSet};
pub use store::StateStore;
