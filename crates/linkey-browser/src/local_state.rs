use linkey_core::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Browser-maintained metadata file inside each install root
pub const LOCAL_STATE_FILE: &str = "Local State";

/// Read `profile.info_cache` from a browser's local state file.
///
/// Returns a map from profile directory name to its display name. Entries
/// without a non-empty string `name` are left out.
pub fn read_profile_names(install_path: &Path) -> Result<HashMap<String, String>> {
    let path = install_path.join(LOCAL_STATE_FILE);
    tracing::debug!("Reading local state from: {}", path.display());

    let content = fs::read_to_string(&path)?;
    let json: Value = serde_json::from_str(&content)?;

    let names = json
        .pointer("/profile/info_cache")
        .and_then(Value::as_object)
        .map(|cache| {
            cache
                .iter()
                .filter_map(|(dir_name, info)| {
                    let name = info.get("name")?.as_str()?;
                    (!name.is_empty()).then(|| (dir_name.clone(), name.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(names)
}
