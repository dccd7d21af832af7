use crate::{Context, OutputFormat};
use anyhow::Result;
use linkey_core::BrowserRoot;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PathsReport<'a> {
    state_file: PathBuf,
    browsers: &'a [BrowserRoot],
}

/// Show where state is kept and where browsers are looked for
pub fn execute(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let registry = service.registry();
    let report = PathsReport {
        state_file: service.store().path().to_path_buf(),
        browsers: registry.roots(),
    };

    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("State file: {}", report.state_file.display());
    println!();
    println!("Browsers:");
    for root in report.browsers {
        let found = if root.install_path.is_dir() { "" } else { "  (not found)" };
        println!(
            "  {:<10} {}{}",
            root.browser_name,
            root.install_path.display(),
            found
        );
        println!("  {:<10} launch: {}", "", root.launch_template);
    }

    Ok(())
}
