use crate::{Context, OutputFormat};
use anyhow::Result;

pub fn execute(ctx: &Context, dir_name: &str, browser: Option<&str>) -> Result<()> {
    let service = ctx.service()?;
    let outcome = service.toggle(dir_name, browser)?;

    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let state = if outcome.enabled { "enabled" } else { "disabled" };
    println!(
        "✅ {} ({}) {}",
        outcome.dir_name, outcome.browser, state
    );

    if outcome.inferred == Some(true) {
        println!("   Browser inferred from installed profiles; pass --browser to be explicit");
    }

    Ok(())
}
