use crate::{Context, OutputFormat};
use anyhow::Result;
use console::style;

/// List all discovered profiles
pub fn execute(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let profiles = service.profiles();

    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    println!("Browser profiles:");
    println!();

    for profile in &profiles {
        let marker = if profile.enabled {
            style("✓").green().to_string()
        } else {
            " ".to_string()
        };

        println!(
            "{} {:<10} {:<14} {}",
            marker, profile.browser, profile.dir_name, profile.name
        );
    }

    let enabled = profiles.iter().filter(|p| p.enabled).count();
    println!();
    println!("{} of {} profiles enabled", enabled, profiles.len());

    Ok(())
}
