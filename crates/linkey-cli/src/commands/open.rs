use crate::{Context, OutputFormat};
use anyhow::Result;

pub fn execute(ctx: &Context, url: &str) -> Result<()> {
    let service = ctx.service()?;
    let summary = service.open(url)?;

    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "🚀 Opening {} in {} enabled profiles...",
        summary.url, summary.attempted_count
    );

    if summary.skipped > 0 {
        println!(
            "⚠️  {} profile(s) skipped: browser no longer known",
            summary.skipped
        );
    }
    if summary.failed > 0 {
        println!("⚠️  {} launch(es) failed to start", summary.failed);
    }

    Ok(())
}
