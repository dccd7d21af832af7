use crate::Context;
use anyhow::Result;
use linkey_server::LinkeyServer;
use std::path::PathBuf;
use std::sync::Arc;

pub fn execute(ctx: &Context, port: u16, public_dir: Option<PathBuf>) -> Result<()> {
    tracing::info!("Starting Linkey on port {}", port);

    let service = Arc::new(ctx.service()?);
    println!("📝 Enabled profiles stored in: {}", service.store().path().display());
    println!("🔗 {} profiles enabled", service.enabled().len());

    let mut server = LinkeyServer::new(port, service);
    if let Some(dir) = public_dir {
        println!("📁 Serving static files from: {}", dir.display());
        server = server.with_public_dir(dir);
    }
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async { server.start().await })?;

    Ok(())
}
