use anyhow::Result;
use clap::{Parser, Subcommand};
use linkey_cli::{Context, OutputFormat, commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linkey")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Open links in every enabled browser profile at once",
    long_about = "Linkey discovers Chrome, Chromium and Brave profiles on this machine, \
                  lets you enable a subset, and opens a URL in all of them with one request."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Directory holding enabledProfiles.json (defaults to the platform config directory)
    #[arg(long, global = true, env = "LINKEY_STATE_DIR", value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Home directory used to locate browser profiles
    #[arg(long, global = true, env = "LINKEY_HOME", value_name = "DIR")]
    home: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the local HTTP service
    Serve {
        /// Port to listen on (127.0.0.1 only)
        #[arg(short, long, env = "PORT", default_value_t = 3000)]
        port: u16,

        /// Directory of static files for the web UI
        #[arg(long, env = "LINKEY_PUBLIC_DIR", value_name = "DIR")]
        public_dir: Option<PathBuf>,
    },

    /// List discovered browser profiles
    Profiles,

    /// Enable or disable a profile for dispatch
    Toggle {
        /// Profile directory name (e.g. "Default", "Profile 1")
        #[arg(value_name = "DIR_NAME")]
        dir_name: String,

        /// Browser owning the profile (Chrome, Chromium, Brave)
        #[arg(short, long)]
        browser: Option<String>,
    },

    /// Open a URL in every enabled profile
    Open {
        /// URL to open
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Show the state file location and known browser roots
    Paths,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let ctx = Context {
        home: cli.home,
        state_dir: cli.state_dir,
        format: cli.format,
    };

    match cli.command {
        Commands::Serve { port, public_dir } => commands::serve::execute(&ctx, port, public_dir),
        Commands::Profiles => commands::profiles::execute(&ctx),
        Commands::Toggle { dir_name, browser } => {
            commands::toggle::execute(&ctx, &dir_name, browser.as_deref())
        }
        Commands::Open { url } => commands::open::execute(&ctx, &url),
        Commands::Paths => commands::paths::execute(&ctx),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("linkey=debug,linkey_cli=debug,linkey_core=debug,linkey_browser=debug,linkey_server=debug")
    } else {
        EnvFilter::new("linkey=info,linkey_cli=info,linkey_core=info,linkey_browser=info,linkey_server=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
