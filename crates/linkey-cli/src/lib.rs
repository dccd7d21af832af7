use anyhow::Result;
use clap::ValueEnum;
use linkey_browser::{PlatformEnv, ProfileService};
use std::path::PathBuf;

pub mod commands;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct Context {
    pub home: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub format: OutputFormat,
}

impl Context {
    pub fn platform_env(&self) -> Result<PlatformEnv> {
        let env = match &self.home {
            Some(home) => PlatformEnv::detect_with_home(home.clone())?,
            None => PlatformEnv::detect()?,
        };
        Ok(env)
    }

    pub fn service(&self) -> Result<ProfileService> {
        let env = self.platform_env()?;
        Ok(ProfileService::from_env(env, self.state_dir.clone())?)
    }
}
