use crate::configure::ensure_config;
use actix_web::rt::{System, SystemRunner};
use anyhow::Result;
use std::future::Future;
use std::path::{Path, PathBuf};
use vmws_config::VmwsConfig;
use vmws_http::VmrestClient;

/// Per-invocation state shared by the flag and menu front-ends.
pub struct Context {
    config_path: PathBuf,
    interactive: bool,
    runner: SystemRunner,
}

impl Context {
    pub fn new(config_path: PathBuf, interactive: bool) -> Self {
        Self {
            config_path,
            interactive,
            runner: System::new(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    /// Loads the configuration fresh from disk, prompting for it when it is
    /// missing or incomplete and a terminal is attached.
    pub fn config(&self) -> Result<VmwsConfig> {
        ensure_config(&self.config_path, self.interactive)
    }

    pub fn client(&self) -> Result<VmrestClient> {
        self.config().map(|config| VmrestClient::new(&config))
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runner.block_on(future)
    }
}
