//! Resolved runtime context shared by every command.

use std::path::Path;

use crate::audit::AuditPolicy;
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

pub struct AppContext {
    pub config: Config,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &cwd)?;
        Self::with_config(cli, config)
    }

    /// Build a context around an already loaded config.
    pub fn with_config(cli: &Cli, config: Config) -> Result<Self> {
        let configured: OutputFormat = config.output.format.parse()?;
        let output_format = OutputFormat::from_args(cli.machine, cli.output_format, configured);
        if !config.output.color {
            console::set_colors_enabled(false);
            colored::control::set_override(false);
        }

        Ok(Self {
            config,
            output_format,
        })
    }

    pub fn robot_mode(&self) -> bool {
        self.output_format.is_machine_readable()
    }

    pub fn skills_path(&self) -> &Path {
        &self.config.paths.skills
    }

    pub fn units_path(&self) -> &Path {
        &self.config.paths.units
    }

    pub fn audit_policy(&self) -> AuditPolicy {
        self.config.audit.policy()
    }
}
