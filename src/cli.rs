//! Command-line argument parsing for the demo binary
//!
//! Gestures come from positional arguments, a `--script` file, or stdin
//! (one per line), in the syntax of [`crate::messages::HostMsg`].

use std::path::PathBuf;

use clap::Parser;

use crate::config::FieldConfig;

/// Drive an inline token field with scripted gestures
#[derive(Parser, Debug)]
#[command(
    name = "chipfield",
    version,
    about = "Drive an inline token field with scripted gestures"
)]
pub struct CliArgs {
    /// Gestures to replay, e.g. `type:alice return backspace`
    #[arg(value_name = "GESTURES")]
    pub gestures: Vec<String>,

    /// Read gestures from a script file (one per line, `#` comments)
    #[arg(short, long, value_name = "FILE", conflicts_with = "gestures")]
    pub script: Option<PathBuf>,

    /// Use this config file instead of ~/.config/chipfield/config.yaml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the field prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Override the theme id
    #[arg(long)]
    pub theme: Option<String>,

    /// Print the final field state as JSON instead of frames
    #[arg(long)]
    pub json: bool,

    /// Render without ANSI colors
    #[arg(long)]
    pub plain: bool,

    /// Write the effective config (after overrides) back to the config file
    #[arg(long)]
    pub save_config: bool,
}

impl CliArgs {
    /// Load configuration and apply command-line overrides
    pub fn load_config(&self) -> FieldConfig {
        let mut config = match &self.config {
            Some(path) => FieldConfig::load_from(path),
            None => FieldConfig::load(),
        };
        self.apply_overrides(&mut config);
        config
    }

    /// Persist `config` to `--config` when given, else the default location
    pub fn save_config(&self, config: &FieldConfig) -> Result<(), String> {
        match &self.config {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
    }

    pub fn apply_overrides(&self, config: &mut FieldConfig) {
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
    }
}
