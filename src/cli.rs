// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::loaders::DEFAULT_TEXTURE_PATH;

#[derive(Parser, Debug, Clone)]
#[command(name = "floating-rock")]
#[command(about = "Procedural floating rock viewer", long_about = None)]
pub struct Cli {
    /// Disable the on-screen HUD
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Image used as both color and displacement map
    #[arg(long, default_value = DEFAULT_TEXTURE_PATH)]
    pub texture: PathBuf,

    /// Seed for a reproducible rock shape
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}
