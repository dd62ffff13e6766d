use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use objmark_core::config::{AppConfig, GuideConfig};
use objmark_core::geometry::Rect;
use objmark_core::guide::GuideShape;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include an example guide section
    #[arg(long)]
    pub with_guide: bool,
}

/// Print or save a default AppConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let mut config = AppConfig::default();
    if args.with_guide {
        config.viewer.guide = Some(GuideConfig {
            shape: GuideShape::Rectangle.code(),
            position: Rect::new(0, 0, 64, 64),
            display: true,
        });
    }
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}

/// Read a config file; a missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).context("Invalid objmark config")
}

pub fn save(path: &Path, config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    std::fs::write(path, toml_str)
        .with_context(|| format!("Failed to write config to {}", path.display()))
}
