use anyhow::Result;
use std::path::Path;

use specden_core::config::{Config, DEFAULT_CONFIG_PATH};

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("specden configuration\n");

    println!("[dataset]");
    println!("  root_dir = {:?}", config.dataset.root_dir);
    if config.dataset.sources.is_empty() {
        println!("  sources = (none)");
    } else {
        for (name, entry) in &config.dataset.sources {
            match entry.kaggle_path {
                Some(ref path) => {
                    println!("  sources.{} = {:?} (extract: {})", name, path, entry.extract)
                }
                None => println!("  sources.{} = (missing kaggle_path)", name),
            }
        }
    }

    println!("\n[paths]");
    if let Some(ref path) = config.paths.kaggle {
        println!("  kaggle = {:?}", path);
    } else {
        println!("  kaggle = (auto-detect)");
    }

    println!("\n[model]");
    println!("  height = {}", config.model.height);
    println!("  width = {}", config.model.width);
    println!("  in_channels = {}", config.model.in_channels);
    println!("  base_filters = {}", config.model.base_filters);

    println!("\nConfig file locations (in priority order):");
    match config_path {
        Some(path) => println!("  1. {} (specified)", path.display()),
        None => println!("  1. {} (default)", DEFAULT_CONFIG_PATH),
    }
    if let Some(config_dir) = dirs::config_dir() {
        println!("  2. {}/specden/config.yaml", config_dir.display());
    }
    println!("  3. Environment variables (SPECDEN_*)");

    Ok(())
}
