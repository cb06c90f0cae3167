use anyhow::Result;
use std::path::Path;

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::NdArray;
use burn::module::Module;

use specden_core::config::Config;
use specden_model::{UNet, UNetConfig};

use crate::args::SummaryOptions;

pub async fn run(options: &SummaryOptions, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    let model_config = UNetConfig::new()
        .with_height(options.height.unwrap_or(config.model.height))
        .with_width(options.width.unwrap_or(config.model.width))
        .with_in_channels(options.channels.unwrap_or(config.model.in_channels))
        .with_base_filters(options.base_filters.unwrap_or(config.model.base_filters));

    let stages = model_config.stages();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&stages)?);
        return Ok(());
    }

    let device = NdArrayDevice::Cpu;
    let model: UNet<NdArray<f32>> = model_config.init(&device);

    println!(
        "UNet denoiser ({}x{}x{}, base_filters={})\n",
        model_config.height, model_config.width, model_config.in_channels, model_config.base_filters
    );

    println!("{:<12} {:>8} {:>12}", "stage", "channels", "resolution");
    for stage in &stages {
        println!(
            "{:<12} {:>8} {:>12}",
            stage.name,
            stage.out_channels,
            format!("{}x{}", stage.height, stage.width)
        );
    }

    println!("\nParameters: {}", model.num_params());

    Ok(())
}
