//! Denoising U-Net for spectrogram masks
//!
//! This crate only builds the model graph; training, persistence, and
//! inference live elsewhere.

mod blocks;
mod summary;
mod unet;

pub use blocks::{
    ConvBlock, ConvBlockConfig, DecoderBlock, DecoderBlockConfig, EncoderBlock, EncoderBlockConfig,
};

pub use summary::StageSummary;
pub use unet::{UNet, UNetConfig};
