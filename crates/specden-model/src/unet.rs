use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        Sigmoid,
    },
    prelude::*,
};

use crate::blocks::{
    ConvBlock, ConvBlockConfig, DecoderBlock, DecoderBlockConfig, EncoderBlock, EncoderBlockConfig,
};

/// Denoising U-Net configuration.
///
/// `height` and `width` must be divisible by 16: the encoder pools 2x four
/// times and each decoder stage concatenates with the skip tensor of its
/// mirrored encoder stage, so the spatial dimensions have to line up exactly.
/// Violations surface as shape errors from the tensor backend.
#[derive(Config, Debug)]
pub struct UNetConfig {
    /// Input spectrogram height
    #[config(default = 256)]
    pub height: usize,
    /// Input spectrogram width
    #[config(default = 256)]
    pub width: usize,
    /// Input channels
    #[config(default = 1)]
    pub in_channels: usize,
    /// Channel width of the first encoder stage. Deeper stages use fixed
    /// multiples (2x, 4x, 8x), the bottleneck 16x.
    #[config(default = 64)]
    pub base_filters: usize,
}

/// Symmetric encoder/decoder graph predicting a same-resolution mask in
/// [0, 1] from a noisy spectrogram.
#[derive(Module, Debug)]
pub struct UNet<B: Backend> {
    enc1: EncoderBlock<B>,
    enc2: EncoderBlock<B>,
    enc3: EncoderBlock<B>,
    enc4: EncoderBlock<B>,
    bottleneck: ConvBlock<B>,
    dec4: DecoderBlock<B>,
    dec3: DecoderBlock<B>,
    dec2: DecoderBlock<B>,
    dec1: DecoderBlock<B>,
    mask: Conv2d<B>,
    activation: Sigmoid,
}

impl UNetConfig {
    /// Build the model graph.
    ///
    /// Two calls with identical arguments produce two independent graphs
    /// sharing no state.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> UNet<B> {
        let f = self.base_filters;

        UNet {
            enc1: EncoderBlockConfig::new(self.in_channels, f).init(device),
            enc2: EncoderBlockConfig::new(f, f * 2).init(device),
            enc3: EncoderBlockConfig::new(f * 2, f * 4).init(device),
            enc4: EncoderBlockConfig::new(f * 4, f * 8).init(device),
            bottleneck: ConvBlockConfig::new(f * 8, f * 16).init(device),
            dec4: DecoderBlockConfig::new(f * 16, f * 8).init(device),
            dec3: DecoderBlockConfig::new(f * 8, f * 4).init(device),
            dec2: DecoderBlockConfig::new(f * 4, f * 2).init(device),
            dec1: DecoderBlockConfig::new(f * 2, f).init(device),
            mask: Conv2dConfig::new([f, 1], [1, 1]).init(device),
            activation: Sigmoid::new(),
        }
    }
}

impl<B: Backend> UNet<B> {
    /// Input and output are NCHW; the output mask has one channel at the
    /// input resolution.
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let (s1, x) = self.enc1.forward(input);
        let (s2, x) = self.enc2.forward(x);
        let (s3, x) = self.enc3.forward(x);
        let (s4, x) = self.enc4.forward(x);

        let x = self.bottleneck.forward(x);

        // skips are consumed in reverse creation order
        let x = self.dec4.forward(x, s4);
        let x = self.dec3.forward(x, s3);
        let x = self.dec2.forward(x, s2);
        let x = self.dec1.forward(x, s1);

        self.activation.forward(self.mask.forward(x))
    }
}
