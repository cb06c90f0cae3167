use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig, ConvTranspose2d, ConvTranspose2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig, PaddingConfig2d, Relu,
    },
    prelude::*,
};

/// Two same-padded 3x3 convolutions, each ReLU-activated then
/// batch-normalized, at a fixed channel width.
#[derive(Config, Debug)]
pub struct ConvBlockConfig {
    pub in_channels: usize,
    pub out_channels: usize,
}

#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    conv1: Conv2d<B>,
    norm1: BatchNorm<B, 2>,
    conv2: Conv2d<B>,
    norm2: BatchNorm<B, 2>,
    relu: Relu,
}

impl ConvBlockConfig {
    pub fn init<B: Backend>(&self, device: &Device<B>) -> ConvBlock<B> {
        let conv1 = Conv2dConfig::new([self.in_channels, self.out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let norm1 = BatchNormConfig::new(self.out_channels).init(device);

        let conv2 = Conv2dConfig::new([self.out_channels, self.out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let norm2 = BatchNormConfig::new(self.out_channels).init(device);

        ConvBlock {
            conv1,
            norm1,
            conv2,
            norm2,
            relu: Relu::new(),
        }
    }
}

impl<B: Backend> ConvBlock<B> {
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv1.forward(input);
        let x = self.relu.forward(x);
        let x = self.norm1.forward(x);

        let x = self.conv2.forward(x);
        let x = self.relu.forward(x);
        self.norm2.forward(x)
    }
}

/// Convolution block followed by 2x2 max-pooling.
#[derive(Config, Debug)]
pub struct EncoderBlockConfig {
    pub in_channels: usize,
    pub out_channels: usize,
}

#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    convs: ConvBlock<B>,
    pool: MaxPool2d,
}

impl EncoderBlockConfig {
    pub fn init<B: Backend>(&self, device: &Device<B>) -> EncoderBlock<B> {
        EncoderBlock {
            convs: ConvBlockConfig::new(self.in_channels, self.out_channels).init(device),
            pool: MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
        }
    }
}

impl<B: Backend> EncoderBlock<B> {
    /// Returns `(skip, pooled)`: the pre-pool activation is retained for the
    /// mirrored decoder stage.
    pub fn forward(&self, input: Tensor<B, 4>) -> (Tensor<B, 4>, Tensor<B, 4>) {
        let skip = self.convs.forward(input);
        let pooled = self.pool.forward(skip.clone());
        (skip, pooled)
    }
}

/// 2x transposed-convolution upsampling, concatenation with the matching
/// encoder skip, then a convolution block.
#[derive(Config, Debug)]
pub struct DecoderBlockConfig {
    pub in_channels: usize,
    pub out_channels: usize,
}

#[derive(Module, Debug)]
pub struct DecoderBlock<B: Backend> {
    up: ConvTranspose2d<B>,
    convs: ConvBlock<B>,
}

impl DecoderBlockConfig {
    pub fn init<B: Backend>(&self, device: &Device<B>) -> DecoderBlock<B> {
        let up = ConvTranspose2dConfig::new([self.in_channels, self.out_channels], [2, 2])
            .with_stride([2, 2])
            .init(device);

        // the upsampled tensor and the skip are concatenated channel-wise
        let convs = ConvBlockConfig::new(self.out_channels * 2, self.out_channels).init(device);

        DecoderBlock { up, convs }
    }
}

impl<B: Backend> DecoderBlock<B> {
    pub fn forward(&self, input: Tensor<B, 4>, skip: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.up.forward(input);
        let x = Tensor::cat(vec![x, skip], 1);
        self.convs.forward(x)
    }
}
