//! Human-readable stage summary of a U-Net configuration

use serde::Serialize;

use crate::unet::UNetConfig;

/// One row of the layer summary: stage name, output channels, and the
/// spatial resolution of the stage output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    pub name: String,
    pub out_channels: usize,
    pub height: usize,
    pub width: usize,
}

impl StageSummary {
    fn new(name: &str, out_channels: usize, height: usize, width: usize) -> Self {
        Self {
            name: name.to_string(),
            out_channels,
            height,
            width,
        }
    }
}

impl UNetConfig {
    /// Per-stage summary of the graph this config builds.
    ///
    /// Encoder rows report the skip (pre-pool) resolution; the stage names
    /// match the module record paths used for parameter persistence.
    pub fn stages(&self) -> Vec<StageSummary> {
        let f = self.base_filters;
        let (h, w) = (self.height, self.width);

        vec![
            StageSummary::new("input", self.in_channels, h, w),
            StageSummary::new("enc1", f, h, w),
            StageSummary::new("enc2", f * 2, h / 2, w / 2),
            StageSummary::new("enc3", f * 4, h / 4, w / 4),
            StageSummary::new("enc4", f * 8, h / 8, w / 8),
            StageSummary::new("bottleneck", f * 16, h / 16, w / 16),
            StageSummary::new("dec4", f * 8, h / 8, w / 8),
            StageSummary::new("dec3", f * 4, h / 4, w / 4),
            StageSummary::new("dec2", f * 2, h / 2, w / 2),
            StageSummary::new("dec1", f, h, w),
            StageSummary::new("mask", 1, h, w),
        ]
    }
}
