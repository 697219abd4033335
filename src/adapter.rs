use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        PaddingConfig2d,
    },
    prelude::*,
};

use crate::stages::StageChannels;

/// Adapter connecting the output of a backbone network to the input of a
/// BiFPN layer.
///
/// Each backbone stage gets its own 1x1 convolution projecting the stage's
/// feature map to a uniform channel count, leaving spatial sizes untouched.
/// Derived from the `bifpn` package of
/// [peaknet](https://github.com/carbonscott/peaknet).
#[derive(Module, Debug)]
pub struct BifpnAdapter<B: Backend> {
    adapters: Vec<Conv2d<B>>,
}

impl<B: Backend> BifpnAdapter<B> {
    /// Projects one feature map per stage, in `[batch, channels, height,
    /// width]` layout.
    ///
    /// Pairing is positional: when the two sides differ in length the longer
    /// one is silently truncated, so the output holds
    /// `min(features.len(), num_stages)` tensors. Each output keeps its
    /// input's batch and spatial dimensions and carries the uniform channel
    /// count the adapter was configured with.
    pub fn forward(&self, features: Vec<Tensor<B, 4>>) -> Vec<Tensor<B, 4>> {
        self.adapters
            .iter()
            .zip(features)
            .map(|(adapter, feature)| adapter.forward(feature))
            .collect()
    }

    /// Number of per-stage projections this adapter was built with.
    pub fn num_stages(&self) -> usize {
        self.adapters.len()
    }
}

/// [BifpnAdapter](BifpnAdapter) configuration.
#[derive(Config, Debug)]
pub struct BifpnAdapterConfig {
    /// Channel count every stage is projected to.
    #[config(default = 256)]
    num_features: usize,
    /// Ordered per-stage channel counts emitted by the backbone.
    #[config(default = "StageChannels::default()")]
    backbone_channels: StageChannels,
}

impl BifpnAdapterConfig {
    /// Initialize a new [BifpnAdapter](BifpnAdapter) module.
    pub fn init<B: Backend>(&self, device: &B::Device) -> BifpnAdapter<B> {
        assert!(
            self.num_features > 0,
            "adapter must project to at least one output channel"
        );

        let adapters = self
            .backbone_channels
            .iter()
            .map(|stage| {
                assert!(
                    stage.channels > 0,
                    "backbone stage {:?} must emit at least one channel",
                    stage.name
                );
                Conv2dConfig::new([stage.channels, self.num_features], [1, 1])
                    .with_stride([1, 1])
                    .with_padding(PaddingConfig2d::Explicit(0, 0))
                    .init(device)
            })
            .collect();

        BifpnAdapter { adapters }
    }

    /// Uniform channel count of the projected feature maps; the width the
    /// downstream BiFPN should be built with.
    pub fn out_channels(&self) -> usize {
        self.num_features
    }

    /// Number of projection units the config will build.
    pub fn num_stages(&self) -> usize {
        self.backbone_channels.len()
    }

    /// The configured backbone stage spec.
    pub fn backbone_channels(&self) -> &StageChannels {
        &self.backbone_channels
    }
}
