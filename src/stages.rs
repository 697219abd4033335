/// A single backbone stage: a descriptive label and the number of channels
/// the stage emits.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StageChannel {
    pub name: String,
    pub channels: usize,
}

/// Ordered per-stage channel spec of a backbone.
///
/// Only the channel counts and their order drive adapter construction; the
/// names are descriptive labels kept for diagnostics and readable configs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StageChannels {
    stages: Vec<StageChannel>,
}

impl StageChannels {
    /// An empty spec; add stages with [`with_stage`](Self::with_stage).
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage, keeping insertion order.
    pub fn with_stage(mut self, name: impl Into<String>, channels: usize) -> Self {
        self.stages.push(StageChannel {
            name: name.into(),
            channels,
        });
        self
    }

    /// Builds a spec from bare channel counts, naming the stages
    /// `layer1..layerN`.
    pub fn from_channels(channels: &[usize]) -> Self {
        Self {
            stages: channels
                .iter()
                .enumerate()
                .map(|(idx, &channels)| StageChannel {
                    name: format!("layer{}", idx + 1),
                    channels,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Channel counts in stage order.
    pub fn channels(&self) -> Vec<usize> {
        self.stages.iter().map(|stage| stage.channels).collect()
    }

    /// Stage labels in stage order.
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StageChannel> {
        self.stages.iter()
    }
}

impl Default for StageChannels {
    /// Four stages named `layer1..layer4` emitting 40, 80, 160 and 320
    /// channels.
    fn default() -> Self {
        Self::from_channels(&[40, 80, 160, 320])
    }
}

/// Stage channel layouts of common backbones, covering the four feature
/// stages a BiFPN consumes.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub enum BackbonePreset {
    ResNet18,
    ResNet34,
    ResNet50,
    ResNet101,
    ResNet152,
    EfficientNetB0,
}

impl BackbonePreset {
    pub fn stage_channels(&self) -> StageChannels {
        match self {
            Self::ResNet18 => StageChannels::from_channels(&[64, 128, 256, 512]),
            Self::ResNet34 => StageChannels::from_channels(&[64, 128, 256, 512]),
            Self::ResNet50 => StageChannels::from_channels(&[256, 512, 1024, 2048]),
            Self::ResNet101 => StageChannels::from_channels(&[256, 512, 1024, 2048]),
            Self::ResNet152 => StageChannels::from_channels(&[256, 512, 1024, 2048]),
            Self::EfficientNetB0 => StageChannels::from_channels(&[24, 40, 112, 320]),
        }
    }
}
