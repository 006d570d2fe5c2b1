use {
    crate::Modality,
    serde::{Deserialize, Serialize},
};

/// Metadata of one frame inside a composite frame set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    pub modality: Modality,
    pub frame_number: u64,
    pub timestamp_ms: f64,
    pub width: u32,
    pub height: u32,
}

/// All frames the device delivered for one capture instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSet {
    pub frames: Vec<FrameInfo>,
}

impl FrameSet {
    pub fn get(&self, modality: Modality) -> Option<&FrameInfo> {
        self.frames.iter().find(|frame| frame.modality == modality)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
