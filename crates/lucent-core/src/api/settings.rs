// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! User-facing settings for the depth-buffer detection heuristic.

/// A collection of settings steering depth-buffer detection.
///
/// Owned by the per-device state and threaded through every call, so
/// independent device states (and tests) never share configuration. The
/// persistence of these values across runs belongs to the embedding
/// application, which is why this struct is plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthDetectionSettings {
    /// Copy the selected depth buffer out before clear operations would
    /// destroy its contents.
    pub preserve_depth_buffers: bool,
    /// When non-zero, back up at exactly this clear (1-based index within
    /// the frame) instead of letting the heuristic pick one.
    pub force_clear_index: usize,
    /// Reject candidate buffers whose dimensions are too dissimilar from
    /// the frame's output dimensions.
    pub use_aspect_ratio_heuristics: bool,
}

impl Default for DepthDetectionSettings {
    fn default() -> Self {
        Self {
            preserve_depth_buffers: false,
            force_clear_index: 0,
            use_aspect_ratio_heuristics: true,
        }
    }
}
