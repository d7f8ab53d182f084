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

//! The viewport rectangle as bound by the host application.

/// A viewport rectangle plus depth range, as observed on bind.
///
/// Matches the six floats every native API hands to its viewport-binding
/// call. The depth engine only ever inspects `width` and `height` (to
/// judge whether draws covered the full surface), but the remaining
/// fields are carried so backends do not have to re-query them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Left edge, in texels.
    pub x: f32,
    /// Top edge, in texels.
    pub y: f32,
    /// Width, in texels.
    pub width: f32,
    /// Height, in texels.
    pub height: f32,
    /// Near plane of the depth range.
    pub min_depth: f32,
    /// Far plane of the depth range.
    pub max_depth: f32,
}

impl Viewport {
    /// A full-surface viewport for the given dimensions.
    pub const fn with_size(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}
