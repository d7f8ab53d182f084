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

//! The aspect-ratio heuristic used to reject implausible depth buffers.

// Empirically tuned against a wide range of games. Treat as configuration
// constants; do not re-derive.
const MAX_ASPECT_RATIO_DIFFERENCE: f32 = 0.1;
const MIN_DIMENSION_RATIO: f32 = 0.5;
const MAX_DIMENSION_RATIO: f32 = 1.85;

/// Judges whether buffer dimensions plausibly belong to content rendered
/// at the given reference size.
///
/// Returns `true` when `reference` carries no information (either
/// dimension zero). Otherwise the buffer passes when its aspect ratio is
/// within [`MAX_ASPECT_RATIO_DIFFERENCE`] of the reference's and each
/// dimension is within [[`MIN_DIMENSION_RATIO`], [`MAX_DIMENSION_RATIO`]]
/// of it. The band tolerates dynamic resolution scaling and supersampling
/// while rejecting shadow atlases, UI targets, and other unrelated-sized
/// surfaces.
pub fn check_aspect_ratio(
    reference_width: f32,
    reference_height: f32,
    buffer_width: u32,
    buffer_height: u32,
) -> bool {
    if reference_width == 0.0 || reference_height == 0.0 {
        return true;
    }

    let width = buffer_width as f32;
    let height = buffer_height as f32;
    let aspect_difference = (width / height) - (reference_width / reference_height);
    let width_ratio = width / reference_width;
    let height_ratio = height / reference_height;

    aspect_difference.abs() <= MAX_ASPECT_RATIO_DIFFERENCE
        && (MIN_DIMENSION_RATIO..=MAX_DIMENSION_RATIO).contains(&width_ratio)
        && (MIN_DIMENSION_RATIO..=MAX_DIMENSION_RATIO).contains(&height_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_dimensions_pass() {
        assert!(check_aspect_ratio(1920.0, 1080.0, 1920, 1080));
    }

    #[test]
    fn shadow_atlas_is_rejected() {
        assert!(!check_aspect_ratio(1920.0, 1080.0, 512, 512));
    }

    #[test]
    fn zero_reference_passes_through() {
        assert!(check_aspect_ratio(0.0, 0.0, 512, 512));
        assert!(check_aspect_ratio(0.0, 1080.0, 512, 512));
    }

    #[test]
    fn dynamic_resolution_scaling_is_tolerated() {
        // 80% render scale of 2560x1440.
        assert!(check_aspect_ratio(2048.0, 1152.0, 2560, 1440));
        // Supersampling up to the ratio cap.
        assert!(check_aspect_ratio(1920.0, 1080.0, 3456, 1944));
    }

    #[test]
    fn far_off_scales_are_rejected() {
        // Quarter-resolution buffer: same aspect, dimension ratio below the floor.
        assert!(!check_aspect_ratio(1920.0, 1080.0, 640, 360));
        // Double-resolution buffer: above the ceiling.
        assert!(!check_aspect_ratio(1920.0, 1080.0, 3840, 2160));
    }
}
