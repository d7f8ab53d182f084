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

//! Draw and clear statistics accumulated per depth-stencil resource.

use lucent_core::Viewport;

/// Counters accumulated over a window of draw calls.
///
/// Two accumulation windows exist per tracked resource: frame-cumulative
/// totals (used to score candidates at present time) and the stats since
/// the last clear (used to judge individual clears). Reset to zero on
/// clear and at frame reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawStats {
    /// Vertices submitted. Zero-valued for indirect draws, whose counts
    /// live GPU-side and are unknowable at record time.
    pub vertices: u32,
    /// Number of draw calls.
    pub drawcalls: u32,
    /// The viewport bound when the most recent draw was recorded.
    pub last_viewport: Viewport,
}

impl DrawStats {
    /// Accumulates a single draw call.
    ///
    /// Vertex counts saturate at `u32::MAX`; an hour-long frame full of
    /// maximal instanced draws must not panic the recording thread.
    pub fn record(&mut self, vertices: u32, viewport: Viewport) {
        self.vertices = self.vertices.saturating_add(vertices);
        self.drawcalls += 1;
        self.last_viewport = viewport;
    }

    /// Adds `other`'s counters into `self`.
    ///
    /// The viewport is taken from `other` when it actually recorded draws,
    /// keeping the most recently observed one across a merge.
    pub fn accumulate(&mut self, other: &DrawStats) {
        self.vertices = self.vertices.saturating_add(other.vertices);
        self.drawcalls += other.drawcalls;
        if other.drawcalls > 0 {
            self.last_viewport = other.last_viewport;
        }
    }
}

/// An immutable record of one clear observed on a tracked depth-stencil.
///
/// Appended in order within a frame; the sequence position is what the
/// user-facing force-clear-index override addresses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearEvent {
    /// Snapshot of the stats accumulated since the previous clear.
    pub stats: DrawStats,
    /// Whether this "clear" was really a fullscreen draw call (or an
    /// eager backup forced by memory aliasing) rather than an API clear.
    pub fullscreen: bool,
}
