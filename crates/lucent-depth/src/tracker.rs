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

//! Per-context accumulation of depth-stencil usage, and the merge protocol
//! that folds executed command lists into their submission target.

use crate::stats::{ClearEvent, DrawStats};
use lucent_core::{ResourceId, Viewport};
use std::collections::HashMap;

/// Everything observed about one depth-stencil resource within one
/// execution context.
///
/// Created lazily the first time the resource is seen bound as a depth
/// target; lives until the context resets.
#[derive(Debug, Clone, Default)]
pub struct DepthStencilSnapshot {
    /// Frame-cumulative stats.
    pub total_stats: DrawStats,
    /// Stats since the last clear.
    pub current_stats: DrawStats,
    /// Every clear observed this frame, in order.
    pub clears: Vec<ClearEvent>,
    /// Whether a backup copy of this resource was issued this frame.
    pub copied_during_frame: bool,
}

/// Statistics owned by one command-recording context.
///
/// One instance exists per command list (owned exclusively by whichever
/// thread records it — no locking) and one per command queue, where the
/// executed lists' states are folded together. The context never knows its
/// parent; only the execute call site does.
#[derive(Debug, Default)]
pub struct CommandListState {
    /// The best clear-time copy candidate seen so far this frame.
    pub best_copy_stats: DrawStats,
    /// Still `true` until the first clear of the frame has consumed the
    /// previous frame's terminal stats (see the clear-time seeding rule).
    pub first_empty_stats: bool,
    /// Set once any indirect draw is recorded; switches frame-end scoring
    /// from vertex counts to draw-call counts.
    pub has_indirect_drawcalls: bool,
    /// The depth-stencil currently bound as render target, if any.
    pub current_depth_stencil: Option<ResourceId>,
    /// The most recently bound viewport.
    pub current_viewport: Viewport,
    /// Accumulators per depth-stencil used in this context.
    pub per_resource: HashMap<ResourceId, DepthStencilSnapshot>,
}

impl CommandListState {
    /// Creates the state for a freshly initialized command list or queue.
    pub fn new() -> Self {
        Self {
            first_empty_stats: true,
            ..Self::default()
        }
    }

    /// Records one draw call against the currently bound depth target.
    ///
    /// No-op when no depth-stencil is bound — such draws cannot affect any
    /// depth buffer and are irrelevant to selection. Callers pre-multiply
    /// `vertices` by the instance count for instanced draws and pass zero
    /// for indirect ones.
    pub fn record_draw(&mut self, vertices: u32) {
        let Some(depth_stencil) = self.current_depth_stencil else {
            return;
        };

        let viewport = self.current_viewport;
        let snapshot = self.per_resource.entry(depth_stencil).or_default();
        snapshot.total_stats.record(vertices, viewport);
        snapshot.current_stats.record(vertices, viewport);
    }

    /// Records the first viewport of a viewport bind.
    pub fn bind_viewport(&mut self, viewport: Viewport) {
        self.current_viewport = viewport;
    }

    /// Switches the bound depth target.
    ///
    /// Callers on aliasing backends must issue the eager backup of the
    /// previous target *before* calling this (see the bind hooks).
    pub fn bind_depth_target(&mut self, resource: Option<ResourceId>) {
        self.current_depth_stencil = resource;
    }

    /// Fetches or lazily creates the accumulator for `resource`.
    pub fn snapshot_mut(&mut self, resource: ResourceId) -> &mut DepthStencilSnapshot {
        self.per_resource.entry(resource).or_default()
    }

    /// Folds an executed child context into this one.
    ///
    /// Purely additive: executing the same child twice doubles its
    /// contribution, which is exactly right for replayed secondary command
    /// lists. Execution order determines the inherited bound target.
    pub fn merge(&mut self, child: &CommandListState) {
        // Last writer wins: the child executed after everything already merged.
        self.current_depth_stencil = child.current_depth_stencil;

        self.first_empty_stats |= child.first_empty_stats;
        self.has_indirect_drawcalls |= child.has_indirect_drawcalls;

        if child.best_copy_stats.vertices > self.best_copy_stats.vertices {
            self.best_copy_stats = child.best_copy_stats;
        }

        for (&resource, snapshot) in &child.per_resource {
            let target = self.per_resource.entry(resource).or_default();
            target.total_stats.accumulate(&snapshot.total_stats);
            target.current_stats.accumulate(&snapshot.current_stats);
            target.clears.extend_from_slice(&snapshot.clears);
            target.copied_during_frame |= snapshot.copied_during_frame;
        }
    }

    /// Clears all statistics; used when a command list begins re-recording.
    pub fn reset(&mut self) {
        self.reset_on_present();
        self.current_depth_stencil = None;
    }

    /// Clears accumulated statistics at a frame boundary.
    ///
    /// Invoked on the queue's aggregate state only, after selection has
    /// consumed the data. The bound depth target carries over — the
    /// application does not rebind it just because a frame ended.
    pub fn reset_on_present(&mut self) {
        self.best_copy_stats = DrawStats::default();
        self.first_empty_stats = true;
        self.has_indirect_drawcalls = false;
        self.per_resource.clear();
    }
}
