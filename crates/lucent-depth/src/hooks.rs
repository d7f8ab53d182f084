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

//! The event-hook surface the interception layer drives.
//!
//! Each hook is a thin translation from an intercepted API call onto the
//! tracking and selection state. The interception layer owns one
//! [`CommandListState`] per command list or queue and one
//! [`DeviceDepthState`] per device, and calls these functions from
//! whichever thread the application happens to record on; no hook takes a
//! lock except through the destroyed-resources set.
//!
//! There is deliberately no registry and no parent pointer anywhere: the
//! [`execute_command_list`] call site is the only place that knows which
//! context folds into which.

use crate::selection::{clear_depth, DeviceDepthState};
use crate::tracker::CommandListState;
use lucent_core::{
    BackendQuirks, ClearFlags, CommandRecorder, DepthDetectionSettings, EffectRuntime,
    GraphicsDevice, ResourceDesc, ResourceId, ResourceKind, ResourceUsage, ResourceViewId,
    Viewport,
};

/// Device initialized: builds the selection state with the backend's
/// quirks baked in.
pub fn init_device(
    settings: DepthDetectionSettings,
    device: &dyn GraphicsDevice,
) -> DeviceDepthState {
    DeviceDepthState::new(settings, BackendQuirks::for_backend(device.backend()))
}

/// Device about to be destroyed: releases lucent-owned GPU objects.
pub fn destroy_device(device_state: &mut DeviceDepthState, device: &dyn GraphicsDevice) {
    device_state.release_device_objects(device);
}

/// Command list or queue initialized.
pub fn init_command_list() -> CommandListState {
    CommandListState::new()
}

/// Application is creating a resource: upgrade depth-stencil textures so
/// the selected one can later be sampled by effects.
///
/// Only plain 2D targets qualify; MSAA surfaces can never be sampled
/// directly and are left untouched. Any per-API format rewriting this
/// upgrade requires (typeless formats and the like) is the backend's
/// concern.
pub fn create_resource(desc: &mut ResourceDesc) {
    if desc.samples != 1 || !matches!(desc.kind, ResourceKind::Texture2d | ResourceKind::Surface) {
        return;
    }

    // Keyed on the format rather than declared usage: applications
    // routinely create depth textures without the depth-stencil usage bit
    // and add it through a view later.
    if desc.format.has_depth_aspect() && !desc.usage.contains(ResourceUsage::SHADER_RESOURCE) {
        desc.usage |= ResourceUsage::SHADER_RESOURCE;
    }
}

/// Application destroyed a resource, possibly from a loader thread.
pub fn destroy_resource(device_state: &DeviceDepthState, resource: ResourceId) {
    device_state.notify_resource_destroyed(resource);
}

/// A direct draw call.
///
/// The product saturates: a saturated count still dwarfs every honest
/// candidate, which is the only thing the score is used for.
pub fn draw(ctx: &mut CommandListState, vertices: u32, instances: u32) {
    ctx.record_draw(vertices.saturating_mul(instances));
}

/// An indexed draw call.
pub fn draw_indexed(ctx: &mut CommandListState, indices: u32, instances: u32) {
    ctx.record_draw(indices.saturating_mul(instances));
}

/// An indirect draw or dispatch.
///
/// The real counts live in a GPU buffer, so each sub-draw is recorded with
/// zero vertices and the context is flagged, which flips frame-end scoring
/// over to draw-call counts.
pub fn draw_indirect(ctx: &mut CommandListState, draw_count: u32) {
    for _ in 0..draw_count {
        ctx.record_draw(0);
    }
    ctx.has_indirect_drawcalls = true;
}

/// Viewports bound; only the first one is tracked.
pub fn bind_viewport(ctx: &mut CommandListState, viewports: &[Viewport]) {
    if let Some(&first) = viewports.first() {
        ctx.bind_viewport(first);
    }
}

/// A render pass began with the given depth-stencil attachment view.
pub fn begin_render_pass(
    ctx: &mut CommandListState,
    device_state: &DeviceDepthState,
    device: &dyn GraphicsDevice,
    recorder: &mut dyn CommandRecorder,
    depth_stencil_view: Option<ResourceViewId>,
) {
    bind_depth_stencil(ctx, device_state, device, recorder, depth_stencil_view);
}

/// The bound depth-stencil target changed.
///
/// On backends that alias heap memory between frames the previous target's
/// contents are not guaranteed to survive this switch, so they are backed
/// up eagerly, as if a fullscreen clear had been observed.
pub fn bind_depth_stencil(
    ctx: &mut CommandListState,
    device_state: &DeviceDepthState,
    device: &dyn GraphicsDevice,
    recorder: &mut dyn CommandRecorder,
    depth_stencil_view: Option<ResourceViewId>,
) {
    let resource = depth_stencil_view.map(|view| device.resource_from_view(view));
    let previous = ctx.current_depth_stencil;

    if device_state.quirks().eager_backup_on_rebind && resource != previous && previous.is_some() {
        clear_depth(ctx, device_state, device, recorder, previous, true);
    }

    ctx.bind_depth_target(resource);
}

/// A clear of the depth-stencil attachment bound to the current render pass.
pub fn clear_depth_attachment(
    ctx: &mut CommandListState,
    device_state: &DeviceDepthState,
    device: &dyn GraphicsDevice,
    recorder: &mut dyn CommandRecorder,
    clear_flags: ClearFlags,
) {
    if !should_track_clear(device_state, clear_flags) {
        return;
    }

    let bound = ctx.current_depth_stencil;
    clear_depth(ctx, device_state, device, recorder, bound, false);
}

/// A clear issued directly against a depth-stencil view.
pub fn clear_depth_stencil_view(
    ctx: &mut CommandListState,
    device_state: &DeviceDepthState,
    device: &dyn GraphicsDevice,
    recorder: &mut dyn CommandRecorder,
    view: ResourceViewId,
    clear_flags: ClearFlags,
) {
    if !should_track_clear(device_state, clear_flags) {
        return;
    }

    let resource = device.resource_from_view(view);
    clear_depth(ctx, device_state, device, recorder, Some(resource), false);
}

/// Stencil-only clears leave depth intact, and without the preserve
/// setting no clear needs intercepting at all.
fn should_track_clear(device_state: &DeviceDepthState, clear_flags: ClearFlags) -> bool {
    clear_flags.contains(ClearFlags::DEPTH) && device_state.settings().preserve_depth_buffers
}

/// A command list began re-recording.
pub fn reset_command_list(ctx: &mut CommandListState) {
    ctx.reset();
}

/// A command list was executed into a queue or replayed into another list.
pub fn execute_command_list(parent: &mut CommandListState, child: &CommandListState) {
    parent.merge(child);
}

/// The frame was presented: run selection on the queue's aggregate state.
pub fn present(
    queue_state: &mut CommandListState,
    device_state: &mut DeviceDepthState,
    device: &dyn GraphicsDevice,
    recorder: Option<&mut dyn CommandRecorder>,
    runtime: &mut dyn EffectRuntime,
) {
    device_state.handle_present(queue_state, device, recorder, runtime);
}

/// The swapchain was resized: previous selections are meaningless.
pub fn resize(
    device_state: &mut DeviceDepthState,
    device: &dyn GraphicsDevice,
    runtime: &mut dyn EffectRuntime,
) {
    device_state.teardown_selection(device, runtime);
}
