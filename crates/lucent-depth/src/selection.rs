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

//! Per-device selection state: which depth-stencil is "the" scene depth
//! buffer, the backup texture preserving its contents, and the once-per-
//! present selection pass.

use crate::heuristics::check_aspect_ratio;
use crate::stats::{ClearEvent, DrawStats};
use crate::tracker::{CommandListState, DepthStencilSnapshot};
use log::{debug, error};
use lucent_core::{
    BackendQuirks, CommandRecorder, DepthDetectionSettings, EffectRuntime, GraphicsDevice,
    ResourceDesc, ResourceId, ResourceKind, ResourceUsage, ResourceViewDesc, ResourceViewId,
    ResourceViewKind,
};
use std::collections::HashSet;
use std::sync::Mutex;

/// The effect texture name the selected depth data is published under.
pub const DEPTH_TEXTURE_BINDING: &str = "DEPTH";

/// The uniform telling effects whether depth data is available this frame.
pub const DEPTH_AVAILABLE_UNIFORM: &str = "bufready_depth";

/// Depth-buffer selection state for one device.
///
/// Mutated from exactly two places: the end-of-frame selection pass
/// (present time, serialized by the caller per queue) and settings edits.
/// The clear-time path only reads it. The one exception is
/// [`notify_resource_destroyed`], which arbitrary threads may call at any
/// time; that set is mutex-guarded and drained atomically at frame end.
///
/// Invariant: `selected_shader_view`, when present, always views either
/// `backup_texture` or `selected_depth_stencil` — never a stale resource.
///
/// [`notify_resource_destroyed`]: DeviceDepthState::notify_resource_destroyed
#[derive(Debug)]
pub struct DeviceDepthState {
    settings: DepthDetectionSettings,
    quirks: BackendQuirks,
    selected_depth_stencil: Option<ResourceId>,
    selected_shader_view: Option<ResourceViewId>,
    backup_texture: Option<ResourceId>,
    override_depth_stencil: Option<ResourceId>,
    previous_stats: DrawStats,
    destroyed_resources: Mutex<HashSet<ResourceId>>,
    frame_candidates: Vec<(ResourceId, DepthStencilSnapshot)>,
}

impl DeviceDepthState {
    /// Creates the selection state for a newly initialized device.
    pub fn new(settings: DepthDetectionSettings, quirks: BackendQuirks) -> Self {
        Self {
            settings,
            quirks,
            selected_depth_stencil: None,
            selected_shader_view: None,
            backup_texture: None,
            override_depth_stencil: None,
            previous_stats: DrawStats::default(),
            destroyed_resources: Mutex::new(HashSet::new()),
            frame_candidates: Vec::new(),
        }
    }

    /// The active detection settings.
    pub fn settings(&self) -> &DepthDetectionSettings {
        &self.settings
    }

    /// The backend quirks this device was initialized with.
    pub fn quirks(&self) -> BackendQuirks {
        self.quirks
    }

    /// The resource currently selected as the main scene depth buffer.
    pub fn selected_depth_stencil(&self) -> Option<ResourceId> {
        self.selected_depth_stencil
    }

    /// The shader-readable view published to the effect runtime.
    pub fn selected_shader_view(&self) -> Option<ResourceViewId> {
        self.selected_shader_view
    }

    /// The backup texture, when one is allocated.
    pub fn backup_texture(&self) -> Option<ResourceId> {
        self.backup_texture
    }

    /// The candidates observed during the last presented frame, for
    /// display by an overlay.
    pub fn frame_candidates(&self) -> &[(ResourceId, DepthStencilSnapshot)] {
        &self.frame_candidates
    }

    /// Pins selection to a specific resource, bypassing the heuristic, or
    /// returns it to automatic with `None`. Takes effect next present.
    pub fn set_override_depth_stencil(&mut self, resource: Option<ResourceId>) {
        self.override_depth_stencil = resource;
    }

    /// Applies edited settings.
    ///
    /// The current selection is torn down so that the next present
    /// re-evaluates from scratch (the backup-texture requirement may have
    /// changed with the settings).
    pub fn apply_settings(
        &mut self,
        device: &dyn GraphicsDevice,
        runtime: &mut dyn EffectRuntime,
        settings: DepthDetectionSettings,
    ) {
        self.settings = settings;
        self.teardown_selection(device, runtime);
    }

    /// Records that the application destroyed `resource`.
    ///
    /// Safe to call from any thread; the engine will stop considering the
    /// handle at the next frame boundary and never dereferences it again.
    pub fn notify_resource_destroyed(&self, resource: ResourceId) {
        self.destroyed_resources.lock().unwrap().insert(resource);
    }

    /// Drops the current selection and tells the runtime no depth data is
    /// available.
    ///
    /// The shader view may still be referenced by in-flight command
    /// buffers, so the device is drained before it is destroyed. Also used
    /// on swapchain resize, when all bets about last frame's buffers are off.
    pub fn teardown_selection(
        &mut self,
        device: &dyn GraphicsDevice,
        runtime: &mut dyn EffectRuntime,
    ) {
        if let Some(view) = self.selected_shader_view.take() {
            device.wait_idle();
            device.destroy_resource_view(view);
        }
        self.selected_depth_stencil = None;

        runtime.update_texture_binding(DEPTH_TEXTURE_BINDING, None);
        runtime.update_uniform(DEPTH_AVAILABLE_UNIFORM, false);
    }

    /// Releases every GPU object this state owns. Called at device destroy.
    pub fn release_device_objects(&mut self, device: &dyn GraphicsDevice) {
        if let Some(backup) = self.backup_texture.take() {
            device.destroy_resource(backup);
        }
        if let Some(view) = self.selected_shader_view.take() {
            device.destroy_resource_view(view);
        }
        self.selected_depth_stencil = None;
    }

    /// (Re)allocates the backup texture to match `desc`.
    ///
    /// When an allocation with the same dimensions and format already
    /// exists it is reused; otherwise the old texture is destroyed after a
    /// device drain and a fresh one is created. On allocation failure the
    /// backup stays `None` and selection degrades to "no depth data".
    fn update_backup_texture(&mut self, device: &dyn GraphicsDevice, mut desc: ResourceDesc) {
        if let Some(existing) = self.backup_texture {
            let existing_desc = device.resource_desc(existing);
            if desc.width == existing_desc.width
                && desc.height == existing_desc.height
                && desc.format == existing_desc.format
            {
                return;
            }

            // May still be in use on the device.
            device.wait_idle();
            device.destroy_resource(existing);
            self.backup_texture = None;
        }

        desc.kind = ResourceKind::Texture2d;
        desc.samples = 1;
        desc.usage = ResourceUsage::SHADER_RESOURCE | ResourceUsage::COPY_DST;

        match device.create_resource(&desc) {
            Ok(texture) => self.backup_texture = Some(texture),
            Err(err) => error!("Failed to create backup depth-stencil texture: {err}"),
        }
    }

    /// Scores the frame's candidates, commits a selection, and republishes
    /// the chosen depth data. Invoked once per present with the queue's
    /// aggregate state.
    ///
    /// `recorder` is the queue's immediate command recorder, used for the
    /// catch-up copy when the frame's clears all happened before its final
    /// draws; passing `None` skips that copy.
    pub fn handle_present(
        &mut self,
        queue_state: &mut CommandListState,
        device: &dyn GraphicsDevice,
        recorder: Option<&mut dyn CommandRecorder>,
        runtime: &mut dyn EffectRuntime,
    ) {
        let (frame_width, frame_height) = runtime.output_dimensions();

        self.frame_candidates.clear();

        let mut best_match: Option<ResourceId> = None;
        let mut best_desc = ResourceDesc {
            kind: ResourceKind::Texture2d,
            width: 0,
            height: 0,
            samples: 1,
            format: lucent_core::TextureFormat::Other(0),
            usage: ResourceUsage::NONE,
        };
        let mut best_snapshot = DepthStencilSnapshot::default();

        {
            // Read-and-clear must be one critical section: a destruction
            // racing frame-end would otherwise be lost and its handle
            // dereferenced next frame.
            let mut destroyed = self.destroyed_resources.lock().unwrap();

            for (&resource, snapshot) in &queue_state.per_resource {
                if destroyed.contains(&resource) {
                    continue;
                }

                self.frame_candidates.push((resource, snapshot.clone()));

                if snapshot.total_stats.drawcalls == 0 {
                    continue;
                }

                let desc = device.resource_desc(resource);
                if desc.samples > 1 {
                    // Would need a resolve before shaders could read it.
                    continue;
                }

                if self.settings.use_aspect_ratio_heuristics
                    && !check_aspect_ratio(
                        desc.width as f32,
                        desc.height as f32,
                        frame_width,
                        frame_height,
                    )
                {
                    continue;
                }

                let better = if queue_state.has_indirect_drawcalls {
                    // Vertex counts are unreliable once indirect draws are
                    // present, so fall back to draw-call counts.
                    snapshot.total_stats.drawcalls > best_snapshot.total_stats.drawcalls
                } else {
                    snapshot.total_stats.vertices > best_snapshot.total_stats.vertices
                };

                if better {
                    best_match = Some(resource);
                    best_desc = desc;
                    best_snapshot = snapshot.clone();
                }
            }

            if let Some(overridden) = self.override_depth_stencil {
                if destroyed.contains(&overridden) {
                    // The pin would win again next frame once the set is
                    // drained, so it has to go with the resource.
                    self.override_depth_stencil = None;
                } else {
                    best_match = Some(overridden);
                    best_desc = device.resource_desc(overridden);
                    best_snapshot = queue_state
                        .per_resource
                        .get(&overridden)
                        .cloned()
                        .unwrap_or_default();
                }
            }

            destroyed.clear();
        }

        match best_match {
            None => {
                // Unset any selection left over from previous frames.
                if self.selected_depth_stencil.is_some() {
                    self.teardown_selection(device, runtime);
                }
            }
            Some(best_match) => {
                if Some(best_match) != self.selected_depth_stencil {
                    self.commit_selection(best_match, best_desc, device, runtime);
                }

                if self.settings.preserve_depth_buffers {
                    // Terminal stats of this frame seed the first clear of
                    // the next one.
                    self.previous_stats = best_snapshot.current_stats;
                } else if let (Some(backup), Some(recorder)) = (self.backup_texture, recorder) {
                    // The clear-time copy may predate the frame's final
                    // draws; refresh it unless one already happened.
                    if !best_snapshot.copied_during_frame
                        && best_desc.usage.contains(ResourceUsage::COPY_SRC)
                    {
                        recorder.barrier(
                            best_match,
                            ResourceUsage::DEPTH_STENCIL,
                            ResourceUsage::COPY_SRC,
                        );
                        recorder.copy_resource(best_match, backup);
                        recorder.barrier(
                            best_match,
                            ResourceUsage::COPY_SRC,
                            ResourceUsage::DEPTH_STENCIL,
                        );
                    }
                }

                if let Some(snapshot) = queue_state.per_resource.get_mut(&best_match) {
                    snapshot.copied_during_frame = false;
                }
            }
        }

        queue_state.reset_on_present();
    }

    /// Switches the selection to `winner` and publishes a fresh view of it.
    fn commit_selection(
        &mut self,
        winner: ResourceId,
        desc: ResourceDesc,
        device: &dyn GraphicsDevice,
        runtime: &mut dyn EffectRuntime,
    ) {
        // The underlying resource changed, so the old view must go.
        if let Some(view) = self.selected_shader_view.take() {
            device.wait_idle();
            device.destroy_resource_view(view);
        }

        self.selected_depth_stencil = Some(winner);

        let view_desc = ResourceViewDesc::first_slice(desc.format);

        // A backup texture is only needed when clears must be defended
        // against, when the winner itself cannot be sampled, or when the
        // backend aliases its memory across frames.
        let needs_backup = self.settings.preserve_depth_buffers
            || !desc.usage.contains(ResourceUsage::SHADER_RESOURCE)
            || self.quirks.force_backup_texture;

        self.selected_shader_view = if needs_backup {
            self.update_backup_texture(device, desc);

            self.backup_texture.and_then(|backup| {
                device
                    .create_resource_view(backup, ResourceViewKind::ShaderResource, &view_desc)
                    .map_err(|err| error!("Failed to create depth shader view: {err}"))
                    .ok()
            })
        } else {
            if let Some(backup) = self.backup_texture.take() {
                device.destroy_resource(backup);
            }

            device
                .create_resource_view(winner, ResourceViewKind::ShaderResource, &view_desc)
                .map_err(|err| error!("Failed to create depth shader view: {err}"))
                .ok()
        };

        debug!(
            "Depth-stencil selection changed to {winner:?} ({}x{}, backup: {})",
            desc.width,
            desc.height,
            self.backup_texture.is_some()
        );

        runtime.update_texture_binding(DEPTH_TEXTURE_BINDING, self.selected_shader_view);
        runtime.update_uniform(DEPTH_AVAILABLE_UNIFORM, self.selected_shader_view.is_some());
    }
}

/// Decides, at an intercepted clear of `depth_stencil`, whether to copy its
/// contents out before the clear destroys them.
///
/// Runs on the recording thread for every clear of the selected buffer, so
/// everything up to the copy itself is bookkeeping on the context's own
/// state. `fullscreen_draw_call` marks clears that are really fullscreen
/// draws (or eager backups forced by memory aliasing); they always win the
/// backup decision but are excluded from the scoring baseline so they
/// cannot starve regular clears of later frames.
pub fn clear_depth(
    ctx: &mut CommandListState,
    device_state: &DeviceDepthState,
    device: &dyn GraphicsDevice,
    recorder: &mut dyn CommandRecorder,
    depth_stencil: Option<ResourceId>,
    fullscreen_draw_call: bool,
) {
    // Only the currently selected buffer is worth preserving, and only
    // once there is a backup texture to copy into.
    let (Some(depth_stencil), Some(backup)) = (depth_stencil, device_state.backup_texture) else {
        return;
    };
    if Some(depth_stencil) != device_state.selected_depth_stencil {
        return;
    }

    let counters = ctx.per_resource.entry(depth_stencil).or_default();

    // A first clear with nothing drawn yet is clearing data produced at
    // the end of the previous frame, so judge it by last frame's stats.
    if ctx.first_empty_stats && counters.current_stats.drawcalls == 0 {
        counters.current_stats = device_state.previous_stats;
        ctx.first_empty_stats = false;
    }

    // Housekeeping clear, not the main scene.
    if counters.current_stats.drawcalls == 0 {
        return;
    }

    // Draws that only covered a sub-region (a shadow map in a shared
    // atlas, for example) disqualify this accumulation window.
    if device_state.settings.use_aspect_ratio_heuristics {
        let desc = device.resource_desc(depth_stencil);
        let viewport = counters.current_stats.last_viewport;
        if !check_aspect_ratio(viewport.width, viewport.height, desc.width, desc.height) {
            counters.current_stats = DrawStats::default();
            return;
        }
    }

    counters.clears.push(ClearEvent {
        stats: counters.current_stats,
        fullscreen: fullscreen_draw_call,
    });

    let make_backup = if device_state.settings.force_clear_index == 0 {
        // Greater-or-equal so that a buffer re-rendered for a second,
        // equally-weighted pass prefers the later contents.
        fullscreen_draw_call || counters.current_stats.vertices >= ctx.best_copy_stats.vertices
    } else {
        counters.clears.len() == device_state.settings.force_clear_index
    };

    if make_backup {
        if !fullscreen_draw_call {
            ctx.best_copy_stats = counters.current_stats;
        }

        recorder.barrier(
            depth_stencil,
            ResourceUsage::DEPTH_STENCIL,
            ResourceUsage::COPY_SRC,
        );
        recorder.copy_resource(depth_stencil, backup);
        recorder.barrier(
            depth_stencil,
            ResourceUsage::COPY_SRC,
            ResourceUsage::DEPTH_STENCIL,
        );

        counters.copied_during_frame = true;
    }

    // A clear always starts a new accumulation window.
    counters.current_stats = DrawStats::default();
}
