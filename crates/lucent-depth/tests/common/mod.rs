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

//! Shared test doubles: an in-memory graphics device, command recorder,
//! and effect runtime.

// Not every test binary uses every helper.
#![allow(dead_code)]

use lucent_core::{
    EffectRuntime, GraphicsBackendType, GraphicsDevice, ResourceDesc, ResourceError, ResourceId,
    ResourceKind, ResourceUsage, ResourceViewDesc, ResourceViewId, ResourceViewKind, TextureFormat,
    Viewport,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

/// An in-memory [`GraphicsDevice`].
///
/// Application-owned resources are registered through [`register_texture`];
/// once [`remove_resource`] drops one, any further description query for
/// its handle panics — which is exactly how a test catches the engine
/// dereferencing a destroyed handle.
///
/// [`register_texture`]: MockDevice::register_texture
/// [`remove_resource`]: MockDevice::remove_resource
#[derive(Debug)]
pub struct MockDevice {
    backend: GraphicsBackendType,
    descs: Mutex<HashMap<ResourceId, ResourceDesc>>,
    views: Mutex<HashMap<ResourceViewId, ResourceId>>,
    next_id: AtomicU64,
    pub created_resources: Mutex<Vec<ResourceId>>,
    pub destroyed_resources: Mutex<Vec<ResourceId>>,
    pub created_views: Mutex<Vec<ResourceViewId>>,
    pub destroyed_views: Mutex<Vec<ResourceViewId>>,
    pub wait_idle_calls: AtomicU32,
    pub fail_resource_creation: AtomicBool,
}

impl MockDevice {
    pub fn new(backend: GraphicsBackendType) -> Self {
        Self {
            backend,
            descs: Mutex::new(HashMap::new()),
            views: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0x1000),
            created_resources: Mutex::new(Vec::new()),
            destroyed_resources: Mutex::new(Vec::new()),
            created_views: Mutex::new(Vec::new()),
            destroyed_views: Mutex::new(Vec::new()),
            wait_idle_calls: AtomicU32::new(0),
            fail_resource_creation: AtomicBool::new(false),
        }
    }

    fn next_handle(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Registers an application-owned texture and returns its handle.
    pub fn register_texture(&self, desc: ResourceDesc) -> ResourceId {
        let id = ResourceId(self.next_handle());
        self.descs.lock().unwrap().insert(id, desc);
        id
    }

    /// Registers a view over an application-owned texture.
    pub fn register_view(&self, resource: ResourceId) -> ResourceViewId {
        let view = ResourceViewId(self.next_handle());
        self.views.lock().unwrap().insert(view, resource);
        view
    }

    /// Simulates the application destroying a resource.
    pub fn remove_resource(&self, resource: ResourceId) {
        self.descs.lock().unwrap().remove(&resource);
    }

    pub fn created_resource_count(&self) -> usize {
        self.created_resources.lock().unwrap().len()
    }

    pub fn created_view_count(&self) -> usize {
        self.created_views.lock().unwrap().len()
    }
}

impl GraphicsDevice for MockDevice {
    fn backend(&self) -> GraphicsBackendType {
        self.backend
    }

    fn resource_desc(&self, resource: ResourceId) -> ResourceDesc {
        *self
            .descs
            .lock()
            .unwrap()
            .get(&resource)
            .unwrap_or_else(|| panic!("queried description of destroyed resource {resource:?}"))
    }

    fn create_resource(&self, desc: &ResourceDesc) -> Result<ResourceId, ResourceError> {
        if self.fail_resource_creation.load(Ordering::Relaxed) {
            return Err(ResourceError::AllocationFailed {
                what: "texture",
                details: "mock allocation failure".to_string(),
            });
        }

        let id = ResourceId(self.next_handle());
        self.descs.lock().unwrap().insert(id, *desc);
        self.created_resources.lock().unwrap().push(id);
        Ok(id)
    }

    fn destroy_resource(&self, resource: ResourceId) {
        self.descs.lock().unwrap().remove(&resource);
        self.destroyed_resources.lock().unwrap().push(resource);
    }

    fn create_resource_view(
        &self,
        resource: ResourceId,
        _kind: ResourceViewKind,
        _desc: &ResourceViewDesc,
    ) -> Result<ResourceViewId, ResourceError> {
        let view = ResourceViewId(self.next_handle());
        self.views.lock().unwrap().insert(view, resource);
        self.created_views.lock().unwrap().push(view);
        Ok(view)
    }

    fn destroy_resource_view(&self, view: ResourceViewId) {
        self.views.lock().unwrap().remove(&view);
        self.destroyed_views.lock().unwrap().push(view);
    }

    fn resource_from_view(&self, view: ResourceViewId) -> ResourceId {
        *self
            .views
            .lock()
            .unwrap()
            .get(&view)
            .unwrap_or_else(|| panic!("resolved unknown view {view:?}"))
    }

    fn wait_idle(&self) {
        self.wait_idle_calls.fetch_add(1, Ordering::Relaxed);
    }
}

/// One GPU command observed by the [`MockRecorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedOp {
    Barrier {
        resource: ResourceId,
        before: ResourceUsage,
        after: ResourceUsage,
    },
    Copy {
        source: ResourceId,
        destination: ResourceId,
    },
}

#[derive(Debug, Default)]
pub struct MockRecorder {
    pub ops: Vec<RecordedOp>,
}

impl MockRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copies(&self) -> Vec<(ResourceId, ResourceId)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                RecordedOp::Copy {
                    source,
                    destination,
                } => Some((*source, *destination)),
                _ => None,
            })
            .collect()
    }
}

impl lucent_core::CommandRecorder for MockRecorder {
    fn barrier(&mut self, resource: ResourceId, before: ResourceUsage, after: ResourceUsage) {
        self.ops.push(RecordedOp::Barrier {
            resource,
            before,
            after,
        });
    }

    fn copy_resource(&mut self, source: ResourceId, destination: ResourceId) {
        self.ops.push(RecordedOp::Copy {
            source,
            destination,
        });
    }
}

#[derive(Debug)]
pub struct MockRuntime {
    pub width: u32,
    pub height: u32,
    pub bindings: Vec<(String, Option<ResourceViewId>)>,
    pub uniforms: Vec<(String, bool)>,
}

impl MockRuntime {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bindings: Vec::new(),
            uniforms: Vec::new(),
        }
    }

    pub fn bound_depth(&self) -> Option<ResourceViewId> {
        self.bindings.last().and_then(|(_, view)| *view)
    }

    pub fn depth_available(&self) -> bool {
        self.uniforms.last().map(|(_, v)| *v).unwrap_or(false)
    }
}

impl EffectRuntime for MockRuntime {
    fn output_dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn update_texture_binding(&mut self, name: &str, view: Option<ResourceViewId>) {
        self.bindings.push((name.to_string(), view));
    }

    fn update_uniform(&mut self, name: &str, value: bool) {
        self.uniforms.push((name.to_string(), value));
    }
}

/// A plain 2D depth texture descriptor.
pub fn depth_desc(width: u32, height: u32, usage: ResourceUsage) -> ResourceDesc {
    ResourceDesc {
        kind: ResourceKind::Texture2d,
        width,
        height,
        samples: 1,
        format: TextureFormat::Depth24PlusStencil8,
        usage,
    }
}

/// A full-surface viewport matching the given dimensions.
pub fn full_viewport(width: u32, height: u32) -> Viewport {
    Viewport::with_size(width as f32, height as f32)
}
