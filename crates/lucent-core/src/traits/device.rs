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

use crate::api::{
    GraphicsBackendType, ResourceDesc, ResourceId, ResourceViewDesc, ResourceViewId,
    ResourceViewKind,
};
use crate::error::ResourceError;
use std::fmt::Debug;

/// The device-level capability surface of an intercepted graphics API.
///
/// One implementation exists per backend (D3D9 through Vulkan); everything
/// above this trait is written once. Handles passed in always refer to
/// objects the *host application* owns — the only resources lucent itself
/// owns are the ones it created through [`create_resource`] and
/// [`create_resource_view`].
///
/// [`create_resource`]: GraphicsDevice::create_resource
/// [`create_resource_view`]: GraphicsDevice::create_resource_view
pub trait GraphicsDevice: Send + Sync + Debug {
    /// Identifies the intercepted API.
    fn backend(&self) -> GraphicsBackendType;

    /// Queries the current description of a resource.
    fn resource_desc(&self, resource: ResourceId) -> ResourceDesc;

    /// Creates a new resource owned by lucent.
    /// ## Arguments
    /// * `desc` - The dimensions, format, and usage of the resource.
    /// ## Returns
    /// A `Result` containing the handle of the created resource.
    /// ## Errors
    /// * `ResourceError` - If the allocation fails or the format is unsupported.
    fn create_resource(&self, desc: &ResourceDesc) -> Result<ResourceId, ResourceError>;

    /// Destroys a resource previously created through [`GraphicsDevice::create_resource`].
    fn destroy_resource(&self, resource: ResourceId);

    /// Creates a view over `resource` bindable at the given binding point.
    /// ## Errors
    /// * `ResourceError` - If the view cannot be created (e.g. incompatible format).
    fn create_resource_view(
        &self,
        resource: ResourceId,
        kind: ResourceViewKind,
        desc: &ResourceViewDesc,
    ) -> Result<ResourceViewId, ResourceError>;

    /// Destroys a view previously created through [`GraphicsDevice::create_resource_view`].
    ///
    /// The caller is responsible for making sure the view is no longer in
    /// flight, typically via [`GraphicsDevice::wait_idle`].
    fn destroy_resource_view(&self, view: ResourceViewId);

    /// Resolves the resource a view was created over.
    fn resource_from_view(&self, view: ResourceViewId) -> ResourceId;

    /// Blocks until all GPU work submitted so far has finished.
    ///
    /// Rare and expensive; used only before destroying objects that may
    /// still be referenced by in-flight command buffers.
    fn wait_idle(&self);
}
