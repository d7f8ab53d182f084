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

//! Graphics API identification and per-API behavioral quirks.

/// A backend-agnostic representation of the intercepted graphics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphicsBackendType {
    /// Direct3D 9.
    D3d9,
    /// Direct3D 10.
    D3d10,
    /// Direct3D 11.
    D3d11,
    /// Direct3D 12.
    D3d12,
    /// OpenGL.
    OpenGl,
    /// Vulkan.
    Vulkan,
    /// An unknown or unsupported backend.
    #[default]
    Unknown,
}

/// Behavioral differences between backends, decided once at device init.
///
/// The depth engine is written once against the capability traits;
/// anything a specific API forces it to do differently is expressed here
/// as data rather than as a backend-specific code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackendQuirks {
    /// The API aliases heap memory between frames, so depth contents are
    /// not guaranteed to survive once the target is unbound. Forces an
    /// eager backup copy whenever the bound depth target switches.
    pub eager_backup_on_rebind: bool,
    /// A backup texture is required for the selected buffer even when it
    /// is shader-readable, because its memory may be reused next frame.
    pub force_backup_texture: bool,
}

impl BackendQuirks {
    /// The quirks applying to the given API.
    ///
    /// Explicit-heap APIs may alias placed resources between frames, so
    /// both flags are set there; binding-model APIs keep depth contents
    /// stable until destruction.
    pub const fn for_backend(backend: GraphicsBackendType) -> Self {
        match backend {
            GraphicsBackendType::D3d12 | GraphicsBackendType::Vulkan => Self {
                eager_backup_on_rebind: true,
                force_backup_texture: true,
            },
            _ => Self {
                eager_backup_on_rebind: false,
                force_backup_texture: false,
            },
        }
    }
}
